//! Chat relay integration tests
//!
//! Patients connect to `/api/v1/patient/ws`, support staff to
//! `/api/v1/admin/ws`; every message crosses to the other side only.
//!
//! Run with: cargo test -p integration-tests --test chat_tests

use std::time::Duration;

use integration_tests::{ChatClient, Credentials, TestServer};
use tokio_tungstenite::tungstenite::Message;

const PATIENT_WS: &str = "/api/v1/patient/ws";
const SUPPORT_WS: &str = "/api/v1/admin/ws";

const QUIET: Duration = Duration::from_millis(300);

#[tokio::test]
async fn test_patient_message_reaches_support_only() {
    let server = TestServer::start().await.unwrap();

    let mut patient = ChatClient::connect(&server.ws_url(PATIENT_WS), None).await.unwrap();
    let mut other_patient = ChatClient::connect(&server.ws_url(PATIENT_WS), None).await.unwrap();
    let mut support = ChatClient::connect(&server.ws_url(SUPPORT_WS), None).await.unwrap();
    server.wait_for_connections(2, 1).await.unwrap();

    patient.say("asha", "my appointment link is broken").await.unwrap();

    let received = support.next_message().await.unwrap();
    assert_eq!(received["username"], "asha");
    assert_eq!(received["text"], "my appointment link is broken");
    assert_eq!(received["sender"], "patient");

    other_patient.expect_silence(QUIET).await.unwrap();
    patient.expect_silence(QUIET).await.unwrap();
}

#[tokio::test]
async fn test_support_reply_reaches_every_patient() {
    let server = TestServer::start().await.unwrap();

    let mut first = ChatClient::connect(&server.ws_url(PATIENT_WS), None).await.unwrap();
    let mut second = ChatClient::connect(&server.ws_url(PATIENT_WS), None).await.unwrap();
    let mut support = ChatClient::connect(&server.ws_url(SUPPORT_WS), None).await.unwrap();
    server.wait_for_connections(2, 1).await.unwrap();

    support.say("desk", "we are looking into it").await.unwrap();

    for patient in [&mut first, &mut second] {
        let received = patient.next_message().await.unwrap();
        assert_eq!(received["text"], "we are looking into it");
        assert_eq!(received["sender"], "support");
    }
    support.expect_silence(QUIET).await.unwrap();
}

#[tokio::test]
async fn test_spoofed_sender_is_overwritten() {
    let server = TestServer::start().await.unwrap();

    let mut patient = ChatClient::connect(&server.ws_url(PATIENT_WS), None).await.unwrap();
    let mut support = ChatClient::connect(&server.ws_url(SUPPORT_WS), None).await.unwrap();
    server.wait_for_connections(1, 1).await.unwrap();

    let frame = r#"{"username":"mallory","text":"hi","sender":"support"}"#;
    patient.send(Message::Text(frame.to_string())).await.unwrap();

    let received = support.next_message().await.unwrap();
    assert_eq!(received["sender"], "patient");
}

#[tokio::test]
async fn test_disconnect_removes_connection() {
    let server = TestServer::start().await.unwrap();

    let patient = ChatClient::connect(&server.ws_url(PATIENT_WS), None).await.unwrap();
    let mut support = ChatClient::connect(&server.ws_url(SUPPORT_WS), None).await.unwrap();
    server.wait_for_connections(1, 1).await.unwrap();

    let stats = server.relay_stats().await.unwrap();
    assert_eq!(stats["patients"], 1);
    assert_eq!(stats["support"], 1);

    patient.close().await.unwrap();
    server.wait_for_connections(0, 1).await.unwrap();

    // Nobody is left to receive this
    support.say("desk", "anyone there?").await.unwrap();
    support.expect_silence(QUIET).await.unwrap();
}

#[tokio::test]
async fn test_malformed_frame_closes_sender() {
    let server = TestServer::start().await.unwrap();

    let mut patient = ChatClient::connect(&server.ws_url(PATIENT_WS), None).await.unwrap();
    let mut support = ChatClient::connect(&server.ws_url(SUPPORT_WS), None).await.unwrap();
    server.wait_for_connections(1, 1).await.unwrap();

    patient
        .send(Message::Text("not json".to_string()))
        .await
        .unwrap();

    let frame = patient.closed().await.unwrap().unwrap();
    assert_eq!(u16::from(frame.code), 1007);

    server.wait_for_connections(0, 1).await.unwrap();
    support.expect_silence(QUIET).await.unwrap();
}

#[tokio::test]
async fn test_signed_in_patient_can_chat() {
    let server = TestServer::start().await.unwrap();
    let cookie = server.sign_in("patient", &Credentials::patient()).await.unwrap();

    let mut patient = ChatClient::connect(&server.ws_url(PATIENT_WS), Some(&cookie))
        .await
        .unwrap();
    let mut support = ChatClient::connect(&server.ws_url(SUPPORT_WS), None).await.unwrap();
    server.wait_for_connections(1, 1).await.unwrap();

    patient.say("asha", "hello").await.unwrap();
    assert_eq!(support.next_message().await.unwrap()["text"], "hello");
}

#[tokio::test]
async fn test_invalid_cookie_does_not_block_chat() {
    let server = TestServer::start().await.unwrap();

    let mut support =
        ChatClient::connect(&server.ws_url(SUPPORT_WS), Some("admintoken=garbage"))
            .await
            .unwrap();
    let mut patient = ChatClient::connect(&server.ws_url(PATIENT_WS), None).await.unwrap();
    server.wait_for_connections(1, 1).await.unwrap();

    support.say("desk", "hi").await.unwrap();
    assert_eq!(patient.next_message().await.unwrap()["sender"], "support");
}

#[tokio::test]
async fn test_shutdown_closes_chat_connections() {
    let server = TestServer::start().await.unwrap();

    let mut patient = ChatClient::connect(&server.ws_url(PATIENT_WS), None).await.unwrap();
    let mut support = ChatClient::connect(&server.ws_url(SUPPORT_WS), None).await.unwrap();
    server.wait_for_connections(1, 1).await.unwrap();

    let relay = server.relay.clone();
    server.shutdown().await.unwrap();

    for client in [&mut patient, &mut support] {
        let frame = client.closed().await.unwrap().unwrap();
        assert_eq!(u16::from(frame.code), 1001);
    }
    assert_eq!(relay.stats().patients, 0);
    assert_eq!(relay.stats().support, 0);
}
