//! Test helpers for integration tests
//!
//! Provides a gateway spawned on an ephemeral port, HTTP helpers that carry
//! session cookies explicitly, and WebSocket chat clients.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use care_api::{create_app, create_app_state, serve};
use care_common::{
    AppConfig, AppError, AppSettings, BackendConfig, CorsConfig, Environment, JwtConfig,
    RelayConfig, ServerConfig,
};
use care_relay::RelayHub;
use futures_util::{SinkExt, StreamExt};
use reqwest::{header, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        client::IntoClientRequest, http::HeaderValue, protocol::CloseFrame, Message,
    },
    MaybeTlsStream, WebSocketStream,
};

use crate::fixtures::{Credentials, StubBackend};

pub const TEST_SECRET: &str = "integration-secret-that-is-long-enough";

/// How long a test waits for a chat frame before failing
pub const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

/// Gateway configuration pointing every service at `backend`
pub fn test_config(backend: &str) -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "care-gateway-it".to_string(),
            env: Environment::Development,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            ttl_seconds: 7200,
        },
        backend: BackendConfig {
            user_endpoint: backend.to_string(),
            appointment_endpoint: backend.to_string(),
            payment_endpoint: backend.to_string(),
            timeout_seconds: 5,
        },
        cors: CorsConfig::default(),
        relay: RelayConfig::default(),
    }
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub backend: StubBackend,
    pub relay: Arc<RelayHub>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<(), AppError>>,
}

impl TestServer {
    /// Start a stub backend and a gateway in front of it
    pub async fn start() -> Result<Self> {
        let backend = StubBackend::start().await?;
        let state = create_app_state(test_config(&backend.base_url()))?;
        let relay = state.relay().clone();
        let app = create_app(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown, signal) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve(listener, app, relay.clone(), async move {
            signal.await.ok();
        }));

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            backend,
            relay,
            shutdown: Some(shutdown),
            handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{path}", self.addr)
    }

    /// Make a GET request, optionally with a session cookie
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Result<Response> {
        let mut request = self.client.get(format!("{}{path}", self.base_url()));
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        Ok(request.send().await?)
    }

    /// Make a POST request with a JSON body, optionally with a session cookie
    pub async fn post<T: Serialize>(
        &self,
        path: &str,
        cookie: Option<&str>,
        body: &T,
    ) -> Result<Response> {
        let mut request = self
            .client
            .post(format!("{}{path}", self.base_url()))
            .json(body);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        Ok(request.send().await?)
    }

    /// Sign in at `/api/v1/{prefix}/signin` and return the `name=value` cookie pair
    pub async fn sign_in(&self, prefix: &str, credentials: &Credentials) -> Result<String> {
        let response = self
            .post(&format!("/api/v1/{prefix}/signin"), None, credentials)
            .await?;
        let status = response.status();
        let cookie = session_cookie(&response)
            .with_context(|| format!("{prefix} sign-in returned {status} without a cookie"))?;
        Ok(cookie)
    }

    /// Live connection counts as reported by the gateway
    pub async fn relay_stats(&self) -> Result<Value> {
        let response = self.get("/health/relay", None).await?;
        assert_json(response, StatusCode::OK).await
    }

    /// Wait until the registries hold the given counts
    pub async fn wait_for_connections(&self, patients: usize, support: usize) -> Result<()> {
        let deadline = tokio::time::Instant::now() + FRAME_TIMEOUT;
        loop {
            let stats = self.relay.stats();
            if stats.patients == patients && stats.support == support {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                anyhow::bail!(
                    "expected {patients} patients and {support} support, have {} and {}",
                    stats.patients,
                    stats.support
                );
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Trigger graceful shutdown and wait for the server to stop
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.send(()).ok();
        }
        tokio::time::timeout(Duration::from_secs(10), &mut self.handle)
            .await
            .context("server did not stop")??
            .map_err(|e| anyhow::anyhow!("server error: {e}"))
    }
}

/// The `name=value` part of the response's first `Set-Cookie`
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .next()
        .map(|pair| pair.trim().to_string())
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// A connected chat WebSocket
pub struct ChatClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl ChatClient {
    /// Connect to `url`, sending `cookie` with the upgrade request if given
    pub async fn connect(url: &str, cookie: Option<&str>) -> Result<Self> {
        let mut request = url.into_client_request()?;
        if let Some(cookie) = cookie {
            request
                .headers_mut()
                .insert("cookie", HeaderValue::from_str(cookie)?);
        }
        let (stream, _) = connect_async(request).await?;
        Ok(Self { stream })
    }

    /// Send a chat message
    pub async fn say(&mut self, username: &str, text: &str) -> Result<()> {
        let frame = json!({"username": username, "text": text}).to_string();
        self.stream.send(Message::Text(frame)).await?;
        Ok(())
    }

    /// Send a raw frame
    pub async fn send(&mut self, message: Message) -> Result<()> {
        self.stream.send(message).await?;
        Ok(())
    }

    /// Next chat message, skipping control frames
    pub async fn next_message(&mut self) -> Result<Value> {
        loop {
            let frame = tokio::time::timeout(FRAME_TIMEOUT, self.stream.next())
                .await
                .context("timed out waiting for a chat message")?
                .context("stream ended")??;
            match frame {
                Message::Text(text) => return Ok(serde_json::from_str(&text)?),
                Message::Close(frame) => anyhow::bail!("connection closed: {frame:?}"),
                _ => {}
            }
        }
    }

    /// Assert nothing arrives within `wait`
    pub async fn expect_silence(&mut self, wait: Duration) -> Result<()> {
        match tokio::time::timeout(wait, self.stream.next()).await {
            Err(_) => Ok(()),
            Ok(frame) => anyhow::bail!("unexpected frame: {frame:?}"),
        }
    }

    /// Wait for the server's close frame
    pub async fn closed(&mut self) -> Result<Option<CloseFrame<'static>>> {
        loop {
            let frame = tokio::time::timeout(FRAME_TIMEOUT, self.stream.next())
                .await
                .context("timed out waiting for close")?;
            match frame {
                Some(Ok(Message::Close(frame))) => return Ok(frame.map(CloseFrame::into_owned)),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(None),
            }
        }
    }

    /// Close from the client side
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}
