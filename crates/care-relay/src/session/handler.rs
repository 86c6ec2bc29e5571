//! Chat session handler
//!
//! One upgraded socket is served by two tasks: the read loop (this task) and
//! a writer draining the connection's outbound queue into the socket. The
//! connection is registered for exactly as long as the read loop runs.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::Response,
};
use futures_util::{stream::SplitStream, Sink, SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::audience::Audience;
use crate::connection::{Connection, Outbound};
use crate::hub::RelayHub;
use crate::protocol::{ChatMessage, CloseCode};

/// A frame the peer has not accepted within this window marks it as stalled
const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Budget for the closing handshake
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Upgrade the request and run a chat session for `audience`
///
/// `subject` is the authenticated principal, if the request carried one.
pub fn accept(
    ws: WebSocketUpgrade,
    hub: Arc<RelayHub>,
    audience: Audience,
    subject: Option<String>,
) -> Response {
    ws.on_failed_upgrade(move |e| {
        tracing::warn!(audience = %audience, error = %e, "Chat upgrade failed");
    })
    .on_upgrade(move |socket| run_session(hub, audience, subject, socket))
}

/// Keeps a connection registered until dropped
///
/// Dropping closes the connection and removes it, on every exit path of the
/// session including task cancellation.
struct Registration {
    hub: Arc<RelayHub>,
    connection: Arc<Connection>,
}

impl Registration {
    fn enter(hub: Arc<RelayHub>, connection: Arc<Connection>) -> Self {
        hub.registry(connection.audience()).register(&connection);
        Self { hub, connection }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.connection.close(CloseCode::GoingAway);
        self.hub
            .registry(self.connection.audience())
            .remove(&self.connection);
    }
}

/// Serve an upgraded socket until it closes
pub async fn run_session(
    hub: Arc<RelayHub>,
    audience: Audience,
    subject: Option<String>,
    socket: WebSocket,
) {
    let (tx, rx) = mpsc::channel::<Outbound>(hub.outbound_buffer());
    let connection = Connection::new(audience, subject, tx);
    let registration = Registration::enter(hub.clone(), connection.clone());

    tracing::info!(
        connection_id = %connection.id(),
        audience = %audience,
        subject = ?connection.subject(),
        "Chat connection opened"
    );

    let (sink, stream) = socket.split();
    let writer = tokio::spawn(write_loop(connection.clone(), rx, sink));

    let code = read_loop(&hub, &connection, stream).await;
    connection.close(code);
    drop(registration);

    if let Err(e) = writer.await {
        tracing::warn!(connection_id = %connection.id(), error = %e, "Chat writer task failed");
    }

    tracing::info!(
        connection_id = %connection.id(),
        audience = %audience,
        close_code = %connection.close_code().unwrap_or(code),
        age_ms = connection.age().as_millis() as u64,
        "Chat connection closed"
    );
}

/// Read frames and relay them until the connection must close
async fn read_loop(
    hub: &RelayHub,
    connection: &Connection,
    mut stream: SplitStream<WebSocket>,
) -> CloseCode {
    loop {
        let frame = tokio::select! {
            () = connection.closed() => {
                return connection.close_code().unwrap_or(CloseCode::GoingAway);
            }
            frame = stream.next() => frame,
        };

        match frame {
            Some(Ok(Message::Text(text))) => {
                let message = match ChatMessage::parse(&text) {
                    Ok(message) => message,
                    Err(e) => {
                        tracing::debug!(
                            connection_id = %connection.id(),
                            error = %e,
                            "Closing chat connection on malformed frame"
                        );
                        return CloseCode::InvalidPayload;
                    }
                };

                if let Err(e) = hub.relay(connection, message) {
                    tracing::error!(connection_id = %connection.id(), error = %e, "Relay failed");
                    return CloseCode::InternalError;
                }
            }
            Some(Ok(Message::Binary(_))) => {
                tracing::debug!(connection_id = %connection.id(), "Binary frames not supported");
                return CloseCode::UnsupportedData;
            }
            // Pong is handled automatically by axum
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
            Some(Ok(Message::Close(_))) | None => return CloseCode::Normal,
            Some(Err(e)) => {
                tracing::debug!(connection_id = %connection.id(), error = %e, "Chat read failed");
                return CloseCode::GoingAway;
            }
        }
    }
}

/// Drain the outbound queue into the socket, then send a close frame
///
/// Every write is bounded and gives way to `connection.closed()`, so a peer
/// that stops reading cannot keep the task or the socket alive.
async fn write_loop<S>(connection: Arc<Connection>, mut rx: mpsc::Receiver<Outbound>, mut sink: S)
where
    S: Sink<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    loop {
        let frame = tokio::select! {
            biased;
            () = connection.closed() => break,
            frame = rx.recv() => match frame {
                Some(frame) => frame,
                None => break,
            },
        };

        let sent = tokio::select! {
            biased;
            () = connection.closed() => break,
            sent = tokio::time::timeout(
                WRITE_TIMEOUT,
                sink.send(Message::Text(frame.to_string())),
            ) => sent,
        };

        match sent {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::debug!(connection_id = %connection.id(), error = %e, "Chat write failed");
                connection.close(CloseCode::GoingAway);
                break;
            }
            Err(_) => {
                tracing::warn!(connection_id = %connection.id(), "Chat write timed out");
                connection.close(CloseCode::Stalled);
                break;
            }
        }
    }

    // The peer may already be gone, or may never drain the close frame
    let code = connection.close_code().unwrap_or(CloseCode::Normal);
    let closing = async {
        let _ = sink.send(Message::Close(Some(code.frame()))).await;
        let _ = sink.close().await;
    };
    if tokio::time::timeout(CLOSE_TIMEOUT, closing).await.is_err() {
        tracing::debug!(
            connection_id = %connection.id(),
            "Close frame not accepted, dropping socket"
        );
    }
}
