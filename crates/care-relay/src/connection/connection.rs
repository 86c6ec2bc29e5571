//! A single chat connection
//!
//! The handle is what registries store and broadcasts write to. The socket
//! itself stays with the session task; the handle only reaches it through a
//! bounded outbound queue and a cancellation token.

use std::sync::{Arc, OnceLock};
use std::time::Instant;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::audience::Audience;
use crate::protocol::CloseCode;

/// Serialized frame shared by every recipient of one broadcast
pub type Outbound = Arc<str>;

/// Why a frame could not be queued for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The outbound queue is full
    #[error("outbound queue full")]
    Stalled,
    /// The writer is gone
    #[error("connection closed")]
    Closed,
}

pub struct Connection {
    id: Uuid,
    audience: Audience,
    /// Authenticated subject, when the upgrade request carried a session
    subject: Option<String>,
    sender: mpsc::Sender<Outbound>,
    cancel: CancellationToken,
    /// First close reason wins
    close_code: OnceLock<CloseCode>,
    opened_at: Instant,
}

impl Connection {
    pub fn new(
        audience: Audience,
        subject: Option<String>,
        sender: mpsc::Sender<Outbound>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            audience,
            subject,
            sender,
            cancel: CancellationToken::new(),
            close_code: OnceLock::new(),
            opened_at: Instant::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn audience(&self) -> Audience {
        self.audience
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Queue a frame without waiting
    ///
    /// # Errors
    /// `Stalled` when the queue is full, `Closed` when the writer has exited
    pub fn try_deliver(&self, frame: &Outbound) -> Result<(), DeliveryError> {
        if self.is_closed() {
            return Err(DeliveryError::Closed);
        }

        self.sender.try_send(frame.clone()).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DeliveryError::Stalled,
            mpsc::error::TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }

    /// Close the connection; later calls keep the first code
    ///
    /// Returns `true` only for the call that actually closed it.
    pub fn close(&self, code: CloseCode) -> bool {
        let first = self.close_code.set(code).is_ok();
        self.cancel.cancel();
        first
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves once the connection has been closed
    pub async fn closed(&self) {
        self.cancel.cancelled().await;
    }

    /// Code the connection was closed with, if closed
    pub fn close_code(&self) -> Option<CloseCode> {
        self.close_code.get().copied()
    }

    pub fn age(&self) -> std::time::Duration {
        self.opened_at.elapsed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("audience", &self.audience)
            .field("subject", &self.subject)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
