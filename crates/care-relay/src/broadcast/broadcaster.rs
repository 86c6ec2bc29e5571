//! Relay broadcaster
//!
//! Serializes a message once and queues it on every connection currently in
//! the target registry. Delivery is best effort and at most once: a recipient
//! whose queue is full or closed is closed and dropped from the registry, and
//! the remaining recipients are still attempted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::connection::{ConnectionRegistry, DeliveryError, Outbound};
use crate::protocol::{ChatMessage, CloseCode, ProtocolError};

/// Outcome of one broadcast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections the frame was queued on
    pub delivered: usize,
    /// Connections closed and removed because delivery failed
    pub pruned: usize,
}

/// Running totals since startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BroadcastStats {
    pub messages: u64,
    pub delivered: u64,
    pub pruned: u64,
}

#[derive(Debug, Default)]
pub struct RelayBroadcaster {
    messages: AtomicU64,
    delivered: AtomicU64,
    pruned: AtomicU64,
}

impl RelayBroadcaster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Broadcast a chat message to every live connection of `target`
    ///
    /// # Errors
    /// Returns an error only if the message cannot be serialized; no
    /// recipient is attempted in that case
    pub fn broadcast(
        &self,
        message: &ChatMessage,
        target: &ConnectionRegistry,
    ) -> Result<BroadcastReport, ProtocolError> {
        let frame: Outbound = Arc::from(message.to_json()?);
        Ok(self.broadcast_frame(&frame, target))
    }

    /// Broadcast an already serialized frame
    pub fn broadcast_frame(&self, frame: &Outbound, target: &ConnectionRegistry) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        for connection in target.snapshot() {
            match connection.try_deliver(frame) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    let code = match e {
                        DeliveryError::Stalled => CloseCode::Stalled,
                        DeliveryError::Closed => CloseCode::GoingAway,
                    };
                    tracing::warn!(
                        connection_id = %connection.id(),
                        audience = %target.audience(),
                        error = %e,
                        "Dropping unreachable chat connection"
                    );
                    connection.close(code);
                    if target.remove(&connection) {
                        report.pruned += 1;
                    }
                }
            }
        }

        self.messages.fetch_add(1, Ordering::Relaxed);
        self.delivered
            .fetch_add(report.delivered as u64, Ordering::Relaxed);
        self.pruned.fetch_add(report.pruned as u64, Ordering::Relaxed);

        tracing::debug!(
            audience = %target.audience(),
            delivered = report.delivered,
            pruned = report.pruned,
            "Chat message broadcast"
        );

        report
    }

    pub fn stats(&self) -> BroadcastStats {
        BroadcastStats {
            messages: self.messages.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            pruned: self.pruned.load(Ordering::Relaxed),
        }
    }
}
