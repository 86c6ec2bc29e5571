//! Relay hub
//!
//! Owns both registries and the broadcaster. One hub is shared by every chat
//! session of the process.

use serde::Serialize;

use care_common::RelayConfig;

use crate::audience::Audience;
use crate::broadcast::{BroadcastReport, BroadcastStats, RelayBroadcaster};
use crate::connection::{Connection, ConnectionRegistry};
use crate::protocol::{ChatMessage, CloseCode, ProtocolError};

/// Snapshot of relay activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelayStats {
    pub patients: usize,
    pub support: usize,
    pub broadcast: BroadcastStats,
}

#[derive(Debug)]
pub struct RelayHub {
    patients: ConnectionRegistry,
    support: ConnectionRegistry,
    broadcaster: RelayBroadcaster,
    outbound_buffer: usize,
}

impl RelayHub {
    #[must_use]
    pub fn new(config: &RelayConfig) -> Self {
        Self::with_buffer(config.outbound_buffer)
    }

    /// Hub whose connections queue at most `outbound_buffer` frames
    #[must_use]
    pub fn with_buffer(outbound_buffer: usize) -> Self {
        Self {
            patients: ConnectionRegistry::new(Audience::Patient),
            support: ConnectionRegistry::new(Audience::Support),
            broadcaster: RelayBroadcaster::new(),
            outbound_buffer: outbound_buffer.max(1),
        }
    }

    pub fn registry(&self, audience: Audience) -> &ConnectionRegistry {
        match audience {
            Audience::Patient => &self.patients,
            Audience::Support => &self.support,
        }
    }

    pub fn outbound_buffer(&self) -> usize {
        self.outbound_buffer
    }

    /// Forward a message from `from` to every live connection of the other audience
    ///
    /// # Errors
    /// Returns an error if the message cannot be serialized
    pub fn relay(
        &self,
        from: &Connection,
        message: ChatMessage,
    ) -> Result<BroadcastReport, ProtocolError> {
        let message = message.stamped(from.audience());
        let target = self.registry(from.audience().opposite());
        self.broadcaster.broadcast(&message, target)
    }

    /// Close every live connection of both audiences
    pub fn close_all(&self, code: CloseCode) {
        for audience in Audience::ALL {
            let registry = self.registry(audience);
            for connection in registry.snapshot() {
                connection.close(code);
                registry.remove(&connection);
            }
        }
    }

    pub fn stats(&self) -> RelayStats {
        RelayStats {
            patients: self.patients.len(),
            support: self.support.len(),
            broadcast: self.broadcaster.stats(),
        }
    }
}

impl Default for RelayHub {
    fn default() -> Self {
        Self::new(&RelayConfig::default())
    }
}
