//! # care-relay
//!
//! Real-time chat relay between patients and support operators.
//!
//! Each side has its own [`ConnectionRegistry`]; a message read from one
//! side's socket is broadcast to every live connection of the other side.

pub mod audience;
pub mod broadcast;
pub mod connection;
pub mod hub;
pub mod protocol;
pub mod session;

pub use audience::Audience;
pub use broadcast::{BroadcastReport, BroadcastStats, RelayBroadcaster};
pub use connection::{Connection, ConnectionRegistry, DeliveryError, Outbound};
pub use hub::{RelayHub, RelayStats};
pub use protocol::{ChatMessage, CloseCode, ProtocolError};
pub use session::{accept, run_session};
