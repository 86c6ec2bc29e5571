//! Fan-out of chat messages to a registry

mod broadcaster;

pub use broadcaster::{BroadcastReport, BroadcastStats, RelayBroadcaster};
