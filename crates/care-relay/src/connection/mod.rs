//! Live chat connections and their registries

mod connection;
mod registry;

pub use connection::{Connection, DeliveryError, Outbound};
pub use registry::ConnectionRegistry;
