//! Backend RPC boundary
//!
//! The gateway owns no business state. Every operation becomes one typed call
//! to the identity, scheduling or billing service over an [`RpcTransport`].

pub mod clients;
pub mod dto;
pub mod error;
pub mod memory;
pub mod reply;
pub mod transport;

pub use clients::{
    AdminClient, AppointmentClient, BackendClients, DoctorClient, PatientClient, PaymentClient,
};
pub use error::RpcError;
pub use memory::{InMemoryTransport, RecordedCall};
pub use reply::Reply;
pub use transport::{Endpoints, HttpRpcTransport, RpcTransport, Service};
