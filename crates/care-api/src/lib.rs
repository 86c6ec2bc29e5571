//! # care-api
//!
//! HTTP and WebSocket edge gateway built on Axum. Browser and mobile clients
//! talk to this crate; business operations are forwarded to the backend
//! services and chat traffic is relayed between patients and support staff.

pub mod auth;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
mod test_support;

pub use server::{create_app, create_app_state, run, serve};
pub use state::AppState;
