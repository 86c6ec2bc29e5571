//! Chat session lifecycle

mod handler;

pub use handler::{accept, run_session};
