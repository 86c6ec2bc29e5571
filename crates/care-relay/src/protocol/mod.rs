//! Chat wire protocol
//!
//! JSON text frames carrying a [`ChatMessage`]; anything else closes the
//! connection with a [`CloseCode`].

mod close_codes;
mod message;

pub use close_codes::CloseCode;
pub use message::{ChatMessage, ProtocolError};
