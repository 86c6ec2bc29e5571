//! Chat message frames

use serde::{Deserialize, Serialize};

use crate::audience::Audience;

/// One chat line as exchanged over the socket. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sender: String,
}

impl ChatMessage {
    pub fn new(username: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            text: text.into(),
            sender: String::new(),
        }
    }

    /// Parse a text frame
    ///
    /// # Errors
    /// Returns `ProtocolError::Malformed` if the frame is not a JSON chat message
    pub fn parse(frame: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(frame).map_err(ProtocolError::Malformed)
    }

    /// Serialize to a text frame
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }

    /// Overwrite the sender tag with the audience the message arrived from
    #[must_use]
    pub fn stamped(mut self, from: Audience) -> Self {
        self.sender = from.as_str().to_string();
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Malformed chat frame: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Failed to encode chat frame: {0}")]
    Encode(#[source] serde_json::Error),
}
