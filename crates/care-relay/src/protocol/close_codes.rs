//! WebSocket close codes used by the relay

use axum::extract::ws::CloseFrame;

/// Reason a chat connection was closed by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum CloseCode {
    /// Peer closed or session finished normally
    Normal = 1000,
    /// Gateway is shutting the connection down
    GoingAway = 1001,
    /// Binary frame received
    UnsupportedData = 1003,
    /// Text frame was not a chat message
    InvalidPayload = 1007,
    /// The gateway failed to process a frame
    InternalError = 1011,
    /// Outbound queue full or closed; the peer stopped reading
    Stalled = 4008,
}

impl CloseCode {
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Normal => "closed",
            Self::GoingAway => "going away",
            Self::UnsupportedData => "binary frames are not supported",
            Self::InvalidPayload => "malformed chat message",
            Self::InternalError => "internal error",
            Self::Stalled => "connection stalled",
        }
    }

    /// Close frame announcing this code to the peer
    #[must_use]
    pub fn frame(self) -> CloseFrame<'static> {
        CloseFrame {
            code: self.as_u16(),
            reason: self.reason().into(),
        }
    }
}

impl std::fmt::Display for CloseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.as_u16(), self.reason())
    }
}
