//! Chat audiences
//!
//! The relay joins two disjoint sets of participants. Patients initiate
//! conversations and support operators respond; a message from one side is
//! only ever delivered to the other.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// Initiators
    Patient,
    /// Responders
    Support,
}

impl Audience {
    pub const ALL: [Audience; 2] = [Audience::Patient, Audience::Support];

    /// The audience that receives this audience's messages
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Patient => Self::Support,
            Self::Support => Self::Patient,
        }
    }

    /// Tag stamped into the `sender` field of relayed messages
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Support => "support",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
