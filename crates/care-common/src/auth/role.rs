//! Principal roles
//!
//! Every session token asserts exactly one of these roles, and every protected
//! route is scoped to exactly one of them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role carried by a session token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A patient using the public portal
    Patient,
    /// A doctor managing schedules and prescriptions
    Doctor,
    /// Hospital staff, also acting as the support desk in chat
    Admin,
}

impl Role {
    /// All roles, in a stable order
    pub const ALL: [Role; 3] = [Role::Patient, Role::Doctor, Role::Admin];

    /// Lowercase wire name of the role
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
            Self::Admin => "admin",
        }
    }

    /// Name of the cookie carrying this role's session token (`"<role>token"`)
    #[must_use]
    pub fn cookie_name(&self) -> &'static str {
        match self {
            Self::Patient => "patienttoken",
            Self::Doctor => "doctortoken",
            Self::Admin => "admintoken",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known role
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "patient" => Ok(Self::Patient),
            "doctor" => Ok(Self::Doctor),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}
