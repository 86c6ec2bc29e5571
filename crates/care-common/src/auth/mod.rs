//! Session token issuance and verification

mod clock;
mod role;
mod token;

pub use clock::{Clock, ManualClock, SystemClock};
pub use role::{ParseRoleError, Role};
pub use token::{Claims, TokenService};
