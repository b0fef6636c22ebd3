//! Identity module — account lifecycle & authentication
//!
//! Contains the `AccountService` which orchestrates registration, login,
//! profile reads, listing and blocking, including every access rule.

pub mod service;

pub use service::{AccountService, AuthResult, TOKEN_TTL_HOURS};
