//! Outbound ports — credential hashing and bearer-token signing
//!
//! Both are pure, synchronous computations. Hashing is CPU-heavy on
//! purpose, so async callers should run it on a blocking thread.

use chrono::Duration;
use thiserror::Error;

use crate::domain::{AccountRole, DomainResult};

// ── PasswordHasher ─────────────────────────────────────────────

/// One-way salted hashing of plaintext passwords.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> DomainResult<String>;

    /// `false` for a mismatch and for a hash that cannot be parsed.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

// ── TokenIssuer ────────────────────────────────────────────────

/// Identity asserted by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    pub subject_id: String,
    pub role: AccountRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
}

/// Issues and verifies signed, time-limited identity assertions.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, claims: &IdentityClaims, ttl: Duration) -> DomainResult<String>;

    fn verify(&self, token: &str) -> Result<IdentityClaims, TokenError>;
}
