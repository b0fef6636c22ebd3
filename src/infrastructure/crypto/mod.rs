//! Credential hashing and bearer-token signing

pub mod jwt;
pub mod password;

pub use jwt::{JwtConfig, JwtTokenIssuer, TokenClaims};
pub use password::BcryptHasher;
