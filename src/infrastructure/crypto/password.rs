//! Password hashing utilities

use bcrypt::{hash, verify};
use tracing::warn;

use crate::domain::{DomainError, DomainResult, PasswordHasher};

/// Work factor used unless configured otherwise.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// bcrypt-backed [`PasswordHasher`].
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> DomainResult<String> {
        hash(plaintext, self.cost)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        match verify(plaintext, hash) {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Stored password hash could not be checked: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = BcryptHasher::new(4);
        let hashed = hasher.hash("secure_password_123").unwrap();

        assert_ne!(hashed, "secure_password_123");
        assert!(hasher.verify("secure_password_123", &hashed));
        assert!(!hasher.verify("wrong_password", &hashed));
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = BcryptHasher::new(4);
        let a = hasher.hash("same-password").unwrap();
        let b = hasher.hash("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn hash_embeds_cost() {
        let hashed = BcryptHasher::default().hash("pw123456").unwrap();
        assert!(hashed.starts_with("$2b$10$"));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!BcryptHasher::new(4).verify("anything", "not-a-bcrypt-hash"));
    }

    #[test]
    fn invalid_cost_is_an_internal_error() {
        let err = BcryptHasher::new(2).hash("pw123456").unwrap_err();
        assert!(err.is_internal());
    }
}
