use thiserror::Error;

/// Failure kinds surfaced by the account service.
///
/// The transport layer is the only place these are turned into status
/// codes; nothing in the domain or application layer knows about HTTP.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Email already in use")]
    EmailInUse,

    #[error("Invalid birth date '{0}': expected an ISO-8601 date")]
    InvalidBirthDate(String),

    /// Unknown email and wrong password are deliberately the same variant.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is blocked")]
    AccountBlocked,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn account_not_found(id: &str) -> Self {
        Self::NotFound {
            entity: "Account",
            field: "id",
            value: id.to_string(),
        }
    }

    /// Whether this error came from an underlying store or crypto fault
    /// rather than from a business rule.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Internal(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_account() {
        let err = DomainError::account_not_found("abc");
        assert_eq!(err.to_string(), "Not found: Account with id=abc");
        assert!(!err.is_internal());
    }

    #[test]
    fn store_and_crypto_faults_are_internal() {
        assert!(DomainError::Storage("disk full".into()).is_internal());
        assert!(DomainError::Internal("join".into()).is_internal());
        assert!(!DomainError::Forbidden.is_internal());
    }
}
