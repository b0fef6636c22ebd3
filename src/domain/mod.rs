pub mod account;
pub mod ports;

// Re-export commonly used types
pub use account::{
    parse_birth_date, Account, AccountRepositoryInterface, AccountRole, AccountStatus,
    CreateAccountDto, RegisterAccountDto,
};
pub use ports::{IdentityClaims, PasswordHasher, TokenError, TokenIssuer};

// Re-export DomainError from shared for convenience
pub use crate::shared::types::errors::{DomainError, DomainResult};
