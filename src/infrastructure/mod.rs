//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod storage;

pub use crypto::{BcryptHasher, JwtConfig, JwtTokenIssuer};
pub use database::{init_database, AccountRepository, DatabaseConfig};
pub use storage::InMemoryAccountRepository;
