//! # Account Service
//!
//! User-account backend: registration, password login with JWT bearer
//! tokens, profile lookup, administrative listing and account blocking.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Account entity, rules and port traits
//! - **application**: Account use-cases (`AccountService`)
//! - **infrastructure**: SQLite / in-memory stores, bcrypt, JWT
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Runtime bootstrap and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
