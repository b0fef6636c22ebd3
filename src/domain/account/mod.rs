//! Account aggregate
//!
//! Contains the Account entity, DTOs, and repository interface.

pub mod model;
pub mod repository;

mod dto_create;
mod dto_register;

pub use model::{parse_birth_date, Account, AccountRole, AccountStatus};

pub use dto_create::CreateAccountDto;
pub use dto_register::RegisterAccountDto;

pub use repository::AccountRepositoryInterface;
