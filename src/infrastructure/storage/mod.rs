//! Non-SQL account stores

pub mod memory;

pub use memory::InMemoryAccountRepository;
