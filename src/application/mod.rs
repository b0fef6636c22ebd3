pub mod identity;

pub use identity::{AccountService, AuthResult};
