use chrono::NaiveDate;

use super::{AccountRole, AccountStatus};

/// Fields handed to the account store on creation. The store assigns the id.
#[derive(Debug, Clone)]
pub struct CreateAccountDto {
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub password_hash: String,
    pub role: AccountRole,
    pub status: AccountStatus,
}
