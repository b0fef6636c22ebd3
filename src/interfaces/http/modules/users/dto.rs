//! Account DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::application::AuthResult;
use crate::domain::{parse_birth_date, Account, AccountRole, RegisterAccountDto};

/// Account API representation. The password hash is never exposed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub id: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub email: String,
    /// `ADMIN` or `USER`
    pub role: String,
    /// `ACTIVE` or `BLOCKED`
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountDto {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            full_name: a.full_name,
            birth_date: a.birth_date,
            email: a.email,
            role: a.role.as_str().to_string(),
            status: a.status.as_str().to_string(),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

fn validate_birth_date(value: &str) -> Result<(), ValidationError> {
    if parse_birth_date(value).is_some() {
        Ok(())
    } else {
        let mut err = ValidationError::new("iso_date");
        err.message = Some("birthDate must be an ISO-8601 date".into());
        Err(err)
    }
}

fn validate_requested_role(value: &str) -> Result<(), ValidationError> {
    if value.parse::<AccountRole>().is_ok() {
        Ok(())
    } else {
        let mut err = ValidationError::new("role");
        err.message = Some("role must be ADMIN or USER".into());
        Err(err)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "fullName is required"))]
    pub full_name: String,
    #[validate(custom(function = "validate_birth_date"))]
    #[schema(example = "1990-05-17")]
    pub birth_date: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    /// Accepted for client compatibility but ignored: new accounts are always `USER`.
    #[serde(default)]
    #[validate(custom(function = "validate_requested_role"))]
    #[schema(example = "USER")]
    pub role: Option<String>,
}

impl From<RegisterRequest> for RegisterAccountDto {
    fn from(r: RegisterRequest) -> Self {
        Self {
            full_name: r.full_name,
            birth_date: r.birth_date,
            email: r.email,
            password: r.password,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

impl From<AuthResult> for LoginResponse {
    fn from(r: AuthResult) -> Self {
        Self {
            token: r.token,
            token_type: r.token_type,
            expires_in: r.expires_in,
        }
    }
}
