//! Account API handlers
//!
//! Thin wrappers over `AccountService` from the application/identity layer.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{AccountDto, LoginRequest, LoginResponse, RegisterRequest};
use crate::application::AccountService;
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Account handler state
#[derive(Clone)]
pub struct AccountHandlerState {
    pub accounts: Arc<AccountService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    tag = "Accounts",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<AccountDto>),
        (status = 400, description = "Validation error, bad birth date or email in use")
    )
)]
pub async fn register(
    State(state): State<AccountHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountDto>>), ApiError> {
    let account = state.accounts.register(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AccountDto::from(account))),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    tag = "Accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials or account blocked")
    )
)]
pub async fn login(
    State(state): State<AccountHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let auth = state
        .accounts
        .authenticate(&request.email, &request.password)
        .await?;
    Ok(Json(ApiResponse::success(LoginResponse::from(auth))))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All accounts", body = ApiResponse<Vec<AccountDto>>),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Requestor is not an administrator")
    )
)]
pub async fn list_accounts(
    State(state): State<AccountHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<AccountDto>>>, ApiError> {
    let accounts = state.accounts.list_all(&user.account_id).await?;
    let items = accounts.into_iter().map(AccountDto::from).collect();
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account details", body = ApiResponse<AccountDto>),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Neither the account owner nor an administrator"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_account(
    State(state): State<AccountHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AccountDto>>, ApiError> {
    let account = state.accounts.get_by_id(&user.account_id, &id).await?;
    Ok(Json(ApiResponse::success(AccountDto::from(account))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}/block",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Account ID")),
    responses(
        (status = 204, description = "Account blocked"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Neither the account owner nor an administrator")
    )
)]
pub async fn block_account(
    State(state): State<AccountHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.accounts.block(&user.account_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
