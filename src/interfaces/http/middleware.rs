//! Authentication middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::domain::{AccountRole, TokenError, TokenIssuer};
use crate::interfaces::http::common::ApiResponse;

/// Authentication error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    InsufficientPermissions,
}

/// State for the bearer middleware
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenIssuer>,
}

/// Identity established by a valid bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub account_id: String,
    pub role: AccountRole,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Bearer token middleware. Rejects with 401 unless a valid, unexpired
/// token is presented; otherwise inserts [`AuthenticatedUser`].
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match auth_state.tokens.verify(token) {
        Ok(claims) => {
            let user = AuthenticatedUser {
                account_id: claims.subject_id,
                role: claims.role,
            };
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(TokenError::Expired) => auth_error_response(AuthError::ExpiredToken),
        Err(TokenError::Invalid) => auth_error_response(AuthError::InvalidToken),
    }
}

/// Role gate for admin-only routes. Must run after [`auth_middleware`].
pub async fn require_admin(request: Request<Body>, next: Next) -> Response {
    match request.extensions().get::<AuthenticatedUser>() {
        Some(user) if user.is_admin() => next.run(request).await,
        Some(user) => {
            debug!(account_id = %user.account_id, "Admin route refused");
            auth_error_response(AuthError::InsufficientPermissions)
        }
        None => auth_error_response(AuthError::MissingToken),
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
        AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired"),
        AuthError::InsufficientPermissions => (StatusCode::FORBIDDEN, "Insufficient permissions"),
    };

    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(extract_token("Bearer "), None);
        assert_eq!(extract_token("abc.def"), None);
    }
}
