//! Account service — application-layer orchestration
//!
//! All account-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use chrono::Duration;
use tracing::{info, warn};

use crate::domain::{
    parse_birth_date, Account, AccountRepositoryInterface, AccountRole, AccountStatus,
    CreateAccountDto, DomainError, DomainResult, IdentityClaims, PasswordHasher,
    RegisterAccountDto, TokenIssuer,
};

/// Validity window of every issued bearer token.
pub const TOKEN_TTL_HOURS: i64 = 1;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Account service — orchestrates all identity use-cases.
///
/// Depends only on the store, hasher and token ports, so the persistence
/// and crypto backends can be swapped without touching the rules.
pub struct AccountService {
    repo: Arc<dyn AccountRepositoryInterface>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AccountService {
    pub fn new(
        repo: Arc<dyn AccountRepositoryInterface>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            repo,
            hasher,
            tokens,
        }
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new account with role `USER` and status `ACTIVE`.
    ///
    /// The email lookup is an early rejection only; the store's write-time
    /// uniqueness check decides races between concurrent registrations.
    pub async fn register(&self, dto: RegisterAccountDto) -> DomainResult<Account> {
        let account = self.create_account(dto, AccountRole::User).await?;

        metrics::counter!("accounts_registered_total").increment(1);
        info!(account_id = %account.id, "New account registered");
        Ok(account)
    }

    /// Create an `ADMIN` account unless one with the same email exists.
    ///
    /// Returns `None` when the email was already taken.
    pub async fn ensure_admin(&self, dto: RegisterAccountDto) -> DomainResult<Option<Account>> {
        match self.create_account(dto, AccountRole::Admin).await {
            Ok(account) => {
                info!(account_id = %account.id, "Administrator account created");
                Ok(Some(account))
            }
            Err(DomainError::EmailInUse) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_account(
        &self,
        dto: RegisterAccountDto,
        role: AccountRole,
    ) -> DomainResult<Account> {
        if self.repo.find_by_email(&dto.email).await?.is_some() {
            return Err(DomainError::EmailInUse);
        }

        let birth_date = parse_birth_date(&dto.birth_date)
            .ok_or_else(|| DomainError::InvalidBirthDate(dto.birth_date.clone()))?;

        let password_hash = self.hash_password(dto.password).await?;

        self.repo
            .create(CreateAccountDto {
                full_name: dto.full_name,
                birth_date,
                email: dto.email,
                password_hash,
                role,
                status: AccountStatus::Active,
            })
            .await
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check email + password and issue a bearer token.
    ///
    /// An unknown email and a wrong password produce the same error.
    pub async fn authenticate(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(account) = self.repo.find_by_email(email).await? else {
            record_authentication("invalid_credentials");
            return Err(DomainError::InvalidCredentials);
        };

        if !account.is_active() {
            record_authentication("blocked");
            warn!(account_id = %account.id, "Login attempt on blocked account");
            return Err(DomainError::AccountBlocked);
        }

        let valid = self
            .verify_password(password.to_string(), account.password_hash.clone())
            .await?;
        if !valid {
            record_authentication("invalid_credentials");
            return Err(DomainError::InvalidCredentials);
        }

        let claims = IdentityClaims {
            subject_id: account.id.clone(),
            role: account.role,
        };
        let token = self.tokens.issue(&claims, Duration::hours(TOKEN_TTL_HOURS))?;

        record_authentication("success");
        info!(account_id = %account.id, "Account authenticated");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: TOKEN_TTL_HOURS * 3600,
        })
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Fetch a profile. Self-access is always allowed, anything else needs `ADMIN`.
    pub async fn get_by_id(&self, requestor_id: &str, target_id: &str) -> DomainResult<Account> {
        self.authorize_admin_or_self(requestor_id, target_id).await?;

        self.repo
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| DomainError::account_not_found(target_id))
    }

    /// List every account. A missing requestor is reported as `Forbidden`,
    /// not `Unauthorized`.
    pub async fn list_all(&self, requestor_id: &str) -> DomainResult<Vec<Account>> {
        match self.repo.find_by_id(requestor_id).await? {
            Some(requestor) if requestor.role.is_admin() => self.repo.find_all().await,
            _ => Err(DomainError::Forbidden),
        }
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Block an account (admin or self).
    ///
    /// The target is not looked up first: blocking an unknown or already
    /// blocked id succeeds without effect.
    pub async fn block(&self, requestor_id: &str, target_id: &str) -> DomainResult<()> {
        self.authorize_admin_or_self(requestor_id, target_id).await?;

        self.repo
            .update_status(target_id, AccountStatus::Blocked)
            .await?;

        metrics::counter!("accounts_blocked_total").increment(1);
        info!(requestor_id, target_id, "Account blocked");
        Ok(())
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn authorize_admin_or_self(
        &self,
        requestor_id: &str,
        target_id: &str,
    ) -> DomainResult<Account> {
        let requestor = self
            .repo
            .find_by_id(requestor_id)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        if !requestor.may_act_on(target_id) {
            return Err(DomainError::Forbidden);
        }
        Ok(requestor)
    }

    async fn hash_password(&self, password: String) -> DomainResult<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::Internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: String, hash: String) -> DomainResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::Internal(format!("Password check task failed: {}", e)))
    }
}

fn record_authentication(outcome: &'static str) {
    metrics::counter!("authentications_total", "outcome" => outcome).increment(1);
}
