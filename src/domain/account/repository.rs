use async_trait::async_trait;

use super::{Account, AccountStatus, CreateAccountDto};
use crate::domain::DomainResult;

/// Account store contract.
///
/// Implementations must reject a duplicate email at write time with
/// `DomainError::EmailInUse`; the service-level lookup before `create`
/// is only an early rejection.
#[async_trait]
pub trait AccountRepositoryInterface: Send + Sync {
    async fn create(&self, dto: CreateAccountDto) -> DomainResult<Account>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Account>>;
    async fn find_all(&self) -> DomainResult<Vec<Account>>;

    /// Unconditional status write. An unknown id is a no-op.
    async fn update_status(&self, id: &str, status: AccountStatus) -> DomainResult<()>;
}
