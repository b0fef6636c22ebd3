//! In-memory account store

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    Account, AccountRepositoryInterface, AccountStatus, CreateAccountDto, DomainError,
    DomainResult,
};

/// In-memory account store for development and testing.
///
/// Email uniqueness is claimed through the index's entry API, so two
/// concurrent creates with the same email cannot both succeed.
pub struct InMemoryAccountRepository {
    /// id -> (insertion sequence, account)
    accounts: DashMap<String, (u64, Account)>,
    /// email -> id
    email_index: DashMap<String, String>,
    sequence: AtomicU64,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            email_index: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepositoryInterface for InMemoryAccountRepository {
    async fn create(&self, dto: CreateAccountDto) -> DomainResult<Account> {
        let id = uuid::Uuid::new_v4().to_string();

        match self.email_index.entry(dto.email.clone()) {
            Entry::Occupied(_) => return Err(DomainError::EmailInUse),
            Entry::Vacant(slot) => {
                slot.insert(id.clone());
            }
        }

        let now = Utc::now();
        let account = Account {
            id: id.clone(),
            full_name: dto.full_name,
            birth_date: dto.birth_date,
            email: dto.email,
            password_hash: dto.password_hash,
            role: dto.role,
            status: dto.status,
            created_at: now,
            updated_at: now,
        };

        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        self.accounts.insert(id, (seq, account.clone()));
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let id = self.email_index.get(email).map(|r| r.value().clone());
        Ok(id.and_then(|id| self.accounts.get(&id).map(|r| r.value().1.clone())))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Account>> {
        Ok(self.accounts.get(id).map(|r| r.value().1.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Account>> {
        let mut rows: Vec<(u64, Account)> =
            self.accounts.iter().map(|r| r.value().clone()).collect();
        rows.sort_by_key(|(seq, _)| *seq);
        Ok(rows.into_iter().map(|(_, account)| account).collect())
    }

    async fn update_status(&self, id: &str, status: AccountStatus) -> DomainResult<()> {
        if let Some(mut entry) = self.accounts.get_mut(id) {
            let account = &mut entry.value_mut().1;
            account.status = status;
            account.updated_at = Utc::now();
        }
        Ok(())
    }
}
