use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};

use crate::domain::{
    Account, AccountRepositoryInterface, AccountRole, AccountStatus, CreateAccountDto,
    DomainError, DomainResult,
};
use crate::infrastructure::database::entities::account;

pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: account::AccountRole) -> AccountRole {
    match role {
        account::AccountRole::Admin => AccountRole::Admin,
        account::AccountRole::User => AccountRole::User,
    }
}

fn domain_role_to_entity(role: AccountRole) -> account::AccountRole {
    match role {
        AccountRole::Admin => account::AccountRole::Admin,
        AccountRole::User => account::AccountRole::User,
    }
}

fn entity_status_to_domain(status: account::AccountStatus) -> AccountStatus {
    match status {
        account::AccountStatus::Active => AccountStatus::Active,
        account::AccountStatus::Blocked => AccountStatus::Blocked,
    }
}

fn domain_status_to_entity(status: AccountStatus) -> account::AccountStatus {
    match status {
        AccountStatus::Active => account::AccountStatus::Active,
        AccountStatus::Blocked => account::AccountStatus::Blocked,
    }
}

fn account_model_to_domain(model: account::Model) -> Account {
    Account {
        id: model.id,
        full_name: model.full_name,
        birth_date: model.birth_date,
        email: model.email,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        status: entity_status_to_domain(model.status),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl AccountRepositoryInterface for AccountRepository {
    async fn create(&self, dto: CreateAccountDto) -> DomainResult<Account> {
        let now = Utc::now();

        let new_account = account::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            full_name: Set(dto.full_name),
            birth_date: Set(dto.birth_date),
            email: Set(dto.email),
            password_hash: Set(dto.password_hash),
            role: Set(domain_role_to_entity(dto.role)),
            status: Set(domain_status_to_entity(dto.status)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_account.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                DomainError::EmailInUse
            } else {
                db_err(e)
            }
        })?;

        Ok(account_model_to_domain(model))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let model = account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(account_model_to_domain))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Account>> {
        let model = account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(account_model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Account>> {
        let models = account::Entity::find()
            .order_by_asc(account::Column::CreatedAt)
            .order_by_asc(account::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(account_model_to_domain).collect())
    }

    async fn update_status(&self, id: &str, status: AccountStatus) -> DomainResult<()> {
        account::Entity::update_many()
            .col_expr(
                account::Column::Status,
                Expr::value(domain_status_to_entity(status)),
            )
            .col_expr(account::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(account::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }
}
