//! PostgreSQL User Adapter
//!
//! Implements the bank domain's `UserStore` over the `UserRepository`. A
//! unique-constraint violation on insert reaches the domain as
//! `PortError::Conflict`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError, UserId};
use domain_bank::{Account, Card, NewUser, User, UserStore};

use crate::adapters::customer::ping;
use crate::repositories::user::{NewUserRow, UserRepository, UserRow};

const ADAPTER_ID: &str = "postgres-user-store";

/// PostgreSQL-backed implementation of the UserStore trait
#[derive(Debug, Clone)]
pub struct PostgresUserStore {
    repository: UserRepository,
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresUserStore {}

#[async_trait]
impl HealthCheckable for PostgresUserStore {
    async fn health_check(&self) -> HealthCheckResult {
        ping(ADAPTER_ID, &self.pool).await
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    #[instrument(skip(self), fields(user_id = %id))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, PortError> {
        debug!("Fetching user by ID");
        let row = self.repository.get_by_id(id.value()).await?;
        Ok(row.map(row_to_user))
    }

    #[instrument(skip(self))]
    async fn exists_by_account_number(&self, number: &str) -> Result<bool, PortError> {
        Ok(self.repository.exists_by_account_number(number).await?)
    }

    #[instrument(skip(self, user), fields(account_number = %user.account.number))]
    async fn insert(&self, user: NewUser) -> Result<User, PortError> {
        let row = self.repository.insert(new_user_to_row(user)).await?;
        debug!(user_id = row.user_id, "User row inserted");
        Ok(row_to_user(row))
    }
}

fn new_user_to_row(user: NewUser) -> NewUserRow {
    NewUserRow {
        name: user.name,
        account_number: user.account.number,
        account_agency: user.account.agency,
        account_balance: user.account.balance,
        account_limit: user.account.limit,
        card_number: user.card.number,
        card_limit: user.card.limit,
    }
}

fn row_to_user(row: UserRow) -> User {
    User {
        id: UserId::new(row.user_id),
        name: row.name,
        account: Account {
            number: row.account_number,
            agency: row.account_agency,
            balance: row.account_balance,
            limit: row.account_limit,
        },
        card: Card {
            number: row.card_number,
            limit: row.card_limit,
        },
    }
}
