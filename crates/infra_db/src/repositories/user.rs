//! User repository implementation
//!
//! Bank users with their account and card stored in one row. The account
//! number carries a unique constraint; an insert that violates it surfaces
//! as `DatabaseError::DuplicateEntry`.

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::error::DatabaseError;

/// Repository for managing user rows
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a user by identifier
    pub async fn get_by_id(&self, user_id: i64) -> Result<Option<UserRow>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                name,
                account_number,
                account_agency,
                account_balance,
                account_limit,
                card_number,
                card_limit
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Checks whether an account number is already taken
    pub async fn exists_by_account_number(&self, number: &str) -> Result<bool, DatabaseError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE account_number = $1)",
        )
        .bind(number)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Creates a new user
    ///
    /// # Errors
    ///
    /// `DatabaseError::DuplicateEntry` when the account number is taken
    pub async fn insert(&self, user: NewUserRow) -> Result<UserRow, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (
                name,
                account_number,
                account_agency,
                account_balance,
                account_limit,
                card_number,
                card_limit
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                user_id,
                name,
                account_number,
                account_agency,
                account_balance,
                account_limit,
                card_number,
                card_limit
            "#,
        )
        .bind(&user.name)
        .bind(&user.account_number)
        .bind(&user.account_agency)
        .bind(user.account_balance)
        .bind(user.account_limit)
        .bind(&user.card_number)
        .bind(user.card_limit)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

/// User row
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub user_id: i64,
    pub name: String,
    pub account_number: String,
    pub account_agency: String,
    pub account_balance: Decimal,
    pub account_limit: Decimal,
    pub card_number: String,
    pub card_limit: Decimal,
}

/// Data for inserting a new user
#[derive(Debug, Clone)]
pub struct NewUserRow {
    pub name: String,
    pub account_number: String,
    pub account_agency: String,
    pub account_balance: Decimal,
    pub account_limit: Decimal,
    pub card_number: String,
    pub card_limit: Decimal,
}
