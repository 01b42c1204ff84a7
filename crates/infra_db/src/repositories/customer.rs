//! Customer repository implementation
//!
//! This module provides database access for customers and the addresses they
//! reference. Addresses are unique by postal code; writes that carry a new
//! address insert it and the customer in one transaction, converging on the
//! existing row when another writer stored the same postal code first.

use sqlx::{FromRow, PgExecutor, PgPool};

use crate::error::DatabaseError;

const CUSTOMER_COLUMNS: &str = r#"
    c.customer_id,
    c.name,
    c.postal_code,
    a.address_id,
    a.postal_code AS address_postal_code,
    a.street,
    a.complement,
    a.neighborhood,
    a.city,
    a.state
"#;

/// Repository for managing customer and address rows
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists all customers joined with their address, ordered by id
    pub async fn list(&self) -> Result<Vec<CustomerRow>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM customers c JOIN addresses a ON a.address_id = c.address_id \
             ORDER BY c.customer_id",
            CUSTOMER_COLUMNS
        );
        let rows = sqlx::query_as::<_, CustomerRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Retrieves a customer by identifier
    ///
    /// # Returns
    ///
    /// `None` when no row has the identifier
    pub async fn get_by_id(&self, customer_id: i64) -> Result<Option<CustomerRow>, DatabaseError> {
        fetch_customer(&self.pool, customer_id).await
    }

    /// Retrieves the address stored for a postal code
    pub async fn find_address_by_postal_code(
        &self,
        postal_code: &str,
    ) -> Result<Option<AddressRow>, DatabaseError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT address_id, postal_code, street, complement, neighborhood, city, state
            FROM addresses
            WHERE postal_code = $1
            "#,
        )
        .bind(postal_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Creates a customer, and its address when new, in one transaction
    ///
    /// # Returns
    ///
    /// The created customer joined with its address
    pub async fn insert(&self, customer: CustomerWrite) -> Result<CustomerRow, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let address_id = resolve_address(&mut tx, &customer.address).await?;

        let customer_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO customers (name, postal_code, address_id)
            VALUES ($1, $2, $3)
            RETURNING customer_id
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.postal_code)
        .bind(address_id)
        .fetch_one(&mut *tx)
        .await?;

        let row = fetch_customer(&mut *tx, customer_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Customer", customer_id))?;

        tx.commit().await?;
        Ok(row)
    }

    /// Overwrites a customer, and stores its address when new, in one transaction
    ///
    /// # Returns
    ///
    /// `None` when the customer does not exist; nothing is written then
    pub async fn update(
        &self,
        customer_id: i64,
        customer: CustomerWrite,
    ) -> Result<Option<CustomerRow>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let address_id = resolve_address(&mut tx, &customer.address).await?;

        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, postal_code = $3, address_id = $4, updated_at = now()
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id)
        .bind(&customer.name)
        .bind(&customer.postal_code)
        .bind(address_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let row = fetch_customer(&mut *tx, customer_id).await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Deletes a customer row; its address stays
    ///
    /// # Returns
    ///
    /// True if a row was removed
    pub async fn delete(&self, customer_id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM customers WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn fetch_customer<'e, E>(executor: E, customer_id: i64) -> Result<Option<CustomerRow>, DatabaseError>
where
    E: PgExecutor<'e>,
{
    let sql = format!(
        "SELECT {} FROM customers c JOIN addresses a ON a.address_id = c.address_id \
         WHERE c.customer_id = $1",
        CUSTOMER_COLUMNS
    );
    let row = sqlx::query_as::<_, CustomerRow>(&sql)
        .bind(customer_id)
        .fetch_optional(executor)
        .await?;

    Ok(row)
}

/// Returns the address id to reference, inserting new address data first
///
/// The no-op `DO UPDATE` makes `RETURNING` yield the already stored row when
/// the postal code exists, without overwriting its fields.
async fn resolve_address(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    address: &AddressWrite,
) -> Result<i64, DatabaseError> {
    match address {
        AddressWrite::Existing(address_id) => Ok(*address_id),
        AddressWrite::New(new) => {
            let address_id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO addresses (postal_code, street, complement, neighborhood, city, state)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (postal_code) DO UPDATE SET postal_code = EXCLUDED.postal_code
                RETURNING address_id
                "#,
            )
            .bind(&new.postal_code)
            .bind(&new.street)
            .bind(&new.complement)
            .bind(&new.neighborhood)
            .bind(&new.city)
            .bind(&new.state)
            .fetch_one(&mut **tx)
            .await?;

            Ok(address_id)
        }
    }
}

// ============================================================================
// Row Types
// ============================================================================

/// Customer row joined with its address
#[derive(Debug, Clone, FromRow)]
pub struct CustomerRow {
    pub customer_id: i64,
    pub name: String,
    pub postal_code: String,
    pub address_id: i64,
    pub address_postal_code: String,
    pub street: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Address row
#[derive(Debug, Clone, FromRow)]
pub struct AddressRow {
    pub address_id: i64,
    pub postal_code: String,
    pub street: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Address data to insert
#[derive(Debug, Clone)]
pub struct NewAddressRow {
    pub postal_code: String,
    pub street: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Address reference carried by a customer write
#[derive(Debug, Clone)]
pub enum AddressWrite {
    Existing(i64),
    New(NewAddressRow),
}

/// Data for inserting or overwriting a customer
#[derive(Debug, Clone)]
pub struct CustomerWrite {
    pub name: String,
    pub postal_code: String,
    pub address: AddressWrite,
}
