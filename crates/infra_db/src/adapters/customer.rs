//! PostgreSQL Customer Adapter
//!
//! This module provides the internal (database) adapter for the customer
//! domain, implementing the `CustomerStore` trait using PostgreSQL via the
//! `CustomerRepository`.
//!
//! # Overview
//!
//! The `PostgresCustomerStore` serves as the bridge between the domain layer's
//! port interface and the database layer. It:
//!
//! - Translates domain drafts into repository writes
//! - Converts database row types back to domain models
//! - Handles error translation between database and port errors
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCustomerStore;
//! use domain_customer::CustomerStore;
//! use std::sync::Arc;
//!
//! let store: Arc<dyn CustomerStore> = Arc::new(PostgresCustomerStore::new(pool));
//! let customers = store.find_all().await?;
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AddressId, AdapterHealth, CustomerId, DomainPort, HealthCheckResult, HealthCheckable,
    PortError,
};
use domain_customer::{
    Address, AddressSource, Customer, CustomerDraft, CustomerStore, NewAddress,
};

use crate::repositories::customer::{
    AddressRow, AddressWrite, CustomerRepository, CustomerRow, CustomerWrite, NewAddressRow,
};

const ADAPTER_ID: &str = "postgres-customer-store";

/// PostgreSQL-backed implementation of the CustomerStore trait
///
/// # Health Checking
///
/// Health checks perform a simple query to ensure the connection pool is
/// operational.
#[derive(Debug, Clone)]
pub struct PostgresCustomerStore {
    repository: CustomerRepository,
    pool: PgPool,
}

impl PostgresCustomerStore {
    /// Creates a new PostgreSQL customer store
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresCustomerStore {}

#[async_trait]
impl HealthCheckable for PostgresCustomerStore {
    /// Checks database connectivity with `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        ping(ADAPTER_ID, &self.pool).await
    }
}

#[async_trait]
impl CustomerStore for PostgresCustomerStore {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Customer>, PortError> {
        debug!("Listing customers");
        let rows = self.repository.list().await?;
        Ok(rows.into_iter().map(row_to_customer).collect())
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, PortError> {
        debug!("Fetching customer by ID");
        let row = self.repository.get_by_id(id.value()).await?;
        Ok(row.map(row_to_customer))
    }

    #[instrument(skip(self))]
    async fn find_address_by_postal_code(
        &self,
        postal_code: &str,
    ) -> Result<Option<Address>, PortError> {
        let row = self.repository.find_address_by_postal_code(postal_code).await?;
        Ok(row.map(row_to_address))
    }

    #[instrument(skip(self, draft), fields(new_address = draft.address.is_new()))]
    async fn insert(&self, draft: CustomerDraft) -> Result<Customer, PortError> {
        let row = self.repository.insert(draft_to_write(draft)).await?;
        debug!(customer_id = row.customer_id, "Customer row inserted");
        Ok(row_to_customer(row))
    }

    #[instrument(skip(self, draft), fields(customer_id = %id, new_address = draft.address.is_new()))]
    async fn update(
        &self,
        id: CustomerId,
        draft: CustomerDraft,
    ) -> Result<Option<Customer>, PortError> {
        let row = self.repository.update(id.value(), draft_to_write(draft)).await?;
        Ok(row.map(row_to_customer))
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn delete(&self, id: CustomerId) -> Result<bool, PortError> {
        Ok(self.repository.delete(id.value()).await?)
    }
}

/// Runs `SELECT 1` and reports the outcome as a health check
pub(crate) async fn ping(adapter_id: &str, pool: &PgPool) -> HealthCheckResult {
    let start = std::time::Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await;

    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthCheckResult::new(adapter_id, AdapterHealth::Healthy, latency_ms),
        Err(e) => HealthCheckResult::new(adapter_id, AdapterHealth::Unhealthy, latency_ms)
            .with_message(format!("Database error: {}", e)),
    }
}

// ============================================================================
// Conversions
// ============================================================================

fn draft_to_write(draft: CustomerDraft) -> CustomerWrite {
    let address = match draft.address {
        AddressSource::Existing(address) => AddressWrite::Existing(address.id.value()),
        AddressSource::New(new) => AddressWrite::New(new_address_to_row(new)),
    };

    CustomerWrite {
        name: draft.name,
        postal_code: draft.postal_code,
        address,
    }
}

fn new_address_to_row(address: NewAddress) -> NewAddressRow {
    NewAddressRow {
        postal_code: address.postal_code,
        street: address.street,
        complement: address.complement,
        neighborhood: address.neighborhood,
        city: address.city,
        state: address.state,
    }
}

fn row_to_address(row: AddressRow) -> Address {
    Address {
        id: AddressId::new(row.address_id),
        postal_code: row.postal_code,
        street: row.street,
        complement: row.complement,
        neighborhood: row.neighborhood,
        city: row.city,
        state: row.state,
    }
}

fn row_to_customer(row: CustomerRow) -> Customer {
    Customer {
        id: CustomerId::new(row.customer_id),
        name: row.name,
        postal_code: row.postal_code,
        address: Address {
            id: AddressId::new(row.address_id),
            postal_code: row.address_postal_code,
            street: row.street,
            complement: row.complement,
            neighborhood: row.neighborhood,
            city: row.city,
            state: row.state,
        },
    }
}
