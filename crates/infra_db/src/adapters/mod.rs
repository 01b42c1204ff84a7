//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Architecture
//!
//! Each domain has a corresponding adapter that:
//! - Implements the domain's store trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCustomerStore;
//! use domain_customer::CustomerStore;
//!
//! let store = PostgresCustomerStore::new(pool);
//! let customer = store.find_by_id(customer_id).await?;
//! ```

pub mod customer;
pub mod user;

pub use customer::PostgresCustomerStore;
pub use user::PostgresUserStore;
