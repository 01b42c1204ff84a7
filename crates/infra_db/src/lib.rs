//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL persistence for the customer registry,
//! using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. Repositories speak in row types
//! and `DatabaseError`; the adapters on top implement the domain store
//! traits and translate both into domain models and `PortError`.
//!
//! # Schema
//!
//! - `addresses`: one row per postal code, enforced by a unique index
//! - `customers`: references an address; deleting a customer keeps it
//! - `users`: bank users with a unique account number
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresCustomerStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/customer_registry")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresCustomerStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig, MIGRATOR};
pub use error::DatabaseError;
pub use repositories::{CustomerRepository, UserRepository};
pub use adapters::{PostgresCustomerStore, PostgresUserStore};
