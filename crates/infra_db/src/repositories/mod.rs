//! Repository implementations for domain entities
//!
//! This module provides concrete repository implementations that handle
//! database access for each domain aggregate. Repositories encapsulate
//! SQL queries and map between database rows and plain row types; the
//! adapters translate rows into domain models.
//!
//! # Architecture
//!
//! Each repository follows these principles:
//! - Runtime-checked queries with `FromRow` row types
//! - One transaction per multi-row write
//! - Uniqueness enforced by constraints, surfaced as `DuplicateEntry`

pub mod customer;
pub mod user;

pub use customer::CustomerRepository;
pub use user::UserRepository;
