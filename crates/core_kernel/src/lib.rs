//! Core Kernel - Foundational types shared by the registry crates
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed, store-assigned identifiers
//! - Port error and health-check types for the ports-and-adapters split
//! - Common error types

pub mod identifiers;
pub mod ports;
pub mod error;

pub use identifiers::{CustomerId, AddressId, UserId};
pub use ports::{PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable};
pub use error::CoreError;
