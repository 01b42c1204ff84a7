//! External Adapters for the Customer Domain
//!
//! This module provides adapter implementations for the external systems the
//! customer domain talks to.
//!
//! # Available Adapters
//!
//! - **ViaCepAdapter**: Resolves postal codes through the ViaCEP REST API
//! - **MockAddressLookup**: Canned provider for testing (re-exported from ports module)
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_customer::adapters::{ViaCepAdapter, ViaCepConfig};
//! use domain_customer::AddressLookupPort;
//! use std::sync::Arc;
//!
//! let adapter = ViaCepAdapter::new(ViaCepConfig {
//!     base_url: "https://viacep.com.br/ws".to_string(),
//!     timeout_secs: 10,
//! })?;
//! let port: Arc<dyn AddressLookupPort> = Arc::new(adapter);
//! ```

pub mod via_cep;

pub use via_cep::{ViaCepAdapter, ViaCepConfig};
