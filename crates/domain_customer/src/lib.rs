//! Customer Management Domain
//!
//! This crate manages customer records and the addresses they reference.
//!
//! # Address Enrichment
//!
//! Customers are registered with a name and a postal code only. On create
//! and update the `CustomerService` resolves the postal code into a full
//! address:
//!
//! - a postal code already stored is reused as is, with no external call
//! - an unseen postal code is looked up once through the `AddressLookupPort`
//!   (ViaCEP in production) and stored together with the customer
//!
//! Addresses outlive customers: deleting a customer never removes the
//! address it pointed to.
//!
//! # Examples
//!
//! ```rust,ignore
//! use domain_customer::{CustomerInput, CustomerService};
//!
//! let service = CustomerService::new(store, lookup);
//! let ana = service.create(CustomerInput::new("Ana", "01001-000")).await?;
//! assert_eq!(ana.address.city.as_deref(), Some("São Paulo"));
//! ```

pub mod customer;
pub mod address;
pub mod error;
pub mod ports;
pub mod service;
pub mod adapters;

pub use customer::{Customer, CustomerInput, CustomerDraft, AddressSource};
pub use address::{Address, NewAddress};
pub use error::CustomerError;
pub use ports::{CustomerStore, AddressLookupPort};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{MockCustomerStore, MockAddressLookup, LookupFailure};
pub use service::CustomerService;
pub use adapters::{ViaCepAdapter, ViaCepConfig};
