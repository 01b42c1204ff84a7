//! Customer Domain Ports
//!
//! This module defines the port interfaces the customer domain depends on,
//! enabling swappable implementations (PostgreSQL, in-memory mocks, a live
//! address provider or a canned one).
//!
//! # Architecture
//!
//! - **`CustomerStore`**: persistence of customers and their addresses.
//!   Implemented by `infra_db::adapters::PostgresCustomerStore`.
//! - **`AddressLookupPort`**: resolves a postal code into address data.
//!   Implemented by `ViaCepAdapter`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_customer::{CustomerService, ViaCepAdapter, ViaCepConfig};
//! use infra_db::adapters::PostgresCustomerStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(PostgresCustomerStore::new(pool));
//! let lookup = Arc::new(ViaCepAdapter::new(ViaCepConfig::default())?);
//! let service = CustomerService::new(store, lookup);
//! ```

use async_trait::async_trait;

use core_kernel::{CustomerId, DomainPort, HealthCheckable, PortError};

use crate::address::{Address, NewAddress};
use crate::customer::{Customer, CustomerDraft};

/// Persistence port for customers and addresses
///
/// Each method is a single unit of work. `insert` and `update` write the
/// address (when the draft carries a new one) and the customer atomically.
#[async_trait]
pub trait CustomerStore: DomainPort + HealthCheckable {
    /// Returns every customer, ordered by identifier
    async fn find_all(&self) -> Result<Vec<Customer>, PortError>;

    /// Retrieves a customer by ID
    ///
    /// # Returns
    ///
    /// `None` when no customer has the identifier
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, PortError>;

    /// Retrieves the stored address for a postal code
    async fn find_address_by_postal_code(
        &self,
        postal_code: &str,
    ) -> Result<Option<Address>, PortError>;

    /// Persists a new customer
    ///
    /// # Returns
    ///
    /// The created customer with its generated ID and resolved address
    async fn insert(&self, draft: CustomerDraft) -> Result<Customer, PortError>;

    /// Overwrites name, postal code and address reference of a customer
    ///
    /// # Returns
    ///
    /// `None` when the customer no longer exists
    async fn update(
        &self,
        id: CustomerId,
        draft: CustomerDraft,
    ) -> Result<Option<Customer>, PortError>;

    /// Deletes a customer, leaving its address in place
    ///
    /// # Returns
    ///
    /// True if a row was removed
    async fn delete(&self, id: CustomerId) -> Result<bool, PortError>;
}

/// Port for the external postal-code provider
///
/// Implementations perform exactly one request per call; retries and
/// circuit breaking are not part of the contract.
#[async_trait]
pub trait AddressLookupPort: DomainPort + HealthCheckable {
    /// Resolves a postal code
    ///
    /// # Errors
    ///
    /// `PortError::NotFound` when the provider does not know the code; any
    /// other variant is an upstream failure.
    async fn lookup(&self, postal_code: &str) -> Result<NewAddress, PortError>;
}

/// In-memory implementations of the customer ports for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::RwLock;

    use core_kernel::{AddressId, AdapterHealth, HealthCheckResult};

    use crate::customer::AddressSource;

    #[derive(Debug, Clone)]
    struct StoredCustomer {
        name: String,
        postal_code: String,
        address_id: AddressId,
    }

    #[derive(Debug, Default)]
    struct MockState {
        customers: BTreeMap<CustomerId, StoredCustomer>,
        addresses: BTreeMap<AddressId, Address>,
        next_customer_id: i64,
        next_address_id: i64,
    }

    impl MockState {
        fn resolve(&mut self, source: AddressSource) -> Address {
            match source {
                AddressSource::Existing(address) => address,
                AddressSource::New(new_address) => {
                    // Same postal code inserted meanwhile: reuse it, as the unique index does
                    if let Some(existing) = self
                        .addresses
                        .values()
                        .find(|a| a.postal_code == new_address.postal_code)
                    {
                        return existing.clone();
                    }
                    self.next_address_id += 1;
                    let address = Address::from_new(AddressId::new(self.next_address_id), new_address);
                    self.addresses.insert(address.id, address.clone());
                    address
                }
            }
        }

        fn materialize(&self, id: CustomerId, stored: &StoredCustomer) -> Option<Customer> {
            let address = self.addresses.get(&stored.address_id)?.clone();
            Some(Customer {
                id,
                name: stored.name.clone(),
                postal_code: stored.postal_code.clone(),
                address,
            })
        }
    }

    /// In-memory mock implementation of CustomerStore
    #[derive(Debug, Default)]
    pub struct MockCustomerStore {
        state: RwLock<MockState>,
    }

    impl MockCustomerStore {
        /// Creates a new empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the store with addresses, as if created earlier
        pub async fn with_addresses(addresses: Vec<NewAddress>) -> Self {
            let store = Self::new();
            {
                let mut state = store.state.write().await;
                for address in addresses {
                    state.resolve(AddressSource::New(address));
                }
            }
            store
        }

        /// Number of stored address rows
        pub async fn address_count(&self) -> usize {
            self.state.read().await.addresses.len()
        }

        /// Number of stored customer rows
        pub async fn customer_count(&self) -> usize {
            self.state.read().await.customers.len()
        }
    }

    impl DomainPort for MockCustomerStore {}

    #[async_trait]
    impl HealthCheckable for MockCustomerStore {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::new("mock-customer-store", AdapterHealth::Healthy, 0)
                .with_message("Mock adapter always healthy")
        }
    }

    #[async_trait]
    impl CustomerStore for MockCustomerStore {
        async fn find_all(&self) -> Result<Vec<Customer>, PortError> {
            let state = self.state.read().await;
            Ok(state
                .customers
                .iter()
                .filter_map(|(id, stored)| state.materialize(*id, stored))
                .collect())
        }

        async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, PortError> {
            let state = self.state.read().await;
            Ok(state
                .customers
                .get(&id)
                .and_then(|stored| state.materialize(id, stored)))
        }

        async fn find_address_by_postal_code(
            &self,
            postal_code: &str,
        ) -> Result<Option<Address>, PortError> {
            let state = self.state.read().await;
            Ok(state
                .addresses
                .values()
                .find(|a| a.postal_code == postal_code)
                .cloned())
        }

        async fn insert(&self, draft: CustomerDraft) -> Result<Customer, PortError> {
            let mut state = self.state.write().await;
            let address = state.resolve(draft.address);
            state.next_customer_id += 1;
            let id = CustomerId::new(state.next_customer_id);
            state.customers.insert(
                id,
                StoredCustomer {
                    name: draft.name.clone(),
                    postal_code: draft.postal_code.clone(),
                    address_id: address.id,
                },
            );
            Ok(Customer {
                id,
                name: draft.name,
                postal_code: draft.postal_code,
                address,
            })
        }

        async fn update(
            &self,
            id: CustomerId,
            draft: CustomerDraft,
        ) -> Result<Option<Customer>, PortError> {
            let mut state = self.state.write().await;
            if !state.customers.contains_key(&id) {
                return Ok(None);
            }
            let address = state.resolve(draft.address);
            state.customers.insert(
                id,
                StoredCustomer {
                    name: draft.name.clone(),
                    postal_code: draft.postal_code.clone(),
                    address_id: address.id,
                },
            );
            Ok(Some(Customer {
                id,
                name: draft.name,
                postal_code: draft.postal_code,
                address,
            }))
        }

        async fn delete(&self, id: CustomerId) -> Result<bool, PortError> {
            Ok(self.state.write().await.customers.remove(&id).is_some())
        }
    }

    /// Failure injected into every call of a `MockAddressLookup`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum LookupFailure {
        Unavailable,
        Timeout,
    }

    impl LookupFailure {
        fn to_port_error(self) -> PortError {
            match self {
                LookupFailure::Unavailable => PortError::ServiceUnavailable {
                    service: "mock-address-lookup".to_string(),
                },
                LookupFailure::Timeout => PortError::Timeout {
                    operation: "lookup".to_string(),
                    duration_ms: 0,
                },
            }
        }
    }

    /// Canned address provider that records every postal code it is asked for
    #[derive(Debug, Default)]
    pub struct MockAddressLookup {
        addresses: HashMap<String, NewAddress>,
        failure: Option<LookupFailure>,
        calls: AtomicUsize,
        requested: Mutex<Vec<String>>,
    }

    impl MockAddressLookup {
        /// Creates a provider that knows no postal codes
        pub fn new() -> Self {
            Self::default()
        }

        /// Registers the answer for a postal code
        pub fn with_address(mut self, address: NewAddress) -> Self {
            self.addresses.insert(address.postal_code.clone(), address);
            self
        }

        /// Makes every lookup fail
        pub fn failing(mut self, failure: LookupFailure) -> Self {
            self.failure = Some(failure);
            self
        }

        /// Number of lookups performed so far
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Postal codes requested so far, in call order
        pub fn requested(&self) -> Vec<String> {
            self.requested
                .lock()
                .map(|codes| codes.clone())
                .unwrap_or_default()
        }
    }

    impl DomainPort for MockAddressLookup {}

    #[async_trait]
    impl HealthCheckable for MockAddressLookup {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::new("mock-address-lookup", AdapterHealth::Healthy, 0)
        }
    }

    #[async_trait]
    impl AddressLookupPort for MockAddressLookup {
        async fn lookup(&self, postal_code: &str) -> Result<NewAddress, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut codes) = self.requested.lock() {
                codes.push(postal_code.to_string());
            }
            if let Some(failure) = self.failure {
                return Err(failure.to_port_error());
            }
            self.addresses
                .get(postal_code)
                .cloned()
                .ok_or_else(|| PortError::not_found("PostalCode", postal_code))
        }
    }
}
