//! Customer application service
//!
//! Mediates between the `CustomerStore` and the `AddressLookupPort` so that
//! every persisted customer carries a resolved address. An address is looked
//! up upstream only when no row exists for the postal code yet; known codes
//! are served from the store.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use core_kernel::CustomerId;

use crate::customer::{AddressSource, Customer, CustomerDraft, CustomerInput};
use crate::error::CustomerError;
use crate::ports::{AddressLookupPort, CustomerStore};

/// Orchestrates customer CRUD with address enrichment
#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
    lookup: Arc<dyn AddressLookupPort>,
}

impl CustomerService {
    /// Creates the service from its two collaborators
    pub fn new(store: Arc<dyn CustomerStore>, lookup: Arc<dyn AddressLookupPort>) -> Self {
        Self { store, lookup }
    }

    /// Returns the underlying store, e.g. for readiness checks
    pub fn store(&self) -> &Arc<dyn CustomerStore> {
        &self.store
    }

    /// Lists every customer
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Customer>, CustomerError> {
        Ok(self.store.find_all().await?)
    }

    /// Retrieves a customer, `None` when absent
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, CustomerError> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Registers a customer, resolving the address for its postal code
    ///
    /// # Errors
    ///
    /// * `PostalCodeNotFound` - the provider does not know the code
    /// * `AddressLookup` - the provider failed; nothing was written
    #[instrument(skip(self, input), fields(postal_code = %input.postal_code))]
    pub async fn create(&self, input: CustomerInput) -> Result<Customer, CustomerError> {
        let address = self.resolve_address(&input.postal_code).await?;
        let customer = self.store.insert(CustomerDraft::new(input, address)).await?;

        info!(customer_id = %customer.id, address_id = %customer.address.id, "Customer created");
        Ok(customer)
    }

    /// Overwrites name, postal code and address of an existing customer
    ///
    /// The address is resolved again even when the postal code did not
    /// change; a known code is served from the store without a lookup.
    #[instrument(skip(self, input), fields(customer_id = %id, postal_code = %input.postal_code))]
    pub async fn update(
        &self,
        id: CustomerId,
        input: CustomerInput,
    ) -> Result<Customer, CustomerError> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(CustomerError::NotFound(id));
        }

        let address = self.resolve_address(&input.postal_code).await?;
        let customer = self
            .store
            .update(id, CustomerDraft::new(input, address))
            .await?
            .ok_or(CustomerError::NotFound(id))?;

        info!(address_id = %customer.address.id, "Customer updated");
        Ok(customer)
    }

    /// Deletes a customer; its address stays stored
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn delete(&self, id: CustomerId) -> Result<(), CustomerError> {
        if !self.store.delete(id).await? {
            return Err(CustomerError::NotFound(id));
        }

        info!("Customer deleted");
        Ok(())
    }

    async fn resolve_address(&self, postal_code: &str) -> Result<AddressSource, CustomerError> {
        if let Some(address) = self.store.find_address_by_postal_code(postal_code).await? {
            debug!(address_id = %address.id, "Reusing stored address");
            return Ok(AddressSource::Existing(address));
        }

        debug!("Postal code not stored yet, querying provider");
        let address = self.lookup.lookup(postal_code).await.map_err(|e| {
            warn!(error = %e, "Address lookup failed");
            CustomerError::from_lookup(postal_code, e)
        })?;

        Ok(AddressSource::New(address))
    }
}

impl std::fmt::Debug for CustomerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerService").finish_non_exhaustive()
    }
}
