//! Customer domain errors
//!
//! Store and lookup failures keep their `PortError` as the source so the
//! HTTP boundary can tell an unknown postal code from an unreachable provider.

use thiserror::Error;

use core_kernel::{CustomerId, PortError};

/// Errors that can occur in the customer domain
#[derive(Debug, Error)]
pub enum CustomerError {
    /// Customer with the given ID was not found
    #[error("Customer not found: {0}")]
    NotFound(CustomerId),

    /// The address provider does not know the postal code
    #[error("Postal code not found: {0}")]
    PostalCodeNotFound(String),

    /// The address provider failed or could not be reached
    #[error("Address lookup failed: {0}")]
    AddressLookup(#[source] PortError),

    /// The customer store failed
    #[error("Customer store error: {0}")]
    Store(#[from] PortError),
}

impl CustomerError {
    /// Classifies a lookup failure for the given postal code
    pub fn from_lookup(postal_code: &str, error: PortError) -> Self {
        if error.is_not_found() {
            CustomerError::PostalCodeNotFound(postal_code.to_string())
        } else {
            CustomerError::AddressLookup(error)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CustomerError::NotFound(_))
    }
}
