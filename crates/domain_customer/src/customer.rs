//! Customer records and the drafts handed to the store

use serde::{Deserialize, Serialize};

use core_kernel::CustomerId;

use crate::address::{Address, NewAddress};

/// A persisted customer with its resolved address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub postal_code: String,
    pub address: Address,
}

/// Caller-supplied fields for create and full-record update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInput {
    pub name: String,
    pub postal_code: String,
}

impl CustomerInput {
    pub fn new(name: impl Into<String>, postal_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            postal_code: postal_code.into(),
        }
    }
}

/// Where the address of a customer being written comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressSource {
    /// An address already stored under the postal code
    Existing(Address),
    /// Freshly looked-up data; the store inserts it in the same unit of work
    /// as the customer, reusing a concurrently inserted row for the same code
    New(NewAddress),
}

impl AddressSource {
    pub fn is_new(&self) -> bool {
        matches!(self, AddressSource::New(_))
    }
}

/// A customer ready to be written by a `CustomerStore`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    pub name: String,
    pub postal_code: String,
    pub address: AddressSource,
}

impl CustomerDraft {
    pub fn new(input: CustomerInput, address: AddressSource) -> Self {
        Self {
            name: input.name,
            postal_code: input.postal_code,
            address,
        }
    }
}
