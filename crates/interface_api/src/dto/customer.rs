//! Customer DTOs

use domain_customer::{Address, Customer, CustomerInput};
use serde::{Deserialize, Serialize};

/// Body of `POST /clientes` and `PUT /clientes/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRequest {
    pub name: String,
    pub postal_code: String,
}

impl From<CustomerRequest> for CustomerInput {
    fn from(request: CustomerRequest) -> Self {
        CustomerInput::new(request.name, request.postal_code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressResponse {
    pub id: i64,
    pub postal_code: String,
    pub street: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub postal_code: String,
    pub address: AddressResponse,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.value(),
            postal_code: address.postal_code,
            street: address.street,
            complement: address.complement,
            neighborhood: address.neighborhood,
            city: address.city,
            state: address.state,
        }
    }
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.value(),
            name: customer.name,
            postal_code: customer.postal_code,
            address: customer.address.into(),
        }
    }
}
