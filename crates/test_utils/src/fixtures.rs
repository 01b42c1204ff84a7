//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the customer and bank domains.
//! These fixtures are designed to be consistent and predictable for unit tests.

use domain_bank::{Account, Card, NewUser};
use domain_customer::{CustomerInput, NewAddress};
use rust_decimal_macros::dec;

/// Fixture for address lookup results
pub struct AddressFixtures;

impl AddressFixtures {
    /// Postal code of Praça da Sé, São Paulo
    pub const SE: &'static str = "01001-000";

    /// Postal code of Avenida Paulista, São Paulo
    pub const PAULISTA: &'static str = "01310-100";

    /// Postal code the lookup provider does not know
    pub const UNKNOWN: &'static str = "99999-999";

    /// Address the provider returns for `SE`
    pub fn praca_da_se() -> NewAddress {
        NewAddress::new(Self::SE)
            .street("Praça da Sé")
            .complement("lado ímpar")
            .neighborhood("Sé")
            .city("São Paulo")
            .state("SP")
    }

    /// Address the provider returns for `PAULISTA`
    pub fn avenida_paulista() -> NewAddress {
        NewAddress::new(Self::PAULISTA)
            .street("Avenida Paulista")
            .complement("de 612 a 1510 - lado par")
            .neighborhood("Bela Vista")
            .city("São Paulo")
            .state("SP")
    }

    /// Every known address
    pub fn all() -> Vec<NewAddress> {
        vec![Self::praca_da_se(), Self::avenida_paulista()]
    }
}

/// Fixture for customer inputs
pub struct CustomerFixtures;

impl CustomerFixtures {
    pub fn ana() -> CustomerInput {
        CustomerInput::new("Ana", AddressFixtures::SE)
    }

    pub fn bruno() -> CustomerInput {
        CustomerInput::new("Bruno", AddressFixtures::SE)
    }

    pub fn carla_on_paulista() -> CustomerInput {
        CustomerInput::new("Carla", AddressFixtures::PAULISTA)
    }

    /// Input whose postal code the provider does not know
    pub fn unknown_postal_code() -> CustomerInput {
        CustomerInput::new("Davi", AddressFixtures::UNKNOWN)
    }
}

/// Fixture for bank users
pub struct UserFixtures;

impl UserFixtures {
    /// Account number used by `rosa`
    pub const ROSA_ACCOUNT: &'static str = "00001-1";

    pub fn rosa() -> NewUser {
        NewUser::new(
            "Rosa",
            Account {
                number: Self::ROSA_ACCOUNT.to_string(),
                agency: "0001".to_string(),
                balance: dec!(1500.25),
                limit: dec!(500.00),
            },
            Card::new("4111 1111 1111 1111", dec!(1000.00)),
        )
    }

    /// A different user claiming Rosa's account number
    pub fn rosa_impostor() -> NewUser {
        let mut user = Self::rosa();
        user.name = "Impostor".to_string();
        user.card.number = "5500 0000 0000 0004".to_string();
        user
    }
}
