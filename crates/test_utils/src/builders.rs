//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use domain_bank::{Account, Card, NewUser};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::UserFixtures;

/// Builder for constructing bank users
pub struct TestUserBuilder {
    name: String,
    account_number: String,
    agency: String,
    balance: Decimal,
    limit: Decimal,
    card_number: String,
    card_limit: Decimal,
}

impl Default for TestUserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestUserBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            name: "Rosa".to_string(),
            account_number: UserFixtures::ROSA_ACCOUNT.to_string(),
            agency: "0001".to_string(),
            balance: dec!(0.00),
            limit: dec!(500.00),
            card_number: "4111 1111 1111 1111".to_string(),
            card_limit: dec!(1000.00),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_account_number(mut self, number: impl Into<String>) -> Self {
        self.account_number = number.into();
        self
    }

    pub fn with_agency(mut self, agency: impl Into<String>) -> Self {
        self.agency = agency.into();
        self
    }

    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_limit(mut self, limit: Decimal) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_card(mut self, number: impl Into<String>, limit: Decimal) -> Self {
        self.card_number = number.into();
        self.card_limit = limit;
        self
    }

    /// Builds the user
    pub fn build(self) -> NewUser {
        NewUser::new(
            self.name,
            Account {
                number: self.account_number,
                agency: self.agency,
                balance: self.balance,
                limit: self.limit,
            },
            Card::new(self.card_number, self.card_limit),
        )
    }
}
