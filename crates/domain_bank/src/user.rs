//! Bank users, their account and card

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::UserId;

/// A bank account owned by a user
///
/// `number` is unique across all users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub number: String,
    pub agency: String,
    pub balance: Decimal,
    pub limit: Decimal,
}

impl Account {
    /// Creates an empty account with no limit
    pub fn new(number: impl Into<String>, agency: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            agency: agency.into(),
            balance: Decimal::ZERO,
            limit: Decimal::ZERO,
        }
    }
}

/// A payment card issued to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub number: String,
    pub limit: Decimal,
}

impl Card {
    pub fn new(number: impl Into<String>, limit: Decimal) -> Self {
        Self {
            number: number.into(),
            limit,
        }
    }
}

/// A persisted bank user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub account: Account,
    pub card: Card,
}

/// A user not yet persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub account: Account,
    pub card: Card,
}

impl NewUser {
    pub fn new(name: impl Into<String>, account: Account, card: Card) -> Self {
        Self {
            name: name.into(),
            account,
            card,
        }
    }

    /// Attaches a store-assigned identifier
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            account: self.account,
            card: self.card,
        }
    }
}
