//! User DTOs

use domain_bank::{Account, Card, NewUser, User};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBody {
    pub number: String,
    pub agency: String,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default)]
    pub limit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardBody {
    pub number: String,
    #[serde(default)]
    pub limit: Decimal,
}

/// Body of `POST /users`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub account: AccountBody,
    pub card: CardBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub account: AccountBody,
    pub card: CardBody,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        NewUser::new(
            request.name,
            Account {
                number: request.account.number,
                agency: request.account.agency,
                balance: request.account.balance,
                limit: request.account.limit,
            },
            Card::new(request.card.number, request.card.limit),
        )
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.value(),
            name: user.name,
            account: AccountBody {
                number: user.account.number,
                agency: user.account.agency,
                balance: user.account.balance,
                limit: user.account.limit,
            },
            card: CardBody {
                number: user.card.number,
                limit: user.card.limit,
            },
        }
    }
}
