//! Bank User Domain
//!
//! Users of the bank operation API, each owning one account and one card.
//! The account number identifies an account across the whole bank: the
//! `UserService` refuses to register a second user with a number already in
//! use, and the store backs the check with a uniqueness constraint.

pub mod user;
pub mod error;
pub mod ports;
pub mod service;

pub use user::{User, NewUser, Account, Card};
pub use error::UserError;
pub use ports::UserStore;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockUserStore;
pub use service::UserService;
