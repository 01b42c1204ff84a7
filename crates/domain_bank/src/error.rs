//! Bank user domain errors

use thiserror::Error;

use core_kernel::{PortError, UserId};

/// Errors that can occur in the bank user domain
#[derive(Debug, Error)]
pub enum UserError {
    /// User with the given ID was not found
    #[error("User not found: {0}")]
    NotFound(UserId),

    /// Another user already owns the account number
    #[error("Account number already exists: {0}")]
    DuplicateAccount(String),

    /// The user store failed
    #[error("User store error: {0}")]
    Store(#[from] PortError),
}

impl UserError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, UserError::NotFound(_))
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, UserError::DuplicateAccount(_))
    }
}
