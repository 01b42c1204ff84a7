//! Bank user application service

use std::sync::Arc;

use tracing::{info, instrument, warn};

use core_kernel::UserId;

use crate::error::UserError;
use crate::ports::UserStore;
use crate::user::{NewUser, User};

/// Looks up and registers bank users
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Returns the underlying store, e.g. for readiness checks
    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    /// Retrieves a user
    ///
    /// # Errors
    ///
    /// `UserError::NotFound` when no user has the identifier
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn find_by_id(&self, id: UserId) -> Result<User, UserError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Registers a user whose account number is not taken yet
    ///
    /// The existence check runs first; a conflict raised by the store at
    /// write time (two concurrent registrations) maps to the same error.
    #[instrument(skip(self, user), fields(account_number = %user.account.number))]
    pub async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let number = user.account.number.clone();
        if self.store.exists_by_account_number(&number).await? {
            warn!("Account number already registered");
            return Err(UserError::DuplicateAccount(number));
        }

        let created = self.store.insert(user).await.map_err(|e| {
            if e.is_conflict() {
                UserError::DuplicateAccount(number.clone())
            } else {
                UserError::Store(e)
            }
        })?;

        info!(user_id = %created.id, "User created");
        Ok(created)
    }
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}
