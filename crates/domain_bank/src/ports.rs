//! Bank Domain Ports
//!
//! `UserStore` is the only port of the bank domain. The PostgreSQL adapter
//! lives in `infra_db`; an in-memory mock is available behind the `mock`
//! feature.

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError, UserId};

use crate::user::{NewUser, User};

/// Persistence port for bank users
#[async_trait]
pub trait UserStore: DomainPort + HealthCheckable {
    /// Retrieves a user by ID, `None` when absent
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, PortError>;

    /// Checks whether any user owns the account number
    async fn exists_by_account_number(&self, number: &str) -> Result<bool, PortError>;

    /// Persists a new user
    ///
    /// # Errors
    ///
    /// `PortError::Conflict` when the account number is already taken at
    /// write time
    async fn insert(&self, user: NewUser) -> Result<User, PortError>;
}

/// In-memory mock implementation of UserStore
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    #[derive(Debug, Default)]
    struct MockState {
        users: BTreeMap<UserId, User>,
        next_id: i64,
    }

    /// In-memory user store enforcing account-number uniqueness on insert
    #[derive(Debug, Default)]
    pub struct MockUserStore {
        state: RwLock<MockState>,
    }

    impl MockUserStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of stored users
        pub async fn user_count(&self) -> usize {
            self.state.read().await.users.len()
        }
    }

    impl DomainPort for MockUserStore {}

    #[async_trait]
    impl HealthCheckable for MockUserStore {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::new("mock-user-store", AdapterHealth::Healthy, 0)
        }
    }

    #[async_trait]
    impl UserStore for MockUserStore {
        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, PortError> {
            Ok(self.state.read().await.users.get(&id).cloned())
        }

        async fn exists_by_account_number(&self, number: &str) -> Result<bool, PortError> {
            Ok(self
                .state
                .read()
                .await
                .users
                .values()
                .any(|u| u.account.number == number))
        }

        async fn insert(&self, user: NewUser) -> Result<User, PortError> {
            let mut state = self.state.write().await;
            if state.users.values().any(|u| u.account.number == user.account.number) {
                return Err(PortError::conflict(format!(
                    "account number {} already exists",
                    user.account.number
                )));
            }
            state.next_id += 1;
            let user = user.into_user(UserId::new(state.next_id));
            state.users.insert(user.id, user.clone());
            Ok(user)
        }
    }
}
