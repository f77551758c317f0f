use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::models::UserRecord;
use super::store::{DatabaseError, UserStore};

/// In-process user store keyed by e-mail. Backs the development server and the test suite.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record stored under `user.email`.
    pub async fn insert(&self, user: UserRecord) {
        let mut users = self.users.write().await;
        users.insert(user.email.clone(), user);
    }

    pub async fn remove(&self, email: &str) -> Option<UserRecord> {
        self.users.write().await.remove(email)
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<UserRecord>, DatabaseError> {
        let users = self.users.read().await;
        Ok(users.get(identifier).cloned())
    }
}
