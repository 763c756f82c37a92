//! Concurrent user registry keyed by user name.

use dashmap::DashMap;
use std::sync::Arc;
use trailpoint_core::user::User;

/// Lock-free registry of all known users. A database-backed store replaces
/// this for external users; in-memory entries serve test mode.
#[derive(Default)]
pub struct UserRegistry {
    users: DashMap<String, Arc<User>>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    /// Register a user. An already-registered name keeps its original entry.
    pub fn add_user(&self, user: Arc<User>) {
        self.users.entry(user.user_name.clone()).or_insert(user);
    }

    pub fn user(&self, user_name: &str) -> Option<Arc<User>> {
        self.users.get(user_name).map(|entry| Arc::clone(entry.value()))
    }

    pub fn all_users(&self) -> Vec<Arc<User>> {
        self.users
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
