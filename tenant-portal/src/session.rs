//! Process-wide login session.
//!
//! Written once on a successful credentialed login, read by whatever needs the
//! token afterwards, and cleared on logout. The backing store is a plain
//! string key-value map, mirroring browser local storage.

use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const USER_PROFILE_KEY: &str = "user";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }
}

pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Persist the token and the serialized user profile.
    pub fn start(&self, token: &str, user: &Value) -> Result<(), serde_json::Error> {
        let user = serde_json::to_string(user)?;
        self.store.set(AUTH_TOKEN_KEY, token.to_string());
        self.store.set(USER_PROFILE_KEY, user);
        Ok(())
    }

    pub fn auth_token(&self) -> Option<String> {
        self.store.get(AUTH_TOKEN_KEY)
    }

    /// The stored profile; `None` if absent or no longer valid JSON.
    pub fn user_profile(&self) -> Option<Value> {
        let raw = self.store.get(USER_PROFILE_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Stored user profile is not valid JSON: {}", e);
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token().is_some()
    }

    pub fn clear(&self) {
        self.store.remove(AUTH_TOKEN_KEY);
        self.store.remove(USER_PROFILE_KEY);
    }
}
