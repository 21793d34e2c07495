//! Store adapter over the key-value medium.
//!
//! Serializes the three top-level collections plus the session user and the
//! verification token map to named slots. Failures on either direction are
//! logged and swallowed: a corrupt or missing slot leaves the in-memory
//! state as it was, and a failed write never reaches the caller.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{AnomalyObject, Post, SessionUser, User};
use crate::storage::KeyValueStore;

const USERS_SLOT: &str = "sce_users";
const OBJECTS_SLOT: &str = "sce_objects";
const POSTS_SLOT: &str = "sce_posts";
const SESSION_SLOT: &str = "current_user";
const TOKENS_SLOT: &str = "verification_tokens";

/// The three top-level collections, keyed by identifier within each vec.
#[derive(Debug, Default)]
pub struct Collections {
    pub users: Vec<User>,
    pub objects: Vec<AnomalyObject>,
    pub posts: Vec<Post>,
}

#[derive(Clone)]
pub struct ArchiveStore {
    kv: Arc<dyn KeyValueStore>,
    namespace: String,
}

impl ArchiveStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, namespace: &str) -> Self {
        Self {
            kv,
            namespace: namespace.to_string(),
        }
    }

    fn slot(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}_{}", self.namespace, name)
        }
    }

    fn read_slot<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let raw = self.kv.get(&self.slot(name))?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(slot = %name, error = %e, "Failed to parse persisted slot");
                None
            }
        }
    }

    fn write_slot<T: Serialize>(&self, name: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(slot = %name, error = %e, "Failed to serialize slot");
                return;
            }
        };
        if let Err(e) = self.kv.set(&self.slot(name), &raw) {
            tracing::error!(slot = %name, error = %e, "Failed to persist slot");
        }
    }

    /// Read the three collection slots. Each collection is only replaced
    /// when its slot is present and parses; otherwise the current value
    /// stays (effectively empty on first run).
    pub fn load(&self, collections: &mut Collections) {
        if let Some(users) = self.read_slot(USERS_SLOT) {
            collections.users = users;
        }
        if let Some(objects) = self.read_slot(OBJECTS_SLOT) {
            collections.objects = objects;
        }
        if let Some(posts) = self.read_slot(POSTS_SLOT) {
            collections.posts = posts;
        }
    }

    /// Persist all three collections.
    pub fn save(&self, collections: &Collections) {
        self.write_slot(USERS_SLOT, &collections.users);
        self.write_slot(OBJECTS_SLOT, &collections.objects);
        self.write_slot(POSTS_SLOT, &collections.posts);
    }

    /// Read the persisted session user. A corrupt record is cleared so the
    /// next restore starts clean.
    pub fn load_session_user(&self) -> Option<SessionUser> {
        let raw = self.kv.get(&self.slot(SESSION_SLOT))?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Corrupt session record, clearing it");
                self.kv.remove(&self.slot(SESSION_SLOT));
                None
            }
        }
    }

    pub fn save_session_user(&self, user: &SessionUser) {
        self.write_slot(SESSION_SLOT, user);
    }

    pub fn clear_session_user(&self) {
        self.kv.remove(&self.slot(SESSION_SLOT));
    }

    /// Read the email -> token map; corrupt or missing means empty.
    pub fn load_tokens(&self) -> HashMap<String, String> {
        self.read_slot(TOKENS_SLOT).unwrap_or_default()
    }

    pub fn save_tokens(&self, tokens: &HashMap<String, String>) {
        self.write_slot(TOKENS_SLOT, tokens);
    }
}
