//! Wiring for a single archive instance.

use std::sync::{Arc, RwLock};

use crate::config::ArchiveConfig;
use crate::services::{ContentRepository, EmailProvider, IdentityService, SessionManager};
use crate::storage::{ArchiveStore, Collections, KeyValueStore};

/// One archive instance over one persistence medium: the session manager
/// and the content repository, sharing the loaded collections.
#[derive(Clone)]
pub struct Archive {
    pub session: Arc<SessionManager>,
    pub content: ContentRepository,
}

impl Archive {
    /// Load persisted state from the medium, wire the services together and
    /// restore any previously persisted session.
    pub async fn bootstrap(
        config: &ArchiveConfig,
        kv: Arc<dyn KeyValueStore>,
        email: Arc<dyn EmailProvider>,
    ) -> Self {
        let store = ArchiveStore::new(kv, &config.storage.namespace);

        let collections = Arc::new(RwLock::new(Collections::default()));
        store.load(&mut collections.write().expect("collections lock poisoned"));

        let identity = IdentityService::new(store.clone(), email);
        let session = Arc::new(SessionManager::new(
            collections.clone(),
            store.clone(),
            identity,
        ));
        session.restore_session().await;

        let content = ContentRepository::new(collections, store, session.clone());

        tracing::info!(service = %config.service_name, "Archive ready");
        Self { session, content }
    }
}
