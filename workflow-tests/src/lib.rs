//! Archive workflow integration tests library.
//!
//! Provides test infrastructure for running end-to-end scenarios against a
//! full archive instance: registration, verification, login and content
//! management over a shared in-memory medium.

use std::sync::{Arc, Once};

use archive_service::config::ArchiveConfig;
use archive_service::models::UserRole;
use archive_service::services::{CapturingEmailService, EmailProvider};
use archive_service::storage::{KeyValueStore, MemoryStore};
use archive_service::Archive;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,archive_service=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// A bootstrapped archive over its own in-memory medium, with a capturing
/// mailbox so tests can read issued verification tokens.
pub struct TestEnv {
    pub archive: Archive,
    pub mailbox: Arc<CapturingEmailService>,
    pub kv: Arc<MemoryStore>,
    pub config: ArchiveConfig,
}

impl TestEnv {
    pub async fn new() -> Self {
        init_tracing();

        let config = ArchiveConfig::from_env().expect("Failed to load archive config");
        let kv = Arc::new(MemoryStore::new());
        let mailbox = Arc::new(CapturingEmailService::new());

        let archive = Archive::bootstrap(
            &config,
            kv.clone() as Arc<dyn KeyValueStore>,
            mailbox.clone() as Arc<dyn EmailProvider>,
        )
        .await;

        Self {
            archive,
            mailbox,
            kv,
            config,
        }
    }

    /// Bootstrap a fresh archive instance over the same medium, as a
    /// browser reload would.
    pub async fn reopen(&self) -> Archive {
        Archive::bootstrap(
            &self.config,
            self.kv.clone() as Arc<dyn KeyValueStore>,
            self.mailbox.clone() as Arc<dyn EmailProvider>,
        )
        .await
    }

    /// The most recent verification token dispatched to an address.
    pub fn issued_token(&self, email: &str) -> String {
        self.mailbox
            .last_token_for(email)
            .expect("No verification token was dispatched")
    }

    /// Register, verify and log in a user in one step.
    pub async fn register_verified(&self, username: &str, email: &str, password: &str) {
        assert!(self.archive.session.register(username, email, password).await);
        let token = self.issued_token(email);
        assert!(self.archive.session.verify_email(email, &token).await);
        assert!(self.archive.session.login(email, password).await);
    }

    /// Look up a registered user's id by email via the admin listing.
    pub fn user_id(&self, email: &str) -> String {
        self.archive
            .session
            .users()
            .into_iter()
            .find(|u| u.email == email)
            .map(|u| u.id)
            .expect("No user with that email")
    }

    /// The role currently recorded for a user, by email.
    pub fn role_of(&self, email: &str) -> UserRole {
        self.archive
            .session
            .users()
            .into_iter()
            .find(|u| u.email == email)
            .map(|u| u.role)
            .expect("No user with that email")
    }
}
