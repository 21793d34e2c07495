//! Identifier generation and email verification tokens.

use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

use crate::services::EmailProvider;
use crate::storage::ArchiveStore;

/// Opaque unique identifier for users, records and posts.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

fn generate_random_token() -> String {
    let mut rng = rand::thread_rng();
    let token_bytes: [u8; 32] = rng.gen();
    hex::encode(token_bytes)
}

/// Issues and checks verification tokens. One outstanding token per email:
/// issuing a new one overwrites the old. Tokens have no expiry and are not
/// consumed on use.
#[derive(Clone)]
pub struct IdentityService {
    store: ArchiveStore,
    email: Arc<dyn EmailProvider>,
}

impl IdentityService {
    pub fn new(store: ArchiveStore, email: Arc<dyn EmailProvider>) -> Self {
        Self { store, email }
    }

    /// Create a token for the address, persist it and dispatch it through
    /// the email seam. Dispatch failure is logged; the token stands either
    /// way.
    pub async fn issue_verification_token(&self, email: &str) -> String {
        let token = generate_random_token();

        let mut tokens = self.store.load_tokens();
        tokens.insert(email.to_string(), token.clone());
        self.store.save_tokens(&tokens);

        if let Err(e) = self.email.send_verification_email(email, &token).await {
            tracing::warn!(to = %email, error = %e, "Verification email dispatch failed");
        }

        token
    }

    /// True iff the supplied token exactly matches the outstanding token
    /// for the address.
    pub fn check_verification_token(&self, email: &str, token: &str) -> bool {
        self.store
            .load_tokens()
            .get(email)
            .map(|stored| stored == token)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CapturingEmailService;
    use crate::storage::MemoryStore;

    fn identity() -> (Arc<CapturingEmailService>, IdentityService) {
        let mailbox = Arc::new(CapturingEmailService::new());
        let store = ArchiveStore::new(Arc::new(MemoryStore::new()), "");
        (mailbox.clone(), IdentityService::new(store, mailbox))
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(generate_id(), generate_id());
    }

    #[tokio::test]
    async fn issued_token_is_dispatched_and_checkable() {
        let (mailbox, identity) = identity();
        let token = identity.issue_verification_token("a@x.test").await;

        assert_eq!(mailbox.last_token_for("a@x.test"), Some(token.clone()));
        assert!(identity.check_verification_token("a@x.test", &token));
        assert!(!identity.check_verification_token("a@x.test", "wrong"));
        assert!(!identity.check_verification_token("b@x.test", &token));
    }

    #[tokio::test]
    async fn reissue_overwrites_the_previous_token() {
        let (_, identity) = identity();
        let first = identity.issue_verification_token("a@x.test").await;
        let second = identity.issue_verification_token("a@x.test").await;

        assert_ne!(first, second);
        assert!(!identity.check_verification_token("a@x.test", &first));
        assert!(identity.check_verification_token("a@x.test", &second));
    }

    #[tokio::test]
    async fn check_is_not_single_use() {
        let (_, identity) = identity();
        let token = identity.issue_verification_token("a@x.test").await;
        assert!(identity.check_verification_token("a@x.test", &token));
        assert!(identity.check_verification_token("a@x.test", &token));
    }
}
