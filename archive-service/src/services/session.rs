//! Session and account lifecycle management.
//!
//! Holds the single current session for this archive instance and owns the
//! account operations: register, login, logout, email verification and role
//! changes. Validation failures surface as `false` returns, never as errors.

use std::sync::{Arc, RwLock};

use crate::models::{SessionUser, User, UserRole};
use crate::services::{IdentityService, PolicyService};
use crate::storage::{ArchiveStore, Collections};

/// Observable session state for view-layer consumers.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub user: Option<SessionUser>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: true,
        }
    }
}

pub struct SessionManager {
    collections: Arc<RwLock<Collections>>,
    store: ArchiveStore,
    identity: IdentityService,
    state: RwLock<SessionState>,
}

impl SessionManager {
    pub fn new(
        collections: Arc<RwLock<Collections>>,
        store: ArchiveStore,
        identity: IdentityService,
    ) -> Self {
        Self {
            collections,
            store,
            identity,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Restore a previously persisted session. Runs once at startup; lands
    /// authenticated when a session record is present, anonymous otherwise
    /// (a corrupt record is cleared by the adapter).
    pub async fn restore_session(&self) {
        let restored = self.store.load_session_user();
        let mut state = self.state.write().expect("session lock poisoned");
        state.is_authenticated = restored.is_some();
        state.user = restored;
        state.is_loading = false;

        if let Some(ref user) = state.user {
            tracing::info!(user_id = %user.id, "Session restored");
        }
    }

    /// Exact email+password match, gated on the verified flag. On success
    /// the password-stripped user becomes the persisted session.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let session_user = {
            let collections = self.collections.read().expect("collections lock poisoned");
            collections
                .users
                .iter()
                .find(|u| u.email == email && u.password == password && u.is_email_verified)
                .map(User::sanitized)
        };

        let Some(session_user) = session_user else {
            return false;
        };

        self.store.save_session_user(&session_user);
        let mut state = self.state.write().expect("session lock poisoned");
        tracing::info!(user_id = %session_user.id, "User logged in");
        state.user = Some(session_user);
        state.is_authenticated = true;
        state.is_loading = false;
        true
    }

    /// Create an unverified account and issue its verification token. The
    /// first account ever registered is promoted to administrator; session
    /// state is untouched (the user must verify, then log in).
    pub async fn register(&self, username: &str, email: &str, password: &str) -> bool {
        {
            let mut collections = self.collections.write().expect("collections lock poisoned");
            if collections.users.iter().any(|u| u.email == email) {
                return false;
            }

            let role = if collections.users.is_empty() {
                UserRole::Admin
            } else {
                UserRole::Reader
            };

            let user = User::new(username, email, password, role);
            tracing::info!(user_id = %user.id, role = %user.role.as_str(), "User registered");
            collections.users.push(user);
            self.store.save(&collections);
        }

        self.identity.issue_verification_token(email).await;
        true
    }

    /// Clear the persisted session, unconditionally.
    pub fn logout(&self) {
        self.store.clear_session_user();
        let mut state = self.state.write().expect("session lock poisoned");
        state.user = None;
        state.is_authenticated = false;
        state.is_loading = false;
        tracing::info!("User logged out");
    }

    /// Flip the verified flag when the token matches the outstanding one
    /// for the address. Refreshes the session copy when the verified email
    /// belongs to the active session.
    pub async fn verify_email(&self, email: &str, token: &str) -> bool {
        if !self.identity.check_verification_token(email, token) {
            return false;
        }

        {
            let mut collections = self.collections.write().expect("collections lock poisoned");
            let Some(user) = collections.users.iter_mut().find(|u| u.email == email) else {
                return false;
            };
            user.is_email_verified = true;
            tracing::info!(user_id = %user.id, "Email verified");
            self.store.save(&collections);
        }

        let mut state = self.state.write().expect("session lock poisoned");
        if let Some(ref mut session_user) = state.user {
            if session_user.email == email {
                session_user.is_email_verified = true;
                self.store.save_session_user(session_user);
            }
        }
        true
    }

    /// Change a user's role. Only an administrator session may do this;
    /// the session copy is refreshed when the target is the acting user.
    pub async fn update_user_role(&self, user_id: &str, role: UserRole) -> bool {
        let acting = self.current_user();
        if !PolicyService::can_manage_roles(acting.as_ref()) {
            return false;
        }

        {
            let mut collections = self.collections.write().expect("collections lock poisoned");
            let Some(user) = collections.users.iter_mut().find(|u| u.id == user_id) else {
                return false;
            };
            user.role = role;
            tracing::info!(user_id = %user.id, role = %role.as_str(), "Role updated");
            self.store.save(&collections);
        }

        let mut state = self.state.write().expect("session lock poisoned");
        if let Some(ref mut session_user) = state.user {
            if session_user.id == user_id {
                session_user.role = role;
                self.store.save_session_user(session_user);
            }
        }
        true
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.state
            .read()
            .expect("session lock poisoned")
            .user
            .clone()
    }

    pub fn state(&self) -> SessionState {
        self.state.read().expect("session lock poisoned").clone()
    }

    /// Password-stripped listing of all accounts, for the admin panel.
    pub fn users(&self) -> Vec<SessionUser> {
        self.collections
            .read()
            .expect("collections lock poisoned")
            .users
            .iter()
            .map(User::sanitized)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CapturingEmailService;
    use crate::storage::MemoryStore;

    fn manager() -> SessionManager {
        let store = ArchiveStore::new(Arc::new(MemoryStore::new()), "");
        let identity = IdentityService::new(store.clone(), Arc::new(CapturingEmailService::new()));
        SessionManager::new(Arc::new(RwLock::new(Collections::default())), store, identity)
    }

    #[tokio::test]
    async fn restore_with_empty_medium_lands_anonymous() {
        let manager = manager();
        assert!(manager.state().is_loading);
        manager.restore_session().await;

        let state = manager.state();
        assert!(!state.is_loading);
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
    }

    #[tokio::test]
    async fn logout_is_unconditional() {
        let manager = manager();
        manager.restore_session().await;
        manager.logout();
        assert!(!manager.state().is_authenticated);
    }

    #[tokio::test]
    async fn register_does_not_authenticate() {
        let manager = manager();
        manager.restore_session().await;
        assert!(manager.register("alice", "alice@x.test", "secret1").await);

        let state = manager.state();
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert_eq!(manager.users().len(), 1);
    }
}
