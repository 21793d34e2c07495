//! Role-based authorization checks.
//!
//! Every mutating operation goes through these checks instead of comparing
//! roles at its own call site.

use crate::models::{SessionUser, UserRole};

#[derive(Debug, Clone)]
pub struct PolicyService;

impl PolicyService {
    /// Creating, updating or deleting anomaly records and posts.
    pub fn can_manage_content(user: Option<&SessionUser>) -> bool {
        Self::is_admin(user)
    }

    /// Changing another user's role.
    pub fn can_manage_roles(user: Option<&SessionUser>) -> bool {
        Self::is_admin(user)
    }

    fn is_admin(user: Option<&SessionUser>) -> bool {
        user.map(|u| u.role == UserRole::Admin).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn session_user(role: UserRole) -> SessionUser {
        User::new("alice", "alice@x.test", "secret1", role).sanitized()
    }

    #[test]
    fn admin_can_manage_content_and_roles() {
        let user = session_user(UserRole::Admin);
        assert!(PolicyService::can_manage_content(Some(&user)));
        assert!(PolicyService::can_manage_roles(Some(&user)));
    }

    #[test]
    fn non_admin_roles_are_rejected() {
        for role in [
            UserRole::Researcher,
            UserRole::ContainmentSpecialist,
            UserRole::FieldAgent,
            UserRole::Reader,
        ] {
            let user = session_user(role);
            assert!(!PolicyService::can_manage_content(Some(&user)));
            assert!(!PolicyService::can_manage_roles(Some(&user)));
        }
    }

    #[test]
    fn anonymous_is_rejected() {
        assert!(!PolicyService::can_manage_content(None));
        assert!(!PolicyService::can_manage_roles(None));
    }
}
