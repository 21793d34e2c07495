//! User model - foundation personnel accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::identity::generate_id;

/// Clearance roles. Exactly one per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Researcher,
    ContainmentSpecialist,
    FieldAgent,
    Reader,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Researcher => "RESEARCHER",
            UserRole::ContainmentSpecialist => "CONTAINMENT_SPECIALIST",
            UserRole::FieldAgent => "FIELD_AGENT",
            UserRole::Reader => "READER",
        }
    }
}

/// User entity as persisted in the `sce_users` slot.
///
/// The password is stored in clear text; the simulated store has no secrets
/// hygiene and the persisted layout is part of the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub is_email_verified: bool,
}

impl User {
    /// Create a new unverified user.
    pub fn new(username: &str, email: &str, password: &str, role: UserRole) -> Self {
        Self {
            id: generate_id(),
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
            created_at: Utc::now(),
            is_email_verified: false,
        }
    }

    /// Convert to the password-stripped projection kept in the session slot.
    pub fn sanitized(&self) -> SessionUser {
        SessionUser::from(self)
    }
}

/// Password-stripped user copy persisted in the `current_user` slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub is_email_verified: bool,
}

impl From<&User> for SessionUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            username: u.username.clone(),
            email: u.email.clone(),
            role: u.role,
            created_at: u.created_at,
            is_email_verified: u.is_email_verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_to_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&UserRole::ContainmentSpecialist).unwrap(),
            "\"CONTAINMENT_SPECIALIST\""
        );
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
    }

    #[test]
    fn user_uses_camel_case_slot_layout() {
        let user = User::new("alice", "alice@x.test", "secret1", UserRole::Reader);
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"isEmailVerified\":false"));
        assert!(json.contains("\"createdAt\""));
    }

    #[test]
    fn sanitized_drops_the_password() {
        let user = User::new("alice", "alice@x.test", "secret1", UserRole::Reader);
        let json = serde_json::to_string(&user.sanitized()).unwrap();
        assert!(!json.contains("secret1"));
        assert!(json.contains("\"username\":\"alice\""));
    }
}
