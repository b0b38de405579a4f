//! Admin console identity and the persisted login session.

use serde::{Deserialize, Serialize};

use crate::domain::types::UserId;

/// Role granting access to the admin console.
pub const ADMIN_ROLE: &str = "admin";

/// Profile of the user behind a session, as returned by the auth API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub role: String,
}

/// Tokens plus profile owned by the auth context.
///
/// Any field may be missing: a session is hydrated from three independent
/// storage keys and a corrupted profile is dropped while the tokens are kept.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Session {
    pub fn new(access_token: String, refresh_token: String, user: User) -> Self {
        Self {
            user: Some(user),
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role == ADMIN_ROLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> User {
        User {
            id: UserId::new(1).unwrap(),
            username: "admin".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn flags_are_derived_from_current_state() {
        let mut session = Session::new("a".into(), "r".into(), user("admin"));
        assert!(session.is_authenticated());
        assert!(session.is_admin());

        session.access_token = None;
        assert!(!session.is_authenticated());
        assert!(session.is_admin());

        session.user = Some(user("member"));
        assert!(!session.is_admin());
    }

    #[test]
    fn empty_token_is_not_authenticated() {
        let session = Session {
            access_token: Some(String::new()),
            ..Session::default()
        };
        assert!(!session.is_authenticated());
    }
}
