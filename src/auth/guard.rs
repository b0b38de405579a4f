//! Access rules for protected pages.

use crate::domain::auth::Session;

pub const LOGIN_PATH: &str = "/admin/login";
pub const HOME_PATH: &str = "/";
pub const DASHBOARD_PATH: &str = "/admin";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Not logged in; go to the login page and come back to `from`.
    RedirectLogin { from: String },
    /// Logged in without the required role.
    RedirectHome,
}

impl GuardDecision {
    /// Target of the redirect, if the request must not pass.
    pub fn location(&self) -> Option<String> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectLogin { from } => Some(login_location(from)),
            GuardDecision::RedirectHome => Some(HOME_PATH.to_string()),
        }
    }
}

pub fn authorize(session: &Session, require_admin: bool, location: &str) -> GuardDecision {
    if !session.is_authenticated() {
        return GuardDecision::RedirectLogin {
            from: location.to_string(),
        };
    }
    if require_admin && !session.is_admin() {
        return GuardDecision::RedirectHome;
    }
    GuardDecision::Allow
}

/// Login page URL carrying the originally requested location.
pub fn login_location(from: &str) -> String {
    match serde_html_form::to_string([("from", from)]) {
        Ok(query) => format!("{LOGIN_PATH}?{query}"),
        Err(err) => {
            log::warn!("Failed to encode login redirect: {err}");
            LOGIN_PATH.to_string()
        }
    }
}

/// Where to go after logging in: `from` when it is a local path, the
/// dashboard otherwise.
pub fn post_login_target(from: Option<&str>) -> &str {
    match from {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.starts_with(LOGIN_PATH) =>
        {
            path
        }
        _ => DASHBOARD_PATH,
    }
}
