use std::sync::Arc;

use reqwest::StatusCode;
use tracing::{debug, error, warn};

use session::SessionStore;

/// Endpoint whose authorization failures must not end the session.
pub const LOGIN_PATH: &str = "/auth/login";

/// Ends the session when the backend reports an authorization failure.
///
/// The guard only performs the side effect; callers still receive the
/// original error.
#[derive(Clone)]
pub struct ResponseGuard {
    session: Arc<SessionStore>,
}

impl ResponseGuard {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    /// Returns whether the session was invalidated.
    pub async fn inspect(&self, path: &str, status: StatusCode) -> bool {
        if status != StatusCode::UNAUTHORIZED {
            return false;
        }

        // A rejected login would otherwise loop through logout and redirect.
        if is_login_path(path) {
            debug!(path, "login rejected; session left untouched");
            return false;
        }

        warn!(path, "session expired or unauthorized; logging out");

        if let Err(e) = self.session.logout().await {
            error!(error = ?e, "failed to clear persisted session");
        }
        true
    }
}

/// Matches the login endpoint with or without an API prefix, query string or
/// trailing slash.
pub fn is_login_path(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let path = path.trim_end_matches('/');
    path.ends_with(LOGIN_PATH)
}
