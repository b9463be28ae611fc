use std::sync::Arc;

use reqwest::Request;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use tracing::{trace, warn};

use session::SessionStore;

/// Attaches the session's bearer credential to outgoing requests.
///
/// Purely synchronous: it reads the in-memory session and edits headers. It
/// never fails a request; when there is nothing usable to attach the request
/// goes out unauthenticated.
#[derive(Clone)]
pub struct RequestAuthorizer {
    session: Arc<SessionStore>,
}

impl RequestAuthorizer {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    /// Returns whether an `Authorization` header was attached.
    pub fn authorize(&self, req: &mut Request) -> bool {
        let Some(token) = self.session.token() else {
            req.headers_mut().remove(AUTHORIZATION);
            trace!(path = %req.url().path(), "no session; sending unauthenticated");
            return false;
        };

        match HeaderValue::from_str(&token.header_value()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                req.headers_mut().insert(AUTHORIZATION, value);
                true
            }
            Err(e) => {
                warn!(error = %e, path = %req.url().path(), "session token is not a valid header value; sending unauthenticated");
                req.headers_mut().remove(AUTHORIZATION);
                false
            }
        }
    }
}
