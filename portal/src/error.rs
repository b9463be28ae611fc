use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the backend. `message` is the backend's
    /// `error` field when the body carried one.
    #[error("{path} returned {status}: {message}")]
    Status {
        status: StatusCode,
        path: String,
        message: String,
    },

    #[error("{0}")]
    AccessDenied(String),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("session storage failed: {0:#}")]
    Session(#[source] anyhow::Error),
}

impl PortalError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            PortalError::Status { status, .. } => Some(*status),
            PortalError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// True for the backend's authorization-failure status.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

pub type PortalResult<T> = Result<T, PortalError>;
