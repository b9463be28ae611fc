use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use session::DEFAULT_SESSION_KEY;
use session::storage::{FileStorage, SQLiteStorage, Storage};

/// Where the persisted session lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageLocation {
    /// One file per key under a directory.
    File(PathBuf),
    /// SQLite database URL, e.g. `sqlite://portal.db`.
    Sqlite(String),
}

impl StorageLocation {
    /// `sqlite://...` selects SQLite; `file://<dir>` or a bare path selects files.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("sqlite:") {
            StorageLocation::Sqlite(raw.to_string())
        } else {
            let dir = raw.strip_prefix("file://").unwrap_or(raw);
            StorageLocation::File(PathBuf::from(dir))
        }
    }

    pub async fn open(&self) -> anyhow::Result<Arc<dyn Storage>> {
        let storage: Arc<dyn Storage> = match self {
            StorageLocation::File(dir) => Arc::new(FileStorage::open(dir).await?),
            StorageLocation::Sqlite(url) => Arc::new(SQLiteStorage::new(url).await?),
        };
        Ok(storage)
    }
}

#[derive(Clone, Debug)]
pub struct PortalConfig {
    /// Backend base URL; endpoint paths are appended to it.
    pub api_base_url: String,

    /// Durable storage for the session.
    pub storage: StorageLocation,

    /// Storage key of the persisted session.
    pub session_key: String,

    /// Per-request timeout.
    pub request_timeout: Duration,

    /// Requests slower than this are logged under the `performance` target.
    pub slow_request: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            storage: StorageLocation::File(PathBuf::from(".portal")),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            request_timeout: Duration::from_millis(10_000),
            slow_request: Duration::from_millis(1_500),
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_base_url = std::env::var("PORTAL_API_URL").unwrap_or(defaults.api_base_url);

        let storage = std::env::var("PORTAL_STORAGE")
            .map(|raw| StorageLocation::parse(&raw))
            .unwrap_or(defaults.storage);

        let session_key = std::env::var("PORTAL_SESSION_KEY").unwrap_or(defaults.session_key);

        Self {
            api_base_url,
            storage,
            session_key,
            request_timeout: millis_from_env("PORTAL_TIMEOUT_MS", defaults.request_timeout),
            slow_request: millis_from_env("PORTAL_SLOW_MS", defaults.slow_request),
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

fn millis_from_env(var: &str, default: Duration) -> Duration {
    match std::env::var(var) {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                tracing::warn!(var, value = %raw, "ignoring non-numeric duration");
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_location_parsing() {
        assert_eq!(
            StorageLocation::parse("sqlite://portal.db"),
            StorageLocation::Sqlite("sqlite://portal.db".into())
        );
        assert_eq!(
            StorageLocation::parse("file:///var/lib/portal"),
            StorageLocation::File(PathBuf::from("/var/lib/portal"))
        );
        assert_eq!(
            StorageLocation::parse("state"),
            StorageLocation::File(PathBuf::from("state"))
        );
    }

    #[test]
    fn defaults_match_backend_layout() {
        let cfg = PortalConfig::default();
        assert_eq!(cfg.api_base_url, "http://localhost:5000/api");
        assert_eq!(cfg.session_key, "user");
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn bad_duration_falls_back() {
        let d = millis_from_env("PORTAL_TEST_UNSET_DURATION_VAR", Duration::from_millis(5));
        assert_eq!(d, Duration::from_millis(5));
    }
}
