use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use crate::model::{BearerToken, Role, Session, UserIdentity};
use crate::storage::Storage;

/// Storage key of the persisted session.
pub const DEFAULT_SESSION_KEY: &str = "user";

/// Written in place of the session when the record cannot be removed.
const LOGGED_OUT: &str = "null";

/// Single source of truth for "who is logged in".
///
/// Holds the in-memory session and mirrors every mutation into durable
/// [`Storage`] before the mutation returns, so a fresh store over the same
/// storage (a reload) observes the latest state after [`SessionStore::initialize`].
///
/// Reads are synchronous and never wait on a writer. Writers are serialised so
/// the persisted and in-memory copies cannot be torn by overlapping calls.
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    key: String,
    state: watch::Sender<Session>,
    write: Mutex<()>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_key(storage, DEFAULT_SESSION_KEY)
    }

    pub fn with_key(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            state: watch::Sender::new(Session::anonymous()),
            write: Mutex::new(()),
        }
    }

    /// Builds a store and restores the persisted session in one step.
    pub async fn open(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        let store = Self::with_key(storage, key);
        store.initialize().await;
        store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Restores the persisted session.
    ///
    /// Never fails: a missing, unreadable or unparsable value yields an
    /// anonymous session.
    #[instrument(skip(self), target = "session", fields(key = %self.key))]
    pub async fn initialize(&self) -> Session {
        let _guard = self.write.lock().await;

        let restored = match self.storage.get(&self.key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Option<UserIdentity>>(&raw) {
                Ok(Some(identity)) => {
                    info!(role = %identity.role, "persisted session restored");
                    Session::signed_in(identity)
                }
                Ok(None) => {
                    debug!("persisted session was logged out");
                    Session::anonymous()
                }
                Err(e) => {
                    warn!(error = %e, "persisted session is corrupt; starting logged out");
                    Session::anonymous()
                }
            },
            Ok(None) => {
                debug!("no persisted session");
                Session::anonymous()
            }
            Err(e) => {
                warn!(error = ?e, "failed to read persisted session; starting logged out");
                Session::anonymous()
            }
        };

        self.publish(restored.clone());
        restored
    }

    /// Makes `identity` the active session, persisted first.
    ///
    /// If the durable write fails the in-memory session is left as it was.
    #[instrument(skip(self, identity), target = "session", fields(role = %identity.role))]
    pub async fn login(&self, identity: UserIdentity) -> Result<()> {
        let raw = serde_json::to_string(&identity).context("failed to serialize identity")?;

        let _guard = self.write.lock().await;

        self.storage
            .set(&self.key, &raw)
            .await
            .context("failed to persist session")?;

        self.publish(Session::signed_in(identity));

        info!("session started");
        Ok(())
    }

    /// Clears the session. Idempotent.
    ///
    /// If the persisted record cannot be removed it is overwritten with a
    /// logged-out marker. The in-memory session is cleared regardless; an
    /// error is returned only when storage still holds the old identity.
    #[instrument(skip(self), target = "session")]
    pub async fn logout(&self) -> Result<()> {
        let _guard = self.write.lock().await;

        let was_active = self.publish(Session::anonymous());

        if let Err(e) = self.storage.remove(&self.key).await {
            warn!(error = ?e, "failed to remove persisted session; overwriting it");
            self.storage
                .set(&self.key, LOGGED_OUT)
                .await
                .with_context(|| format!("failed to remove persisted session ({e:#})"))?;
        }

        if was_active {
            info!("session cleared");
        } else {
            debug!("logout with no active session");
        }
        Ok(())
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn identity(&self) -> Option<UserIdentity> {
        self.state.borrow().identity.clone()
    }

    pub fn is_active(&self) -> bool {
        self.state.borrow().is_active()
    }

    pub fn role(&self) -> Option<Role> {
        self.state.borrow().role()
    }

    pub fn token(&self) -> Option<BearerToken> {
        self.state.borrow().token().cloned()
    }

    /// Change notifications; the receiver sees the latest session on every
    /// mutation that actually changed it.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Replaces the in-memory session, notifying only on change.
    /// Returns whether the previous session was active.
    fn publish(&self, next: Session) -> bool {
        let mut was_active = false;
        self.state.send_if_modified(|cur| {
            was_active = cur.is_active();
            if *cur == next {
                return false;
            }
            *cur = next;
            true
        });
        was_active
    }
}
