//! Session persistence over durable storage.

use std::sync::Arc;

use thiserror::Error;

use cinegate_auth::{AuthToken, Identity, Session};

use crate::signal::{SessionSignal, SignalHub, SignalSource, Subscription};
use crate::storage::{AUTH_TOKEN_KEY, StorageBackend, StorageError, USER_KEY};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to serialize identity: {0}")]
    Serialize(String),
}

/// Sole source of truth for "who am I" within a tab.
///
/// Wraps the shared durable store behind an explicit load/commit/clear
/// contract and emits a change signal on every mutation, so dependent UI
/// re-renders without a full page reload. Cloned handles share the same
/// backend and signal hub.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn StorageBackend>,
    hub: Arc<SignalHub<SessionSignal>>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            storage,
            hub: Arc::new(SignalHub::new()),
        }
    }

    /// Reconstruct the session from durable storage.
    ///
    /// Fails soft: absent keys, a half-present token/identity pair, or a
    /// malformed identity payload all read as "not logged in", never as an
    /// error.
    pub fn load(&self) -> Session {
        let token = self.read_key(AUTH_TOKEN_KEY);
        let user = self.read_key(USER_KEY);

        let (Some(token), Some(raw_identity)) = (token, user) else {
            return Session::anonymous();
        };

        match serde_json::from_str::<Identity>(&raw_identity) {
            Ok(identity) => Session::authenticated(identity, AuthToken::new(token)),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "stored identity payload is malformed; treating session as logged out"
                );
                Session::anonymous()
            }
        }
    }

    /// Persist the session to durable storage and emit a change signal.
    ///
    /// Atomic from the caller's perspective: the identity key is written
    /// last, and `load()` only reports logged-in when both keys are present,
    /// so a failure between the two writes is observed as logged out. A
    /// failed identity write also rolls the token key back.
    ///
    /// Committing an anonymous session behaves like [`SessionStore::clear`].
    pub fn commit(&self, session: &Session) -> Result<(), StoreError> {
        match (session.identity(), session.token()) {
            (Some(identity), Some(token)) => {
                let payload = serde_json::to_string(identity)
                    .map_err(|err| StoreError::Serialize(err.to_string()))?;

                self.storage.set(AUTH_TOKEN_KEY, token.as_str())?;
                if let Err(err) = self.storage.set(USER_KEY, &payload) {
                    if let Err(rollback) = self.storage.remove(AUTH_TOKEN_KEY) {
                        tracing::warn!(
                            error = %rollback,
                            "failed to roll back token key after identity write failure"
                        );
                    }
                    return Err(err.into());
                }
            }
            _ => {
                self.remove_both()?;
            }
        }

        self.notify();
        Ok(())
    }

    /// Remove both keys and emit a change signal.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.remove_both()?;
        self.notify();
        Ok(())
    }

    /// Subscribe to same-tab change signals (fired by commit/clear).
    pub fn subscribe(&self) -> Subscription<SessionSignal> {
        self.hub.subscribe()
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "storage read failed; treating key as absent");
                None
            }
        }
    }

    fn remove_both(&self) -> Result<(), StorageError> {
        self.storage.remove(AUTH_TOKEN_KEY)?;
        self.storage.remove(USER_KEY)?;
        Ok(())
    }

    fn notify(&self) {
        let signal = SessionSignal {
            source: SignalSource::SameTab,
        };
        if let Err(err) = self.hub.publish(signal) {
            // Notification is a best-effort side channel; the commit itself
            // has already landed.
            tracing::warn!(error = %err, "failed to publish session change signal");
        }
    }
}

impl core::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
