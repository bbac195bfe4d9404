//! Cross-tab session propagation.

use std::sync::Mutex;

use cinegate_auth::Session;

use crate::signal::{SessionSignal, SignalHub, SignalSource, Subscription};
use crate::store::SessionStore;

/// Keeps the session consistent across tabs of the same origin.
///
/// Two signal sources converge on a single refresh path: the store's
/// same-tab hub (commit/clear in this tab) and the platform storage-change
/// event relayed through [`CrossTabSync::notify_storage_event`]. Either way
/// the session is re-loaded from durable storage and republished to
/// observers — but only when it actually changed, so duplicate signals
/// collapse into one observer update. Observers must still tolerate
/// redundant updates; the dedup is a quality goal, not a contract.
pub struct CrossTabSync {
    store: SessionStore,
    same_tab: Subscription<SessionSignal>,
    observers: SignalHub<Session>,
    last_published: Mutex<Option<Session>>,
}

impl CrossTabSync {
    pub fn new(store: SessionStore) -> Self {
        let same_tab = store.subscribe();
        Self {
            store,
            same_tab,
            observers: SignalHub::new(),
            last_published: Mutex::new(None),
        }
    }

    /// Register an observer (navigation bar, guards). Each observer receives
    /// the full session snapshot on every actual change.
    pub fn subscribe(&self) -> Subscription<Session> {
        self.observers.subscribe()
    }

    /// Current session, read straight from the store.
    pub fn current(&self) -> Session {
        self.store.load()
    }

    /// Entry point for the platform storage-change event. The event carries
    /// no payload; the session is re-loaded from the shared store.
    pub fn notify_storage_event(&self) {
        self.refresh(SignalSource::StorageEvent);
    }

    /// Drain pending same-tab signals (commit/clear in this tab) and refresh
    /// once if any arrived. Called from the tab's event loop.
    pub fn pump(&self) {
        let mut saw_signal = false;
        while self.same_tab.try_recv().is_ok() {
            saw_signal = true;
        }
        if saw_signal {
            self.refresh(SignalSource::SameTab);
        }
    }

    fn refresh(&self, source: SignalSource) {
        let session = self.store.load();

        let Ok(mut last) = self.last_published.lock() else {
            tracing::warn!("cross-tab state lock poisoned; dropping refresh");
            return;
        };

        if last.as_ref() == Some(&session) {
            tracing::debug!(?source, "session unchanged; skipping republish");
            return;
        }
        *last = Some(session.clone());
        drop(last);

        tracing::debug!(
            ?source,
            authenticated = session.is_authenticated(),
            "republishing session change"
        );
        if let Err(err) = self.observers.publish(session) {
            tracing::warn!(error = %err, "failed to republish session to observers");
        }
    }
}

impl core::fmt::Debug for CrossTabSync {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CrossTabSync").finish_non_exhaustive()
    }
}
