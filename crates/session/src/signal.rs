//! Session change notification fan-out.
//!
//! One logical "session changed" notification with two triggering sources,
//! so observer logic is never duplicated per signal type.

use std::sync::{Mutex, mpsc};
use std::time::Duration;

use thiserror::Error;

/// Which source raised a session-changed signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalSource {
    /// Commit/clear in the current tab (the in-tab custom event analog).
    SameTab,
    /// Platform storage-change event: another tab mutated the shared store.
    StorageEvent,
}

/// A session-changed notification.
///
/// Carries no session payload; listeners re-load from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSignal {
    pub source: SignalSource,
}

#[derive(Debug, Error)]
pub enum SignalError {
    /// Publish failed due to internal lock poisoning.
    #[error("signal hub lock poisoned")]
    Poisoned,
}

/// Receiving end of a hub subscription.
///
/// Designed for single-threaded consumption: one logical event loop per tab
/// drains its subscription between UI turns.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: mpsc::Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: mpsc::Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Best-effort in-memory fan-out hub.
///
/// - No IO / no async
/// - Broadcast semantics: each subscriber gets a copy of every message
/// - At-least-once: duplicates are acceptable, listeners must be idempotent
#[derive(Debug)]
pub struct SignalHub<M> {
    subscribers: Mutex<Vec<mpsc::Sender<M>>>,
}

impl<M> SignalHub<M> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M> Default for SignalHub<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<M: Clone + Send + 'static> SignalHub<M> {
    pub fn publish(&self, message: M) -> Result<(), SignalError> {
        let mut subs = self.subscribers.lock().map_err(|_| SignalError::Poisoned)?;

        // Drop any dead subscribers while publishing.
        subs.retain(|tx| tx.send(message.clone()).is_ok());

        Ok(())
    }

    pub fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned, we still return a subscription;
        // it just won't receive messages until the process restarts.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_receives_every_signal() {
        let hub: SignalHub<SessionSignal> = SignalHub::new();
        let first = hub.subscribe();
        let second = hub.subscribe();

        hub.publish(SessionSignal {
            source: SignalSource::SameTab,
        })
        .unwrap();

        assert_eq!(first.try_recv().unwrap().source, SignalSource::SameTab);
        assert_eq!(second.try_recv().unwrap().source, SignalSource::SameTab);
    }

    #[test]
    fn dropped_subscribers_are_pruned_on_publish() {
        let hub: SignalHub<SessionSignal> = SignalHub::new();
        let kept = hub.subscribe();
        drop(hub.subscribe());

        hub.publish(SessionSignal {
            source: SignalSource::StorageEvent,
        })
        .unwrap();

        assert!(kept.try_recv().is_ok());
    }
}
