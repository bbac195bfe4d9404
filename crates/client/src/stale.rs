//! Stale-result discard for views with outstanding backend calls.
//!
//! Completion order is not guaranteed to match issue order, and a result
//! that arrives after the issuing view unmounted must not touch current
//! state. Each view owns a [`ViewScope`]; every fetch carries a
//! [`ViewTicket`]; navigating away invalidates all outstanding tickets.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lifetime scope of one mounted view.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    generation: Arc<AtomicU64>,
}

/// Proof that a backend call was issued under a particular view generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTicket {
    generation: u64,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket for a call issued by the currently mounted view.
    pub fn issue(&self) -> ViewTicket {
        ViewTicket {
            generation: self.generation.load(Ordering::SeqCst),
        }
    }

    /// Invalidate all outstanding tickets (the view unmounted or navigated
    /// away).
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: ViewTicket) -> bool {
        ticket.generation == self.generation.load(Ordering::SeqCst)
    }

    /// Apply a completed call's result only if its ticket is still current.
    /// Returns whether the result was applied.
    pub fn apply<T>(&self, ticket: ViewTicket, value: T, apply: impl FnOnce(T)) -> bool {
        if self.is_current(ticket) {
            apply(value);
            true
        } else {
            tracing::debug!("dropping stale result from an unmounted view");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_ticket_applies_the_result() {
        let scope = ViewScope::new();
        let ticket = scope.issue();

        let mut applied = None;
        assert!(scope.apply(ticket, 3, |v| applied = Some(v)));
        assert_eq!(applied, Some(3));
    }

    #[test]
    fn invalidation_discards_outstanding_results() {
        let scope = ViewScope::new();
        let ticket = scope.issue();

        scope.invalidate();

        let mut applied = None;
        assert!(!scope.apply(ticket, 3, |v: i32| applied = Some(v)));
        assert_eq!(applied, None);
        assert!(!scope.is_current(ticket));
    }

    #[test]
    fn completion_order_does_not_matter_within_a_generation() {
        let scope = ViewScope::new();
        let first = scope.issue();
        let second = scope.issue();

        // The second-issued call completes first; both are still current.
        assert!(scope.is_current(second));
        assert!(scope.is_current(first));
    }
}
