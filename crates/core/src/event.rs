//! Domain event contract.

use chrono::{DateTime, Utc};

/// Minimal interface for events emitted by aggregates.
///
/// Events describe what happened, in past tense. They are the unit handed to
/// read models and logged by the UI layer.
pub trait DomainEvent {
    /// Stable, dot-separated event name (e.g. `"catalog.movie.approved"`).
    fn event_type(&self) -> &'static str;

    /// When the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}
