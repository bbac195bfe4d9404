//! Moderation lifecycle for submitted movies.
//!
//! Decision logic follows the aggregate split: `handle` validates a command
//! against the current status and the acting role, returning events; `apply`
//! evolves state. An approve or reject that is already satisfied returns an
//! empty event list — duplicate UI clicks and network retries report success
//! without re-firing a transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cinegate_auth::Capability;
use cinegate_core::{
    Aggregate, AggregateRoot, DomainError, DomainEvent, ExpectedVersion, MovieId, UserId,
};

use crate::movie::{Actor, Movie, MovieStatus};

/// Aggregate root: a movie submission moving through moderation.
///
/// Rehydrated from the cached [`Movie`] record before acting on it; the
/// backend remains the authority for persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieSubmission {
    id: MovieId,
    owner_id: Option<UserId>,
    status: MovieStatus,
    title: String,
    description: Option<String>,
    removed: bool,
    version: u64,
    created: bool,
}

impl MovieSubmission {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: MovieId) -> Self {
        Self {
            id,
            owner_id: None,
            status: MovieStatus::Pending,
            title: String::new(),
            description: None,
            removed: false,
            version: 0,
            created: false,
        }
    }

    /// Rehydrate from a cached record fetched from the backend.
    pub fn from_record(record: &Movie) -> Self {
        Self {
            id: record.id,
            owner_id: Some(record.owner_id),
            status: record.status,
            title: record.title.clone(),
            description: record.description.clone(),
            removed: false,
            version: 0,
            created: true,
        }
    }

    pub fn id_typed(&self) -> MovieId {
        self.id
    }

    pub fn status(&self) -> MovieStatus {
        self.status
    }

    pub fn owner_id(&self) -> Option<UserId> {
        self.owner_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == Some(user_id)
    }

    /// Apply a batch of events after checking the snapshot version.
    ///
    /// Views act on cached snapshots; the check catches a view applying
    /// events on top of a snapshot it no longer holds.
    pub fn apply_all(
        &mut self,
        events: &[MovieEvent],
        expected: ExpectedVersion,
    ) -> Result<(), DomainError> {
        expected.check(self.version)?;
        for event in events {
            self.apply(event);
        }
        Ok(())
    }
}

impl AggregateRoot for MovieSubmission {
    type Id = MovieId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: SubmitMovie (upload a new movie; starts `Pending`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitMovie {
    pub movie_id: MovieId,
    pub actor: Actor,
    pub title: String,
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ApproveMovie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveMovie {
    pub movie_id: MovieId,
    pub actor: Actor,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RejectMovie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectMovie {
    pub movie_id: MovieId,
    pub actor: Actor,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ResubmitMovie (rejected movie back into the review queue).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResubmitMovie {
    pub movie_id: MovieId,
    pub actor: Actor,
    pub occurred_at: DateTime<Utc>,
}

/// Command: EditMovie (metadata/media replacement; never changes status).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditMovie {
    pub movie_id: MovieId,
    pub actor: Actor,
    pub title: Option<String>,
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeleteMovie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteMovie {
    pub movie_id: MovieId,
    pub actor: Actor,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovieCommand {
    Submit(SubmitMovie),
    Approve(ApproveMovie),
    Reject(RejectMovie),
    Resubmit(ResubmitMovie),
    Edit(EditMovie),
    Delete(DeleteMovie),
}

/// Event: MovieSubmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSubmitted {
    pub movie_id: MovieId,
    pub owner_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: MovieApproved (publicly listed from now on).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieApproved {
    pub movie_id: MovieId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: MovieRejected (hidden from public listings, visible to owner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRejected {
    pub movie_id: MovieId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: MovieResubmitted (back in the review queue).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieResubmitted {
    pub movie_id: MovieId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: MovieEdited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieEdited {
    pub movie_id: MovieId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: MovieRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRemoved {
    pub movie_id: MovieId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovieEvent {
    Submitted(MovieSubmitted),
    Approved(MovieApproved),
    Rejected(MovieRejected),
    Resubmitted(MovieResubmitted),
    Edited(MovieEdited),
    Removed(MovieRemoved),
}

impl DomainEvent for MovieEvent {
    fn event_type(&self) -> &'static str {
        match self {
            MovieEvent::Submitted(_) => "catalog.movie.submitted",
            MovieEvent::Approved(_) => "catalog.movie.approved",
            MovieEvent::Rejected(_) => "catalog.movie.rejected",
            MovieEvent::Resubmitted(_) => "catalog.movie.resubmitted",
            MovieEvent::Edited(_) => "catalog.movie.edited",
            MovieEvent::Removed(_) => "catalog.movie.removed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            MovieEvent::Submitted(e) => e.occurred_at,
            MovieEvent::Approved(e) => e.occurred_at,
            MovieEvent::Rejected(e) => e.occurred_at,
            MovieEvent::Resubmitted(e) => e.occurred_at,
            MovieEvent::Edited(e) => e.occurred_at,
            MovieEvent::Removed(e) => e.occurred_at,
        }
    }
}

impl Aggregate for MovieSubmission {
    type Command = MovieCommand;
    type Event = MovieEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            MovieEvent::Submitted(e) => {
                self.id = e.movie_id;
                self.owner_id = Some(e.owner_id);
                self.status = MovieStatus::Pending;
                self.title = e.title.clone();
                self.description = e.description.clone();
                self.removed = false;
                self.created = true;
            }
            MovieEvent::Approved(_) => {
                self.status = MovieStatus::Approved;
            }
            MovieEvent::Rejected(_) => {
                self.status = MovieStatus::Rejected;
            }
            MovieEvent::Resubmitted(_) => {
                self.status = MovieStatus::Pending;
            }
            MovieEvent::Edited(e) => {
                if let Some(title) = &e.title {
                    self.title = title.clone();
                }
                if let Some(description) = &e.description {
                    self.description = Some(description.clone());
                }
                // Status is untouched: an edited rejected movie stays
                // rejected until an explicit resubmit.
            }
            MovieEvent::Removed(_) => {
                self.removed = true;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            MovieCommand::Submit(cmd) => self.handle_submit(cmd),
            MovieCommand::Approve(cmd) => self.handle_approve(cmd),
            MovieCommand::Reject(cmd) => self.handle_reject(cmd),
            MovieCommand::Resubmit(cmd) => self.handle_resubmit(cmd),
            MovieCommand::Edit(cmd) => self.handle_edit(cmd),
            MovieCommand::Delete(cmd) => self.handle_delete(cmd),
        }
    }
}

impl MovieSubmission {
    fn ensure_exists(&self) -> Result<(), DomainError> {
        if !self.created || self.removed {
            return Err(DomainError::not_found());
        }
        Ok(())
    }

    fn ensure_movie_id(&self, movie_id: MovieId) -> Result<(), DomainError> {
        if self.id != movie_id {
            return Err(DomainError::invariant("movie_id mismatch"));
        }
        Ok(())
    }

    fn handle_submit(&self, cmd: &SubmitMovie) -> Result<Vec<MovieEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("movie already exists"));
        }

        if !cmd.actor.may(Capability::UploadMovie) {
            return Err(DomainError::Unauthorized);
        }

        if cmd.title.trim().is_empty() {
            return Err(DomainError::validation("title must not be empty"));
        }

        Ok(vec![MovieEvent::Submitted(MovieSubmitted {
            movie_id: cmd.movie_id,
            owner_id: cmd.actor.user_id,
            title: cmd.title.clone(),
            description: cmd.description.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_approve(&self, cmd: &ApproveMovie) -> Result<Vec<MovieEvent>, DomainError> {
        self.ensure_exists()?;
        self.ensure_movie_id(cmd.movie_id)?;

        if !cmd.actor.may(Capability::ApproveMovie) {
            return Err(DomainError::Unauthorized);
        }

        match self.status {
            MovieStatus::Pending => Ok(vec![MovieEvent::Approved(MovieApproved {
                movie_id: cmd.movie_id,
                occurred_at: cmd.occurred_at,
            })]),
            // Duplicate click / network retry: already satisfied.
            MovieStatus::Approved => Ok(Vec::new()),
            MovieStatus::Rejected => Err(DomainError::invalid_transition(
                "cannot approve a rejected movie; it must be resubmitted first",
            )),
        }
    }

    fn handle_reject(&self, cmd: &RejectMovie) -> Result<Vec<MovieEvent>, DomainError> {
        self.ensure_exists()?;
        self.ensure_movie_id(cmd.movie_id)?;

        if !cmd.actor.may(Capability::RejectMovie) {
            return Err(DomainError::Unauthorized);
        }

        match self.status {
            MovieStatus::Pending => Ok(vec![MovieEvent::Rejected(MovieRejected {
                movie_id: cmd.movie_id,
                occurred_at: cmd.occurred_at,
            })]),
            MovieStatus::Rejected => Ok(Vec::new()),
            MovieStatus::Approved => Err(DomainError::invalid_transition(
                "cannot reject an approved movie",
            )),
        }
    }

    fn handle_resubmit(&self, cmd: &ResubmitMovie) -> Result<Vec<MovieEvent>, DomainError> {
        self.ensure_exists()?;
        self.ensure_movie_id(cmd.movie_id)?;

        let owns_it =
            self.is_owned_by(cmd.actor.user_id) && cmd.actor.may(Capability::ResubmitOwnRejectedMovie);
        let admin_tier = cmd.actor.may(Capability::DeleteAnyMovie);
        if !owns_it && !admin_tier {
            return Err(DomainError::Unauthorized);
        }

        match self.status {
            MovieStatus::Rejected => Ok(vec![MovieEvent::Resubmitted(MovieResubmitted {
                movie_id: cmd.movie_id,
                occurred_at: cmd.occurred_at,
            })]),
            MovieStatus::Pending => Err(DomainError::invalid_transition(
                "movie is already pending review",
            )),
            MovieStatus::Approved => Err(DomainError::invalid_transition(
                "an approved movie cannot be resubmitted",
            )),
        }
    }

    fn handle_edit(&self, cmd: &EditMovie) -> Result<Vec<MovieEvent>, DomainError> {
        self.ensure_exists()?;
        self.ensure_movie_id(cmd.movie_id)?;

        if !self.is_owned_by(cmd.actor.user_id) || !cmd.actor.may(Capability::EditOwnMovie) {
            return Err(DomainError::Unauthorized);
        }

        if cmd.title.is_none() && cmd.description.is_none() {
            return Err(DomainError::validation("edit carries no changes"));
        }

        if let Some(title) = &cmd.title {
            if title.trim().is_empty() {
                return Err(DomainError::validation("title must not be empty"));
            }
        }

        Ok(vec![MovieEvent::Edited(MovieEdited {
            movie_id: cmd.movie_id,
            title: cmd.title.clone(),
            description: cmd.description.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_delete(&self, cmd: &DeleteMovie) -> Result<Vec<MovieEvent>, DomainError> {
        self.ensure_exists()?;
        self.ensure_movie_id(cmd.movie_id)?;

        let admin = cmd.actor.may(Capability::DeleteAnyMovie);
        // Owners may delete their own work only while it is not yet approved.
        let own_unapproved =
            self.is_owned_by(cmd.actor.user_id) && self.status != MovieStatus::Approved;
        if !admin && !own_unapproved {
            return Err(DomainError::Unauthorized);
        }

        Ok(vec![MovieEvent::Removed(MovieRemoved {
            movie_id: cmd.movie_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}
