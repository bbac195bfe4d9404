//! Movie records and the acting identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cinegate_auth::{Capability, Identity, Role};
use cinegate_core::{MovieId, UserId};

/// Moderation status of a movie record.
///
/// A freshly created movie is always `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovieStatus {
    Pending,
    Approved,
    Rejected,
}

impl MovieStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MovieStatus::Pending => "PENDING",
            MovieStatus::Approved => "APPROVED",
            MovieStatus::Rejected => "REJECTED",
        }
    }

    /// Only approved movies appear in public listings. A rejected movie
    /// stays visible to its owner.
    pub fn is_publicly_listed(self) -> bool {
        matches!(self, MovieStatus::Approved)
    }
}

impl core::fmt::Display for MovieStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client-side cache of a backend movie record.
///
/// The backend collaborator is the system of record; this is the read cache
/// handed to dashboards and views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub status: MovieStatus,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// The acting identity for lifecycle decisions, snapshotted from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            user_id: identity.id,
            role: identity.role,
        }
    }

    /// Whether this actor's role is in the capability's allowed set.
    pub fn may(&self, capability: Capability) -> bool {
        capability.permits(self.role)
    }
}
