//! Role tiers issued by the backend.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use cinegate_core::DomainError;

/// Role tier of an authenticated user.
///
/// Exactly these three roles exist. The derived ordering
/// (`Viewer < Moderator < Admin`) covers the hierarchical subset of actions;
/// capability checks still go through explicit allowed sets because role
/// semantics are not uniformly hierarchical (see [`crate::Capability`]).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Viewer,
    Moderator,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Viewer, Role::Moderator, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Viewer => "VIEWER",
            Role::Moderator => "MODERATOR",
            Role::Admin => "ADMIN",
        }
    }

    /// Moderator or admin: the tier allowed to upload and manage content.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Moderator | Role::Admin)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "VIEWER" => Ok(Role::Viewer),
            "MODERATOR" => Ok(Role::Moderator),
            "ADMIN" => Ok(Role::Admin),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}
