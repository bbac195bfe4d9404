//! Centralized capability table.
//!
//! Every protected route and action is gated by exactly one capability, and
//! the allowed-role set per capability lives here. Views must not re-derive
//! role checks locally; this table is the single decision point.

use serde::{Deserialize, Serialize};

use crate::Role;

const ANY_IDENTITY: &[Role] = &[Role::Viewer, Role::Moderator, Role::Admin];
const STAFF: &[Role] = &[Role::Moderator, Role::Admin];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// A named permission gating a route or action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    // Any authenticated identity.
    ViewCatalog,
    ViewMovieDetail,
    SubmitReview,
    EditOwnProfile,
    ViewOwnReviews,

    // Moderator or admin.
    UploadMovie,
    EditOwnMovie,
    ResubmitOwnRejectedMovie,
    ViewModeratorDashboard,

    // Admin exactly.
    ViewAdminDashboard,
    ApproveMovie,
    RejectMovie,
    DeleteAnyMovie,
    EditAnyUser,
}

impl Capability {
    pub const ALL: [Capability; 14] = [
        Capability::ViewCatalog,
        Capability::ViewMovieDetail,
        Capability::SubmitReview,
        Capability::EditOwnProfile,
        Capability::ViewOwnReviews,
        Capability::UploadMovie,
        Capability::EditOwnMovie,
        Capability::ResubmitOwnRejectedMovie,
        Capability::ViewModeratorDashboard,
        Capability::ViewAdminDashboard,
        Capability::ApproveMovie,
        Capability::RejectMovie,
        Capability::DeleteAnyMovie,
        Capability::EditAnyUser,
    ];

    /// The exhaustive set of roles this capability admits.
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Capability::ViewCatalog
            | Capability::ViewMovieDetail
            | Capability::SubmitReview
            | Capability::EditOwnProfile
            | Capability::ViewOwnReviews => ANY_IDENTITY,

            Capability::UploadMovie
            | Capability::EditOwnMovie
            | Capability::ResubmitOwnRejectedMovie
            | Capability::ViewModeratorDashboard => STAFF,

            Capability::ViewAdminDashboard
            | Capability::ApproveMovie
            | Capability::RejectMovie
            | Capability::DeleteAnyMovie
            | Capability::EditAnyUser => ADMIN_ONLY,
        }
    }

    pub fn permits(self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::ViewCatalog => "view-catalog",
            Capability::ViewMovieDetail => "view-movie-detail",
            Capability::SubmitReview => "submit-review",
            Capability::EditOwnProfile => "edit-own-profile",
            Capability::ViewOwnReviews => "view-own-reviews",
            Capability::UploadMovie => "upload-movie",
            Capability::EditOwnMovie => "edit-own-movie",
            Capability::ResubmitOwnRejectedMovie => "resubmit-own-rejected-movie",
            Capability::ViewModeratorDashboard => "view-moderator-dashboard",
            Capability::ViewAdminDashboard => "view-admin-dashboard",
            Capability::ApproveMovie => "approve-movie",
            Capability::RejectMovie => "reject-movie",
            Capability::DeleteAnyMovie => "delete-any-movie",
            Capability::EditAnyUser => "edit-any-user",
        }
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_capabilities_admit_moderator_and_admin_only() {
        for cap in [
            Capability::UploadMovie,
            Capability::EditOwnMovie,
            Capability::ResubmitOwnRejectedMovie,
            Capability::ViewModeratorDashboard,
        ] {
            assert!(!cap.permits(Role::Viewer), "{cap} must deny VIEWER");
            assert!(cap.permits(Role::Moderator));
            assert!(cap.permits(Role::Admin));
        }
    }

    #[test]
    fn admin_capabilities_admit_admin_exactly() {
        for cap in [
            Capability::ViewAdminDashboard,
            Capability::ApproveMovie,
            Capability::RejectMovie,
            Capability::DeleteAnyMovie,
            Capability::EditAnyUser,
        ] {
            assert!(!cap.permits(Role::Viewer));
            assert!(!cap.permits(Role::Moderator), "{cap} must deny MODERATOR");
            assert!(cap.permits(Role::Admin));
        }
    }

    #[test]
    fn any_identity_capabilities_admit_every_role() {
        for cap in [
            Capability::ViewCatalog,
            Capability::ViewMovieDetail,
            Capability::SubmitReview,
            Capability::EditOwnProfile,
            Capability::ViewOwnReviews,
        ] {
            for role in Role::ALL {
                assert!(cap.permits(role), "{cap} must allow {role}");
            }
        }
    }

    #[test]
    fn every_capability_admits_admin() {
        // Admin is in the allowed set of every row of the table.
        for cap in Capability::ALL {
            assert!(cap.permits(Role::Admin));
        }
    }
}
