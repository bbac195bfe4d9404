//! `cinegate-catalog` — movie domain: records, moderation lifecycle, dashboards.

pub mod dashboard;
pub mod lifecycle;
pub mod movie;
pub mod review;

pub use dashboard::{DashboardCounts, DashboardScope};
pub use lifecycle::{
    ApproveMovie, DeleteMovie, EditMovie, MovieApproved, MovieCommand, MovieEdited, MovieEvent,
    MovieRejected, MovieRemoved, MovieResubmitted, MovieSubmission, MovieSubmitted, RejectMovie,
    ResubmitMovie, SubmitMovie,
};
pub use movie::{Actor, Movie, MovieStatus};
pub use review::{Review, ReviewDraft};
