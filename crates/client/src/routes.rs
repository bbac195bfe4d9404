//! REST surface of the backend collaborator.
//!
//! Paths are owned by the backend; this module is the one place they are
//! spelled out.

use cinegate_core::{MovieId, UserId};

/// Sort direction for paged collection fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Paging parameters for collection endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
    pub sort_by: String,
    pub direction: SortDirection,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort_by: "createdAt".to_string(),
            direction: SortDirection::Desc,
        }
    }
}

impl PageQuery {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sortBy", self.sort_by.clone()),
            ("direction", self.direction.as_str().to_string()),
        ]
    }
}

/// Path builders for every endpoint this core consumes.
pub mod paths {
    use super::{MovieId, UserId};

    pub const LOGIN: &str = "/auth/login";
    pub const REGISTER: &str = "/auth/register";

    pub const MOVIES_ALL: &str = "/movies/all";
    pub const MOVIES_MINE: &str = "/movies/my";
    pub const PENDING_MOVIES: &str = "/approvals/pending/movies";
    pub const ADMIN_MOVIES_ALL: &str = "/admin/movies/all";

    pub const PROFILE: &str = "/user/profile";

    pub fn movie(id: MovieId) -> String {
        format!("/movies/{id}")
    }

    pub fn approve(id: MovieId) -> String {
        format!("/movies/approve/{id}")
    }

    pub fn reject(id: MovieId) -> String {
        format!("/approvals/movies/{id}/reject")
    }

    pub fn resubmit(id: MovieId) -> String {
        format!("/movies/{id}/resubmit")
    }

    pub fn reviews_by_movie(id: MovieId) -> String {
        format!("/reviews/movie/{id}")
    }

    pub fn reviews_by_user(id: UserId) -> String {
        format!("/reviews/user/{id}")
    }

    pub fn add_review(id: MovieId) -> String {
        format!("/reviews/add/{id}")
    }
}
