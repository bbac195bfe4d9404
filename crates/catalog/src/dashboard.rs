//! Role-scoped dashboard read model.
//!
//! Counts are a pure partition over status — no hidden state, no memory of
//! previous counts. Recomputing after each backend completion is safe even
//! when calls finish out of issue order.

use serde::Serialize;

use cinegate_core::UserId;

use crate::movie::{Movie, MovieStatus};

/// Which slice of the catalog a dashboard may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardScope {
    /// All movies in the system.
    Admin,
    /// Only movies uploaded by this moderator.
    Moderator(UserId),
}

impl DashboardScope {
    pub fn admits(&self, movie: &Movie) -> bool {
        match self {
            DashboardScope::Admin => true,
            DashboardScope::Moderator(owner) => movie.owner_id == *owner,
        }
    }
}

/// Summary counts partitioned over moderation status.
///
/// Invariant: `total == pending + approved + rejected`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl DashboardCounts {
    /// Pure fold over a movie collection.
    pub fn tally<'a>(movies: impl IntoIterator<Item = &'a Movie>) -> Self {
        let mut counts = Self::default();
        for movie in movies {
            counts.total += 1;
            match movie.status {
                MovieStatus::Pending => counts.pending += 1,
                MovieStatus::Approved => counts.approved += 1,
                MovieStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }

    /// Tally only the movies the scope admits.
    pub fn for_scope<'a>(
        scope: DashboardScope,
        movies: impl IntoIterator<Item = &'a Movie>,
    ) -> Self {
        Self::tally(movies.into_iter().filter(|movie| scope.admits(movie)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cinegate_core::MovieId;
    use proptest::prelude::*;

    fn movie(id: u64, owner: u64, status: MovieStatus) -> Movie {
        Movie {
            id: MovieId::new(id),
            title: format!("movie-{id}"),
            description: None,
            thumbnail_url: None,
            video_url: None,
            language: None,
            runtime_minutes: None,
            year: None,
            status,
            owner_id: UserId::new(owner),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn counts_partition_by_status() {
        let movies = vec![
            movie(1, 1, MovieStatus::Pending),
            movie(2, 1, MovieStatus::Approved),
            movie(3, 2, MovieStatus::Approved),
            movie(4, 2, MovieStatus::Rejected),
        ];

        let counts = DashboardCounts::tally(&movies);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.approved, 2);
        assert_eq!(counts.rejected, 1);
    }

    #[test]
    fn moderator_scope_counts_only_own_uploads() {
        let movies = vec![
            movie(1, 1, MovieStatus::Pending),
            movie(2, 1, MovieStatus::Rejected),
            movie(3, 2, MovieStatus::Approved),
        ];

        let counts = DashboardCounts::for_scope(DashboardScope::Moderator(UserId::new(1)), &movies);
        assert_eq!(counts.total, 2);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.rejected, 1);
        assert_eq!(counts.approved, 0);

        let all = DashboardCounts::for_scope(DashboardScope::Admin, &movies);
        assert_eq!(all.total, 3);
    }

    #[test]
    fn empty_collection_tallies_to_zero() {
        let movies: Vec<Movie> = Vec::new();
        let counts = DashboardCounts::tally(&movies);
        assert_eq!(counts, DashboardCounts::default());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the partition invariant holds for any movie collection,
        /// under any scope.
        #[test]
        fn total_equals_sum_of_partitions(
            specs in prop::collection::vec((0u64..1000, 0u64..8, 0u8..3), 0..64)
        ) {
            let movies: Vec<Movie> = specs
                .into_iter()
                .enumerate()
                .map(|(i, (id, owner, status))| {
                    let status = match status {
                        0 => MovieStatus::Pending,
                        1 => MovieStatus::Approved,
                        _ => MovieStatus::Rejected,
                    };
                    movie(id + i as u64, owner, status)
                })
                .collect();

            let counts = DashboardCounts::tally(&movies);
            prop_assert_eq!(counts.total, counts.pending + counts.approved + counts.rejected);

            let scoped = DashboardCounts::for_scope(DashboardScope::Moderator(UserId::new(3)), &movies);
            prop_assert_eq!(scoped.total, scoped.pending + scoped.approved + scoped.rejected);
            prop_assert!(scoped.total <= counts.total);
        }
    }
}
