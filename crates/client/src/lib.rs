//! `cinegate-client` — consumer of the backend collaborator's REST surface.
//!
//! The backend is the system of record; this crate issues the calls, unwraps
//! the paging envelopes, maps failures into the client error taxonomy, and
//! enforces the uniform 401 policy (clear session, redirect to login). No
//! optimistic mutation: cached state is only touched after the backend
//! confirms.

pub mod api;
pub mod envelope;
pub mod error;
pub mod interceptor;
pub mod routes;
pub mod stale;

pub use api::{ApiClient, ProfileUpdate, Registration};
pub use envelope::{decode_movie, decode_movies, decode_records, unwrap_collection};
pub use error::{ApiError, classify_status};
pub use interceptor::{Intercepted, intercept};
pub use routes::{PageQuery, SortDirection, paths};
pub use stale::{ViewScope, ViewTicket};
