//! `cinegate-auth` — pure authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. It holds the
//! role model, the capability table, the session snapshot, and the guard that
//! decides allow/deny from that snapshot alone.

pub mod capability;
pub mod guard;
pub mod identity;
pub mod roles;

pub use capability::Capability;
pub use guard::{AccessDenied, Destination, RouteDecision, RouteGuard, check, redirect_for};
pub use identity::{AuthToken, Identity, Session};
pub use roles::Role;
