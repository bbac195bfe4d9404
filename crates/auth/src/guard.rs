//! Authorization guard.
//!
//! - No IO
//! - No panics
//! - Decisions are made purely from the in-memory session snapshot at call
//!   time, synchronously, before any protected view is constructed.

use thiserror::Error;

use crate::{Capability, Role, Session};

/// Why a capability check denied access.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    /// No identity in the session.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Identity present, but its role is not in the capability's allowed set.
    #[error("role {actual} is not allowed to {capability}")]
    InsufficientRole {
        capability: Capability,
        actual: Role,
    },
}

/// Where a denied visitor is sent instead of the protected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The login view.
    Login,
    /// The default landing view (public catalog).
    Landing,
}

impl Destination {
    pub fn path(self) -> &'static str {
        match self {
            Destination::Login => "/login",
            Destination::Landing => "/",
        }
    }
}

/// Check whether the session may exercise a capability.
pub fn check(capability: Capability, session: &Session) -> Result<(), AccessDenied> {
    let Some(identity) = session.identity() else {
        return Err(AccessDenied::NotAuthenticated);
    };

    if capability.permits(identity.role) {
        Ok(())
    } else {
        Err(AccessDenied::InsufficientRole {
            capability,
            actual: identity.role,
        })
    }
}

/// Redirect target per denial reason: unauthenticated visitors go to login,
/// authenticated-but-underprivileged ones back to the landing view.
pub fn redirect_for(denial: AccessDenied) -> Destination {
    match denial {
        AccessDenied::NotAuthenticated => Destination::Login,
        AccessDenied::InsufficientRole { .. } => Destination::Landing,
    }
}

/// Route chosen after a successful login, by role.
pub fn post_login_route(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::Moderator => "/moderator",
        Role::Viewer => "/",
    }
}

/// A protected route: required capability plus redirect policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGuard {
    required: Capability,
}

/// Outcome of a route guard, decided synchronously before the view is built,
/// so an unauthorized view is never transiently rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect {
        reason: AccessDenied,
        to: Destination,
    },
}

impl RouteGuard {
    pub const fn new(required: Capability) -> Self {
        Self { required }
    }

    pub fn required(&self) -> Capability {
        self.required
    }

    pub fn evaluate(&self, session: &Session) -> RouteDecision {
        match check(self.required, session) {
            Ok(()) => RouteDecision::Allow,
            Err(reason) => RouteDecision::Redirect {
                reason,
                to: redirect_for(reason),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::AuthToken;
    use crate::{Identity, Session};
    use cinegate_core::UserId;

    fn session_with_role(role: Role) -> Session {
        Session::authenticated(
            Identity {
                id: UserId::new(1),
                username: match role {
                    Role::Viewer => "viewer1",
                    Role::Moderator => "mod1",
                    Role::Admin => "admin1",
                }
                .to_string(),
                role,
                display_name: None,
            },
            AuthToken::new("token"),
        )
    }

    #[test]
    fn viewer_is_denied_upload_but_staff_is_allowed() {
        let denial = check(Capability::UploadMovie, &session_with_role(Role::Viewer)).unwrap_err();
        assert!(matches!(denial, AccessDenied::InsufficientRole { .. }));

        assert!(check(Capability::UploadMovie, &session_with_role(Role::Moderator)).is_ok());
        assert!(check(Capability::UploadMovie, &session_with_role(Role::Admin)).is_ok());
    }

    #[test]
    fn anonymous_session_is_denied_every_capability_as_not_authenticated() {
        let session = Session::anonymous();
        for cap in Capability::ALL {
            assert_eq!(
                check(cap, &session),
                Err(AccessDenied::NotAuthenticated),
                "{cap} must deny an anonymous session"
            );
        }
    }

    #[test]
    fn moderator_scenario_from_login() {
        // login as {username: "mod1", role: "MODERATOR"}
        let session = session_with_role(Role::Moderator);

        let denial = check(Capability::ViewAdminDashboard, &session).unwrap_err();
        assert_eq!(
            denial,
            AccessDenied::InsufficientRole {
                capability: Capability::ViewAdminDashboard,
                actual: Role::Moderator,
            }
        );

        assert!(check(Capability::UploadMovie, &session).is_ok());
    }

    #[test]
    fn redirects_follow_the_denial_reason() {
        assert_eq!(
            redirect_for(AccessDenied::NotAuthenticated),
            Destination::Login
        );
        assert_eq!(
            redirect_for(AccessDenied::InsufficientRole {
                capability: Capability::ViewAdminDashboard,
                actual: Role::Viewer,
            }),
            Destination::Landing
        );
        assert_eq!(Destination::Login.path(), "/login");
    }

    #[test]
    fn route_guard_decides_before_the_view_is_built() {
        let guard = RouteGuard::new(Capability::ViewAdminDashboard);

        assert_eq!(
            guard.evaluate(&session_with_role(Role::Admin)),
            RouteDecision::Allow
        );

        match guard.evaluate(&Session::anonymous()) {
            RouteDecision::Redirect { reason, to } => {
                assert_eq!(reason, AccessDenied::NotAuthenticated);
                assert_eq!(to, Destination::Login);
            }
            RouteDecision::Allow => panic!("anonymous session must not reach the admin dashboard"),
        }

        match guard.evaluate(&session_with_role(Role::Moderator)) {
            RouteDecision::Redirect { to, .. } => assert_eq!(to, Destination::Landing),
            RouteDecision::Allow => panic!("moderator must not reach the admin dashboard"),
        }
    }

    #[test]
    fn post_login_routes_by_role() {
        assert_eq!(post_login_route(Role::Admin), "/admin");
        assert_eq!(post_login_route(Role::Moderator), "/moderator");
        assert_eq!(post_login_route(Role::Viewer), "/");
    }
}
