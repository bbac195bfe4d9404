//! Authenticated identity and the session snapshot.

use serde::{Deserialize, Serialize};

use cinegate_core::UserId;

use crate::Role;

/// The authenticated user's identity, held for the lifetime of a tab.
///
/// Reconstructed from durable storage on load; destroyed on logout or on an
/// authentication-failure signal from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    /// Display attribute; the backend sends it as `name` on some routes.
    #[serde(alias = "name", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Opaque bearer token issued at login.
///
/// The token is never inspected client-side; `Debug` is redacted so it cannot
/// leak through logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

/// Authenticated state for one tab.
///
/// The token and identity travel together: it is impossible to construct a
/// session holding one without the other, which is the §3 invariant made
/// structural.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    inner: Option<(Identity, AuthToken)>,
}

impl Session {
    /// Logged-out session.
    pub fn anonymous() -> Self {
        Self { inner: None }
    }

    /// Session for a successfully authenticated identity.
    pub fn authenticated(identity: Identity, token: AuthToken) -> Self {
        Self {
            inner: Some((identity, token)),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.inner.as_ref().map(|(identity, _)| identity)
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.inner.as_ref().map(|(_, token)| token)
    }

    pub fn role(&self) -> Option<Role> {
        self.identity().map(|identity| identity.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.is_some()
    }

    /// Same token, refreshed identity (profile update). `None` when there is
    /// no authenticated session to refresh.
    pub fn refreshed(&self, identity: Identity) -> Option<Session> {
        self.token()
            .cloned()
            .map(|token| Session::authenticated(identity, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinegate_core::UserId;

    fn test_identity() -> Identity {
        Identity {
            id: UserId::new(7),
            username: "mod1".to_string(),
            role: Role::Moderator,
            display_name: Some("Mod One".to_string()),
        }
    }

    #[test]
    fn token_and_identity_are_present_together_or_not_at_all() {
        let anon = Session::anonymous();
        assert!(anon.identity().is_none());
        assert!(anon.token().is_none());

        let session = Session::authenticated(test_identity(), AuthToken::new("t-1"));
        assert!(session.identity().is_some());
        assert!(session.token().is_some());
    }

    #[test]
    fn refreshed_keeps_the_token() {
        let session = Session::authenticated(test_identity(), AuthToken::new("t-1"));
        let mut updated = test_identity();
        updated.display_name = Some("Renamed".to_string());

        let refreshed = session.refreshed(updated.clone()).unwrap();
        assert_eq!(refreshed.identity(), Some(&updated));
        assert_eq!(refreshed.token().unwrap().as_str(), "t-1");

        assert!(Session::anonymous().refreshed(updated).is_none());
    }

    #[test]
    fn identity_json_accepts_name_alias() {
        let identity: Identity = serde_json::from_str(
            r#"{"id":3,"username":"admin1","role":"ADMIN","name":"Admin One"}"#,
        )
        .unwrap();
        assert_eq!(identity.display_name.as_deref(), Some("Admin One"));
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = AuthToken::new("super-secret");
        assert_eq!(format!("{token:?}"), "AuthToken(..)");
    }
}
