//! HTTP client for the backend collaborator.
//!
//! Calls are non-blocking; the UI stays responsive while a call is pending.
//! Nothing here mutates cached state — callers apply results after the
//! backend confirms, through the interceptor and stale-result checks.

use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use cinegate_auth::{AuthToken, Identity, Role, Session};
use cinegate_catalog::{Movie, Review, ReviewDraft};
use cinegate_core::{MovieId, UserId};

use crate::envelope::{decode_movies, decode_records};
use crate::error::{ApiError, classify_status};
use crate::routes::{PageQuery, paths};

/// Registration payload. The backend defaults the role to `VIEWER` when the
/// requested role requires approval.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub role: Role,
}

/// Profile update payload; only the provided fields change.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Client for the backend REST surface.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<AuthToken>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    pub fn with_token(base_url: impl Into<String>, token: AuthToken) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            token: Some(token),
        }
    }

    /// Client carrying the current session's bearer token (if any).
    pub fn for_session(base_url: impl Into<String>, session: &Session) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            token: session.token().cloned(),
        }
    }

    pub fn set_token(&mut self, token: AuthToken) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::now_v7();

        tracing::debug!(%request_id, %url, "issuing backend request");

        let mut req = self
            .http
            .request(method, &url)
            .header("X-Request-Id", request_id.to_string());
        if let Some(token) = &self.token {
            req = req.bearer_auth(token.as_str());
        }
        req
    }

    async fn execute(&self, req: RequestBuilder) -> Result<Value, ApiError> {
        let resp = req
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        if (200..300).contains(&status) {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str(&text).map_err(|err| ApiError::Malformed(err.to_string()))
        } else {
            Err(classify_status(status, extract_message(&text)))
        }
    }

    /// `POST /auth/login` → token + identity, as one session.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let body = self
            .execute(
                self.request(Method::POST, paths::LOGIN)
                    .form(&[("username", username), ("password", password)]),
            )
            .await?;
        decode_session(body)
    }

    /// `POST /auth/register` → token + identity, as one session.
    pub async fn register(&self, registration: &Registration) -> Result<Session, ApiError> {
        let body = self
            .execute(self.request(Method::POST, paths::REGISTER).form(registration))
            .await?;
        decode_session(body)
    }

    /// `GET /movies/all` — the public (approved) catalog.
    pub async fn fetch_all_movies(&self, page: &PageQuery) -> Result<Vec<Movie>, ApiError> {
        let body = self
            .execute(self.request(Method::GET, paths::MOVIES_ALL).query(&page.to_query()))
            .await?;
        decode_movies(body)
    }

    /// `GET /movies/my` — the caller's own uploads, any status.
    pub async fn fetch_my_movies(&self) -> Result<Vec<Movie>, ApiError> {
        let body = self.execute(self.request(Method::GET, paths::MOVIES_MINE)).await?;
        decode_movies(body)
    }

    /// `GET /approvals/pending/movies` — the review queue.
    pub async fn fetch_pending_movies(&self) -> Result<Vec<Movie>, ApiError> {
        let body = self
            .execute(self.request(Method::GET, paths::PENDING_MOVIES))
            .await?;
        decode_movies(body)
    }

    /// `GET /admin/movies/all` — every movie in the system.
    pub async fn fetch_admin_movies(&self) -> Result<Vec<Movie>, ApiError> {
        let body = self
            .execute(self.request(Method::GET, paths::ADMIN_MOVIES_ALL))
            .await?;
        decode_movies(body)
    }

    /// `POST /movies/approve/{id}`.
    pub async fn approve_movie(&self, id: MovieId) -> Result<(), ApiError> {
        self.execute(self.request(Method::POST, &paths::approve(id)))
            .await?;
        Ok(())
    }

    /// `POST /approvals/movies/{id}/reject`.
    pub async fn reject_movie(&self, id: MovieId) -> Result<(), ApiError> {
        self.execute(self.request(Method::POST, &paths::reject(id)))
            .await?;
        Ok(())
    }

    /// `POST /movies/{id}/resubmit`.
    pub async fn resubmit_movie(&self, id: MovieId) -> Result<(), ApiError> {
        self.execute(self.request(Method::POST, &paths::resubmit(id)))
            .await?;
        Ok(())
    }

    /// `DELETE /movies/{id}`.
    pub async fn delete_movie(&self, id: MovieId) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &paths::movie(id)))
            .await?;
        Ok(())
    }

    /// `GET /reviews/movie/{id}`.
    pub async fn fetch_movie_reviews(&self, id: MovieId) -> Result<Vec<Review>, ApiError> {
        let body = self
            .execute(self.request(Method::GET, &paths::reviews_by_movie(id)))
            .await?;
        decode_records(body)
    }

    /// `GET /reviews/user/{id}` — a user's own reviews.
    pub async fn fetch_user_reviews(&self, id: UserId) -> Result<Vec<Review>, ApiError> {
        let body = self
            .execute(self.request(Method::GET, &paths::reviews_by_user(id)))
            .await?;
        decode_records(body)
    }

    /// `POST /reviews/add/{id}`. The draft is validated locally first; the
    /// backend re-validates as the authority.
    pub async fn submit_review(&self, id: MovieId, draft: &ReviewDraft) -> Result<(), ApiError> {
        draft
            .validate()
            .map_err(|err| ApiError::Rejected {
                status: 400,
                message: err.to_string(),
            })?;

        let form = [
            ("reviewText", draft.review_text.clone()),
            ("rating", draft.rating.to_string()),
        ];
        self.execute(self.request(Method::POST, &paths::add_review(id)).form(&form))
            .await?;
        Ok(())
    }

    /// `GET /user/profile` — the caller's identity as the backend sees it.
    pub async fn fetch_profile(&self) -> Result<Identity, ApiError> {
        let body = self.execute(self.request(Method::GET, paths::PROFILE)).await?;
        decode_identity(body)
    }

    /// `PUT /user/profile` → the refreshed identity, ready to re-commit.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Identity, ApiError> {
        let body = self
            .execute(self.request(Method::PUT, paths::PROFILE).form(update))
            .await?;
        decode_identity(body)
    }
}

/// Pull a server-provided `message` field out of an error body, falling back
/// to the raw text.
fn extract_message(text: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        if let Some(Value::String(message)) = map.get("message") {
            return message.clone();
        }
    }
    text.to_string()
}

/// Decode a login/register response: a flat object carrying `token` plus the
/// identity fields, possibly wrapped in a `data` envelope.
fn decode_session(body: Value) -> Result<Session, ApiError> {
    let body = match body {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };

    let token = body
        .get("token")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::Malformed("auth response is missing a token".to_string()))?
        .to_string();

    let identity = decode_identity(body)?;
    Ok(Session::authenticated(identity, AuthToken::new(token)))
}

/// Decode an identity object, tolerating a `data` envelope.
fn decode_identity(body: Value) -> Result<Identity, ApiError> {
    let body = match body {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };

    serde_json::from_value(body).map_err(|err| ApiError::Malformed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinegate_core::UserId;
    use serde_json::json;

    #[test]
    fn login_response_becomes_a_session() {
        let body = json!({
            "token": "jwt-abc",
            "id": 7,
            "username": "mod1",
            "role": "MODERATOR",
            "name": "Mod One",
            "email": "mod1@example.com"
        });

        let session = decode_session(body).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token().unwrap().as_str(), "jwt-abc");

        let identity = session.identity().unwrap();
        assert_eq!(identity.id, UserId::new(7));
        assert_eq!(identity.role, Role::Moderator);
        assert_eq!(identity.display_name.as_deref(), Some("Mod One"));
    }

    #[test]
    fn enveloped_login_response_is_unwrapped() {
        let body = json!({
            "status": "OK",
            "message": "welcome",
            "data": { "token": "jwt-abc", "id": 7, "username": "mod1", "role": "MODERATOR" }
        });

        let session = decode_session(body).unwrap();
        assert_eq!(session.identity().unwrap().username, "mod1");
    }

    #[test]
    fn missing_token_is_malformed() {
        let body = json!({ "id": 7, "username": "mod1", "role": "MODERATOR" });
        assert!(matches!(
            decode_session(body),
            Err(ApiError::Malformed(_))
        ));
    }

    #[test]
    fn error_bodies_surface_the_server_message() {
        assert_eq!(
            extract_message(r#"{"message":"movie not found"}"#),
            "movie not found"
        );
        assert_eq!(extract_message("gateway timeout"), "gateway timeout");
    }
}
