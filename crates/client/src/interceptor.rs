//! Uniform handling of authentication-failure responses.
//!
//! Any backend call answering with a 401-equivalent clears the session and
//! sends the user to the login destination, regardless of which call
//! produced it.

use cinegate_auth::Destination;
use cinegate_session::SessionStore;

use crate::error::ApiError;

/// Outcome of running a response through the auth interceptor.
#[derive(Debug)]
pub struct Intercepted<T> {
    pub result: Result<T, ApiError>,
    pub redirect: Option<Destination>,
}

/// Apply the uniform 401 policy to a completed call.
pub fn intercept<T>(result: Result<T, ApiError>, store: &SessionStore) -> Intercepted<T> {
    if matches!(result, Err(ApiError::Unauthorized)) {
        if let Err(err) = store.clear() {
            tracing::warn!(error = %err, "failed to clear session after auth failure");
        }
        return Intercepted {
            result,
            redirect: Some(Destination::Login),
        };
    }

    Intercepted {
        result,
        redirect: None,
    }
}
