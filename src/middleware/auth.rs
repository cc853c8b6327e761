use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;

/// Shared secret the gate compares against
#[derive(Clone)]
pub struct AuthState {
    token: Arc<str>,
}

impl AuthState {
    pub fn new(token: impl Into<Arc<str>>) -> Self {
        Self { token: token.into() }
    }

    fn accepts(&self, presented: Option<&str>) -> bool {
        presented == Some(&*self.token)
    }
}

/// Rejects requests whose Authorization header is not exactly the configured token.
/// Runs before every route; a rejected request never reaches a handler.
pub async fn token_auth_middleware(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = extract_token(request.headers());
    if !state.accepts(presented) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Rejected request with missing or invalid Authorization header"
        );
        return Err(ApiError::unauthorized("you don't have the right!!"));
    }

    tracing::info!(method = %request.method(), path = %request.uri().path(), "start #middleware");
    let response = next.run(request).await;
    tracing::info!(status = %response.status(), "end #middleware");

    Ok(response)
}

/// Raw header value; non-ASCII values count as absent
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn accepts_only_exact_token() {
        let state = AuthState::new("token2019");
        assert!(state.accepts(Some("token2019")));
        assert!(!state.accepts(Some("Bearer token2019")));
        assert!(!state.accepts(Some("token2019 ")));
        assert!(!state.accepts(Some("TOKEN2019")));
        assert!(!state.accepts(Some("")));
        assert!(!state.accepts(None));
    }

    #[test]
    fn extracts_authorization_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("token2019"));
        assert_eq!(extract_token(&headers), Some("token2019"));
    }

    #[test]
    fn opaque_header_bytes_are_treated_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(b"tok\xffen").unwrap());
        assert_eq!(extract_token(&headers), None);
    }
}
