use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::app::errors;

/// Header carrying the caller-supplied shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone)]
pub struct AuthState {
    pub api_secret: Arc<str>,
}

/// Reject requests whose `x-api-key` does not match the configured secret.
pub async fn api_key_middleware(
    State(state): State<AuthState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let authorized = extract_api_key(req.headers())
        .is_some_and(|key| secrets_match(key.as_bytes(), state.api_secret.as_bytes()));

    if !authorized {
        tracing::warn!(path = %req.uri().path(), "rejected request with missing or invalid api key");
        return errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "missing or invalid api key");
    }

    next.run(req).await
}

fn extract_api_key(headers: &HeaderMap) -> Option<&str> {
    let key = headers.get(API_KEY_HEADER)?.to_str().ok()?.trim();
    if key.is_empty() {
        return None;
    }
    Some(key)
}

/// Length-checked comparison that does not short-circuit on the first mismatch.
fn secrets_match(given: &[u8], expected: &[u8]) -> bool {
    if given.len() != expected.len() {
        return false;
    }
    given
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_trimmed_key() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_api_key(&headers), None);

        headers.insert(API_KEY_HEADER, HeaderValue::from_static("  "));
        assert_eq!(extract_api_key(&headers), None);

        headers.insert(API_KEY_HEADER, HeaderValue::from_static(" secret "));
        assert_eq!(extract_api_key(&headers), Some("secret"));
    }

    #[test]
    fn compares_secrets_exactly() {
        assert!(secrets_match(b"secret", b"secret"));
        assert!(!secrets_match(b"secret", b"Secret"));
        assert!(!secrets_match(b"secret", b"secret2"));
        assert!(!secrets_match(b"", b"secret"));
    }
}
