//! Bearer-token gate for the mutating routes.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use modkit::ProblemResponse;
use tracing::debug;

use crate::api::rest::error::map_auth_error;
use crate::auth::{AuthError, AuthService};

const BEARER: &str = "Bearer ";

/// Pull the raw token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers.get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;
    let value = value.to_str().map_err(|_| AuthError::Malformed)?;

    // Scheme is case-insensitive
    let scheme = value.get(..BEARER.len()).ok_or(AuthError::Malformed)?;
    if !scheme.eq_ignore_ascii_case(BEARER) {
        return Err(AuthError::Malformed);
    }

    let token = value[BEARER.len()..].trim();
    if token.is_empty() {
        return Err(AuthError::Malformed);
    }
    Ok(token)
}

/// Resolves the caller and stores its `Identity` in request extensions.
/// Any failure short-circuits with `401`.
pub async fn require_auth(
    State(auth): State<Arc<AuthService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ProblemResponse> {
    let identity = bearer_token(req.headers()).and_then(|token| auth.authenticate(token));

    match identity {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        Err(e) => {
            debug!(error = %e, path = %req.uri().path(), "Rejected unauthenticated request");
            Err(map_auth_error(&e, req.uri().path()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn extracts_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Ok("abc.def"));
        assert_eq!(bearer_token(&headers("bearer abc")), Ok("abc"));
    }

    #[test]
    fn missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), Err(AuthError::MissingToken));
    }

    #[test]
    fn wrong_scheme_or_empty_token() {
        assert_eq!(bearer_token(&headers("Basic abc")), Err(AuthError::Malformed));
        assert_eq!(bearer_token(&headers("Bearer ")), Err(AuthError::Malformed));
        assert_eq!(bearer_token(&headers("abc")), Err(AuthError::Malformed));
    }
}
