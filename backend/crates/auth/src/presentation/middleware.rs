//! Auth Middleware
//!
//! Bearer-token authentication for protected routes. The middleware
//! validates the presented token freshly on every request and inserts
//! the recovered [`Principal`] into the request extensions; handlers
//! receive it as an explicit extractor argument rather than through any
//! ambient context.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::{HeaderMap, HeaderValue, Request, header, request::Parts};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::token_validator::TokenValidator;
use crate::domain::value_object::principal::Principal;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub validator: TokenValidator,
}

/// Middleware that requires a valid bearer token
///
/// On success the request proceeds with the principal attached; on any
/// failure the request is rejected with 401 and a `WWW-Authenticate`
/// challenge. A request is authenticated exactly once per invocation:
/// there are no intermediate or retry states.
pub async fn require_bearer_auth(
    State(state): State<AuthMiddlewareState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(req.headers())
        .ok_or_else(|| challenge_response(AuthError::MissingToken))?;

    let validated = state
        .validator
        .validate(&token)
        .map_err(challenge_response)?;

    req.extensions_mut().insert(validated.into_principal());

    Ok(next.run(req).await)
}

/// Pull the token out of `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// 401 response with a bearer challenge header
fn challenge_response(err: AuthError) -> Response {
    let mut response = err.into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}

/// Extractor: the principal recovered by [`require_bearer_auth`]
///
/// Rejects with 401 when used on a route the middleware does not cover;
/// a missing principal is an authorization failure, never a panic.
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| challenge_response(AuthError::PrincipalMissing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        let headers = headers_with_auth("Bearer abc.def.ghi");
        assert_eq!(
            extract_bearer_token(&headers),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_extract_rejects_other_schemes() {
        let headers = headers_with_auth("Basic dXNlcjpwdw==");
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn test_extract_rejects_empty_token() {
        let headers = headers_with_auth("Bearer   ");
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn test_extract_missing_header() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }
}
