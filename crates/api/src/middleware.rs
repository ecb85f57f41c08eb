use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use gatekeeper_auth::{AuthError, Token};

use crate::app::{errors, services::SharedAuthenticator};
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub authenticator: SharedAuthenticator,
}

/// Resolve the bearer token to a principal and attach it to the request.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(req.headers()).map_err(errors::unauthorized)?;

    let principal = state
        .authenticator
        .resolve_principal(&token)
        .map_err(errors::unauthorized)?;

    req.extensions_mut().insert(PrincipalContext::new(principal));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<Token, AuthError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::InvalidToken)?;

    let header = header.to_str().map_err(|_| AuthError::InvalidToken)?;

    // Auth schemes are case-insensitive (RFC 7235).
    let (scheme, credentials) = header.split_once(' ').ok_or(AuthError::InvalidToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidToken);
    }

    let token = credentials.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidToken);
    }

    Ok(Token::new(token))
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, header::AUTHORIZATION};

    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let token = extract_bearer(&headers("Bearer  abc123 ")).unwrap();
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        for value in ["bearer abc123", "BEARER abc123", "bEaReR abc123"] {
            assert_eq!(extract_bearer(&headers(value)).unwrap().as_str(), "abc123");
        }
    }

    #[test]
    fn rejects_missing_or_non_bearer_headers() {
        assert_eq!(
            extract_bearer(&HeaderMap::new()).unwrap_err(),
            AuthError::InvalidToken
        );
        assert!(extract_bearer(&headers("Basic dXNlcjpwYXNz")).is_err());
        assert!(extract_bearer(&headers("Bearer ")).is_err());
        assert!(extract_bearer(&headers("Bearerabc123")).is_err());
        assert!(extract_bearer(&headers("Bearer")).is_err());
    }
}
