//! Bearer token verification for axum
//!
//! Three observable outcomes:
//!
//! 1. no `Authorization` header, or a header with no token part: 401
//! 2. a token that fails signature or expiry checks: 403
//! 3. a valid token: the verified [`AuthUser`] is inserted into the request
//!    extensions and the request proceeds
//!
//! A header that cannot be read as text is reported as a 500.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use super::jwt::{validate_token, Claims};

/// Identity taken from a verified token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Acceso denegado. Token requerido.")]
    MissingCredentials,

    #[error("Token no proporcionado.")]
    MissingToken,

    #[error("Token inválido o expirado.")]
    InvalidToken,

    #[error("Error en autenticación del servidor.")]
    Internal,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials | AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::FORBIDDEN,
            AuthError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Verifies the `Authorization` header of a request.
///
/// The token is the second space-separated part of the header value
/// (`Bearer <token>`).
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthUser, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?;

    let value = value.to_str().map_err(|e| {
        error!(error = %e, "Authorization header is not valid text");
        AuthError::Internal
    })?;

    let token = value
        .split(' ')
        .nth(1)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let claims = validate_token(token, secret).map_err(|e| {
        debug!(error = %e, "Rejected bearer token");
        AuthError::InvalidToken
    })?;

    Ok(claims.into())
}

/// Middleware body; wire it with `axum::middleware::from_fn_with_state`
/// or wrap it in a closure that supplies the secret.
pub async fn jwt_auth_middleware(
    secret: &str,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user = authenticate(req.headers(), secret)?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Reads the [`AuthUser`] placed by [`jwt_auth_middleware`].
///
/// Use `Option<AuthUser>` on routes where the middleware may not run.
#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AuthError::MissingCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::create_token;
    use axum::http::HeaderValue;
    use chrono::Duration;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn headers(value: &[u8]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            authenticate(&HeaderMap::new(), SECRET),
            Err(AuthError::MissingCredentials)
        );
    }

    #[test]
    fn test_header_without_token() {
        assert_eq!(
            authenticate(&headers(b"Bearer"), SECRET),
            Err(AuthError::MissingToken)
        );
        assert_eq!(
            authenticate(&headers(b"Bearer "), SECRET),
            Err(AuthError::MissingToken)
        );
    }

    #[test]
    fn test_invalid_token() {
        assert_eq!(
            authenticate(&headers(b"Bearer abc.def.ghi"), SECRET),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_expired_token() {
        let claims = Claims::with_expiration("u1", "a@b.c", Duration::seconds(-5));
        let token = create_token(&claims, SECRET).unwrap();
        let value = format!("Bearer {}", token);

        assert_eq!(
            authenticate(&headers(value.as_bytes()), SECRET),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_non_text_header_is_internal() {
        assert_eq!(
            authenticate(&headers(b"Bearer \xff\xfe"), SECRET),
            Err(AuthError::Internal)
        );
    }

    #[test]
    fn test_valid_token() {
        let token = create_token(&Claims::new("u1", "ana@example.com"), SECRET).unwrap();
        let value = format!("Bearer {}", token);

        let user = authenticate(&headers(value.as_bytes()), SECRET).unwrap();
        assert_eq!(
            user,
            AuthUser {
                id: "u1".into(),
                email: "ana@example.com".into()
            }
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::MissingCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidToken.status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::Internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
