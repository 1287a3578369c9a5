//! Error handling and HTTP response mapping
//!
//! Every error leaves the API as `{"error": "<message>"}` with the matching
//! status code. Internal errors may also carry a `detalle` field with the
//! underlying cause.

use agenda_shared::auth::{AuthError, AuthServiceError, AuthzError};
use agenda_shared::models::ValidationError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Generic message for unexpected failures
pub const SERVER_ERROR: &str = "Error del servidor";

pub const ROUTE_NOT_FOUND: &str = "Ruta no encontrada";

#[derive(Debug, Error)]
pub enum ApiError {
    /// 400: missing fields, malformed body, duplicate email
    #[error("400 {0}")]
    BadRequest(String),

    /// 401: missing credentials or failed login
    #[error("401 {0}")]
    Unauthorized(String),

    /// 403: invalid token or foreign document
    #[error("403 {0}")]
    Forbidden(String),

    #[error("404 {0}")]
    NotFound(String),

    /// 500, optionally with the underlying cause exposed as `detalle`
    #[error("500 {message}")]
    InternalError {
        message: String,
        detail: Option<String>,
    },
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::InternalError {
            message: message.into(),
            detail: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::InternalError { message: msg, .. } => msg,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detalle: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::InternalError { message, detail } => {
                tracing::error!(message = %message, detail = ?detail, "Request failed");
                ErrorResponse {
                    error: message,
                    detalle: detail,
                }
            }
            other => ErrorResponse {
                error: other.message().to_string(),
                detalle: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Cuerpo JSON inválido: {}", rejection.body_text()))
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials | AuthError::MissingToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::InvalidToken => ApiError::Forbidden(err.to_string()),
            AuthError::Internal => ApiError::internal(err.to_string()),
        }
    }
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::NotOwner => ApiError::Forbidden(err.to_string()),
            AuthzError::Unauthenticated => ApiError::Unauthorized(err.to_string()),
        }
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(err: AuthServiceError) -> Self {
        match err {
            AuthServiceError::Validation(e) => e.into(),
            AuthServiceError::EmailTaken | AuthServiceError::MissingCredentials => {
                ApiError::BadRequest(err.to_string())
            }
            AuthServiceError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthServiceError::Access(_)
            | AuthServiceError::Password(_)
            | AuthServiceError::Token(_) => {
                tracing::error!(error = %err, "Authentication backend failure");
                ApiError::internal(SERVER_ERROR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::internal("x").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_auth_errors() {
        assert_eq!(
            ApiError::from(AuthError::MissingToken).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::InvalidToken).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(AuthzError::NotOwner).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_duplicate_email_is_bad_request() {
        let err = ApiError::from(AuthServiceError::EmailTaken);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "El email ya está registrado");
    }

    #[test]
    fn test_bad_credentials_message() {
        let err = ApiError::from(AuthServiceError::InvalidCredentials);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Email o contraseña incorrectos.");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ApiError::NotFound("Tarea no encontrada".into()).to_string(),
            "404 Tarea no encontrada"
        );
        assert_eq!(
            ApiError::InternalError {
                message: SERVER_ERROR.into(),
                detail: Some("down".into()),
            }
            .to_string(),
            "500 Error del servidor"
        );
    }

    #[test]
    fn test_detail_serialized_only_when_present() {
        let plain = serde_json::to_value(ErrorResponse {
            error: "x".into(),
            detalle: None,
        })
        .unwrap();
        assert_eq!(plain, serde_json::json!({"error": "x"}));
    }
}
