//! Unified error handling for the API.
//!
//! Provides a unified `AppError` type that maps every failure onto the
//! HTTP status and JSON body the API exposes. All route handlers should
//! return `Result<T, AppError>`. Client-facing errors carry their message
//! verbatim; repository and other internal failures are logged and
//! collapsed into an opaque 500.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::jwt::JwtError;

/// Application-level error type for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Token issuance failed.
    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(&'static str),

    /// Request is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(&'static str),

    /// Request payload failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body, `{"error": "..."}` on every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(
            self,
            Self::Database(RepositoryError::Database(_) | RepositoryError::DataCorruption(_))
                | Self::Internal(_)
                | Self::Token(_)
        ) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Token(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let error = match self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => "Not found".to_owned(),
                RepositoryError::Conflict(msg) => msg,
                _ => "Internal server error".to_owned(),
            },
            Self::Auth(AuthError::InvalidCredentials) => "Invalid credentials".to_owned(),
            Self::Auth(_) | Self::Token(_) | Self::Internal(_) => {
                "Internal server error".to_owned()
            }
            Self::NotFound(msg) | Self::Unauthorized(msg) => msg.to_owned(),
            Self::Validation(msg) => msg,
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// JSON extractor whose rejection speaks the API's error body.
///
/// The stock `axum::Json` rejection responds with plain text; wrapping it
/// keeps malformed payloads on the same `{"error": "..."}` contract as
/// every other 400.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Product not found");
        assert_eq!(err.to_string(), "Not found: Product not found");

        let err = AppError::Validation("Order must contain at least one item".to_owned());
        assert_eq!(
            err.to_string(),
            "Validation error: Order must contain at least one item"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("Order not found")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("Invalid token")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Validation("bad".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Internal("disk full".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_errors_map_by_kind() {
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Conflict(
                "product slug already exists".to_owned()
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::DataCorruption(
                "bad images".to_owned()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
