//! Bearer-token authentication for admin routes.
//!
//! Admin endpoints take a `RequireAdmin` argument, which rejects the
//! request with 401 before the handler body runs unless a valid bearer
//! token from `POST /api/admin/login` is presented.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::jwt::{Claims, JwtError, JwtService};
use crate::state::AppState;

/// Extractor that requires a valid admin bearer token.
///
/// Carries the verified claims so handlers can log the acting username.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Claims);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized("Missing authorization header"))?;

        let token = JwtService::extract_from_header(header)
            .ok_or(AppError::Unauthorized("Invalid authorization header"))?;

        let claims = match state.jwt().verify(token) {
            Ok(claims) => claims,
            Err(JwtError::ExpiredToken) => {
                return Err(AppError::Unauthorized("Token expired"));
            }
            Err(_) => return Err(AppError::Unauthorized("Invalid token")),
        };

        Ok(Self(claims))
    }
}
