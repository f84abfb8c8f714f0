//! Admin authentication route handlers.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::UserRepository;
use crate::error::{AppError, AppJson, Result};
use crate::services::auth::{verify_password, AuthError};
use crate::state::AppState;

/// Login payload. The username defaults to `admin` when omitted or
/// empty, matching the single-admin console client.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    pub password: String,
}

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

/// Exchange admin credentials for a bearer token.
///
/// POST /api/admin/login
///
/// An unknown username and a wrong password are indistinguishable to the
/// caller; both answer 401 `Invalid credentials`.
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let username = request
        .username
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or("admin");

    let user = UserRepository::new(state.pool())
        .get_by_username(username)
        .await?
        .ok_or(AppError::Auth(AuthError::InvalidCredentials))?;

    verify_password(&request.password, &user.password_hash)?;

    let token = state.jwt().issue(&user.username)?;
    tracing::info!(username = %user.username, "Admin login");

    Ok(Json(LoginResponse {
        success: true,
        token,
    }))
}
