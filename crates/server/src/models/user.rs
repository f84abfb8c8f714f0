//! Admin user model.

use chrono::NaiveDateTime;

use goatique_core::UserId;

/// An admin console user.
///
/// Deliberately not serializable: the password hash must never reach the
/// wire. Login responses carry only a token.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminUser {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}
