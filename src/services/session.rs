//! Session management.
//!
//! ARCHITECTURE
//! ============
//! Signed-in users hold a long-lived random token in an `HttpOnly` cookie.
//! The token maps to a `sessions` row with a server-side expiry, so a session
//! can be revoked by deleting the row and survives process restarts.

use std::fmt::Write;

use rand::Rng;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// User row returned from session validation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionUser {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login name, unique across the site.
    pub username: String,
    /// Whether the user may act on other users' data.
    pub is_admin: bool,
}

/// Create a session for the given user, returning the token.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<String, sqlx::Error> {
    let token = generate_token();
    sqlx::query("INSERT INTO sessions (token, user_id) VALUES ($1, $2)")
        .bind(&token)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(token)
}

/// Validate a session token and return the associated user.
///
/// # Errors
///
/// Returns a database error if the lookup fails.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT u.id, u.username, u.is_admin
          FROM sessions s
          JOIN users u ON u.id = s.user_id
          WHERE s.token = $1 AND s.expires_at > now()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| SessionUser {
        id: r.get("id"),
        username: r.get("username"),
        is_admin: r.get("is_admin"),
    }))
}

/// Delete a session by token.
///
/// # Errors
///
/// Returns a database error if the delete fails.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
