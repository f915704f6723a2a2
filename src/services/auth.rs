//! Password auth service — registration and credential verification.
//!
//! Passwords are stored as bcrypt hashes; plaintext never reaches the
//! database or the logs.

use bcrypt::DEFAULT_COST;
use sqlx::{PgPool, Row};
use uuid::Uuid;

const MAX_USERNAME_LEN: usize = 80;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid username")]
    InvalidUsername,
    #[error("password must not be empty")]
    InvalidPassword,
    #[error("username taken")]
    UsernameTaken,
    #[error("invalid username or password")]
    BadCredentials,
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Trim and validate a submitted username.
#[must_use]
pub fn normalize_username(username: &str) -> Option<String> {
    let normalized = username.trim();
    if normalized.is_empty() || normalized.len() > MAX_USERNAME_LEN {
        return None;
    }
    Some(normalized.to_owned())
}

/// Hash a password for storage.
///
/// # Errors
///
/// Returns an error if bcrypt fails.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, DEFAULT_COST)
}

/// Compare a candidate password against a stored hash. A malformed hash
/// counts as a mismatch.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Minimal user row for admin listings.
#[derive(Debug, Clone, serde::Serialize)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
}

/// Create a new user account, returning its id.
///
/// # Errors
///
/// Returns `UsernameTaken` when the name is already registered, validation
/// errors for empty input, or a database error.
pub async fn register_user(pool: &PgPool, username: &str, password: &str) -> Result<Uuid, AuthError> {
    let username = normalize_username(username).ok_or(AuthError::InvalidUsername)?;
    if password.is_empty() {
        return Err(AuthError::InvalidPassword);
    }

    let password_hash = hash_password(password)?;

    let row = sqlx::query(
        r"INSERT INTO users (username, password_hash)
          VALUES ($1, $2)
          ON CONFLICT (username) DO NOTHING
          RETURNING id",
    )
    .bind(&username)
    .bind(&password_hash)
    .fetch_optional(pool)
    .await?;

    row.map(|r| r.get("id")).ok_or(AuthError::UsernameTaken)
}

/// Check a username/password pair, returning the user id on success.
///
/// # Errors
///
/// Returns `BadCredentials` for an unknown name or wrong password, or a
/// database error.
pub async fn verify_login(pool: &PgPool, username: &str, password: &str) -> Result<Uuid, AuthError> {
    let username = normalize_username(username).ok_or(AuthError::BadCredentials)?;

    let row = sqlx::query("SELECT id, password_hash FROM users WHERE username = $1")
        .bind(&username)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Err(AuthError::BadCredentials);
    };

    let password_hash: String = row.get("password_hash");
    if !verify_password(password, &password_hash) {
        return Err(AuthError::BadCredentials);
    }

    Ok(row.get("id"))
}

/// List all users (admin debug dump).
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_users(pool: &PgPool) -> Result<Vec<UserRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (Uuid, String)>("SELECT id, username FROM users ORDER BY created_at ASC")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|(id, username)| UserRow { id, username }).collect())
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
