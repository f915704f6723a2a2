//! Notes service — validation and CRUD for the notes app.
//!
//! Stored text is kept verbatim; HTML is neutralized at render time by the
//! template engine's escaping, so validation here is presence and length only.

use sqlx::{PgPool, Row};
use uuid::Uuid;

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_CONTENT_LEN: usize = 5000;

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("Title and content are required")]
    MissingField,
    #[error("Title exceeds maximum length of 100 characters")]
    TitleTooLong,
    #[error("Content exceeds maximum length of 5000 characters")]
    ContentTooLong,
    #[error("note not found: {0}")]
    NotFound(Uuid),
    #[error("access denied")]
    Forbidden,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Note row as read back for listings and JSON responses.
#[derive(Debug, Clone)]
pub struct NoteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    /// Creation time pre-formatted as `YYYY-MM-DD HH:MM:SS`.
    pub created_at: String,
}

/// Validate a submitted title/content pair.
///
/// # Errors
///
/// Returns the first violated constraint.
pub fn validate_note(title: &str, content: &str) -> Result<(), NoteError> {
    if title.is_empty() || content.is_empty() {
        return Err(NoteError::MissingField);
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(NoteError::TitleTooLong);
    }
    if content.len() > MAX_CONTENT_LEN {
        return Err(NoteError::ContentTooLong);
    }
    Ok(())
}

/// Create a note for the given user.
///
/// # Errors
///
/// Returns a validation error or a database error.
pub async fn create_note(pool: &PgPool, user_id: Uuid, title: &str, content: &str) -> Result<NoteRow, NoteError> {
    validate_note(title, content)?;

    let id = Uuid::new_v4();
    let row = sqlx::query(
        r"INSERT INTO notes (id, user_id, title, content)
          VALUES ($1, $2, $3, $4)
          RETURNING to_char(created_at, 'YYYY-MM-DD HH24:MI:SS') AS created_at",
    )
    .bind(id)
    .bind(user_id)
    .bind(title)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(NoteRow {
        id,
        user_id,
        title: title.to_owned(),
        content: content.to_owned(),
        created_at: row.get("created_at"),
    })
}

fn row_to_note(row: &sqlx::postgres::PgRow) -> NoteRow {
    NoteRow {
        id: row.get("id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at: row.get("created_at"),
    }
}

/// List a user's notes, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_notes(pool: &PgPool, user_id: Uuid) -> Result<Vec<NoteRow>, NoteError> {
    let rows = sqlx::query(
        r"SELECT id, user_id, title, content,
                 to_char(created_at, 'YYYY-MM-DD HH24:MI:SS') AS created_at
          FROM notes
          WHERE user_id = $1
          ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(row_to_note).collect())
}

/// Search a user's notes by title or content substring.
///
/// The pattern is bound as a parameter; the query text never contains user
/// input.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn search_notes(pool: &PgPool, user_id: Uuid, query: &str) -> Result<Vec<NoteRow>, NoteError> {
    let pattern = format!("%{query}%");
    let rows = sqlx::query(
        r"SELECT id, user_id, title, content,
                 to_char(created_at, 'YYYY-MM-DD HH24:MI:SS') AS created_at
          FROM notes
          WHERE (title LIKE $2 OR content LIKE $2) AND user_id = $1
          ORDER BY created_at DESC",
    )
    .bind(user_id)
    .bind(&pattern)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(row_to_note).collect())
}

/// Delete a note. Owners may delete their own notes; admins may delete any.
///
/// # Errors
///
/// Returns `NotFound` for a missing note, `Forbidden` for a non-owner
/// non-admin, or a database error.
pub async fn delete_note(pool: &PgPool, note_id: Uuid, requester_id: Uuid, requester_is_admin: bool) -> Result<(), NoteError> {
    let row = sqlx::query("SELECT user_id FROM notes WHERE id = $1")
        .bind(note_id)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Err(NoteError::NotFound(note_id));
    };

    let owner_id: Uuid = row.get("user_id");
    if owner_id != requester_id && !requester_is_admin {
        return Err(NoteError::Forbidden);
    }

    sqlx::query("DELETE FROM notes WHERE id = $1")
        .bind(note_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// List every note in the system (admin debug dump).
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_all_notes(pool: &PgPool) -> Result<Vec<NoteRow>, NoteError> {
    let rows = sqlx::query(
        r"SELECT id, user_id, title, content,
                 to_char(created_at, 'YYYY-MM-DD HH24:MI:SS') AS created_at
          FROM notes
          ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(row_to_note).collect())
}

#[cfg(test)]
#[path = "note_test.rs"]
mod tests;
