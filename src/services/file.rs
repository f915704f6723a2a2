//! Files service — upload bookkeeping, access checks, filename hygiene.
//!
//! DESIGN
//! ======
//! File bytes live on disk under the configured upload directory; the
//! database row records ownership, visibility, and an optional bcrypt hash
//! gating downloads. Disk and row lifetimes are decoupled: the row is the
//! source of truth and a missing backing file surfaces as a 404 at download.

use std::path::Path;

use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::services::auth;

/// Upload cap, matching the form-level limit advertised to users.
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_MIMETYPES: [&str; 4] = ["application/pdf", "image/png", "image/jpeg", "image/gif"];

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("file not found: {0}")]
    NotFound(Uuid),
    #[error("access denied")]
    Forbidden,
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Whether an uploaded content type is accepted.
#[must_use]
pub fn allowed_mimetype(mimetype: &str) -> bool {
    ALLOWED_MIMETYPES.contains(&mimetype)
}

/// Reduce an untrusted filename to a safe basename.
///
/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes an
/// underscore. Path components and leading dots are stripped so the result
/// can never escape the upload directory or hide as a dotfile. An empty
/// result falls back to `"file"`.
#[must_use]
pub fn secure_filename(name: &str) -> String {
    let basename = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let cleaned: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_owned();
    if cleaned.is_empty() {
        "file".to_owned()
    } else {
        cleaned
    }
}

/// File row as read back for listings and download checks.
#[derive(Debug, Clone)]
pub struct FileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub file_path: String,
    pub public: bool,
    pub password_hash: Option<String>,
    /// Upload time pre-formatted as `YYYY-MM-DD HH:MM:SS`.
    pub uploaded_at: String,
}

impl FileRow {
    /// Whether downloads require a password check.
    #[must_use]
    pub fn password_protected(&self) -> bool {
        self.password_hash.is_some()
    }
}

fn row_to_file(row: &sqlx::postgres::PgRow) -> FileRow {
    FileRow {
        id: row.get("id"),
        user_id: row.get("user_id"),
        filename: row.get("filename"),
        file_path: row.get("file_path"),
        public: row.get("public"),
        password_hash: row.get("password_hash"),
        uploaded_at: row.get("uploaded_at"),
    }
}

const FILE_COLUMNS: &str = r"id, user_id, filename, file_path, public, password_hash,
                 to_char(uploaded_at, 'YYYY-MM-DD HH24:MI:SS') AS uploaded_at";

/// Record an uploaded file. The optional password is stored as a bcrypt hash.
///
/// # Errors
///
/// Returns a hashing or database error.
pub async fn create_file(
    pool: &PgPool,
    user_id: Uuid,
    filename: &str,
    file_path: &Path,
    public: bool,
    password: Option<&str>,
) -> Result<FileRow, FileError> {
    let password_hash = match password {
        Some(password) => Some(auth::hash_password(password)?),
        None => None,
    };

    let id = Uuid::new_v4();
    let path_text = file_path.to_string_lossy();
    let row = sqlx::query(
        r"INSERT INTO files (id, user_id, filename, file_path, public, password_hash)
          VALUES ($1, $2, $3, $4, $5, $6)
          RETURNING to_char(uploaded_at, 'YYYY-MM-DD HH24:MI:SS') AS uploaded_at",
    )
    .bind(id)
    .bind(user_id)
    .bind(filename)
    .bind(path_text.as_ref())
    .bind(public)
    .bind(&password_hash)
    .fetch_one(pool)
    .await?;

    Ok(FileRow {
        id,
        user_id,
        filename: filename.to_owned(),
        file_path: path_text.into_owned(),
        public,
        password_hash,
        uploaded_at: row.get("uploaded_at"),
    })
}

/// List a user's files, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_files(pool: &PgPool, user_id: Uuid) -> Result<Vec<FileRow>, FileError> {
    let sql = format!(
        r"SELECT {FILE_COLUMNS}
          FROM files
          WHERE user_id = $1
          ORDER BY uploaded_at DESC"
    );
    let rows = sqlx::query(&sql).bind(user_id).fetch_all(pool).await?;

    Ok(rows.iter().map(row_to_file).collect())
}

/// Fetch a single file row.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn get_file(pool: &PgPool, file_id: Uuid) -> Result<Option<FileRow>, FileError> {
    let sql = format!("SELECT {FILE_COLUMNS} FROM files WHERE id = $1");
    let row = sqlx::query(&sql).bind(file_id).fetch_optional(pool).await?;

    Ok(row.as_ref().map(row_to_file))
}

/// Delete a file row, returning the on-disk path for cleanup. Only the owner
/// may delete.
///
/// # Errors
///
/// Returns `NotFound` for a missing row, `Forbidden` for a non-owner, or a
/// database error.
pub async fn delete_file(pool: &PgPool, file_id: Uuid, requester_id: Uuid) -> Result<String, FileError> {
    let row = sqlx::query("SELECT user_id, file_path FROM files WHERE id = $1")
        .bind(file_id)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Err(FileError::NotFound(file_id));
    };

    let owner_id: Uuid = row.get("user_id");
    if owner_id != requester_id {
        return Err(FileError::Forbidden);
    }

    sqlx::query("DELETE FROM files WHERE id = $1")
        .bind(file_id)
        .execute(pool)
        .await?;

    Ok(row.get("file_path"))
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
