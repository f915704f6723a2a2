//! Files app routes.
//!
//! ERROR HANDLING
//! ==============
//! Upload constraints (type allowlist, size cap) are enforced before any
//! disk write. Downloads check visibility first, then the optional file
//! password; only then do the bytes leave the upload directory.

use axum::Form;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use axum_messages::Messages;
use serde::Deserialize;
use uuid::Uuid;

use crate::routes::auth::AuthUser;
use crate::routes::json_error;
use crate::services::{auth as auth_svc, file};
use crate::state::AppState;
use crate::views::{self, Shell};

fn file_json(file: &file::FileRow) -> serde_json::Value {
    serde_json::json!({
        "id": file.id,
        "filename": file.filename,
        "public": file.public,
        "password_protected": file.password_protected(),
        "uploaded_at": file.uploaded_at,
        "user_id": file.user_id,
    })
}

pub(crate) fn file_error_to_response(err: &file::FileError) -> Response {
    match err {
        file::FileError::NotFound(id) => {
            json_error(StatusCode::NOT_FOUND, &format!("File with ID {id} not found"))
        }
        file::FileError::Forbidden => json_error(StatusCode::FORBIDDEN, "Access denied"),
        file::FileError::Hash(error) => {
            tracing::error!(%error, "file password hashing failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
        file::FileError::Database(error) => {
            tracing::error!(%error, "files database error");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

/// `GET /apps/files/` — list the requester's files as HTML.
pub async fn files_page(State(state): State<AppState>, auth: AuthUser, messages: Messages) -> Response {
    let files = match file::list_files(&state.pool, auth.user.id).await {
        Ok(files) => files,
        Err(error) => return file_error_to_response(&error),
    };

    match views::render(&views::FilesPage { shell: Shell::signed_in(messages), files }) {
        Ok(html) => html.into_response(),
        Err(status) => status.into_response(),
    }
}

struct Upload {
    filename: String,
    content_type: String,
    data: axum::body::Bytes,
}

/// `POST /apps/files/upload` — multipart upload with an optional visibility
/// flag and download password.
pub async fn upload_file(State(state): State<AppState>, auth: AuthUser, mut multipart: Multipart) -> Response {
    let mut upload: Option<Upload> = None;
    let mut public = false;
    let mut password: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(error) => {
                tracing::warn!(%error, "multipart read failed");
                return json_error(StatusCode::BAD_REQUEST, "Upload failed");
            }
        };

        let name = field.name().map(ToOwned::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_owned();
                let content_type = field.content_type().unwrap_or_default().to_owned();
                let data = match field.bytes().await {
                    Ok(data) => data,
                    Err(error) => {
                        tracing::warn!(%error, "file part read failed");
                        return json_error(StatusCode::BAD_REQUEST, "Upload failed");
                    }
                };
                upload = Some(Upload { filename, content_type, data });
            }
            Some("public") => {
                let value = field.text().await.unwrap_or_default();
                public = value.eq_ignore_ascii_case("on");
            }
            Some("password") => {
                let value = field.text().await.unwrap_or_default();
                if !value.is_empty() {
                    password = Some(value);
                }
            }
            _ => {}
        }
    }

    let Some(upload) = upload else {
        return json_error(StatusCode::BAD_REQUEST, "No file part");
    };

    if !file::allowed_mimetype(&upload.content_type) {
        return json_error(StatusCode::BAD_REQUEST, "File type not allowed");
    }
    if upload.data.len() > file::MAX_FILE_BYTES {
        return json_error(StatusCode::BAD_REQUEST, "File size exceeds limit");
    }

    let filename = file::secure_filename(&upload.filename);
    let disk_path = state.upload_dir.join(&filename);
    if let Err(error) = tokio::fs::write(&disk_path, &upload.data).await {
        tracing::error!(%error, path = %disk_path.display(), "file write failed");
        return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Could not store file");
    }

    match file::create_file(&state.pool, auth.user.id, &filename, &disk_path, public, password.as_deref()).await {
        Ok(created) => Json(serde_json::json!({
            "success": true,
            "message": "File uploaded successfully!",
            "file": file_json(&created),
        }))
        .into_response(),
        Err(error) => file_error_to_response(&error),
    }
}

async fn send_attachment(row: &file::FileRow) -> Response {
    match tokio::fs::read(&row.file_path).await {
        Ok(bytes) => {
            let headers = [
                (CONTENT_TYPE, "application/octet-stream".to_owned()),
                (CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", row.filename)),
            ];
            (headers, bytes).into_response()
        }
        Err(error) => {
            tracing::error!(%error, path = %row.file_path, "backing file missing");
            json_error(StatusCode::NOT_FOUND, "File not found on server")
        }
    }
}

async fn fetch_for_download(state: &AppState, auth: &AuthUser, file_id: Uuid) -> Result<file::FileRow, Response> {
    let row = match file::get_file(&state.pool, file_id).await {
        Ok(Some(row)) => row,
        Ok(None) => return Err(json_error(StatusCode::NOT_FOUND, &format!("File with ID {file_id} not found"))),
        Err(error) => return Err(file_error_to_response(&error)),
    };

    if !row.public && row.user_id != auth.user.id {
        return Err(json_error(StatusCode::FORBIDDEN, "Access denied"));
    }

    Ok(row)
}

/// `GET /apps/files/download/{id}` — download, or show the password prompt
/// for protected files.
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    messages: Messages,
    Path(file_id): Path<Uuid>,
) -> Response {
    let row = match fetch_for_download(&state, &auth, file_id).await {
        Ok(row) => row,
        Err(response) => return response,
    };

    if row.password_protected() {
        return render_password_prompt(messages, file_id, &row.filename, None, StatusCode::OK);
    }

    send_attachment(&row).await
}

#[derive(Deserialize)]
pub struct DownloadForm {
    #[serde(default)]
    pub password: String,
}

/// `POST /apps/files/download/{id}` — password-checked download for
/// protected files.
pub async fn download_file_with_password(
    State(state): State<AppState>,
    auth: AuthUser,
    messages: Messages,
    Path(file_id): Path<Uuid>,
    Form(form): Form<DownloadForm>,
) -> Response {
    let row = match fetch_for_download(&state, &auth, file_id).await {
        Ok(row) => row,
        Err(response) => return response,
    };

    if let Some(hash) = &row.password_hash {
        if form.password.is_empty() || !auth_svc::verify_password(&form.password, hash) {
            return render_password_prompt(
                messages,
                file_id,
                &row.filename,
                Some("Incorrect password".to_owned()),
                StatusCode::FORBIDDEN,
            );
        }
    }

    send_attachment(&row).await
}

fn render_password_prompt(
    messages: Messages,
    file_id: Uuid,
    filename: &str,
    error: Option<String>,
    status: StatusCode,
) -> Response {
    let page = views::FilePasswordPage {
        shell: Shell::signed_in(messages),
        file_id,
        filename: filename.to_owned(),
        error,
    };
    match views::render(&page) {
        Ok(html) => (status, html).into_response(),
        Err(render_status) => render_status.into_response(),
    }
}

/// `DELETE /apps/files/delete/{id}` — owner-only delete; the backing file is
/// removed best-effort after the row.
pub async fn delete_file(State(state): State<AppState>, auth: AuthUser, Path(file_id): Path<Uuid>) -> Response {
    match file::delete_file(&state.pool, file_id, auth.user.id).await {
        Ok(path) => {
            if let Err(error) = tokio::fs::remove_file(&path).await {
                tracing::warn!(%error, %path, "backing file missing during delete");
            }
            Json(serde_json::json!({ "success": true, "message": "File deleted successfully" })).into_response()
        }
        Err(error) => file_error_to_response(&error),
    }
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
