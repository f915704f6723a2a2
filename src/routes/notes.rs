//! Notes app routes.
//!
//! The index renders HTML; mutations and search speak the JSON envelope
//! (`{"success": ..}`) consumed by the page's inline script.

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_messages::Messages;
use serde::Deserialize;
use uuid::Uuid;

use crate::routes::auth::AuthUser;
use crate::routes::json_error;
use crate::services::{auth as auth_svc, note};
use crate::state::AppState;
use crate::views::{self, Shell};

fn note_json(note: &note::NoteRow) -> serde_json::Value {
    serde_json::json!({
        "id": note.id,
        "title": note.title,
        "content": note.content,
        "created_at": note.created_at,
        "user_id": note.user_id,
    })
}

pub(crate) fn note_error_to_response(err: &note::NoteError) -> Response {
    match err {
        note::NoteError::MissingField | note::NoteError::TitleTooLong | note::NoteError::ContentTooLong => {
            json_error(StatusCode::BAD_REQUEST, &err.to_string())
        }
        note::NoteError::NotFound(id) => {
            json_error(StatusCode::NOT_FOUND, &format!("Note with ID {id} not found"))
        }
        note::NoteError::Forbidden => json_error(StatusCode::FORBIDDEN, "Unauthorized"),
        note::NoteError::Database(error) => {
            tracing::error!(%error, "notes database error");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

#[derive(Deserialize)]
pub struct NotesIndexQuery {
    pub user_id: Option<String>,
}

/// `GET /apps/notes/` — list notes as HTML. Admins may pass `user_id` to
/// view another user's notes; an unparsable value falls back to the
/// requester's own.
pub async fn notes_page(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<NotesIndexQuery>,
    messages: Messages,
) -> Response {
    let target_user = match query.user_id.as_deref().map(str::parse::<Uuid>) {
        Some(Ok(id)) => id,
        _ => auth.user.id,
    };

    if target_user != auth.user.id && !auth.user.is_admin {
        return json_error(StatusCode::FORBIDDEN, "Unauthorized access");
    }

    let notes = match note::list_notes(&state.pool, target_user).await {
        Ok(notes) => notes,
        Err(error) => return note_error_to_response(&error),
    };

    match views::render(&views::NotesPage { shell: Shell::signed_in(messages), notes }) {
        Ok(html) => html.into_response(),
        Err(status) => status.into_response(),
    }
}

#[derive(Deserialize)]
pub struct CreateNoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// `POST /apps/notes/create` — create a note, returning it as JSON.
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Form(form): Form<CreateNoteForm>,
) -> Response {
    match note::create_note(&state.pool, auth.user.id, &form.title, &form.content).await {
        Ok(created) => Json(serde_json::json!({
            "success": true,
            "message": "Note created successfully",
            "note": note_json(&created),
        }))
        .into_response(),
        Err(error) => note_error_to_response(&error),
    }
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// `GET /apps/notes/search?q=` — substring search over the requester's notes.
pub async fn search_notes(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Response {
    match note::search_notes(&state.pool, auth.user.id, &query.q).await {
        Ok(notes) => Json(serde_json::json!({
            "success": true,
            "notes": notes.iter().map(note_json).collect::<Vec<_>>(),
        }))
        .into_response(),
        Err(error) => note_error_to_response(&error),
    }
}

/// `DELETE /apps/notes/delete/{id}` — delete a note (owner or admin).
pub async fn delete_note(State(state): State<AppState>, auth: AuthUser, Path(note_id): Path<Uuid>) -> Response {
    match note::delete_note(&state.pool, note_id, auth.user.id, auth.user.is_admin).await {
        Ok(()) => Json(serde_json::json!({ "success": true })).into_response(),
        Err(error) => note_error_to_response(&error),
    }
}

/// `GET /apps/notes/debug` — admin-only dump of users and notes.
pub async fn debug_dump(State(state): State<AppState>, auth: AuthUser) -> Response {
    if !auth.user.is_admin {
        return json_error(StatusCode::FORBIDDEN, "Unauthorized");
    }

    let users = match auth_svc::list_users(&state.pool).await {
        Ok(users) => users,
        Err(error) => {
            tracing::error!(%error, "user listing failed");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error");
        }
    };

    let notes = match note::list_all_notes(&state.pool).await {
        Ok(notes) => notes,
        Err(error) => return note_error_to_response(&error),
    };

    Json(serde_json::json!({
        "users": users,
        "notes": notes.iter().map(note_json).collect::<Vec<_>>(),
    }))
    .into_response()
}

#[cfg(test)]
#[path = "notes_test.rs"]
mod tests;
