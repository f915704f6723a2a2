//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the public pages (home, about, register, login), the signed-in hub,
//! and the two JSON-speaking apps (notes, files) under a single Axum router.
//! Static assets are served from `static/`. The session layer backs the
//! one-shot flash queue; login state itself lives in Postgres sessions.

pub mod auth;
pub mod files;
pub mod notes;
pub mod pages;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{delete, get, post};
use axum_messages::MessagesManagerLayer;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::services::file::MAX_FILE_BYTES;
use crate::state::AppState;

/// Slack on top of the file cap for multipart framing and the other fields.
const BODY_LIMIT_OVERHEAD: usize = 64 * 1024;

/// Build the application router with all layers applied.
pub fn app(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default()).with_secure(auth::cookie_secure());

    Router::new()
        .route("/", get(pages::index))
        .route("/about", get(pages::about))
        .route("/hub", get(pages::hub))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/apps/notes/", get(notes::notes_page))
        .route("/apps/notes/create", post(notes::create_note))
        .route("/apps/notes/search", get(notes::search_notes))
        .route("/apps/notes/delete/{id}", delete(notes::delete_note))
        .route("/apps/notes/debug", get(notes::debug_dump))
        .route("/apps/files/", get(files::files_page))
        .route("/apps/files/upload", post(files::upload_file))
        .route(
            "/apps/files/download/{id}",
            get(files::download_file).post(files::download_file_with_password),
        )
        .route("/apps/files/delete/{id}", delete(files::delete_file))
        .route("/healthz", get(healthz))
        .nest_service("/static", ServeDir::new("static"))
        .layer(MessagesManagerLayer)
        .layer(session_layer)
        .layer(DefaultBodyLimit::max(MAX_FILE_BYTES + BODY_LIMIT_OVERHEAD))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// JSON error envelope shared by the notes and files apps.
pub(crate) fn json_error(status: StatusCode, error: &str) -> Response {
    (status, Json(serde_json::json!({ "success": false, "error": error }))).into_response()
}
