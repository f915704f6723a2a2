//! Page templates and view models.
//!
//! DESIGN
//! ======
//! Every page embeds a [`Shell`]: the navigation state, the signed-in flag,
//! and the drained flash messages. The active nav link is an explicit enum
//! rather than a string match against the current path, so a template can
//! only ever highlight one of the four public links.

use askama::Template;
use axum::http::StatusCode;
use axum::response::Html;
use axum_messages::{Level, Message, Messages};
use uuid::Uuid;

use crate::services::file::FileRow;
use crate::services::note::NoteRow;

// =============================================================================
// NAVIGATION
// =============================================================================

/// Which public navigation link is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPage {
    Home,
    Login,
    Register,
    About,
}

// =============================================================================
// FLASH MESSAGES
// =============================================================================

/// A one-shot notice queued by a previous request, with its display category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    /// Display hint only; the templates never branch on it.
    pub category: &'static str,
    pub text: String,
}

impl FlashMessage {
    #[must_use]
    pub fn new(level: Level, text: String) -> Self {
        let category = match level {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Success => "success",
            Level::Info => "info",
            Level::Debug => "debug",
        };
        Self { category, text }
    }
}

impl From<Message> for FlashMessage {
    fn from(message: Message) -> Self {
        Self::new(message.level, message.message)
    }
}

/// Drain the queued flash messages into render order.
#[must_use]
pub fn drain_flash(messages: Messages) -> Vec<FlashMessage> {
    messages.into_iter().map(FlashMessage::from).collect()
}

// =============================================================================
// SHELL
// =============================================================================

/// State shared by every page: nav highlight, auth state, flash queue.
#[derive(Debug, Clone)]
pub struct Shell {
    pub active: Option<NavPage>,
    pub logged_in: bool,
    pub flash: Vec<FlashMessage>,
}

impl Shell {
    /// Shell for a public page with the given link highlighted.
    #[must_use]
    pub fn public(active: NavPage, messages: Messages) -> Self {
        Self { active: Some(active), logged_in: false, flash: drain_flash(messages) }
    }

    /// Shell for a signed-in page; no public link is highlighted.
    #[must_use]
    pub fn signed_in(messages: Messages) -> Self {
        Self { active: None, logged_in: true, flash: drain_flash(messages) }
    }

    #[must_use]
    pub fn home_active(&self) -> bool {
        self.active == Some(NavPage::Home)
    }

    #[must_use]
    pub fn login_active(&self) -> bool {
        self.active == Some(NavPage::Login)
    }

    #[must_use]
    pub fn register_active(&self) -> bool {
        self.active == Some(NavPage::Register)
    }

    #[must_use]
    pub fn about_active(&self) -> bool {
        self.active == Some(NavPage::About)
    }
}

// =============================================================================
// PAGES
// =============================================================================

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub shell: Shell,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub shell: Shell,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub shell: Shell,
    /// Public hCaptcha site key bound to the widget.
    pub site_key: String,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub shell: Shell,
}

#[derive(Template)]
#[template(path = "hub.html")]
pub struct HubPage {
    pub shell: Shell,
    pub username: String,
}

#[derive(Template)]
#[template(path = "notes.html")]
pub struct NotesPage {
    pub shell: Shell,
    pub notes: Vec<NoteRow>,
}

#[derive(Template)]
#[template(path = "files.html")]
pub struct FilesPage {
    pub shell: Shell,
    pub files: Vec<FileRow>,
}

#[derive(Template)]
#[template(path = "file_password.html")]
pub struct FilePasswordPage {
    pub shell: Shell,
    pub file_id: Uuid,
    pub filename: String,
    pub error: Option<String>,
}

/// Render a template to an HTML response, logging failures.
///
/// # Errors
///
/// Returns 500 if rendering fails.
pub fn render<T: Template>(template: &T) -> Result<Html<String>, StatusCode> {
    match template.render() {
        Ok(html) => Ok(Html(html)),
        Err(error) => {
            tracing::error!(%error, "template render failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
