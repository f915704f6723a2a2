//! Public pages and the signed-in hub.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_messages::Messages;

use crate::routes::auth::MaybeUser;
use crate::views::{self, NavPage, Shell};

/// `GET /` — landing page.
pub async fn index(messages: Messages) -> Result<Html<String>, StatusCode> {
    views::render(&views::IndexPage { shell: Shell::public(NavPage::Home, messages) })
}

/// `GET /about` — static about page.
pub async fn about(messages: Messages) -> Result<Html<String>, StatusCode> {
    views::render(&views::AboutPage { shell: Shell::public(NavPage::About, messages) })
}

/// `GET /hub` — app launcher; anonymous visitors are sent to the login page.
pub async fn hub(MaybeUser(user): MaybeUser, messages: Messages) -> Response {
    let Some(user) = user else {
        return Redirect::to("/login").into_response();
    };

    match views::render(&views::HubPage { shell: Shell::signed_in(messages), username: user.username }) {
        Ok(html) => html.into_response(),
        Err(status) => status.into_response(),
    }
}
