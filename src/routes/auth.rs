//! Auth routes — registration, login, logout, and the session extractors.

use axum::Form;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use axum_messages::Messages;
use serde::Deserialize;
use time::Duration;

use crate::routes::json_error;
use crate::services::{auth as auth_svc, captcha, session};
use crate::state::AppState;
use crate::views::{self, NavPage, Shell};

const COOKIE_NAME: &str = "session_token";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    env_bool("COOKIE_SECURE").unwrap_or(false)
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .build()
}

fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// EXTRACTORS
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication; rejection is the
/// JSON envelope the apps speak.
pub struct AuthUser {
    pub user: session::SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(json_error(StatusCode::UNAUTHORIZED, "Not logged in"));
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())?
            .ok_or_else(|| json_error(StatusCode::UNAUTHORIZED, "Not logged in"))?;

        Ok(Self { user, token: token.to_owned() })
    }
}

/// Like [`AuthUser`] but never rejects on a missing or stale session; page
/// handlers decide how to treat anonymous visitors.
pub struct MaybeUser(pub Option<session::SessionUser>);

impl<S> axum::extract::FromRequestParts<S> for MaybeUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Ok(Self(None));
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        Ok(Self(user))
    }
}

// =============================================================================
// FORMS
// =============================================================================

#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    /// Populated by the hCaptcha widget; absent until the challenge passes.
    #[serde(rename = "h-captcha-response", default)]
    pub captcha_token: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /register` — registration page with the hCaptcha widget.
pub async fn register_page(State(state): State<AppState>, messages: Messages) -> Result<Html<String>, StatusCode> {
    views::render(&views::RegisterPage {
        shell: Shell::public(NavPage::Register, messages),
        site_key: state.hcaptcha.site_key.clone(),
    })
}

/// `POST /register` — verify the captcha, create the account, redirect.
///
/// Every outcome is a flash message plus a redirect; the page itself never
/// renders from this handler.
pub async fn register(
    State(state): State<AppState>,
    messages: Messages,
    Form(form): Form<RegisterForm>,
) -> Response {
    match captcha::verify(&state.hcaptcha, &form.captcha_token).await {
        Ok(true) => {}
        Ok(false) => {
            messages.error("Captcha verification failed. Please try again.");
            return Redirect::to("/register").into_response();
        }
        Err(error) => {
            tracing::error!(%error, "captcha verification request failed");
            messages.error("Could not verify the captcha. Please try again.");
            return Redirect::to("/register").into_response();
        }
    }

    match auth_svc::register_user(&state.pool, &form.username, &form.password).await {
        Ok(user_id) => {
            tracing::info!(%user_id, "user registered");
            messages.success("Account created. You can sign in now.");
            Redirect::to("/login").into_response()
        }
        Err(auth_svc::AuthError::UsernameTaken) => {
            messages.error("Username taken");
            Redirect::to("/register").into_response()
        }
        Err(error @ (auth_svc::AuthError::InvalidUsername | auth_svc::AuthError::InvalidPassword)) => {
            messages.error(error.to_string());
            Redirect::to("/register").into_response()
        }
        Err(error) => {
            tracing::error!(%error, "registration failed");
            messages.error("Registration failed. Please try again.");
            Redirect::to("/register").into_response()
        }
    }
}

/// `GET /login` — login page.
pub async fn login_page(messages: Messages) -> Result<Html<String>, StatusCode> {
    views::render(&views::LoginPage { shell: Shell::public(NavPage::Login, messages) })
}

/// `POST /login` — verify credentials, create a session, set the cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    messages: Messages,
    Form(form): Form<LoginForm>,
) -> Response {
    let user_id = match auth_svc::verify_login(&state.pool, &form.username, &form.password).await {
        Ok(user_id) => user_id,
        Err(auth_svc::AuthError::BadCredentials) => {
            messages.error("Invalid username or password");
            return Redirect::to("/login").into_response();
        }
        Err(error) => {
            tracing::error!(%error, "login failed");
            messages.error("Sign-in failed. Please try again.");
            return Redirect::to("/login").into_response();
        }
    };

    match session::create_session(&state.pool, user_id).await {
        Ok(token) => (jar.add(session_cookie(token)), Redirect::to("/hub")).into_response(),
        Err(error) => {
            tracing::error!(%error, "session creation failed");
            messages.error("Sign-in failed. Please try again.");
            Redirect::to("/login").into_response()
        }
    }
}

/// `POST /logout` — delete the session, clear the cookie, redirect home.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(token) = jar.get(COOKIE_NAME).map(Cookie::value) {
        if !token.is_empty() {
            let _ = session::delete_session(&state.pool, token).await;
        }
    }

    (jar.add(expired_session_cookie()), Redirect::to("/")).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
