//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the database pool plus the process-wide configuration resolved at
//! startup: the hCaptcha key pair and the upload directory for the files app.

use std::path::PathBuf;

use sqlx::PgPool;

use crate::services::captcha::HcaptchaConfig;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub hcaptcha: HcaptchaConfig,
    pub upload_dir: PathBuf,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, hcaptcha: HcaptchaConfig, upload_dir: PathBuf) -> Self {
        Self { pool, hcaptcha, upload_dir }
    }
}
