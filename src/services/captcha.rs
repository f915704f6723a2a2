//! hCaptcha verification client.
//!
//! The widget on the registration page produces an opaque response token;
//! this module checks that token against the hCaptcha verification API with
//! the account's secret key. Only the public site key is ever rendered.

use serde::Deserialize;

const VERIFY_URL: &str = "https://api.hcaptcha.com/siteverify";

/// hCaptcha key pair loaded from environment.
#[derive(Debug, Clone)]
pub struct HcaptchaConfig {
    /// Public site key, embedded in the registration page widget.
    pub site_key: String,
    /// Private secret, sent only to the verification API.
    pub secret: String,
}

impl HcaptchaConfig {
    /// Load from `HCAPTCHA_SITE_KEY` and `HCAPTCHA_SECRET`.
    /// Returns `None` if either is missing or empty.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let site_key = std::env::var("HCAPTCHA_SITE_KEY").ok().filter(|v| !v.is_empty())?;
        let secret = std::env::var("HCAPTCHA_SECRET").ok().filter(|v| !v.is_empty())?;
        Some(Self { site_key, secret })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CaptchaError {
    #[error("verification request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    success: bool,
}

/// Check a widget response token against the verification API.
///
/// An empty token means the challenge was never completed; it fails without
/// a network round-trip. A non-2xx API response counts as not verified.
///
/// # Errors
///
/// Returns an error if the HTTP request itself fails.
pub async fn verify(config: &HcaptchaConfig, token: &str) -> Result<bool, CaptchaError> {
    if token.is_empty() {
        return Ok(false);
    }

    let client = reqwest::Client::new();
    let resp = client
        .post(VERIFY_URL)
        .form(&[("secret", config.secret.as_str()), ("response", token)])
        .send()
        .await?;

    if !resp.status().is_success() {
        return Ok(false);
    }

    let body: VerifyResponse = resp.json().await?;
    Ok(body.success)
}

#[cfg(test)]
#[path = "captcha_test.rs"]
mod tests;
