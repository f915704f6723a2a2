use super::*;

// =============================================================================
// env_bool — uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_recognizes_truthy_and_falsy_values() {
    let key = "__HOMEHUB_EB_TRUE__";
    unsafe { std::env::set_var(key, "yes") };
    assert_eq!(env_bool(key), Some(true));
    unsafe { std::env::set_var(key, "off") };
    assert_eq!(env_bool(key), Some(false));
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_trims_and_ignores_case() {
    let key = "__HOMEHUB_EB_CI__";
    unsafe { std::env::set_var(key, "  TRUE  ") };
    assert_eq!(env_bool(key), Some(true));
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_rejects_garbage_and_unset() {
    let key = "__HOMEHUB_EB_BAD__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
    assert_eq!(env_bool("__HOMEHUB_EB_SURELY_UNSET__"), None);
}

// =============================================================================
// RegisterForm — the wire names are part of the page contract.
// =============================================================================

#[test]
fn register_form_maps_hyphenated_captcha_field() {
    let form: RegisterForm =
        serde_urlencoded::from_str("username=alice&password=secret&h-captcha-response=abc123").unwrap();
    assert_eq!(form.username, "alice");
    assert_eq!(form.password, "secret");
    assert_eq!(form.captcha_token, "abc123");
}

#[test]
fn register_form_defaults_missing_captcha_token_to_empty() {
    let form: RegisterForm = serde_urlencoded::from_str("username=alice&password=secret").unwrap();
    assert!(form.captcha_token.is_empty());
}

#[test]
fn register_form_preserves_url_encoded_values() {
    let form: RegisterForm =
        serde_urlencoded::from_str("username=a%20b&password=p%26q&h-captcha-response=").unwrap();
    assert_eq!(form.username, "a b");
    assert_eq!(form.password, "p&q");
    assert!(form.captcha_token.is_empty());
}

// =============================================================================
// session cookies
// =============================================================================

#[test]
fn session_cookie_is_http_only_lax() {
    let cookie = session_cookie("deadbeef".into());
    assert_eq!(cookie.name(), COOKIE_NAME);
    assert_eq!(cookie.value(), "deadbeef");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.path(), Some("/"));
}

#[test]
fn expired_session_cookie_clears_value() {
    let cookie = expired_session_cookie();
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
}
