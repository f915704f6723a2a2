use super::*;

// =============================================================================
// normalize_username
// =============================================================================

#[test]
fn normalize_username_trims_whitespace() {
    assert_eq!(normalize_username("  alice  ").as_deref(), Some("alice"));
}

#[test]
fn normalize_username_rejects_empty() {
    assert_eq!(normalize_username(""), None);
}

#[test]
fn normalize_username_rejects_whitespace_only() {
    assert_eq!(normalize_username("   "), None);
}

#[test]
fn normalize_username_rejects_over_long() {
    let long = "a".repeat(MAX_USERNAME_LEN + 1);
    assert_eq!(normalize_username(&long), None);
}

#[test]
fn normalize_username_accepts_max_length() {
    let max = "a".repeat(MAX_USERNAME_LEN);
    assert_eq!(normalize_username(&max).as_deref(), Some(max.as_str()));
}

// =============================================================================
// password hashing
// =============================================================================

#[test]
fn hash_and_verify_round_trip() {
    let hash = hash_password("hunter2").unwrap();
    assert!(verify_password("hunter2", &hash));
    assert!(!verify_password("hunter3", &hash));
}

#[test]
fn verify_password_rejects_malformed_hash() {
    assert!(!verify_password("hunter2", "not-a-bcrypt-hash"));
}
