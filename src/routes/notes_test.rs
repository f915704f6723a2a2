use super::*;

fn sample_note() -> note::NoteRow {
    note::NoteRow {
        id: Uuid::nil(),
        user_id: Uuid::nil(),
        title: "groceries".into(),
        content: "milk".into(),
        created_at: "2026-01-02 03:04:05".into(),
    }
}

// =============================================================================
// note_json
// =============================================================================

#[test]
fn note_json_carries_formatted_timestamp() {
    let json = note_json(&sample_note());
    assert_eq!(json["title"], "groceries");
    assert_eq!(json["created_at"], "2026-01-02 03:04:05");
    assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
}

// =============================================================================
// error mapping
// =============================================================================

#[test]
fn validation_errors_map_to_bad_request() {
    assert_eq!(
        note_error_to_response(&note::NoteError::MissingField).status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        note_error_to_response(&note::NoteError::TitleTooLong).status(),
        StatusCode::BAD_REQUEST
    );
}

#[test]
fn missing_note_maps_to_not_found() {
    assert_eq!(
        note_error_to_response(&note::NoteError::NotFound(Uuid::nil())).status(),
        StatusCode::NOT_FOUND
    );
}

#[test]
fn foreign_note_maps_to_forbidden() {
    assert_eq!(
        note_error_to_response(&note::NoteError::Forbidden).status(),
        StatusCode::FORBIDDEN
    );
}

// =============================================================================
// query deserialization
// =============================================================================

#[test]
fn search_query_defaults_to_empty() {
    let query: SearchQuery = serde_urlencoded::from_str("").unwrap();
    assert!(query.q.is_empty());

    let query: SearchQuery = serde_urlencoded::from_str("q=milk").unwrap();
    assert_eq!(query.q, "milk");
}

#[test]
fn notes_index_query_accepts_missing_user_id() {
    let query: NotesIndexQuery = serde_urlencoded::from_str("").unwrap();
    assert!(query.user_id.is_none());

    let query: NotesIndexQuery = serde_urlencoded::from_str("user_id=not-a-uuid").unwrap();
    assert_eq!(query.user_id.as_deref(), Some("not-a-uuid"));
}
