use super::*;

fn public_shell(active: NavPage) -> Shell {
    Shell { active: Some(active), logged_in: false, flash: Vec::new() }
}

fn register_page(shell: Shell) -> RegisterPage {
    RegisterPage { shell, site_key: "sk_test".into() }
}

// =============================================================================
// navigation — exactly one public link highlighted, per page
// =============================================================================

#[test]
fn register_page_marks_register_link_active() {
    let html = register_page(public_shell(NavPage::Register)).render().unwrap();
    assert!(html.contains(r#"<a href="/register" class="active">Register</a>"#));
    assert!(html.contains(r#"<a href="/login">Login</a>"#));
    assert!(html.contains(r#"<a href="/">Home</a>"#));
}

#[test]
fn login_page_never_marks_register_active() {
    let html = LoginPage { shell: public_shell(NavPage::Login) }.render().unwrap();
    assert!(html.contains(r#"<a href="/login" class="active">Login</a>"#));
    assert!(!html.contains(r#"<a href="/register" class="active">"#));
}

#[test]
fn index_and_about_mark_their_own_links() {
    let home = IndexPage { shell: public_shell(NavPage::Home) }.render().unwrap();
    assert!(home.contains(r#"<a href="/" class="active">Home</a>"#));
    assert!(!home.contains(r#"<a href="/register" class="active">"#));

    let about = AboutPage { shell: public_shell(NavPage::About) }.render().unwrap();
    assert!(about.contains(r#"<a href="/about" class="active">About</a>"#));
}

#[test]
fn signed_in_shell_shows_logout_instead_of_register() {
    let shell = Shell { active: None, logged_in: true, flash: Vec::new() };
    let html = HubPage { shell, username: "alice".into() }.render().unwrap();
    assert!(html.contains(r#"action="/logout""#));
    assert!(!html.contains(r#"<a href="/register">"#));
    assert!(html.contains("Welcome, alice"));
}

// =============================================================================
// flash messages
// =============================================================================

#[test]
fn flash_region_absent_when_no_messages() {
    let html = register_page(public_shell(NavPage::Register)).render().unwrap();
    assert!(!html.contains("flash-messages"));
    assert!(!html.contains(r#"<li class="flash"#));
}

#[test]
fn flash_blocks_match_count_order_and_category() {
    let shell = Shell {
        active: Some(NavPage::Register),
        logged_in: false,
        flash: vec![
            FlashMessage::new(Level::Error, "Username taken".into()),
            FlashMessage::new(Level::Success, "Account created".into()),
        ],
    };
    let html = register_page(shell).render().unwrap();

    assert_eq!(html.matches(r#"<li class="flash "#).count(), 2);
    assert!(html.contains(r#"<li class="flash flash-error">Username taken</li>"#));
    assert!(html.contains(r#"<li class="flash flash-success">Account created</li>"#));

    let error_pos = html.find("flash-error").unwrap();
    let success_pos = html.find("flash-success").unwrap();
    assert!(error_pos < success_pos);
}

#[test]
fn flash_text_is_html_escaped() {
    let shell = Shell {
        active: Some(NavPage::Home),
        logged_in: false,
        flash: vec![FlashMessage::new(Level::Info, "<b>hi</b>".into())],
    };
    let html = IndexPage { shell }.render().unwrap();
    assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
    assert!(!html.contains("<b>hi</b>"));
}

#[test]
fn flash_message_maps_levels_to_categories() {
    assert_eq!(FlashMessage::new(Level::Error, String::new()).category, "error");
    assert_eq!(FlashMessage::new(Level::Success, String::new()).category, "success");
    assert_eq!(FlashMessage::new(Level::Info, String::new()).category, "info");
}

// =============================================================================
// register form contract
// =============================================================================

#[test]
fn register_form_posts_to_register_with_required_fields() {
    let html = register_page(public_shell(NavPage::Register)).render().unwrap();
    assert!(html.contains(r#"method="post" action="/register""#));
    assert!(html.contains(r#"name="username" required"#));
    assert!(html.contains(r#"type="password" id="password" name="password" required"#));
}

#[test]
fn register_page_binds_site_key_to_widget() {
    let html = register_page(public_shell(NavPage::Register)).render().unwrap();
    assert!(html.contains(r#"class="h-captcha" data-sitekey="sk_test""#));
}

#[test]
fn register_page_has_hidden_captcha_response_field() {
    let html = register_page(public_shell(NavPage::Register)).render().unwrap();
    assert!(html.contains(r#"<input type="hidden" id="h-captcha-response" name="h-captcha-response" value="">"#));
}

#[test]
fn register_page_wires_completion_event_to_hidden_field() {
    let html = register_page(public_shell(NavPage::Register)).render().unwrap();
    assert!(html.contains(r#"getElementById("h-captcha-response")"#));
    assert!(html.contains("event.detail.response"));
    assert!(html.contains(r#"data-callback="onCaptchaVerified""#));
}

// =============================================================================
// notes and files pages
// =============================================================================

#[test]
fn notes_page_escapes_stored_content() {
    let shell = Shell { active: None, logged_in: true, flash: Vec::new() };
    let notes = vec![NoteRow {
        id: Uuid::nil(),
        user_id: Uuid::nil(),
        title: "<script>alert(1)</script>".into(),
        content: "safe".into(),
        created_at: "2026-01-01 12:00:00".into(),
    }];
    let html = NotesPage { shell, notes }.render().unwrap();
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>alert(1)</script>"));
}

#[test]
fn files_page_lists_download_links() {
    let shell = Shell { active: None, logged_in: true, flash: Vec::new() };
    let files = vec![FileRow {
        id: Uuid::nil(),
        user_id: Uuid::nil(),
        filename: "report.pdf".into(),
        file_path: "uploads/report.pdf".into(),
        public: true,
        password_hash: None,
        uploaded_at: "2026-01-01 12:00:00".into(),
    }];
    let html = FilesPage { shell, files }.render().unwrap();
    assert!(html.contains("/apps/files/download/00000000-0000-0000-0000-000000000000"));
    assert!(html.contains("report.pdf"));
    assert!(html.contains("public"));
}

#[test]
fn file_password_page_shows_error_only_when_present() {
    let shell = Shell { active: None, logged_in: true, flash: Vec::new() };
    let without = FilePasswordPage {
        shell: shell.clone(),
        file_id: Uuid::nil(),
        filename: "report.pdf".into(),
        error: None,
    }
    .render()
    .unwrap();
    assert!(!without.contains("flash-error"));

    let with = FilePasswordPage {
        shell,
        file_id: Uuid::nil(),
        filename: "report.pdf".into(),
        error: Some("Incorrect password".into()),
    }
    .render()
    .unwrap();
    assert!(with.contains("Incorrect password"));
    assert!(with.contains("flash-error"));
}

