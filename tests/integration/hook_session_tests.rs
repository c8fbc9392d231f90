use fa_grab::config::{parse_config, Config};
use fa_grab::crawler::{serve, Action, GrabHooks, Pause};
use fa_grab::output::UsernameReport;
use fa_grab::url::ListingType;
use fa_grab::GrabError;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use tempfile::TempDir;

const LOGGED_IN_PAGE: &str = r#"<html>
<a href="/logout/">Log Out</a>
<span>Toggle to hide Mature and Adult submissions.</span>
"#;

/// Records backoff pauses instead of sleeping
#[derive(Clone, Default)]
struct RecordedPauses(Rc<RefCell<Vec<Duration>>>);

impl Pause for RecordedPauses {
    fn pause(&self, duration: Duration) {
        self.0.borrow_mut().push(duration);
    }
}

fn example_config() -> Config {
    parse_config(
        r#"
[site]
base-url = "https://example.net/"
primary-domains = ["example.net", "*.example.net"]
mirror-domains = ["*.cdn.example.org"]
"#,
    )
    .unwrap()
}

fn create_hooks(dir: &TempDir) -> (GrabHooks, RecordedPauses) {
    let pauses = RecordedPauses::default();
    let hooks = GrabHooks::with_pause(example_config(), dir.path(), Box::new(pauses.clone()));
    (hooks, pauses)
}

fn write_document(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_pagination_boundary_end_to_end() {
    let dir = TempDir::new().unwrap();
    let (mut hooks, _) = create_hooks(&dir);

    let page = write_document(
        &dir,
        "gallery3.html",
        &format!("{}There are no submissions to list", LOGGED_IN_PAGE),
    );

    hooks
        .get_urls(&page, "https://example.net/gallery/foo/3/")
        .unwrap();
    assert_eq!(hooks.state().boundary(ListingType::Gallery), Some(3));

    assert!(!hooks.accept_url("https://example.net/gallery/foo/4/", None, true));
    assert!(hooks.accept_url("https://example.net/gallery/foo/2/", None, true));
    assert!(hooks.accept_url("https://example.net/gallery/foo/3/", None, true));

    // A later empty page never moves the boundary
    hooks
        .get_urls(&page, "https://example.net/gallery/foo/7/")
        .unwrap();
    assert_eq!(hooks.state().boundary(ListingType::Gallery), Some(3));
    assert!(!hooks.accept_url("https://example.net/gallery/foo/5/", None, true));
}

#[test]
fn test_primary_failure_threshold_aborts_after_pause() {
    let dir = TempDir::new().unwrap();
    let (mut hooks, pauses) = create_hooks(&dir);
    hooks.state_mut().consecutive_failures = 4;

    let err = hooks
        .handle_response("https://example.net/view/10/", 500)
        .unwrap_err();

    assert!(matches!(err, GrabError::GaveUp { failures: 5, .. }));
    assert_eq!(*pauses.0.borrow(), vec![Duration::from_secs(60)]);
}

#[test]
fn test_not_found_resets_failures() {
    let dir = TempDir::new().unwrap();
    let (mut hooks, pauses) = create_hooks(&dir);
    hooks.state_mut().consecutive_failures = 3;

    let action = hooks
        .handle_response("https://example.net/user/ghost/", 404)
        .unwrap();

    assert_eq!(action, Action::Continue);
    assert_eq!(hooks.state().consecutive_failures, 0);
    assert!(pauses.0.borrow().is_empty());
}

#[test]
fn test_failure_counter_grows_until_success() {
    let dir = TempDir::new().unwrap();
    let (mut hooks, _) = create_hooks(&dir);

    let mut previous = 0;
    for status in [500, 403, 502] {
        hooks
            .handle_response("https://thirdparty.org/x", status)
            .unwrap();
        assert!(hooks.state().consecutive_failures > previous);
        previous = hooks.state().consecutive_failures;
    }

    hooks
        .handle_response("https://thirdparty.org/x", 301)
        .unwrap();
    assert_eq!(hooks.state().consecutive_failures, 0);
    assert_eq!(hooks.state().total_attempts, 4);
}

#[test]
fn test_attempt_ceiling_over_full_session() {
    let dir = TempDir::new().unwrap();
    let (mut hooks, _) = create_hooks(&dir);

    for _ in 0..1000 {
        hooks
            .handle_response("https://example.net/view/1/", 200)
            .unwrap();
    }
    assert_eq!(hooks.state().total_attempts, 1000);

    let err = hooks
        .handle_error("https://example.net/view/1/", "connection reset")
        .unwrap_err();
    assert!(matches!(
        err,
        GrabError::AttemptCeilingExceeded { limit: 1000 }
    ));
}

#[test]
fn test_usernames_and_report() {
    let dir = TempDir::new().unwrap();
    let (mut hooks, _) = create_hooks(&dir);

    let journal = write_document(
        &dir,
        "journal.html",
        &format!(
            r#"{}<a href="/user/bob/">bob</a> <a href="/user/Alice99">Alice</a> <a href="/user/bob/">again</a>"#,
            LOGGED_IN_PAGE
        ),
    );
    hooks
        .get_urls(&journal, "https://example.net/journal/55/")
        .unwrap();

    let log = std::fs::read_to_string(dir.path().join("usernames.txt")).unwrap();
    assert_eq!(log, "bob\nAlice99\nbob\n");

    let report = UsernameReport::load(dir.path()).unwrap();
    assert_eq!(report.discovered_usernames.len(), 2);
    assert!(report.discovered_usernames.contains("Alice99"));
}

#[test]
fn test_view_page_queues_download_and_admits_media() {
    let dir = TempDir::new().unwrap();
    let (mut hooks, _) = create_hooks(&dir);

    let view = write_document(
        &dir,
        "view.html",
        &format!(
            r#"{}<script>var is_full = 1;</script>
            <a href="//d.cdn.example.org/art/bob/1/pic.png">Download</a>"#,
            LOGGED_IN_PAGE
        ),
    );

    let urls = hooks
        .get_urls(&view, "https://www.example.net/view/1/")
        .unwrap();
    assert_eq!(urls, vec!["https://d.cdn.example.org/art/bob/1/pic.png"]);

    // The engine refused the inline media; the view page rescues it
    assert!(hooks.accept_url(
        "https://t.cdn.example.org/1@400-1.jpg",
        Some("https://www.example.net/view/1/"),
        false
    ));
    assert_eq!(
        hooks.wait_time(Duration::from_secs(1), "d.cdn.example.org", false),
        Duration::ZERO
    );
}

#[test]
fn test_serve_session_over_pipes() {
    let dir = TempDir::new().unwrap();
    let (mut hooks, _) = create_hooks(&dir);

    let input = [
        r#"{"hook":"accept_url","url":"https://example.net/themes/classic/x.css","referrer":"https://example.net/","verdict":true}"#,
        r#"{"hook":"handle_response","url":"https://example.net/user/bob/","status_code":404}"#,
        r#"{"hook":"wait_time","seconds":2.5,"url":"https://example.net/view/1/","error":false}"#,
        r#"{"hook":"wait_time","seconds":2.5,"url":"https://d.cdn.example.org/art/bob/1/pic.png","error":false}"#,
    ]
    .join("\n");

    let mut output = Vec::new();
    serve(&mut hooks, input.as_bytes(), &mut output).unwrap();

    let output = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"{"verdict":false}"#,
            r#"{"action":"continue"}"#,
            r#"{"seconds":2.5}"#,
            r#"{"seconds":0.0}"#,
        ]
    );
}

#[test]
fn test_serve_answers_abort_item_then_fails() {
    let dir = TempDir::new().unwrap();
    let (mut hooks, pauses) = create_hooks(&dir);

    let input = vec![r#"{"hook":"handle_error","url":"https://example.net/view/3/","error":"reset"}"#; 7]
        .join("\n");

    let mut output = Vec::new();
    let err = serve(&mut hooks, input.as_bytes(), &mut output).unwrap_err();
    assert!(matches!(err, GrabError::GaveUp { failures: 5, .. }));

    let output = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[..4].iter().all(|l| *l == r#"{"action":"retry"}"#));
    assert_eq!(lines[4], r#"{"action":"abort_item"}"#);
    // Transport errors never pause
    assert!(pauses.0.borrow().is_empty());
}
