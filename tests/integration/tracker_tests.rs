use fa_grab::config::TrackerConfig;
use fa_grab::output::{build_http_client, upload_username_report, UsernameLog, UsernameReport};
use fa_grab::GrabError;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tracker_config(uri: &str, private_discovery: bool) -> TrackerConfig {
    TrackerConfig {
        url: Some(uri.to_string()),
        private_discovery,
        max_tries: 3,
        retry_seconds: 0,
    }
}

fn sample_report() -> UsernameReport {
    let dir = TempDir::new().unwrap();
    UsernameLog::discovered(dir.path())
        .append(["bob", "alice", "bob"])
        .unwrap();
    UsernameLog::disabled(dir.path()).append(["gone"]).unwrap();
    UsernameReport::load(dir.path()).unwrap()
}

#[tokio::test]
async fn test_upload_private_discovery() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user_private_discovery"))
        .and(body_json(serde_json::json!({
            "discovered_usernames": ["alice", "bob"],
            "username_disabled_map": {"gone": true},
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_http_client().unwrap();
    let tracker = tracker_config(&mock_server.uri(), true);

    upload_username_report(&client, &tracker, &sample_report())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_upload_public_discovery_retries_until_ok() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user_discovery"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/user_discovery"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_http_client().unwrap();
    let tracker = tracker_config(&mock_server.uri(), false);

    upload_username_report(&client, &tracker, &sample_report())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_upload_gives_up() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = build_http_client().unwrap();
    let tracker = tracker_config(&mock_server.uri(), true);

    let err = upload_username_report(&client, &tracker, &sample_report())
        .await
        .unwrap_err();
    assert!(matches!(err, GrabError::Tracker { attempts: 3, .. }));
}
