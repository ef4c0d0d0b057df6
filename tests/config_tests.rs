//! Tests for configuration loading and rejection at the run boundary.

use ghdl::{ConfigError, PipelineConfig};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::helpers::*;

async fn mount_no_requests(server: &MockServer) {
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_missing_repos_makes_no_requests() {
    let server = MockServer::start().await;
    mount_no_requests(&server).await;

    let temp_dir = create_temp_dir();
    let out = out_dir(&temp_dir);
    let config = json!({ "dir": out.to_string_lossy() });

    let success = create_test_builder(&server)
        .run(&config, &CancellationToken::new())
        .await
        .unwrap();

    assert!(!success);
    assert!(!out.exists());
}

#[tokio::test]
async fn test_repos_not_a_list_makes_no_requests() {
    let server = MockServer::start().await;
    mount_no_requests(&server).await;

    let temp_dir = create_temp_dir();
    let out = out_dir(&temp_dir);
    let config = json!({ "dir": out.to_string_lossy(), "repos": "acme/tool" });

    let success = create_test_builder(&server)
        .run(&config, &CancellationToken::new())
        .await
        .unwrap();

    assert!(!success);
    assert!(!out.exists());
}

#[tokio::test]
async fn test_invalid_filter_rejects_repo() {
    let server = MockServer::start().await;
    mount_no_requests(&server).await;

    let temp_dir = create_temp_dir();
    let out = out_dir(&temp_dir);
    let config = single_repo_config(&out, &["app-(.*"]);

    let success = create_test_builder(&server)
        .run(&config, &CancellationToken::new())
        .await
        .unwrap();

    assert!(!success);
    assert!(list_dir(&out).is_empty());
}

#[tokio::test]
async fn test_empty_repos_is_a_successful_noop() {
    let server = MockServer::start().await;
    mount_no_requests(&server).await;

    let temp_dir = create_temp_dir();
    let out = out_dir(&temp_dir);
    let config = json!({ "dir": out.to_string_lossy(), "repos": [] });

    let success = create_test_builder(&server)
        .run(&config, &CancellationToken::new())
        .await
        .unwrap();

    assert!(success);
    assert!(!out.exists());
}

#[test]
fn test_config_from_file() {
    let temp_dir = create_temp_dir();
    let path = temp_dir.path().join("ghdl.json");
    std::fs::write(
        &path,
        r#"{
            "overwrite": false,
            "dir": "assets",
            "token": "secret",
            "concurrency": 2,
            "repos": [
                { "owner": "acme", "repo": "tool", "filters": [".*\\.deb"] },
                { "owner": "acme", "repo": "lib", "token": "own" }
            ]
        }"#,
    )
    .unwrap();

    let config = PipelineConfig::from_path(&path).unwrap();

    assert!(!config.overwrite);
    assert_eq!(config.dir, std::path::PathBuf::from("assets"));
    assert_eq!(config.concurrency, 2);
    assert_eq!(config.repos.len(), 2);
    assert_eq!(config.repos[0].token, "secret");
    assert_eq!(config.repos[1].token, "own");
    assert!(config.repos[0].patterns.full_match("tool_1.0_amd64.deb"));
    assert!(config.repos[1].patterns.is_empty());
}

#[test]
fn test_config_file_errors() {
    let temp_dir = create_temp_dir();

    let missing = PipelineConfig::from_path(temp_dir.path().join("missing.json"));
    assert!(matches!(missing, Err(ConfigError::Read { .. })));

    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let broken = PipelineConfig::from_path(&path);
    assert!(matches!(broken, Err(ConfigError::Json { .. })));

    let path = temp_dir.path().join("list.json");
    std::fs::write(&path, "[]").unwrap();
    let list = PipelineConfig::from_path(&path);
    assert!(matches!(list, Err(ConfigError::NotAnObject)));
}
