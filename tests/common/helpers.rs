#![allow(dead_code)]

use ghdl::pipeline::{PipelineBuilder, PipelineConfig};
use ghdl::Pipeline;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const OWNER: &str = "acme";
pub const REPO: &str = "tool";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Asserts that a file holds exactly `content`
pub fn assert_file_content(path: &Path, content: &[u8]) {
    let actual = fs::read(path).unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e));
    assert_eq!(actual, content, "File content mismatch at path: {:?}", path);
}

/// Path of the latest release endpoint of `owner/repo`
pub fn release_path(owner: &str, repo: &str) -> String {
    format!("/repos/{}/{}/releases/latest", owner, repo)
}

/// Path an asset named `name` is served from
pub fn asset_path(name: &str) -> String {
    format!("/download/{}", name)
}

/// Release metadata listing `assets`, each served by `server`
pub fn release_json(server: &MockServer, tag: &str, assets: &[&str]) -> Value {
    let assets: Vec<Value> = assets
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "browser_download_url": format!("{}{}", server.uri(), asset_path(name)),
            })
        })
        .collect();
    json!({ "name": tag, "tag_name": tag, "assets": assets })
}

/// Mounts the latest release of `owner/repo` listing `assets`
pub async fn mount_release(server: &MockServer, owner: &str, repo: &str, assets: &[&str]) {
    Mock::given(method("GET"))
        .and(path(release_path(owner, repo)))
        .respond_with(ResponseTemplate::new(200).set_body_json(release_json(server, "v1.0.0", assets)))
        .mount(server)
        .await;
}

/// Mounts an asset serving `body`, expected to be requested `hits` times
pub async fn mount_asset(server: &MockServer, name: &str, body: Vec<u8>, hits: u64) {
    Mock::given(method("GET"))
        .and(path(asset_path(name)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(hits)
        .mount(server)
        .await;
}

/// A config for a single repository selecting `filters` into `dir`
pub fn single_repo_config(dir: &Path, filters: &[&str]) -> Value {
    json!({
        "dir": dir.to_string_lossy(),
        "repos": [
            { "owner": OWNER, "repo": REPO, "filters": filters }
        ]
    })
}

/// Returns a builder pointed at the mock server
pub fn create_test_builder(server: &MockServer) -> PipelineBuilder {
    PipelineBuilder::new().api_base(server.uri())
}

/// Validates `config` and builds a pipeline pointed at the mock server
pub fn create_test_pipeline(server: &MockServer, config: &Value) -> Pipeline {
    let config = PipelineConfig::from_value(config).expect("Failed to validate config");
    create_test_builder(server)
        .build(config)
        .expect("Failed to build pipeline")
}

/// Lists the file names in `dir`, sorted
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Output directory below a temporary directory
pub fn out_dir(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("out")
}

/// Mounts the latest release of `owner/repo` listing `(name, url)` assets
pub async fn mount_release_with_urls(
    server: &MockServer,
    owner: &str,
    repo: &str,
    assets: &[(&str, String)],
) {
    let assets: Vec<Value> = assets
        .iter()
        .map(|(name, url)| json!({ "name": name, "browser_download_url": url }))
        .collect();
    Mock::given(method("GET"))
        .and(path(release_path(owner, repo)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "name": "v1.0.0", "assets": assets })),
        )
        .mount(server)
        .await;
}

/// Serves one response declaring `declared` bytes but sending only `body`,
/// then closes the connection. Returns the URL to request.
pub async fn serve_short_body(declared: usize, body: &'static [u8]) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to get local address");
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                declared
            );
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.write_all(body).await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{}/short.bin", addr)
}

/// Serves every connection a body of `declared` bytes, one `chunk`-sized
/// write per `interval`. Returns the base URL of the server.
pub async fn serve_slow_body(declared: usize, chunk: usize, interval: Duration) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to get local address");
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let head = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    declared
                );
                if socket.write_all(head.as_bytes()).await.is_err() {
                    return;
                }
                let mut sent = 0;
                while sent < declared {
                    let n = chunk.min(declared - sent);
                    if socket.write_all(&vec![b'x'; n]).await.is_err() {
                        return;
                    }
                    sent += n;
                    tokio::time::sleep(interval).await;
                }
                let _ = socket.shutdown().await;
            });
        }
    });
    format!("http://{}", addr)
}

/// Waits until `dir` holds at least one entry, or `timeout` elapses.
pub async fn wait_for_entry(dir: &Path, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if fs::read_dir(dir).map(|mut entries| entries.next().is_some()).unwrap_or(false) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
