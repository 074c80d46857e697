//! Integration tests for TOML configuration system
//!
//! These tests verify that the configuration system works end-to-end:
//! - Configuration loading and validation
//! - Service creation from config
//! - Reloaded reminder endpoints reaching the HTTP handlers
//! - The file watcher picking up rapid successive saves

use axum_test::TestServer;
use baseera::{
    AppState, BaseeraConfig, BaseeraConfigManager, BookmarkStore,
    api::routes::build_app,
    utils::toml_config::ConfigWarningKind,
};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Nobody sets this, so hadith picks fall back without a request
const UNSET_KEY_ENV: &str = "BASEERA_TOML_TESTS_UNSET_HADITH_KEY";

fn write_config(path: &Path, upstream: &str, bookmarks: &Path) {
    let content = format!(
        r#"
[server]
host = "127.0.0.1"
port = 3999

[reminders]
quran_api_base = "{upstream}/v1"
hadith_api_base = "{upstream}/api"
hadith_api_key_env = "{key_env}"
max_attempts = 1
backoff_ms = 0

[chat]
backend = "mock"

[bookmarks]
storage = "file"
path = "{bookmarks}"
"#,
        upstream = upstream,
        key_env = UNSET_KEY_ENV,
        bookmarks = bookmarks.display(),
    );
    fs::write(path, content).expect("Failed to write config");
}

async fn quran_server(surah: u32, verse: u32) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "text": "ar", "surah": { "number": surah }, "numberInSurah": verse },
                { "text": "en", "surah": { "number": surah }, "numberInSurah": verse }
            ]
        })))
        .mount(&server)
        .await;
    server
}

async fn reminder_sources(server: &TestServer, times: usize) -> Vec<String> {
    let mut sources = Vec::new();
    for _ in 0..times {
        let body: Value = server.get("/api/reminder").await.json();
        sources.push(body["source"].as_str().unwrap_or_default().to_string());
    }
    sources
}

#[test]
fn test_config_with_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("baseera.toml");
    write_config(&path, "http://127.0.0.1:1", &dir.path().join("bookmarks.json"));

    let config = BaseeraConfig::load(&path).expect("config should load");
    assert_eq!(config.bind_address(), "127.0.0.1:3999");

    let warnings = config.validate_with_warnings().unwrap();
    let kinds: Vec<_> = warnings.iter().map(|w| w.kind.clone()).collect();
    assert!(kinds.contains(&ConfigWarningKind::MissingHadithKey));
    assert!(kinds.contains(&ConfigWarningKind::MockChatBackend));
    assert!(!kinds.contains(&ConfigWarningKind::EphemeralBookmarks));
}

#[tokio::test]
async fn test_full_integration_config_to_services() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("baseera.toml");
    let bookmarks_path = dir.path().join("state/bookmarks.json");
    let upstream = quran_server(1, 1).await;
    write_config(&config_path, &upstream.uri(), &bookmarks_path);

    let manager = Arc::new(BaseeraConfigManager::new(&config_path).unwrap());
    let state = AppState::from_config_manager(Arc::clone(&manager)).unwrap();
    assert_eq!(state.chat.backend_name(), "mock");

    let server = TestServer::new(build_app(state)).expect("Failed to create test server");

    for source in reminder_sources(&server, 6).await {
        assert!(source == "Quran 1:1" || source == "Quran 94:5", "got {}", source);
    }

    let body: Value = server
        .post("/api/chat")
        .json(&json!({ "question": "tawakkul" }))
        .await
        .json();
    assert_eq!(body["answer"], "Here's a mock response about tawakkul");

    server
        .post("/api/bookmarks")
        .json(&json!({
            "arabic": "ar",
            "english": "en",
            "source": "Quran 1:1",
            "type": "quran"
        }))
        .await
        .assert_status_ok();

    // Bookmarks were written to the configured file
    let config = manager.config();
    let reopened = BookmarkStore::from_config(&config.bookmarks);
    assert!(reopened.is_bookmarked("Quran 1:1").unwrap());
    assert!(bookmarks_path.exists());
}

#[tokio::test]
async fn test_reloaded_endpoints_reach_handlers() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("baseera.toml");
    let bookmarks_path = dir.path().join("bookmarks.json");

    let before = quran_server(1, 1).await;
    let after = quran_server(1, 2).await;
    write_config(&config_path, &before.uri(), &bookmarks_path);

    let manager = Arc::new(BaseeraConfigManager::new(&config_path).unwrap());
    let state = AppState::from_config_manager(Arc::clone(&manager)).unwrap();
    let server = TestServer::new(build_app(state)).unwrap();

    for source in reminder_sources(&server, 6).await {
        assert!(source == "Quran 1:1" || source == "Quran 94:5", "got {}", source);
    }

    write_config(&config_path, &after.uri(), &bookmarks_path);
    manager.reload().expect("reload should succeed");

    for source in reminder_sources(&server, 6).await {
        assert!(source == "Quran 1:2" || source == "Quran 94:5", "got {}", source);
    }
}

#[tokio::test]
async fn test_invalid_reload_keeps_previous_config() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("baseera.toml");
    write_config(&config_path, "http://127.0.0.1:1", &dir.path().join("b.json"));

    let manager = BaseeraConfigManager::new(&config_path).unwrap();
    fs::write(&config_path, "[reminders]\nmax_attempts = 0\n").unwrap();

    assert!(manager.reload().is_err());
    assert_eq!(manager.config().server.port, 3999);
}

async fn wait_for_port(manager: &BaseeraConfigManager, port: u16) -> u16 {
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(10);
    loop {
        let current = manager.config().server.port;
        if current == port || tokio::time::Instant::now() >= deadline {
            return current;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_watcher_applies_rapid_successive_saves() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("baseera.toml");
    fs::write(&config_path, "[server]\nport = 4001\n").unwrap();

    let manager = BaseeraConfigManager::new(&config_path).unwrap();
    manager.start_watching().expect("watcher should start");
    assert_eq!(manager.config().server.port, 4001);

    fs::write(&config_path, "[server]\nport = 4002\n").unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;
    fs::write(&config_path, "[server]\nport = 4003\n").unwrap();

    // The second save lands inside the debounce window of the first
    assert_eq!(wait_for_port(&manager, 4003).await, 4003);

    // And a later save is still picked up
    tokio::time::sleep(std::time::Duration::from_millis(800)).await;
    fs::write(&config_path, "[server]\nport = 4004\n").unwrap();
    assert_eq!(wait_for_port(&manager, 4004).await, 4004);

    manager.stop_watching();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_watcher_keeps_config_on_invalid_save() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("baseera.toml");
    fs::write(&config_path, "[server]\nport = 4101\n").unwrap();

    let manager = BaseeraConfigManager::new(&config_path).unwrap();
    manager.start_watching().unwrap();

    fs::write(&config_path, "[reminders]\nmax_attempts = 0\n").unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
    assert_eq!(manager.config().server.port, 4101);

    fs::write(&config_path, "[server]\nport = 4102\n").unwrap();
    assert_eq!(wait_for_port(&manager, 4102).await, 4102);
}
