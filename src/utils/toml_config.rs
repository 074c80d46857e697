//! TOML-based configuration for Baseera
//!
//! Server, reminder source, chat backend and bookmark storage settings are read
//! from `baseera.toml`. Every field has a default, so a missing file simply
//! yields the default configuration.
//!
//! # Hot Reloading
//!
//! Configuration changes are automatically detected and applied at runtime.
//! Use `BaseeraConfigManager` for thread-safe access to the current configuration.
//! The whole `[reminders]` section applies to the next reminder request. The
//! chat backend, bookmark storage and bind address are fixed at startup.

use arc_swap::ArcSwap;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Root configuration structure loaded from baseera.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseeraConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Quran and Hadith API settings
    #[serde(default)]
    pub reminders: RemindersConfig,

    /// Answering backend used by `/api/chat` and `baseera ask`
    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub bookmarks: BookmarksConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

// ============= Reminder Sources =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemindersConfig {
    #[serde(default = "default_quran_api_base")]
    pub quran_api_base: String,

    #[serde(default = "default_arabic_edition")]
    pub arabic_edition: String,

    #[serde(default = "default_english_edition")]
    pub english_edition: String,

    #[serde(default = "default_hadith_api_base")]
    pub hadith_api_base: String,

    /// Environment variable name containing the hadith API key
    #[serde(default = "default_hadith_api_key_env")]
    pub hadith_api_key_env: String,

    /// Attempts per fetch, including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Linear backoff base; the n-th retry waits `n * backoff_ms`
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_quran_api_base() -> String {
    "https://api.alquran.cloud/v1".to_string()
}

fn default_arabic_edition() -> String {
    "quran-uthmani".to_string()
}

fn default_english_edition() -> String {
    "en.asad".to_string()
}

fn default_hadith_api_base() -> String {
    "https://www.hadithapi.com/api".to_string()
}

fn default_hadith_api_key_env() -> String {
    "HADITH_API_KEY".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            quran_api_base: default_quran_api_base(),
            arabic_edition: default_arabic_edition(),
            english_edition: default_english_edition(),
            hadith_api_base: default_hadith_api_base(),
            hadith_api_key_env: default_hadith_api_key_env(),
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl RemindersConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    /// The hadith API key, if its variable is set to a non-empty value
    pub fn hadith_api_key(&self) -> Option<String> {
        std::env::var(&self.hadith_api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

// ============= Chat Backend =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub backend: ChatBackendKind,

    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Environment variable that overrides `backend_url` when set
    #[serde(default = "default_backend_url_env")]
    pub backend_url_env: String,

    #[serde(default = "default_chat_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatBackendKind {
    /// Forward questions to the answering backend over HTTP
    #[default]
    Proxy,
    /// Canned answers, no network
    Mock,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_backend_url_env() -> String {
    "BASEERA_BACKEND_URL".to_string()
}

fn default_chat_timeout_secs() -> u64 {
    60
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            backend: ChatBackendKind::default(),
            backend_url: default_backend_url(),
            backend_url_env: default_backend_url_env(),
            timeout_secs: default_chat_timeout_secs(),
        }
    }
}

impl ChatConfig {
    /// Backend URL after applying the environment override
    pub fn resolved_backend_url(&self) -> String {
        std::env::var(&self.backend_url_env)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.backend_url.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============= Bookmark Storage =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarksConfig {
    #[serde(default)]
    pub storage: StorageKind,

    /// JSON file used by the `file` storage
    #[serde(default = "default_bookmarks_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    File,
    Memory,
}

fn default_bookmarks_path() -> PathBuf {
    PathBuf::from("./data/bookmarks.json")
}

impl Default for BookmarksConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::default(),
            path: default_bookmarks_path(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Configuration warnings that don't prevent operation but may indicate issues
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub kind: ConfigWarningKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarningKind {
    MissingHadithKey,
    MockChatBackend,
    EphemeralBookmarks,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Watch error: {0}")]
    WatchError(#[from] notify::Error),
}

impl From<ConfigError> for crate::types::AppError {
    fn from(err: ConfigError) -> Self {
        crate::types::AppError::Config(err.to_string())
    }
}

impl BaseeraConfig {
    /// Load and validate configuration from a TOML file.
    ///
    /// A missing file is not an error: the defaults are returned instead.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            info!("No configuration file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;

        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: BaseeraConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration back to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reminders.max_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "reminders.max_attempts must be at least 1".to_string(),
            ));
        }

        validate_http_url("reminders.quran_api_base", &self.reminders.quran_api_base)?;
        validate_http_url("reminders.hadith_api_base", &self.reminders.hadith_api_base)?;

        if self.reminders.arabic_edition.trim().is_empty()
            || self.reminders.english_edition.trim().is_empty()
        {
            return Err(ConfigError::ValidationError(
                "reminders editions must not be empty".to_string(),
            ));
        }

        if self.chat.backend == ChatBackendKind::Proxy {
            let url = self.chat.resolved_backend_url();
            if url.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "chat.backend_url must be set when chat.backend = \"proxy\"".to_string(),
                ));
            }
            validate_http_url("chat.backend_url", &url)?;
        }

        if self.bookmarks.storage == StorageKind::File
            && self.bookmarks.path.as_os_str().is_empty()
        {
            return Err(ConfigError::ValidationError(
                "bookmarks.path must be set when bookmarks.storage = \"file\"".to_string(),
            ));
        }

        if tracing_subscriber::EnvFilter::try_new(&self.server.log_level).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "server.log_level '{}' is not a valid filter",
                self.server.log_level
            )));
        }

        Ok(())
    }

    /// Validate configuration, collecting warnings for settings that work but degrade behavior
    ///
    /// Returns Ok with warnings, or Err if validation fails
    pub fn validate_with_warnings(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        self.validate()?;

        let mut warnings = Vec::new();

        if self.reminders.hadith_api_key().is_none() {
            warnings.push(ConfigWarning {
                kind: ConfigWarningKind::MissingHadithKey,
                message: format!(
                    "Environment variable '{}' is not set; hadith reminders will fall back to Quran 94:5",
                    self.reminders.hadith_api_key_env
                ),
            });
        }

        if self.chat.backend == ChatBackendKind::Mock {
            warnings.push(ConfigWarning {
                kind: ConfigWarningKind::MockChatBackend,
                message: "chat.backend is 'mock'; answers are canned responses".to_string(),
            });
        }

        if self.bookmarks.storage == StorageKind::Memory {
            warnings.push(ConfigWarning {
                kind: ConfigWarningKind::EphemeralBookmarks,
                message: "bookmarks.storage is 'memory'; bookmarks are lost on restart"
                    .to_string(),
            });
        }

        Ok(warnings)
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn validate_http_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{} must be an http(s) URL, got '{}'",
            field, url
        )))
    }
}

// ============= Hot Reloading Configuration Manager =============

/// Quiet period after the last file event before the config is reloaded
pub const RELOAD_DEBOUNCE: Duration = Duration::from_millis(500);

/// Thread-safe configuration manager with hot reloading support
pub struct BaseeraConfigManager {
    config: Arc<ArcSwap<BaseeraConfig>>,
    config_path: PathBuf,
    watcher: RwLock<Option<RecommendedWatcher>>,
}

impl BaseeraConfigManager {
    /// Create a new configuration manager and load the initial config
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        // Convert to absolute path for reliable file watching
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(ConfigError::ReadError)?
                .join(path)
        };

        let config = BaseeraConfig::load(&path)?;

        Ok(Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            config_path: path,
            watcher: RwLock::new(None),
        })
    }

    /// Get the current configuration (lockless read)
    pub fn config(&self) -> Arc<BaseeraConfig> {
        self.config.load_full()
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Manually reload the configuration from disk
    pub fn reload(&self) -> Result<(), ConfigError> {
        info!("Reloading configuration from {:?}", self.config_path);

        let new_config = BaseeraConfig::load(&self.config_path)?;
        self.config.store(Arc::new(new_config));

        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Start watching for configuration file changes
    ///
    /// Reloads are debounced on the trailing edge: a burst of saves within
    /// [`RELOAD_DEBOUNCE`] results in a single reload of the final contents.
    pub fn start_watching(&self) -> Result<(), ConfigError> {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();

        let config_path = self.config_path.clone();
        let config_arc = Arc::clone(&self.config);
        let watched_file = config_path.file_name().map(|name| name.to_os_string());

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    let touches_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == watched_file);
                    if touches_config && (event.kind.is_modify() || event.kind.is_create()) {
                        let _ = tx.send(());
                    }
                }
                Err(e) => {
                    error!("Config watcher error: {:?}", e);
                }
            }
        })?;

        // Watch the parent directory so editors that replace the file are seen
        if let Some(parent) = self.config_path.parent() {
            watcher.watch(parent, RecursiveMode::NonRecursive)?;
        }

        *self.watcher.write() = Some(watcher);

        tokio::spawn(async move {
            while rx.recv().await.is_some() {
                tokio::time::sleep(RELOAD_DEBOUNCE).await;
                while rx.try_recv().is_ok() {}

                match BaseeraConfig::load(&config_path) {
                    Ok(new_config) => {
                        config_arc.store(Arc::new(new_config));
                        info!("Configuration hot-reloaded successfully");
                    }
                    Err(e) => {
                        warn!(
                            "Failed to hot-reload config: {}. Keeping previous config.",
                            e
                        );
                    }
                }
            }
        });

        info!("Configuration hot-reload watcher started");
        Ok(())
    }

    /// Stop watching for configuration changes
    pub fn stop_watching(&self) {
        *self.watcher.write() = None;
        info!("Configuration hot-reload watcher stopped");
    }

    /// Create a config manager directly from a config (useful for testing)
    /// This won't have file watching capabilities.
    pub fn from_config(config: BaseeraConfig) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            config_path: PathBuf::from("test-config.toml"),
            watcher: RwLock::new(None),
        }
    }
}

impl Clone for BaseeraConfigManager {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            config_path: self.config_path.clone(),
            watcher: RwLock::new(None), // Watcher is not cloned
        }
    }
}
