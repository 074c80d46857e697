//! Init command implementation
//!
//! Scaffolds a new Baseera project: `baseera.toml`, `.env.example`, the
//! `data/` directory for bookmarks, and a `.gitignore`.

use super::output::Output;
use std::fs;
use std::path::Path;

/// Result of the init operation
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// Project already exists (baseera.toml found)
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: std::path::PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// Host address for the server
    pub host: String,
    /// Port for the server
    pub port: u16,
    /// Configure the canned mock chat backend instead of the proxy
    pub mock_chat: bool,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing Baseera Project");

    let base_path = &config.path;

    let config_path = base_path.join("baseera.toml");
    if config_path.exists() && !config.force {
        output.warning("baseera.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    output.subheader("Creating directories");

    let data_dir = base_path.join("data");
    if !data_dir.exists() {
        if let Err(e) = fs::create_dir_all(&data_dir) {
            output.error(&format!("Failed to create data: {}", e));
            return InitResult::Error(e.to_string());
        }
        output.created_dir("data");
    } else {
        output.skipped("data", "already exists");
    }

    output.subheader("Creating configuration files");

    let toml_content = generate_baseera_toml(&config);
    if let Err(e) = write_file(&config_path, &toml_content, config.force) {
        output.error(&format!("Failed to create baseera.toml: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", "baseera.toml");

    let env_example_path = base_path.join(".env.example");
    if let Err(e) = write_file(&env_example_path, &generate_env_example(), config.force) {
        output.error(&format!("Failed to create .env.example: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("env", ".env.example");

    let gitignore_path = base_path.join(".gitignore");
    if !gitignore_path.exists() {
        if let Err(e) = write_file(&gitignore_path, &generate_gitignore(), false) {
            output.warning(&format!("Failed to create .gitignore: {}", e));
        } else {
            output.created("file", ".gitignore");
        }
    }

    output.complete("Baseera project initialized successfully!");

    output.header("Next Steps");
    output.newline();
    output.info("1. Set up environment variables:");
    output.command("cp .env.example .env");
    output.command("# Edit .env and set HADITH_API_KEY for hadith reminders");
    output.newline();

    if !config.mock_chat {
        output.info("2. Start the answering backend:");
        output.command("# it must serve POST /api/chat at BASEERA_BACKEND_URL");
        output.newline();
    }

    output.info("3. Start the server:");
    output.command("baseera serve");
    output.newline();

    output.hint(&format!(
        "Server will be available at http://{}:{}",
        config.host, config.port
    ));
    output.hint("Try `baseera reminder` or `baseera date` for a quick check");

    InitResult::Success
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(()); // Skip existing files unless force is true
    }
    fs::write(path, content)
}

fn generate_baseera_toml(config: &InitConfig) -> String {
    let backend = if config.mock_chat { "mock" } else { "proxy" };

    format!(
        r#"# Baseera configuration
# Every value below is the default unless noted; delete what you don't change.

[server]
host = "{host}"
port = {port}
log_level = "info"
# "pretty" for humans, "json" for log shippers
log_format = "pretty"

[reminders]
quran_api_base = "https://api.alquran.cloud/v1"
arabic_edition = "quran-uthmani"
english_edition = "en.asad"
hadith_api_base = "https://www.hadithapi.com/api"
# Name of the environment variable holding the hadith API key
hadith_api_key_env = "HADITH_API_KEY"
# Attempts per fetch; the n-th retry waits n * backoff_ms
max_attempts = 3
backoff_ms = 1000
request_timeout_secs = 10

[chat]
# "proxy" forwards to backend_url, "mock" returns canned answers
backend = "{backend}"
backend_url = "http://127.0.0.1:8000"
# Overrides backend_url when set
backend_url_env = "BASEERA_BACKEND_URL"
timeout_secs = 60

[bookmarks]
# "file" or "memory"
storage = "file"
path = "./data/bookmarks.json"
"#,
        host = config.host,
        port = config.port,
        backend = backend,
    )
}

fn generate_env_example() -> String {
    r#"# Baseera Environment Variables
# =============================
# Copy this file to .env and fill in the values.

# Hadith API key (https://www.hadithapi.com); without it hadith
# reminders fall back to Quran 94:5
HADITH_API_KEY=your-hadith-api-key

# Optional: answering backend for /api/chat (overrides chat.backend_url)
# BASEERA_BACKEND_URL=http://127.0.0.1:8000

# Optional: Logging level (trace, debug, info, warn, error)
RUST_LOG=info,baseera=debug
"#
    .to_string()
}

fn generate_gitignore() -> String {
    r#"# Baseera Generated Files
/data/

# Environment
.env
.env.local
.env.*.local

# Rust
/target/

# IDE
.idea/
.vscode/
*.swp
*~

# OS
.DS_Store
Thumbs.db
"#
    .to_string()
}
