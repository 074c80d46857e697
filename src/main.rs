//! Baseera CLI entry point
//!
//! - `baseera` / `baseera serve` - Run the HTTP server (default)
//! - `baseera reminder` - Print a random Quran verse or hadith
//! - `baseera date` - Estimate the Hijri date
//! - `baseera ask <question>` - Ask the answering backend
//! - `baseera bookmarks` - Manage bookmarked reminders
//! - `baseera init` - Scaffold a new project
//! - `baseera config` - Show or validate the configuration

use anyhow::Context;
use baseera::{
    AppState, BaseeraConfig, BaseeraConfigManager,
    api::routes::build_app,
    cli::{
        Cli, Commands,
        commands,
        init::{self, InitConfig, InitResult},
        output::Output,
    },
    utils::toml_config::{LogFormat, ServerConfig},
};
use owo_colors::OwoColorize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    if let Err(e) = run().await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let output = cli.output();

    match cli.command {
        None | Some(Commands::Serve) => serve(&cli.config, cli.verbose, &output).await,
        Some(Commands::Init {
            path,
            force,
            host,
            port,
            mock_chat,
        }) => {
            let config = InitConfig {
                path,
                force,
                host,
                port,
                mock_chat,
            };
            match init::run(config, &output) {
                InitResult::Success | InitResult::AlreadyExists => Ok(()),
                InitResult::Error(e) => anyhow::bail!("init failed: {}", e),
            }
        }
        Some(Commands::Config { validate }) => {
            commands::config(&cli.config, validate, &output)?;
            Ok(())
        }
        Some(Commands::Date { date, json }) => {
            commands::date(date, json, &output)?;
            Ok(())
        }
        Some(Commands::Reminder {
            offline,
            json,
            bookmark,
        }) => {
            let config = load_one_shot_config(&cli.config, cli.verbose)?;
            commands::reminder(&config, offline, json, bookmark, &output).await?;
            Ok(())
        }
        Some(Commands::Ask { question }) => {
            let config = load_one_shot_config(&cli.config, cli.verbose)?;
            commands::ask(&config, &question.join(" "), &output).await?;
            Ok(())
        }
        Some(Commands::Bookmarks(action)) => {
            let config = load_one_shot_config(&cli.config, cli.verbose)?;
            commands::bookmarks(&config, &action, &output)?;
            Ok(())
        }
    }
}

/// Load the config for a one-shot command and install its logger
fn load_one_shot_config(path: &Path, verbose: bool) -> anyhow::Result<BaseeraConfig> {
    let config = BaseeraConfig::load(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    init_tracing(&config.server, verbose, false);
    Ok(config)
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Logs go to stderr so `--json` output on stdout stays machine readable.
/// One-shot commands only show warnings unless `--verbose` is set.
fn init_tracing(server: &ServerConfig, verbose: bool, serving: bool) {
    let default_level = if verbose {
        "debug"
    } else if serving {
        server.log_level.as_str()
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match server.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

async fn serve(config_path: &Path, verbose: bool, output: &Output) -> anyhow::Result<()> {
    output.banner();

    let config_manager = BaseeraConfigManager::new(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    let config = config_manager.config();
    init_tracing(&config.server, verbose, true);

    if config_path.exists() {
        info!("Loaded configuration from {}", config_manager.path().display());
    } else {
        info!(
            "No configuration at {}, using defaults",
            config_manager.path().display()
        );
    }

    for warning in config.validate_with_warnings()? {
        warn!("{}", warning);
    }

    if let Err(e) = config_manager.start_watching() {
        warn!("Configuration hot-reload disabled: {}", e);
    }

    let state = AppState::from_config_manager(Arc::new(config_manager))?;
    info!(
        chat_backend = state.chat.backend_name(),
        "Services initialized"
    );

    let app = build_app(state);
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Baseera listening on http://{}", addr);
    output.hint(&format!("Serving on http://{}/api", addr));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
