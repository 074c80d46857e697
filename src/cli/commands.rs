//! Implementations of the one-shot CLI commands
//!
//! `serve` lives in `main.rs`; everything here runs once and returns.

use super::BookmarkCommands;
use super::output::Output;
use crate::bookmarks::BookmarkStore;
use crate::calendar::IslamicDateInfo;
use crate::chat::ChatService;
use crate::reminders::{ReminderSelector, offline};
use crate::types::{AppError, Result};
use crate::utils::toml_config::{BaseeraConfig, ChatBackendKind, StorageKind};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}

/// `baseera reminder`
pub async fn reminder(
    config: &BaseeraConfig,
    use_offline: bool,
    json: bool,
    bookmark: bool,
    output: &Output,
) -> Result<()> {
    let reminder = if use_offline {
        offline::reminder_for_today()
    } else {
        ReminderSelector::from_config(&config.reminders)?
            .daily_reminder()
            .await
    };

    if json {
        print_json(&reminder)?;
    } else {
        output.reminder(&reminder);
    }

    if bookmark {
        let source = reminder.source.clone();
        let added = BookmarkStore::from_config(&config.bookmarks).add(reminder)?;
        if !json {
            if added {
                output.success(&format!("Bookmarked {}", source));
            } else {
                output.info(&format!("{} is already bookmarked", source));
            }
        }
    }

    Ok(())
}

/// `baseera date`
pub fn date(date: Option<NaiveDate>, json: bool, output: &Output) -> Result<()> {
    let info = match date {
        Some(date) => IslamicDateInfo::for_date(date),
        None => IslamicDateInfo::today(),
    };

    if json {
        return print_json(&info);
    }

    output.header("Islamic Date");
    output.islamic_date(&info);
    output.newline();
    Ok(())
}

/// `baseera ask`. Backend failures print an apology rather than an error.
pub async fn ask(config: &BaseeraConfig, question: &str, output: &Output) -> Result<()> {
    if question.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Question must not be empty".to_string(),
        ));
    }

    let service = ChatService::from_config(&config.chat)?;
    let response = service.ask_or_apologize(question).await;
    output.answer(&response);
    output.newline();
    Ok(())
}

/// `baseera bookmarks ...`
pub fn bookmarks(config: &BaseeraConfig, command: &BookmarkCommands, output: &Output) -> Result<()> {
    let store = BookmarkStore::from_config(&config.bookmarks);

    match command {
        BookmarkCommands::List => {
            let bookmarks = store.list()?;
            output.header(&format!("Bookmarks ({})", bookmarks.len()));
            if bookmarks.is_empty() {
                output.hint("Bookmark one with `baseera reminder --bookmark`");
            }
            for reminder in &bookmarks {
                output.list_item(&format!("{} ({})", reminder.source, reminder.kind.label()));
                output.kv("English", &reminder.english);
            }
        }
        BookmarkCommands::Remove { source } => {
            if store.remove(source)? {
                output.success(&format!("Removed {}", source));
            } else {
                return Err(AppError::NotFound(format!("No bookmark with source '{}'", source)));
            }
        }
        BookmarkCommands::Clear => {
            store.clear()?;
            output.success("All bookmarks removed");
        }
    }

    Ok(())
}

/// `baseera config`
pub fn config(path: &Path, validate: bool, output: &Output) -> Result<()> {
    output.header("Configuration");

    let config = match BaseeraConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            output.error(&e.to_string());
            return Err(e.into());
        }
    };

    if path.exists() {
        output.kv("File", &path.display().to_string());
    } else {
        output.kv("File", &format!("{} (not found, using defaults)", path.display()));
    }

    output.subheader("Server");
    output.kv("Address", &config.bind_address());
    output.kv("Log level", &config.server.log_level);

    output.subheader("Reminders");
    output.kv("Quran API", &config.reminders.quran_api_base);
    output.kv("Hadith API", &config.reminders.hadith_api_base);
    output.kv(
        "Hadith key",
        if config.reminders.hadith_api_key().is_some() {
            "set"
        } else {
            "not set"
        },
    );
    output.kv("Max attempts", &config.reminders.max_attempts.to_string());
    output.kv("Backoff", &format!("{} ms x attempt", config.reminders.backoff_ms));

    output.subheader("Chat");
    match config.chat.backend {
        ChatBackendKind::Proxy => output.kv("Backend", &config.chat.resolved_backend_url()),
        ChatBackendKind::Mock => output.kv("Backend", "mock"),
    }

    output.subheader("Bookmarks");
    match config.bookmarks.storage {
        StorageKind::File => output.kv("Storage", &config.bookmarks.path.display().to_string()),
        StorageKind::Memory => output.kv("Storage", "memory"),
    }

    if validate {
        output.subheader("Validation");
        let warnings = config.validate_with_warnings()?;
        for warning in &warnings {
            output.warning(&warning.to_string());
        }
        output.success("Configuration is valid");
    }

    output.newline();
    Ok(())
}
