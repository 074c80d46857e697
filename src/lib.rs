//! # Baseera - Islamic reminders and Q&A
//!
//! A small service that serves random Quran verses and hadith with retry and
//! fallback, estimates the Hijri date, keeps bookmarked reminders, and forwards
//! questions to an answering backend.
//!
//! ## Overview
//!
//! Baseera can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `baseera` binary
//! 2. **As a library** - Import components into your own Rust project
//!
//! ### Fetching a reminder
//!
//! ```rust,ignore
//! use baseera::{BaseeraConfig, ReminderSelector};
//!
//! let config = BaseeraConfig::default();
//! let selector = ReminderSelector::from_config(&config.reminders)?;
//! let reminder = selector.daily_reminder().await;
//! println!("{} ({})", reminder.english, reminder.source);
//! ```
//!
//! ### Estimating the Hijri date
//!
//! ```rust
//! use baseera::calendar::IslamicDateInfo;
//! use chrono::NaiveDate;
//!
//! let info = IslamicDateInfo::for_date(NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());
//! println!("{}", info.hijri);
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`bookmarks`] - Persistent bookmark list
//! - [`calendar`] - Hijri estimation and historical events
//! - [`chat`] - Question answering backends
//! - [`reminders`] - Remote Quran/Hadith reminders with retry and fallback
//! - [`types`] - Common types and error handling
//!
//! ## Configuration
//!
//! Everything is configured from `baseera.toml`, which is hot-reloaded while
//! the server runs. Secrets such as the hadith API key are read from the
//! environment (and `.env`).

#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Bookmarked reminders over a key-value store.
pub mod bookmarks;
/// Approximate Hijri calendar and historical events.
pub mod calendar;
/// Chat backends and the question-answering service.
pub mod chat;
/// Command-line interface.
pub mod cli;
/// Quran and Hadith reminders.
pub mod reminders;
/// Core types (reminders, chat payloads, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use bookmarks::BookmarkStore;
pub use chat::{ChatBackend, ChatService};
pub use reminders::{ReminderSelector, RetryPolicy};
pub use types::{AppError, Reminder, ReminderType, Result};
pub use utils::toml_config::{BaseeraConfig, BaseeraConfigManager};

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// TOML configuration with hot-reload support
    pub config_manager: Arc<BaseeraConfigManager>,
    /// Random reminder selection with retry and fallback
    pub reminders: Arc<ReminderSelector>,
    /// Bookmarked reminders
    pub bookmarks: Arc<BookmarkStore>,
    /// Question answering
    pub chat: Arc<ChatService>,
}

impl AppState {
    /// Build every service from the manager's current configuration
    pub fn from_config_manager(config_manager: Arc<BaseeraConfigManager>) -> Result<Self> {
        let config = config_manager.config();

        Ok(Self {
            reminders: Arc::new(ReminderSelector::from_config(&config.reminders)?),
            bookmarks: Arc::new(BookmarkStore::from_config(&config.bookmarks)),
            chat: Arc::new(ChatService::from_config(&config.chat)?),
            config_manager,
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config_manager.path())
            .field("reminders", &self.reminders)
            .field("bookmarks", &self.bookmarks)
            .field("chat", &self.chat)
            .finish()
    }
}
