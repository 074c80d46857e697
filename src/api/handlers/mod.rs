//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Bookmark list handlers.
pub mod bookmarks;
/// Chat forwarding handler.
pub mod chat;
/// Health check handler.
pub mod health;
/// Reminder and Hijri date handlers.
pub mod reminders;
