//! Bookmarked reminders
//!
//! Bookmarks are an ordered list of [`Reminder`]s stored as JSON under a single
//! key of an injected [`KeyValueStore`]. A reminder's `source` is its identity:
//! adding a second reminder with the same source is a no-op.

pub mod storage;

pub use storage::{FileStore, KeyValueStore, MemoryStore};

use crate::types::{AppError, Reminder, Result};
use crate::utils::toml_config::{BookmarksConfig, StorageKind};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

/// Storage key holding the JSON-encoded bookmark list
pub const BOOKMARKS_KEY: &str = "bookmarkedReminders";

/// Ordered, source-deduplicated list of bookmarked reminders
pub struct BookmarkStore {
    store: Arc<dyn KeyValueStore>,
    // Serializes read-modify-write cycles on the list
    write_lock: Mutex<()>,
}

impl BookmarkStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn from_config(config: &BookmarksConfig) -> Self {
        match config.storage {
            StorageKind::File => {
                info!(path = ?config.path, "Using file bookmark storage");
                Self::new(Arc::new(FileStore::new(&config.path)))
            }
            StorageKind::Memory => {
                info!("Using in-memory bookmark storage");
                Self::in_memory()
            }
        }
    }

    /// All bookmarks in insertion order. A missing key reads as empty.
    pub fn list(&self) -> Result<Vec<Reminder>> {
        match self.store.get(BOOKMARKS_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::Storage(format!("Stored bookmarks are not a reminder list: {}", e))
            }),
        }
    }

    pub fn is_bookmarked(&self, source: &str) -> Result<bool> {
        Ok(self.list()?.iter().any(|r| r.source == source))
    }

    /// Append a bookmark. Returns `false` if its source was already bookmarked.
    pub fn add(&self, reminder: Reminder) -> Result<bool> {
        let _guard = self.write_lock.lock();
        let mut bookmarks = self.list()?;

        if bookmarks.iter().any(|r| r.source == reminder.source) {
            return Ok(false);
        }

        debug!(source = %reminder.source, "Adding bookmark");
        bookmarks.push(reminder);
        self.save(&bookmarks)?;
        Ok(true)
    }

    /// Remove every bookmark with this source. Returns whether anything was removed.
    pub fn remove(&self, source: &str) -> Result<bool> {
        let _guard = self.write_lock.lock();
        let mut bookmarks = self.list()?;
        let before = bookmarks.len();
        bookmarks.retain(|r| r.source != source);

        if bookmarks.len() == before {
            return Ok(false);
        }

        debug!(source, "Removing bookmark");
        self.save(&bookmarks)?;
        Ok(true)
    }

    /// Add if absent, remove if present. Returns whether it is bookmarked afterwards.
    pub fn toggle(&self, reminder: Reminder) -> Result<bool> {
        let _guard = self.write_lock.lock();
        let mut bookmarks = self.list()?;

        let bookmarked = if bookmarks.iter().any(|r| r.source == reminder.source) {
            bookmarks.retain(|r| r.source != reminder.source);
            false
        } else {
            bookmarks.push(reminder);
            true
        };

        self.save(&bookmarks)?;
        Ok(bookmarked)
    }

    pub fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.store.remove(BOOKMARKS_KEY)
    }

    fn save(&self, bookmarks: &[Reminder]) -> Result<()> {
        let raw = serde_json::to_string(bookmarks).map_err(|e| AppError::Storage(e.to_string()))?;
        self.store.set(BOOKMARKS_KEY, &raw)
    }
}

impl std::fmt::Debug for BookmarkStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookmarkStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReminderType;

    fn reminder(source: &str) -> Reminder {
        Reminder::new("عربي", "english", source, ReminderType::Quran)
    }

    #[test]
    fn test_add_list_remove() {
        let bookmarks = BookmarkStore::in_memory();
        assert!(bookmarks.list().unwrap().is_empty());

        assert!(bookmarks.add(reminder("Quran 1:1")).unwrap());
        assert!(bookmarks.add(reminder("Quran 2:255")).unwrap());

        let sources: Vec<_> = bookmarks.list().unwrap().into_iter().map(|r| r.source).collect();
        assert_eq!(sources, vec!["Quran 1:1", "Quran 2:255"]);

        assert!(bookmarks.remove("Quran 1:1").unwrap());
        assert!(!bookmarks.remove("Quran 1:1").unwrap());
        assert_eq!(bookmarks.list().unwrap().len(), 1);
    }

    #[test]
    fn test_add_same_source_twice_is_noop() {
        let bookmarks = BookmarkStore::in_memory();
        assert!(bookmarks.add(reminder("Quran 94:5")).unwrap());
        assert!(!bookmarks.add(reminder("Quran 94:5")).unwrap());
        assert_eq!(bookmarks.list().unwrap().len(), 1);
    }

    #[test]
    fn test_toggle() {
        let bookmarks = BookmarkStore::in_memory();
        assert!(bookmarks.toggle(reminder("Sahih Muslim 1")).unwrap());
        assert!(bookmarks.is_bookmarked("Sahih Muslim 1").unwrap());
        assert!(!bookmarks.toggle(reminder("Sahih Muslim 1")).unwrap());
        assert!(!bookmarks.is_bookmarked("Sahih Muslim 1").unwrap());
    }

    #[test]
    fn test_clear() {
        let bookmarks = BookmarkStore::in_memory();
        bookmarks.add(reminder("a")).unwrap();
        bookmarks.clear().unwrap();
        assert!(bookmarks.list().unwrap().is_empty());
    }

    #[test]
    fn test_stored_under_expected_key() {
        let store = Arc::new(MemoryStore::new());
        let bookmarks = BookmarkStore::new(store.clone());
        bookmarks.add(Reminder::fallback()).unwrap();

        let raw = store.get(BOOKMARKS_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[0]["source"], "Quran 94:5");
        assert_eq!(json[0]["type"], "quran");
    }

    #[test]
    fn test_undecodable_value_is_storage_error() {
        let store = Arc::new(MemoryStore::new());
        store.set(BOOKMARKS_KEY, "{\"not\": \"a list\"}").unwrap();

        let bookmarks = BookmarkStore::new(store);
        assert!(matches!(bookmarks.list(), Err(AppError::Storage(_))));
        assert!(bookmarks.add(reminder("x")).is_err());
    }

    #[test]
    fn test_concurrent_adds_do_not_duplicate() {
        let bookmarks = Arc::new(BookmarkStore::in_memory());

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let bookmarks = Arc::clone(&bookmarks);
                scope.spawn(move || {
                    for i in 0..20 {
                        bookmarks.add(reminder(&format!("Quran 1:{}", i))).unwrap();
                    }
                });
            }
        });

        assert_eq!(bookmarks.list().unwrap().len(), 20);
    }

    #[test]
    fn test_file_backed_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = BookmarksConfig {
            storage: StorageKind::File,
            path: dir.path().join("bookmarks.json"),
        };

        BookmarkStore::from_config(&config).add(Reminder::fallback()).unwrap();
        let reopened = BookmarkStore::from_config(&config);
        assert!(reopened.is_bookmarked("Quran 94:5").unwrap());
    }
}
