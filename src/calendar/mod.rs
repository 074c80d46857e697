//! Hijri calendar estimation
//!
//! Maps Gregorian dates onto an approximate Hijri date and flags days with
//! a known historical significance (Ashura, Laylat al-Qadr, ...).
//!
//! # Example
//!
//! ```rust
//! use baseera::calendar::{HijriDate, HijriMonth};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
//! let hijri = HijriDate::from_gregorian(date);
//! assert_eq!(hijri.month, HijriMonth::Ramadan);
//! assert_eq!(hijri.event().map(|e| e.title), Some("Beginning of Ramadan"));
//! ```

/// Historical event table.
pub mod events;
/// Hijri month table and date estimation.
pub mod hijri;

pub use events::HistoricalEvent;
pub use hijri::{HijriDate, HijriMonth};

use chrono::{NaiveDate, Utc};
use serde::Serialize;

/// Everything a date widget shows: the Hijri estimate, the Gregorian date
/// spelled out, and the event of the day if there is one.
#[derive(Debug, Clone, Serialize)]
pub struct IslamicDateInfo {
    pub hijri: HijriDate,
    /// e.g. `"Saturday, February 3, 2024"`
    pub gregorian: String,
    pub event: Option<HistoricalEvent>,
}

impl IslamicDateInfo {
    pub fn for_date(date: NaiveDate) -> Self {
        let hijri = HijriDate::from_gregorian(date);
        Self {
            hijri,
            gregorian: date.format("%A, %B %-d, %Y").to_string(),
            event: hijri.event(),
        }
    }

    pub fn today() -> Self {
        Self::for_date(Utc::now().date_naive())
    }
}
