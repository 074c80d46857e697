//! Approximate Hijri date arithmetic
//!
//! Dates are derived from a fixed anchor pair and a simplified lunar table in
//! which months alternate between 30 and 29 days (354 days per year). The
//! result can drift a day or two from moon-sighting calendars.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Gregorian side of the anchor pair (3 February 2024)
const ANCHOR_GREGORIAN: (i32, u32, u32) = (2024, 2, 3);

/// Hijri side of the anchor pair (22 Rajab 1445)
const ANCHOR_DAY: i64 = 22;
const ANCHOR_MONTH: HijriMonth = HijriMonth::Rajab;
const ANCHOR_YEAR: i32 = 1445;

/// The twelve months of the Hijri calendar, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum HijriMonth {
    #[serde(rename = "Muharram")]
    Muharram,
    #[serde(rename = "Safar")]
    Safar,
    #[serde(rename = "Rabi al-Awwal")]
    RabiAlAwwal,
    #[serde(rename = "Rabi al-Thani")]
    RabiAlThani,
    #[serde(rename = "Jumada al-Awwal")]
    JumadaAlAwwal,
    #[serde(rename = "Jumada al-Thani")]
    JumadaAlThani,
    #[serde(rename = "Rajab")]
    Rajab,
    #[serde(rename = "Sha'ban")]
    Shaban,
    #[serde(rename = "Ramadan")]
    Ramadan,
    #[serde(rename = "Shawwal")]
    Shawwal,
    #[serde(rename = "Dhu al-Qi'dah")]
    DhuAlQidah,
    #[serde(rename = "Dhu al-Hijjah")]
    DhuAlHijjah,
}

impl HijriMonth {
    pub const ALL: [HijriMonth; 12] = [
        HijriMonth::Muharram,
        HijriMonth::Safar,
        HijriMonth::RabiAlAwwal,
        HijriMonth::RabiAlThani,
        HijriMonth::JumadaAlAwwal,
        HijriMonth::JumadaAlThani,
        HijriMonth::Rajab,
        HijriMonth::Shaban,
        HijriMonth::Ramadan,
        HijriMonth::Shawwal,
        HijriMonth::DhuAlQidah,
        HijriMonth::DhuAlHijjah,
    ];

    /// Zero-based position in the year (Muharram = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Month at a zero-based index, wrapping modulo 12
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    /// 1-based month number (Muharram = 1)
    pub fn number(self) -> u32 {
        self.index() as u32 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            HijriMonth::Muharram => "Muharram",
            HijriMonth::Safar => "Safar",
            HijriMonth::RabiAlAwwal => "Rabi al-Awwal",
            HijriMonth::RabiAlThani => "Rabi al-Thani",
            HijriMonth::JumadaAlAwwal => "Jumada al-Awwal",
            HijriMonth::JumadaAlThani => "Jumada al-Thani",
            HijriMonth::Rajab => "Rajab",
            HijriMonth::Shaban => "Sha'ban",
            HijriMonth::Ramadan => "Ramadan",
            HijriMonth::Shawwal => "Shawwal",
            HijriMonth::DhuAlQidah => "Dhu al-Qi'dah",
            HijriMonth::DhuAlHijjah => "Dhu al-Hijjah",
        }
    }

    /// Month length in the simplified table: 30 for even indices, 29 for odd
    pub fn days(self) -> u32 {
        if self.index() % 2 == 0 { 30 } else { 29 }
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Self {
        Self::from_index(self.index() + 11)
    }
}

impl std::fmt::Display for HijriMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An approximate Hijri calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HijriDate {
    pub day: u32,
    pub month: HijriMonth,
    pub year: i32,
}

impl HijriDate {
    /// The Gregorian date the estimator is anchored to
    pub fn anchor_gregorian() -> NaiveDate {
        let (y, m, d) = ANCHOR_GREGORIAN;
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    /// Estimate the Hijri date for a Gregorian calendar date
    pub fn from_gregorian(date: NaiveDate) -> Self {
        let offset = (date - Self::anchor_gregorian()).num_days();

        let mut day = ANCHOR_DAY + offset;
        let mut month = ANCHOR_MONTH;
        let mut year = ANCHOR_YEAR;

        // Whole years first so distant dates don't walk month by month
        let year_len: i64 = HijriMonth::ALL.iter().map(|m| m.days() as i64).sum();
        let whole_years = (day - 1).div_euclid(year_len);
        day -= whole_years * year_len;
        year += whole_years as i32;

        while day > month.days() as i64 {
            day -= month.days() as i64;
            if month == HijriMonth::DhuAlHijjah {
                year += 1;
            }
            month = month.next();
        }

        while day < 1 {
            if month == HijriMonth::Muharram {
                year -= 1;
            }
            month = month.previous();
            day += month.days() as i64;
        }

        Self {
            day: day as u32,
            month,
            year,
        }
    }

    /// Estimate for the current UTC date
    pub fn today() -> Self {
        Self::from_gregorian(Utc::now().date_naive())
    }

    /// Key used for the historical event table, e.g. `"27 Rajab"`
    pub fn event_key(&self) -> String {
        format!("{} {}", self.day, self.month.name())
    }
}

impl std::fmt::Display for HijriDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} AH", self.day, self.month.name(), self.year)
    }
}
