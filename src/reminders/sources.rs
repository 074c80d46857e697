//! Wire shapes of the Quran and Hadith APIs and their normalization into [`Reminder`]

use super::ReminderError;
use crate::types::{Reminder, ReminderType};
use serde::Deserialize;

// ============= Quran (alquran.cloud) =============

#[derive(Debug, Deserialize)]
pub struct QuranResponse {
    #[serde(default)]
    pub data: Vec<QuranEdition>,
}

/// One edition (translation or script) of the requested ayah
#[derive(Debug, Deserialize)]
pub struct QuranEdition {
    pub text: String,
    #[serde(default)]
    pub surah: Option<SurahRef>,
    #[serde(rename = "numberInSurah", default)]
    pub number_in_surah: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SurahRef {
    pub number: u32,
}

impl QuranResponse {
    /// First edition is the Arabic text, second the English translation
    pub fn into_reminder(self) -> Result<Reminder, ReminderError> {
        let mut editions = self.data.into_iter();
        let (Some(arabic), Some(english)) = (editions.next(), editions.next()) else {
            return Err(ReminderError::Malformed(
                "expected Arabic and English editions in `data`".into(),
            ));
        };

        let surah = arabic
            .surah
            .as_ref()
            .map(|s| s.number)
            .ok_or_else(|| ReminderError::Malformed("missing surah number".into()))?;
        let verse = arabic
            .number_in_surah
            .ok_or_else(|| ReminderError::Malformed("missing numberInSurah".into()))?;

        Ok(Reminder::new(
            arabic.text,
            english.text,
            format!("Quran {}:{}", surah, verse),
            ReminderType::Quran,
        ))
    }
}

// ============= Hadith (hadithapi.com) =============

/// Collections a random hadith is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HadithCollection {
    SahihBukhari,
    SahihMuslim,
}

impl HadithCollection {
    pub const ALL: [HadithCollection; 2] =
        [HadithCollection::SahihBukhari, HadithCollection::SahihMuslim];

    /// Identifier used in the `book` query parameter
    pub fn slug(self) -> &'static str {
        match self {
            HadithCollection::SahihBukhari => "sahih-bukhari",
            HadithCollection::SahihMuslim => "sahih-muslim",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HadithCollection::SahihBukhari => "Sahih al-Bukhari",
            HadithCollection::SahihMuslim => "Sahih Muslim",
        }
    }
}

impl std::fmt::Display for HadithCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Deserialize)]
pub struct HadithResponse {
    #[serde(default)]
    pub hadiths: Option<HadithList>,
}

/// The API has returned both a bare list and a paginated `{data: [...]}` object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HadithList {
    Flat(Vec<HadithEntry>),
    Paged { data: Vec<HadithEntry> },
}

impl HadithList {
    fn into_entries(self) -> Vec<HadithEntry> {
        match self {
            HadithList::Flat(entries) | HadithList::Paged { data: entries } => entries,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HadithEntry {
    #[serde(rename = "hadithArabic", default)]
    pub arabic: String,
    #[serde(rename = "hadithEnglish", default)]
    pub english: String,
    #[serde(rename = "hadithNumber")]
    pub number: HadithNumber,
}

/// `hadithNumber` arrives as either a JSON string or a number
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum HadithNumber {
    Text(String),
    Number(u64),
}

impl std::fmt::Display for HadithNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HadithNumber::Text(s) => f.write_str(s.trim()),
            HadithNumber::Number(n) => write!(f, "{}", n),
        }
    }
}

impl HadithResponse {
    pub fn into_reminder(self, collection: HadithCollection) -> Result<Reminder, ReminderError> {
        let entry = self
            .hadiths
            .map(HadithList::into_entries)
            .and_then(|entries| entries.into_iter().next())
            .ok_or_else(|| ReminderError::Malformed("no hadiths in response".into()))?;

        Ok(Reminder::new(
            entry.arabic,
            entry.english,
            format!("{} {}", collection.display_name(), entry.number),
            ReminderType::Hadith,
        ))
    }
}
