//! Historically significant days of the Hijri year

use super::hijri::{HijriDate, HijriMonth};
use serde::Serialize;

/// A named event that falls on a fixed Hijri day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoricalEvent {
    pub title: &'static str,
    pub description: &'static str,
}

const EVENTS: &[(u32, HijriMonth, HistoricalEvent)] = &[
    (
        1,
        HijriMonth::Muharram,
        HistoricalEvent {
            title: "Islamic New Year",
            description: "The beginning of the Islamic calendar, marking the Hijra of Prophet Muhammad ﷺ",
        },
    ),
    (
        10,
        HijriMonth::Muharram,
        HistoricalEvent {
            title: "Day of Ashura",
            description: "A blessed day when Allah saved Prophet Musa (AS) and his followers",
        },
    ),
    (
        12,
        HijriMonth::RabiAlAwwal,
        HistoricalEvent {
            title: "Birth of Prophet Muhammad ﷺ",
            description: "The blessed day when our beloved Prophet ﷺ was born",
        },
    ),
    (
        27,
        HijriMonth::Rajab,
        HistoricalEvent {
            title: "Night Journey",
            description: "Al-Isra' wal-Mi'raj - The miraculous night journey of Prophet Muhammad ﷺ",
        },
    ),
    (
        1,
        HijriMonth::Ramadan,
        HistoricalEvent {
            title: "Beginning of Ramadan",
            description: "The start of the blessed month of fasting and increased worship",
        },
    ),
    (
        27,
        HijriMonth::Ramadan,
        HistoricalEvent {
            title: "Laylat al-Qadr",
            description: "The Night of Power, better than a thousand months",
        },
    ),
];

/// Look up an event by its `"<day> <month>"` key, e.g. `"10 Muharram"`
pub fn lookup(key: &str) -> Option<HistoricalEvent> {
    EVENTS
        .iter()
        .find(|(day, month, _)| format!("{} {}", day, month.name()) == key)
        .map(|(_, _, event)| *event)
}

/// All events in calendar order
pub fn all() -> impl Iterator<Item = (u32, HijriMonth, HistoricalEvent)> {
    EVENTS.iter().copied()
}

impl HijriDate {
    /// The historical event falling on this date, if any
    pub fn event(&self) -> Option<HistoricalEvent> {
        lookup(&self.event_key())
    }
}
