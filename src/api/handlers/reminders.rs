use crate::{
    AppState,
    calendar::IslamicDateInfo,
    reminders::{ReminderEndpoints, offline},
    types::{AppError, Reminder, Result},
};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ReminderQuery {
    /// Serve a built-in reminder without touching the network
    #[serde(default)]
    pub offline: bool,
}

/// Get a random Quran verse or hadith
///
/// Always succeeds: failed fetches are replaced by the fallback reminder.
#[utoipa::path(
    get,
    path = "/api/reminder",
    params(
        ("offline" = Option<bool>, Query, description = "Use the built-in rotation instead of the remote APIs")
    ),
    responses(
        (status = 200, description = "A reminder", body = Reminder)
    ),
    tag = "reminders"
)]
pub async fn get_reminder(
    State(state): State<AppState>,
    Query(query): Query<ReminderQuery>,
) -> Json<Reminder> {
    if query.offline {
        return Json(offline::reminder_for_today());
    }

    // Pick up endpoint changes from a hot-reloaded config
    let config = state.config_manager.config();
    state
        .reminders
        .set_endpoints(ReminderEndpoints::from_config(&config.reminders));

    Json(state.reminders.daily_reminder().await)
}

#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    /// `YYYY-MM-DD`; defaults to today (UTC)
    pub date: Option<String>,
}

/// Estimate the Hijri date and the event of the day
#[utoipa::path(
    get,
    path = "/api/islamic-date",
    params(
        ("date" = Option<String>, Query, description = "Gregorian date as YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Hijri estimate with optional event"),
        (status = 400, description = "Invalid date")
    ),
    tag = "calendar"
)]
pub async fn get_islamic_date(Query(query): Query<DateQuery>) -> Result<Json<IslamicDateInfo>> {
    let info = match query.date.as_deref() {
        None => IslamicDateInfo::today(),
        Some(raw) => {
            let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                AppError::InvalidInput(format!("Invalid date '{}', expected YYYY-MM-DD", raw))
            })?;
            IslamicDateInfo::for_date(date)
        }
    };

    Ok(Json(info))
}
