//! Quran and Hadith reminders
//!
//! - [`retry`]: reusable retry policy with backoff
//! - [`transport`]: HTTP transport trait and the retrying fetcher
//! - [`sources`]: API response shapes and normalization
//! - [`selector`]: random selection with fallback
//! - [`offline`]: built-in reminders rotated by date

pub mod offline;
pub mod retry;
pub mod selector;
pub mod sources;
pub mod transport;

pub use retry::{Backoff, RetryPolicy};
pub use selector::{ReminderEndpoints, ReminderPick, ReminderSelector};
pub use sources::HadithCollection;
pub use transport::{
    FetchError, FetchRequest, HttpResponse, HttpTransport, ReqwestTransport, RetryingFetcher,
};

use crate::types::AppError;

/// Why a reminder could not be produced
#[derive(Debug, thiserror::Error)]
pub enum ReminderError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Hadith API key is not set (expected in ${0})")]
    MissingCredential(String),
}

impl From<serde_json::Error> for ReminderError {
    fn from(err: serde_json::Error) -> Self {
        ReminderError::Malformed(err.to_string())
    }
}

impl From<ReminderError> for AppError {
    fn from(err: ReminderError) -> Self {
        match err {
            ReminderError::Fetch(e) => e.into(),
            ReminderError::Malformed(msg) => AppError::InvalidResponse(msg),
            ReminderError::MissingCredential(var) => {
                AppError::Config(format!("Environment variable '{}' is not set", var))
            }
        }
    }
}
