//! Random reminder selection with fallback
//!
//! The selector flips a coin between the Quran and Hadith sources, fetches
//! through the [`RetryingFetcher`], and normalizes the result into a
//! [`Reminder`]. Any failure is logged and replaced by [`Reminder::fallback`].

use super::ReminderError;
use super::retry::{Backoff, RetryPolicy};
use super::sources::{HadithCollection, HadithResponse, QuranResponse};
use super::transport::{FetchRequest, HttpTransport, ReqwestTransport, RetryingFetcher};
use crate::types::{Reminder, ReminderType, Result};
use crate::utils::toml_config::RemindersConfig;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Number of ayahs in the Quran
pub const AYAH_COUNT: u32 = 6236;

/// Upper bound of the hadith numbers drawn at random
pub const HADITH_NUMBER_MAX: u32 = 7500;

/// What to fetch: a specific ayah, or a hadith from a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderPick {
    Quran { ayah: u32 },
    Hadith { collection: HadithCollection, number: u32 },
}

impl ReminderPick {
    /// Fair coin between Quran and Hadith, then a uniform index within the source
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            ReminderPick::Quran {
                ayah: rng.random_range(1..=AYAH_COUNT),
            }
        } else {
            let collection = HadithCollection::ALL[rng.random_range(0..HadithCollection::ALL.len())];
            ReminderPick::Hadith {
                collection,
                number: rng.random_range(1..=HADITH_NUMBER_MAX),
            }
        }
    }

    pub fn kind(&self) -> ReminderType {
        match self {
            ReminderPick::Quran { .. } => ReminderType::Quran,
            ReminderPick::Hadith { .. } => ReminderType::Hadith,
        }
    }
}

/// Where reminders are fetched from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderEndpoints {
    pub quran_api_base: String,
    pub arabic_edition: String,
    pub english_edition: String,
    pub hadith_api_base: String,
    /// Name of the variable the key was read from, for error messages
    pub hadith_api_key_env: String,
    pub hadith_api_key: Option<String>,
    pub max_attempts: u32,
    /// `None` keeps the fetcher's own backoff
    pub backoff: Option<Backoff>,
    /// `None` keeps the transport's default timeout
    pub request_timeout: Option<Duration>,
}

impl ReminderEndpoints {
    /// Resolve endpoints from config, reading the hadith key from the environment
    pub fn from_config(config: &RemindersConfig) -> Self {
        Self {
            quran_api_base: config.quran_api_base.trim_end_matches('/').to_string(),
            arabic_edition: config.arabic_edition.clone(),
            english_edition: config.english_edition.clone(),
            hadith_api_base: config.hadith_api_base.trim_end_matches('/').to_string(),
            hadith_api_key_env: config.hadith_api_key_env.clone(),
            hadith_api_key: config.hadith_api_key(),
            max_attempts: config.max_attempts,
            backoff: Some(Backoff::Linear(config.backoff())),
            request_timeout: Some(config.request_timeout()),
        }
    }

    fn with_timeout(&self, request: FetchRequest) -> FetchRequest {
        match self.request_timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    pub fn quran_request(&self, ayah: u32) -> FetchRequest {
        self.with_timeout(FetchRequest::new(format!(
            "{}/ayah/{}/editions/{},{}",
            self.quran_api_base, ayah, self.arabic_edition, self.english_edition
        )))
    }

    pub fn hadith_request(
        &self,
        collection: HadithCollection,
        number: u32,
    ) -> std::result::Result<FetchRequest, ReminderError> {
        let key = self
            .hadith_api_key
            .as_deref()
            .ok_or_else(|| ReminderError::MissingCredential(self.hadith_api_key_env.clone()))?;

        Ok(self.with_timeout(
            FetchRequest::new(format!(
                "{}/hadiths?hadithNumber={}&book={}&status=sahih",
                self.hadith_api_base,
                number,
                collection.slug()
            ))
            .header("apiKey", key),
        ))
    }
}

impl Default for ReminderEndpoints {
    fn default() -> Self {
        Self::from_config(&RemindersConfig::default())
    }
}

/// Picks and fetches reminders. Safe to share across tasks.
pub struct ReminderSelector {
    fetcher: RetryingFetcher,
    endpoints: ArcSwap<ReminderEndpoints>,
    rng: Mutex<StdRng>,
}

impl ReminderSelector {
    pub fn new(fetcher: RetryingFetcher, endpoints: ReminderEndpoints) -> Self {
        Self {
            fetcher,
            endpoints: ArcSwap::from_pointee(endpoints),
            rng: Mutex::new(StdRng::from_rng(&mut rand::rng())),
        }
    }

    /// Selector with a deterministic pick sequence
    pub fn with_seed(fetcher: RetryingFetcher, endpoints: ReminderEndpoints, seed: u64) -> Self {
        Self {
            fetcher,
            endpoints: ArcSwap::from_pointee(endpoints),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Production selector: reqwest transport with linear backoff from config
    pub fn from_config(config: &RemindersConfig) -> Result<Self> {
        let transport: Arc<dyn HttpTransport> =
            Arc::new(ReqwestTransport::new(config.request_timeout())?);
        let policy = RetryPolicy::new(config.max_attempts, Backoff::Linear(config.backoff()));
        Ok(Self::new(
            RetryingFetcher::new(transport, policy),
            ReminderEndpoints::from_config(config),
        ))
    }

    pub fn endpoints(&self) -> Arc<ReminderEndpoints> {
        self.endpoints.load_full()
    }

    /// Swap in new endpoints, e.g. after a config reload
    pub fn set_endpoints(&self, endpoints: ReminderEndpoints) {
        if *self.endpoints.load_full() != endpoints {
            debug!("Reminder endpoints updated");
            self.endpoints.store(Arc::new(endpoints));
        }
    }

    /// Draw the next pick. The RNG lock is held only for the draw.
    pub fn pick(&self) -> ReminderPick {
        ReminderPick::random(&mut *self.rng.lock())
    }

    /// A random reminder; never fails
    pub async fn daily_reminder(&self) -> Reminder {
        let pick = self.pick();
        self.reminder_for(pick).await
    }

    /// Fetch the given pick, substituting the fallback on any failure
    pub async fn reminder_for(&self, pick: ReminderPick) -> Reminder {
        match self.try_fetch(pick).await {
            Ok(reminder) => reminder,
            Err(e) => {
                warn!(?pick, error = %e, "Reminder fetch failed, using fallback");
                Reminder::fallback()
            }
        }
    }

    /// Fetch the given pick, returning the failure instead of the fallback
    pub async fn try_fetch(&self, pick: ReminderPick) -> std::result::Result<Reminder, ReminderError> {
        let endpoints = self.endpoints();

        match pick {
            ReminderPick::Quran { ayah } => {
                let request = endpoints.quran_request(ayah);
                let response = self
                    .fetcher
                    .fetch_with(&request, endpoints.max_attempts, endpoints.backoff)
                    .await?;
                response.json::<QuranResponse>()?.into_reminder()
            }
            ReminderPick::Hadith { collection, number } => {
                let request = endpoints.hadith_request(collection, number)?;
                let response = self
                    .fetcher
                    .fetch_with(&request, endpoints.max_attempts, endpoints.backoff)
                    .await?;
                response.json::<HadithResponse>()?.into_reminder(collection)
            }
        }
    }
}

impl std::fmt::Debug for ReminderSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReminderSelector")
            .field("fetcher", &self.fetcher)
            .field("endpoints", &self.endpoints())
            .finish_non_exhaustive()
    }
}
