//! Mock implementations for testing.
//!
//! Transports, chat backends and response bodies shared by the integration
//! tests. Include with `#[path = "common/mocks.rs"] mod mocks;`.

#![allow(dead_code)]

use async_trait::async_trait;
use baseera::chat::ChatBackend;
use baseera::reminders::{
    Backoff, FetchError, FetchRequest, HttpResponse, HttpTransport, ReminderEndpoints,
    ReminderSelector, ReqwestTransport, RetryPolicy, RetryingFetcher,
};
use baseera::types::{AppError, ChatResponse, Reference, ReminderType, Result};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Transport that fails a fixed number of times before answering.
///
/// Every request is recorded so tests can inspect URLs and headers.
pub struct ScriptedTransport {
    failures_left: AtomicU32,
    response: HttpResponse,
    calls: Mutex<Vec<FetchRequest>>,
}

impl ScriptedTransport {
    /// Fail `failures` times with a transport error, then answer 200 with `body`
    pub fn failing_then(failures: u32, body: impl Into<String>) -> Self {
        Self {
            failures_left: AtomicU32::new(failures),
            response: HttpResponse::ok(body),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with `body`
    pub fn answering(body: impl Into<String>) -> Self {
        Self::failing_then(0, body)
    }

    /// Never succeed
    pub fn always_failing() -> Self {
        Self::failing_then(u32::MAX, "")
    }

    pub fn calls(&self) -> Vec<FetchRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, request: FetchRequest) -> std::result::Result<HttpResponse, FetchError> {
        self.calls.lock().push(request.clone());

        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(FetchError::Transport {
                url: request.url,
                message: "connection refused".to_string(),
            });
        }

        Ok(self.response.clone())
    }
}

/// Chat backend with a fixed answer, or a fixed failure
pub struct StaticChatBackend {
    response: Option<ChatResponse>,
}

impl StaticChatBackend {
    pub fn answering(answer: &str) -> Self {
        Self {
            response: Some(ChatResponse {
                answer: answer.to_string(),
                references: vec![Reference {
                    kind: ReminderType::Hadith,
                    citation: "Sahih al-Bukhari 1".to_string(),
                    arabic: String::new(),
                    english: "Actions are judged by intentions.".to_string(),
                }],
            }),
        }
    }

    pub fn failing() -> Self {
        Self { response: None }
    }
}

#[async_trait]
impl ChatBackend for StaticChatBackend {
    async fn ask(&self, _question: &str) -> Result<ChatResponse> {
        self.response
            .clone()
            .ok_or_else(|| AppError::Network("backend unreachable".to_string()))
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// alquran.cloud body for one ayah in two editions
pub fn quran_body(surah: u32, verse: u32, arabic: &str, english: &str) -> Value {
    json!({
        "code": 200,
        "status": "OK",
        "data": [
            {
                "number": 6221,
                "text": arabic,
                "edition": { "identifier": "quran-uthmani" },
                "surah": { "number": surah, "englishName": "Ash-Sharh" },
                "numberInSurah": verse
            },
            {
                "number": 6221,
                "text": english,
                "edition": { "identifier": "en.asad" },
                "surah": { "number": surah, "englishName": "Ash-Sharh" },
                "numberInSurah": verse
            }
        ]
    })
}

/// hadithapi.com body in its paginated shape
pub fn hadith_body(number: &str, arabic: &str, english: &str) -> Value {
    json!({
        "status": 200,
        "message": "Hadiths has been found.",
        "hadiths": {
            "current_page": 1,
            "data": [
                {
                    "id": 1,
                    "hadithNumber": number,
                    "hadithArabic": arabic,
                    "hadithEnglish": english,
                    "book": { "bookName": "Sahih Bukhari", "bookSlug": "sahih-bukhari" },
                    "status": "Sahih"
                }
            ]
        }
    })
}

/// Endpoints rooted at a mock server: `/v1` for the Quran API, `/api` for hadith
pub fn endpoints_at(base_url: &str, hadith_key: Option<&str>, max_attempts: u32) -> ReminderEndpoints {
    ReminderEndpoints {
        quran_api_base: format!("{}/v1", base_url),
        arabic_edition: "quran-uthmani".to_string(),
        english_edition: "en.asad".to_string(),
        hadith_api_base: format!("{}/api", base_url),
        hadith_api_key_env: "HADITH_API_KEY".to_string(),
        hadith_api_key: hadith_key.map(String::from),
        max_attempts,
        backoff: None,
        request_timeout: None,
    }
}

/// Real reqwest-backed selector without backoff delays
pub fn http_selector(base_url: &str, hadith_key: Option<&str>, max_attempts: u32) -> ReminderSelector {
    let transport: Arc<dyn HttpTransport> = Arc::new(
        ReqwestTransport::new(Duration::from_secs(5)).expect("Failed to build transport"),
    );
    let fetcher = RetryingFetcher::new(transport, RetryPolicy::new(max_attempts, Backoff::None));
    ReminderSelector::with_seed(fetcher, endpoints_at(base_url, hadith_key, max_attempts), 7)
}

/// Selector over an in-process transport
pub fn scripted_selector(
    transport: Arc<ScriptedTransport>,
    hadith_key: Option<&str>,
    max_attempts: u32,
) -> ReminderSelector {
    let fetcher = RetryingFetcher::new(transport, RetryPolicy::new(max_attempts, Backoff::None));
    ReminderSelector::with_seed(
        fetcher,
        endpoints_at("http://reminders.test", hadith_key, max_attempts),
        7,
    )
}
