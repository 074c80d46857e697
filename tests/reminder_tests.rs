//! Reminder fetching integration tests
//!
//! Uses wiremock to stand in for the Quran and Hadith APIs and validates:
//! - Response normalization into reminders
//! - Retry on failed attempts and the fallback after exhaustion
//! - The hadith API key header and the missing-key path

#[path = "common/mocks.rs"]
mod mocks;

use baseera::reminders::{
    FetchError, HadithCollection, ReminderError, ReminderPick, offline,
};
use baseera::types::{Reminder, ReminderType};
use mocks::{ScriptedTransport, hadith_body, http_selector, quran_body, scripted_selector};
use std::sync::Arc;
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EASE_AR: &str = "إِنَّ مَعَ الْعُسْرِ يُسْرًا";
const EASE_EN: &str = "Behold, with every hardship comes ease.";

// ============= Quran =============

#[tokio::test]
async fn test_quran_reminder_from_api() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/ayah/6221/editions/quran-uthmani,en.asad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quran_body(94, 6, EASE_AR, EASE_EN)))
        .expect(1)
        .mount(&server)
        .await;

    let selector = http_selector(&server.uri(), None, 3);
    let reminder = selector
        .try_fetch(ReminderPick::Quran { ayah: 6221 })
        .await
        .expect("Quran fetch should succeed");

    assert_eq!(reminder.source, "Quran 94:6");
    assert_eq!(reminder.kind, ReminderType::Quran);
    assert_eq!(reminder.arabic, EASE_AR);
    assert_eq!(reminder.english, EASE_EN);
}

#[tokio::test]
async fn test_quran_retries_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/v1/ayah/\d+/editions/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/v1/ayah/\d+/editions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quran_body(2, 286, "ar", "en")))
        .expect(1)
        .mount(&server)
        .await;

    let selector = http_selector(&server.uri(), None, 3);
    let reminder = selector
        .reminder_for(ReminderPick::Quran { ayah: 293 })
        .await;

    assert_eq!(reminder.source, "Quran 2:286");
}

#[tokio::test]
async fn test_exhausted_retries_fall_back() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(6)
        .mount(&server)
        .await;

    let selector = http_selector(&server.uri(), None, 3);

    let err = selector
        .try_fetch(ReminderPick::Quran { ayah: 1 })
        .await
        .expect_err("every attempt fails");
    assert!(matches!(
        err,
        ReminderError::Fetch(FetchError::Status { status: 500, .. })
    ));

    let reminder = selector.reminder_for(ReminderPick::Quran { ayah: 1 }).await;
    assert_eq!(reminder, Reminder::fallback());
}

#[tokio::test]
async fn test_malformed_body_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "data": [{ "text": "only one edition", "surah": { "number": 1 }, "numberInSurah": 1 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let selector = http_selector(&server.uri(), None, 3);
    let err = selector
        .try_fetch(ReminderPick::Quran { ayah: 1 })
        .await
        .expect_err("a single edition is malformed");

    assert!(matches!(err, ReminderError::Malformed(_)));
}

// ============= Hadith =============

#[tokio::test]
async fn test_hadith_reminder_sends_key_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/hadiths"))
        .and(query_param("hadithNumber", "42"))
        .and(query_param("book", "sahih-muslim"))
        .and(query_param("status", "sahih"))
        .and(header("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hadith_body(
            "42",
            "الطهور شطر الإيمان",
            "Purity is half of faith.",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let selector = http_selector(&server.uri(), Some("test-key"), 3);
    let reminder = selector
        .try_fetch(ReminderPick::Hadith {
            collection: HadithCollection::SahihMuslim,
            number: 42,
        })
        .await
        .expect("Hadith fetch should succeed");

    assert_eq!(reminder.source, "Sahih Muslim 42");
    assert_eq!(reminder.kind, ReminderType::Hadith);
    assert_eq!(reminder.english, "Purity is half of faith.");
}

#[tokio::test]
async fn test_hadith_flat_list_with_numeric_number() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/hadiths"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hadiths": [{
                "hadithNumber": 1,
                "hadithArabic": "إنما الأعمال بالنيات",
                "hadithEnglish": "Actions are judged by intentions.",
                "book": "sahih-bukhari"
            }]
        })))
        .mount(&server)
        .await;

    let selector = http_selector(&server.uri(), Some("test-key"), 3);
    let reminder = selector
        .try_fetch(ReminderPick::Hadith {
            collection: HadithCollection::SahihBukhari,
            number: 1,
        })
        .await
        .expect("Flat hadith list should be accepted");

    assert_eq!(reminder.source, "Sahih al-Bukhari 1");
}

#[tokio::test]
async fn test_hadith_without_key_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let selector = http_selector(&server.uri(), None, 3);
    let pick = ReminderPick::Hadith {
        collection: HadithCollection::SahihBukhari,
        number: 13,
    };

    let err = selector.try_fetch(pick).await.expect_err("key is missing");
    assert!(matches!(err, ReminderError::MissingCredential(ref var) if var == "HADITH_API_KEY"));

    assert_eq!(selector.reminder_for(pick).await, Reminder::fallback());
}

#[tokio::test]
async fn test_empty_hadith_list_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/hadiths"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "hadiths": { "data": [] } })),
        )
        .mount(&server)
        .await;

    let selector = http_selector(&server.uri(), Some("test-key"), 3);
    let reminder = selector
        .reminder_for(ReminderPick::Hadith {
            collection: HadithCollection::SahihMuslim,
            number: 7000,
        })
        .await;

    assert_eq!(reminder, Reminder::fallback());
}

// ============= Selector =============

#[tokio::test]
async fn test_transport_failures_are_retried() {
    let body = quran_body(94, 5, "ar", "en").to_string();
    let transport = Arc::new(ScriptedTransport::failing_then(2, body));
    let selector = scripted_selector(Arc::clone(&transport), None, 3);

    let reminder = selector.reminder_for(ReminderPick::Quran { ayah: 6220 }).await;

    assert_eq!(reminder.source, "Quran 94:5");
    assert_eq!(transport.call_count(), 3);
    assert!(
        transport
            .calls()
            .iter()
            .all(|req| req.url == "http://reminders.test/v1/ayah/6220/editions/quran-uthmani,en.asad")
    );
}

#[tokio::test]
async fn test_daily_reminder_never_fails() {
    let transport = Arc::new(ScriptedTransport::always_failing());
    let selector = scripted_selector(Arc::clone(&transport), Some("key"), 2);

    for _ in 0..10 {
        assert_eq!(selector.daily_reminder().await, Reminder::fallback());
    }

    // Each pick costs two attempts
    assert_eq!(transport.call_count(), 20);
}

#[tokio::test]
async fn test_endpoint_swap_redirects_requests() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quran_body(1, 1, "ar", "en")))
        .expect(0)
        .mount(&first)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quran_body(1, 2, "ar", "en")))
        .expect(1)
        .mount(&second)
        .await;

    let selector = http_selector(&first.uri(), None, 1);
    selector.set_endpoints(mocks::endpoints_at(&second.uri(), None, 1));

    let reminder = selector
        .try_fetch(ReminderPick::Quran { ayah: 2 })
        .await
        .expect("second server answers");
    assert_eq!(reminder.source, "Quran 1:2");
}

#[test]
fn test_offline_rotation_is_daily() {
    use chrono::NaiveDate;

    let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let sources: Vec<String> = (0..6)
        .map(|offset| {
            offline::reminder_for_date(day + chrono::Days::new(offset))
                .source
                .clone()
        })
        .collect();

    assert_eq!(&sources[..3], &sources[3..]);
    assert_eq!(sources[0], "Quran 94:5");
}
