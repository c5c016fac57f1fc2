//! API integration tests
//!
//! Run against a live server seeded with ledger data:
//! cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_revenue_range() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/revenue?start_date=2025-07-01&end_date=2025-07-31",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["period_start"], "2025-07-01");
    assert_eq!(body["period_end"], "2025-07-31");
    assert_eq!(body["calendar_days"], 31);
    assert!(body["daily_breakdown"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_revenue_rejects_bad_dates() {
    let client = Client::new();

    let response = client
        .get(format!("{}/revenue?start_date=July-1st", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_revenue_rejects_inverted_range() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/revenue?start_date=2025-08-10&end_date=2025-08-01",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_empty_range_is_flagged_not_an_error() {
    let client = Client::new();

    // Far enough in the past that no ledger rows exist.
    let response = client
        .get(format!(
            "{}/revenue?start_date=1999-01-01&end_date=1999-01-07",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["no_data_found"], true);
    assert_eq!(body["day_count"], 0);
    assert_eq!(body["total_revenue"], 0.0);
}

#[tokio::test]
#[ignore]
async fn test_reconcile() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/revenue/reconcile?start_date=2025-07-01&end_date=2025-07-31",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["ledger_total"].is_number());
    assert!(body["secondary_total"].is_number());
    assert!(body["matches"].is_boolean());
}

#[tokio::test]
#[ignore]
async fn test_chat_with_date_phrase() {
    let client = Client::new();

    let response = client
        .post(format!("{}/chat", BASE_URL))
        .json(&json!({
            "message": "How was revenue last weekend?",
            "today": "2025-08-13"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["response"].is_string());
    assert_eq!(body["context"]["query_type"], "revenue");
    assert_eq!(body["context"]["range"]["label"], "last weekend");
    // Wednesday 2025-08-13: preceding Fri-Sun is Aug 8-10.
    assert_eq!(body["context"]["range"]["start"], "2025-08-08");
    assert_eq!(body["context"]["range"]["end"], "2025-08-10");
}

#[tokio::test]
#[ignore]
async fn test_chat_without_date_phrase_uses_default_window() {
    let client = Client::new();

    let response = client
        .post(format!("{}/chat", BASE_URL))
        .json(&json!({
            "message": "How is business?",
            "today": "2025-08-13"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["context"]["range_was_parsed"], false);
    assert_eq!(body["context"]["range"]["label"], "last 7 days");
}

#[tokio::test]
#[ignore]
async fn test_chat_comparison() {
    let client = Client::new();

    let response = client
        .post(format!("{}/chat", BASE_URL))
        .json(&json!({
            "message": "Compare sales this week vs last week",
            "today": "2025-08-13"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["context"]["comparison"].is_object());
    assert!(body["context"]["previous"].is_object());
}

#[tokio::test]
#[ignore]
async fn test_chat_rejects_empty_message() {
    let client = Client::new();

    let response = client
        .post(format!("{}/chat", BASE_URL))
        .json(&json!({ "message": "  " }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}
