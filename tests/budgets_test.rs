//! Integration tests for budget CRUD and the uniqueness rule.

mod common;

use axum::http::StatusCode;
use common::TestClient;
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_returns_created_record() {
    let client = TestClient::new();

    let (status, body) = client
        .post_json(
            "/budgets",
            json!({
                "category": "Food & Dining",
                "amount": 300.0,
                "month": 5,
                "year": 2024,
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let budget: Value = serde_json::from_str(&body).unwrap();
    assert!(budget["id"].as_i64().is_some());
    assert_eq!(budget["amount"], 300.0);
    assert_eq!(budget["month"], 5);
    assert_eq!(budget["year"], 2024);
}

#[tokio::test]
async fn test_create_missing_field_is_rejected() {
    let client = TestClient::new();

    let (status, body) = client
        .post_json(
            "/budgets",
            json!({
                "category": "Food & Dining",
                "amount": 300.0,
                "month": 5,
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert!(error["error"].as_str().unwrap().contains("year"));
}

/// One budget per (category, month, year); duplicates are rejected.
#[tokio::test]
async fn test_duplicate_budget_is_rejected() {
    let client = TestClient::new();

    assert!(client.create_budget("Travel", 500.0, 6, 2024).await);

    let (status, body) = client
        .post_json(
            "/budgets",
            json!({
                "category": "Travel",
                "amount": 800.0,
                "month": 6,
                "year": 2024,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("already exists"));

    // Same category in a different month is fine.
    assert!(client.create_budget("Travel", 500.0, 7, 2024).await);

    let (_, list): (_, Option<Vec<Value>>) = client.get_json("/budgets").await;
    assert_eq!(list.unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_filters_by_month_and_year() {
    let client = TestClient::new();

    client.create_budget("Travel", 500.0, 6, 2024).await;
    client.create_budget("Healthcare", 150.0, 6, 2024).await;
    client.create_budget("Travel", 400.0, 6, 2023).await;

    let (status, list): (_, Option<Vec<Value>>) =
        client.get_json("/budgets?month=6&year=2024").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.unwrap().len(), 2);

    // Without both parameters the listing is unfiltered.
    let (_, list): (_, Option<Vec<Value>>) = client.get_json("/budgets?month=6").await;
    assert_eq!(list.unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_out_of_range_month_is_rejected() {
    let client = TestClient::new();

    let (status, _) = client
        .post_json(
            "/budgets",
            json!({
                "category": "Travel",
                "amount": 500.0,
                "month": 0,
                "year": 2024,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// A zero-amount budget is storable and reports zero utilization, never NaN.
#[tokio::test]
async fn test_zero_amount_budget_is_accepted() {
    let client = TestClient::new();

    assert!(client.create_budget("Other", 0.0, 5, 2024).await);

    let (status, body) = client.get("/analytics?month=5&year=2024").await;
    assert_eq!(status, StatusCode::OK);
    let report: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(report["budgetComparison"][0]["percentage"], 0.0);
    assert_eq!(report["summary"]["budgetUtilization"], 0.0);
}
