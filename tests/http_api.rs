//! HTTP API Tests
//!
//! Drives the full router (CORS and tracing layers included) with
//! in-process requests:
//! - Transactions pages honor filters, sort and paging
//! - Summary agrees with the transaction total
//! - Invalid parameters are 400 with a machine-readable code
//! - Banner, health and counters endpoints respond

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use saleslens::api::{ApiHandler, ApiLimits};
use saleslens::dataset::{Dataset, Record};
use saleslens::http_server::{HttpServer, HttpServerConfig};
use serde_json::Value;
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn make_records() -> Vec<Record> {
    let people = [
        ("Ana", "female", 24, "north", "beauty", "upi"),
        ("bob", "male", 35, "south", "electronics", "cash"),
        ("Cara", "female", 41, "north", "clothing", "credit card"),
        ("dev", "male", 29, "east", "electronics", "upi"),
        ("Eli", "male", 52, "west", "clothing", "cash"),
    ];

    people
        .iter()
        .enumerate()
        .map(|(i, (name, gender, age, region, category, payment))| Record {
            customer_name: name.to_string(),
            phone_number: format!("+91 98765{:05}", i),
            gender: gender.to_string(),
            age: Some(*age),
            customer_region: region.to_string(),
            product_category: category.to_string(),
            payment_method: payment.to_string(),
            tags: vec!["casual".to_string()],
            date: NaiveDate::from_ymd_opt(2023, 1, 1 + i as u32),
            quantity: Some(i as u32 + 1),
            total_amount: Some(BigDecimal::from(100 * (i as u32 + 1))),
            discount_percentage: Some(BigDecimal::from(10)),
            ..Record::new(i as u64 + 1)
        })
        .map(|mut record| {
            // Fixed at ingestion, never by the engine
            record.final_amount = record.derive_final_amount();
            record
        })
        .collect()
}

fn router() -> Router {
    let handler = ApiHandler::new(Dataset::shared(make_records()), ApiLimits::default());
    HttpServer::new(HttpServerConfig::default(), Arc::new(handler)).router()
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn names(body: &Value) -> Vec<String> {
    body["transactions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["customer_name"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Transactions Tests
// =============================================================================

/// Default request: newest first, page 1 of size 10.
#[tokio::test]
async fn test_transactions_defaults() {
    let (status, body) = get("/api/sales/transactions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 10);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(names(&body), vec!["Eli", "dev", "Cara", "bob", "Ana"]);
}

/// Repeated and comma-separated list values are both accepted.
#[tokio::test]
async fn test_transactions_list_params() {
    let (_, repeated) = get("/api/sales/transactions?genders=Male&customer_regions=South&customer_regions=East").await;
    let (_, joined) = get("/api/sales/transactions?genders=male&customer_regions=south,east").await;

    assert_eq!(repeated["total"], 2);
    assert_eq!(names(&repeated), names(&joined));
}

/// Sort by name ascending, second page of size 2.
#[tokio::test]
async fn test_transactions_sort_and_page() {
    let (status, body) =
        get("/api/sales/transactions?sort_by=customer_name&sort_order=asc&page=2&page_size=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(names(&body), vec!["Cara", "dev"]);
}

/// Categorical values are title-cased on the wire.
#[tokio::test]
async fn test_transactions_title_cased() {
    let (_, body) = get("/api/sales/transactions?search=cara").await;

    let row = &body["transactions"][0];
    assert_eq!(row["gender"], "Female");
    assert_eq!(row["payment_method"], "Credit card");
    assert_eq!(row["tags"], "Casual");
    assert_eq!(row["date"], "2023-01-03");
    assert_eq!(row["final_amount"], 270.0);
}

// =============================================================================
// Summary Tests
// =============================================================================

/// Summary over filtered records.
#[tokio::test]
async fn test_summary_with_filters() {
    let (status, body) = get("/api/sales/summary?product_categories=Electronics").await;

    assert_eq!(status, StatusCode::OK);
    // bob (qty 2, 200) and dev (qty 4, 400)
    assert_eq!(body["total_sales_records"], 2);
    assert_eq!(body["total_units_sold"], 6);
    assert_eq!(body["total_amount"], 600.0);
    assert_eq!(body["total_discount"], 60.0);
}

/// Summary count equals the transactions total for the same filters.
#[tokio::test]
async fn test_summary_matches_transactions_total() {
    let filters = "age_min=25&age_max=45&date_from=2023-01-02";
    let (_, page) = get(&format!("/api/sales/transactions?{}", filters)).await;
    let (_, summary) = get(&format!("/api/sales/summary?{}", filters)).await;

    assert_eq!(page["total"], summary["total_sales_records"]);
    assert_eq!(page["total"], 3);
}

// =============================================================================
// Error Tests
// =============================================================================

/// Inverted age range is rejected with its query code.
#[tokio::test]
async fn test_inverted_age_range_400() {
    let (status, body) = get("/api/sales/transactions?age_min=40&age_max=30").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "SALES_QUERY_INVALID_RANGE");
}

/// Unknown sort field is rejected.
#[tokio::test]
async fn test_unknown_sort_400() {
    let (status, body) = get("/api/sales/transactions?sort_by=price").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "SALES_QUERY_UNKNOWN_SORT");
}

/// Page size above the maximum is rejected.
#[tokio::test]
async fn test_page_size_cap_400() {
    let (status, body) = get("/api/sales/transactions?page_size=101").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "SALES_API_PAGE_SIZE_EXCEEDED");
}

/// Non-numeric age is an invalid parameter.
#[tokio::test]
async fn test_non_numeric_age_400() {
    let (status, body) = get("/api/sales/summary?age_min=old").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("age_min"));
}

// =============================================================================
// Filter Options and Service Tests
// =============================================================================

/// Distinct, sorted, title-cased values per field.
#[tokio::test]
async fn test_filter_options() {
    let (status, body) = get("/api/sales/filter-options").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["genders"], serde_json::json!(["Female", "Male"]));
    assert_eq!(
        body["customer_regions"],
        serde_json::json!(["East", "North", "South", "West"])
    );
    assert_eq!(body["tags"], serde_json::json!(["Casual"]));
}

/// Banner and health endpoints.
#[tokio::test]
async fn test_root_and_health() {
    let (_, root) = get("/").await;
    assert_eq!(root["message"], "Sales Management API");

    let (status, health) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
}

/// Counter snapshot reflects the dataset size.
#[tokio::test]
async fn test_metrics_endpoint() {
    let (status, body) = get("/observability/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records_loaded"], 5);
}
