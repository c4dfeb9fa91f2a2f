//! HTTP API tests driven through the router

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use fincalc_config::Settings;
use fincalc_llm::{StubNumberBackend, TextToNumberResolver};
use fincalc_server::{create_router, AppState};

fn app_state() -> AppState {
    let resolver = TextToNumberResolver::with_default_policy(Arc::new(StubNumberBackend::new()));
    AppState::new(Settings::default(), resolver)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(create_router(app_state()), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_calculate_emi() {
    let app = create_router(app_state());
    let request = post_json(
        "/api/calculate/emi",
        json!({ "amount": "1 lakh", "rate": "10%", "tenure": 1 }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "emi");
    assert_eq!(body["lines"][0], "Estimated Monthly EMI: ₹8,791.59");
    assert_eq!(body["chart"]["labels"][0], "Loan Amount");
    assert!(body["result"].get("present_value_adjusted").is_none());
}

#[tokio::test]
async fn test_calculate_unresolved_is_unprocessable() {
    let app = create_router(app_state());
    let request = post_json(
        "/api/calculate/sip",
        json!({ "amount": "five thousand", "rate": 12, "tenure": 10 }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "unresolved");
    assert_eq!(body["field"], "amount");
    assert!(body["message"].as_str().unwrap().starts_with("ERROR:"));
}

#[tokio::test]
async fn test_calculate_invalid_input() {
    let app = create_router(app_state());
    let request = post_json(
        "/api/calculate/fd",
        json!({ "amount": 0, "rate": 7, "tenure": 5 }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_input");
    assert_eq!(body["field"], "amount");
}

#[tokio::test]
async fn test_unknown_calculator_is_not_found() {
    let app = create_router(app_state());
    let request = post_json(
        "/api/calculate/rd",
        json!({ "amount": 1000, "rate": 7, "tenure": 5 }),
    );
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_save_and_list_results() {
    let state = app_state();

    let (status, _) = send(create_router(state.clone()), post_empty("/api/results/sip")).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let request = post_json(
        "/api/calculate/sip",
        json!({ "amount": "5000", "rate": "12 percent", "tenure": "10", "inflation": "6" }),
    );
    let (status, _) = send(create_router(state.clone()), request).await;
    assert_eq!(status, StatusCode::OK);

    let (status, entry) = send(create_router(state.clone()), post_empty("/api/results/sip")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["kind"], "sip");
    assert!(entry["summary"]
        .as_str()
        .unwrap()
        .starts_with("Total Investment: ₹6,00,000"));

    let (status, list) = send(create_router(state), get("/api/results")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], entry["id"]);
}

#[tokio::test]
async fn test_failed_calculation_clears_saveable_report() {
    let state = app_state();

    let good = post_json(
        "/api/calculate/emi",
        json!({ "amount": 120000, "rate": 0, "tenure": 1 }),
    );
    let (status, _) = send(create_router(state.clone()), good).await;
    assert_eq!(status, StatusCode::OK);

    let bad = post_json(
        "/api/calculate/emi",
        json!({ "amount": "", "rate": 0, "tenure": 1 }),
    );
    let (status, _) = send(create_router(state.clone()), bad).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(create_router(state), post_empty("/api/results/emi")).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_switch_active_calculator() {
    let state = app_state();

    let (_, body) = send(create_router(state.clone()), get("/api/active")).await;
    assert_eq!(body["active"], "sip");

    let (status, body) = send(create_router(state.clone()), post_empty("/api/active/fd")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], "fd");

    let (_, body) = send(create_router(state), get("/api/active")).await;
    assert_eq!(body["active"], "fd");
}

#[tokio::test]
async fn test_format_amount() {
    let app = create_router(app_state());
    let (status, body) = send(app, get("/api/format?amount=12345678.9")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currency"], "₹1,23,45,678.9");
    assert_eq!(
        body["words"],
        "One Crore Twenty Three Lakh Forty Five Thousand Six Hundred Seventy Nine"
    );
}

#[tokio::test]
async fn test_format_rejects_non_finite() {
    let app = create_router(app_state());
    let (status, body) = send(app, get("/api/format?amount=NaN")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn test_metrics_disabled_without_exporter() {
    let app = create_router(app_state());
    let (status, _) = send(app, get("/metrics")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
