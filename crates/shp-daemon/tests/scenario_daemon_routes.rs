//! In-process scenario tests for shp-daemon HTTP endpoints.
//!
//! These tests spin up the Axum router **without** binding a TCP socket.
//! Each test calls `routes::build_router` and drives it via
//! `tower::ServiceExt::oneshot`, so no network I/O is required.

use std::sync::Arc;

use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use shp_config::ResolvedSecrets;
use shp_daemon::{routes, state};
use shp_testkit::MockGateway;
use tower::ServiceExt; // oneshot

const SECRET: &str = "test-signing-key";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn test_secrets() -> ResolvedSecrets {
    ResolvedSecrets {
        key_id: Some("rzp_test_key".to_string()),
        key_secret: Some(SECRET.to_string()),
    }
}

/// Router backed by full credentials and a deterministic mock gateway.
fn make_router() -> axum::Router {
    let st = Arc::new(state::AppState::with_gateway(
        test_secrets(),
        Some(Arc::new(MockGateway::new())),
    ));
    routes::build_router(st)
}

fn json_post(uri: &str, body: &str) -> Request<axum::body::Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

/// Drive the router with a single request and return (status, body_bytes).
async fn call(router: axum::Router, req: Request<axum::body::Body>) -> (StatusCode, bytes::Bytes) {
    let resp = router.oneshot(req).await.expect("oneshot failed");
    let status = resp.status();
    let body = resp
        .into_body()
        .collect()
        .await
        .expect("body collect failed")
        .to_bytes();
    (status, body)
}

fn parse_json(b: bytes::Bytes) -> serde_json::Value {
    serde_json::from_slice(&b).expect("body is not valid JSON")
}

// ---------------------------------------------------------------------------
// GET /v1/health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_returns_200_ok_true() {
    let req = Request::builder()
        .method("GET")
        .uri("/v1/health")
        .body(axum::body::Body::empty())
        .unwrap();

    let (status, body) = call(make_router(), req).await;
    assert_eq!(status, StatusCode::OK);

    let json = parse_json(body);
    assert_eq!(json["ok"], true);
    assert_eq!(json["service"], "shp-daemon");
}

// ---------------------------------------------------------------------------
// POST /v1/checkout/create-order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_order_returns_envelope_with_order_and_key_id() {
    let req = json_post("/v1/checkout/create-order", r#"{"amount": 2999}"#);
    let (status, body) = call(make_router(), req).await;
    assert_eq!(status, StatusCode::OK);

    let json = parse_json(body);
    assert_eq!(json["success"], true);
    assert_eq!(json["key_id"], "rzp_test_key");
    assert_eq!(json["order"]["id"], "order_mock_1");
    assert_eq!(
        json["order"]["amount"], 299_900,
        "minor units must be exactly major × 100"
    );
    assert_eq!(json["order"]["currency"], "INR");
    assert!(json["order"]["receipt"]
        .as_str()
        .unwrap()
        .starts_with("receipt_"));
}

#[tokio::test]
async fn create_order_rejects_zero_amount() {
    let req = json_post("/v1/checkout/create-order", r#"{"amount": 0}"#);
    let (status, body) = call(make_router(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let json = parse_json(body);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("positive"));
}

#[tokio::test]
async fn create_order_rejects_negative_amount() {
    let req = json_post("/v1/checkout/create-order", r#"{"amount": -50}"#);
    let (status, body) = call(make_router(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse_json(body)["success"], false);
}

#[tokio::test]
async fn create_order_rejects_fractional_amount_at_the_extractor() {
    // `amount` is declared i64; a fractional major amount must never be
    // silently truncated or rounded.
    let req = json_post("/v1/checkout/create-order", r#"{"amount": 29.99}"#);
    let (status, _) = call(make_router(), req).await;
    assert!(
        status.is_client_error(),
        "fractional amount must be a 4xx, got {status}"
    );
}

#[tokio::test]
async fn create_order_rejects_missing_amount_field() {
    let req = json_post("/v1/checkout/create-order", r#"{}"#);
    let (status, _) = call(make_router(), req).await;
    assert!(status.is_client_error());
}

// ---------------------------------------------------------------------------
// POST /v1/checkout/verify-payment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn verify_payment_accepts_a_valid_signature() {
    let signature = shp_verify::sign("order_1", "pay_1", SECRET);
    let body = format!(
        r#"{{"razorpay_order_id":"order_1","razorpay_payment_id":"pay_1","razorpay_signature":"{signature}"}}"#
    );

    let (status, body) = call(make_router(), json_post("/v1/checkout/verify-payment", &body)).await;
    assert_eq!(status, StatusCode::OK);

    let json = parse_json(body);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Payment verified successfully");
    assert_eq!(json["payment_id"], "pay_1");
    assert_eq!(json["order_id"], "order_1");
}

#[tokio::test]
async fn verify_payment_rejects_a_tampered_signature_with_400() {
    let mut signature = shp_verify::sign("order_1", "pay_1", SECRET);
    // Corrupt the trailing character.
    let tail = if signature.pop() == Some('0') { '1' } else { '0' };
    signature.push(tail);

    let body = format!(
        r#"{{"razorpay_order_id":"order_1","razorpay_payment_id":"pay_1","razorpay_signature":"{signature}"}}"#
    );

    let (status, body) = call(make_router(), json_post("/v1/checkout/verify-payment", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let json = parse_json(body);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Payment verification failed");
}

#[tokio::test]
async fn verify_payment_rejects_missing_fields_at_the_extractor() {
    let (status, _) = call(
        make_router(),
        json_post(
            "/v1/checkout/verify-payment",
            r#"{"razorpay_order_id":"order_1"}"#,
        ),
    )
    .await;
    assert!(status.is_client_error());
}

// ---------------------------------------------------------------------------
// Unknown routes return 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let req = Request::builder()
        .method("GET")
        .uri("/v1/does_not_exist")
        .body(axum::body::Body::empty())
        .unwrap();

    let (status, _) = call(make_router(), req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
