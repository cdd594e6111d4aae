//! # Request ID レイヤーのテスト
//!
//! [`build_app`] が組み立てる Request ID レイヤー（SetRequestIdLayer +
//! PropagateRequestIdLayer + カスタム make_span_with）の動作を検証する。
//!
//! - レスポンスに `X-Request-Id` ヘッダーが含まれる
//! - クライアント提供の `X-Request-Id` がそのまま返される
//! - 自動生成の `X-Request-Id` が UUID v7 形式である
//! - エラーレスポンスにも付与される

use std::sync::Arc;

use axum::{Router, body::Body};
use dofd_domain::id_generator::RandomIdGenerator;
use dofd_order_service::{app_builder::build_app, handler::OrderState};
use http::{Request, StatusCode};
use tower::ServiceExt;

fn test_app() -> Router {
    build_app(Arc::new(OrderState::new(None, Arc::new(RandomIdGenerator))))
}

fn request_id(response: &http::Response<Body>) -> &str {
    response
        .headers()
        .get("x-request-id")
        .expect("レスポンスに x-request-id ヘッダーが含まれること")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn test_レスポンスにx_request_idヘッダーが含まれる() {
    let app = test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!request_id(&response).is_empty());
}

#[tokio::test]
async fn test_クライアント提供のx_request_idがそのまま返される() {
    let app = test_app();
    let custom_id = "client-provided-request-id-123";

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", custom_id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        request_id(&response),
        custom_id,
        "クライアント提供の Request ID がそのまま返されること"
    );
}

#[tokio::test]
async fn test_自動生成のx_request_idがuuid_v7形式である() {
    let app = test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let parsed = uuid::Uuid::parse_str(request_id(&response)).expect("UUID として解析できること");
    assert_eq!(parsed.get_version_num(), 7, "UUID v7 であること");
}

#[tokio::test]
async fn test_400レスポンスにもx_request_idが付与される() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/orders")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().contains_key("x-request-id"));
}
