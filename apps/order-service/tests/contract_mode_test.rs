//! # 契約モードの結合テスト
//!
//! 同梱の `contracts/openapi.yaml` を読み込んだアプリケーション全体に対して、
//! リクエスト・レスポンスの契約検証が機能することを確認する。

use std::{path::PathBuf, sync::Arc};

use axum::{Router, body::Body};
use dofd_domain::id_generator::{RandomIdGenerator, SequentialIdGenerator};
use dofd_infra::{ContractValidator, OpenApiContract};
use dofd_order_service::{app_builder::build_app, handler::OrderState};
use dofd_shared::{ErrorResponse, ReadinessResponse};
use http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

fn shipped_contract() -> Arc<ContractValidator> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../contracts/openapi.yaml");
    Arc::new(ContractValidator::new(OpenApiContract::load(path).unwrap()))
}

fn contract_app(generator: Arc<SequentialIdGenerator>) -> Router {
    build_app(Arc::new(OrderState::new(Some(shipped_contract()), generator)))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_body<T: serde::de::DeserializeOwned>(response: http::Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ===== 注文 =====

#[tokio::test]
async fn test_契約を満たす注文は201でレスポンスも契約を満たす() {
    // Given
    let contract = shipped_contract();
    let sut = build_app(Arc::new(OrderState::new(
        Some(contract.clone()),
        Arc::new(RandomIdGenerator),
    )));
    let payload = json!({
        "customerId": "c7b5f0e9-3c9a-4d2f-b0a6-1b07f0f443e4",
        "items": [{"sku": "SKU-001", "qty": 2}, {"sku": "SKU-002", "quantity": 1}]
    });

    // When
    let response = sut
        .oneshot(post_json("/orders", payload.clone()))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response_body(response).await;
    let result = contract.validate_response("createOrder", 201, &body);
    assert!(result.valid, "{:?}", result.issues);
    assert!(result.checked);
    assert_eq!(body["items"], payload["items"]);
}

#[tokio::test]
async fn test_フィールド検査を通過した契約違反はスキーマ違反の400になる() {
    // Given
    let generator = Arc::new(SequentialIdGenerator::new());
    let sut = contract_app(generator.clone());
    let payload = json!({
        "customerId": "c-1",
        "items": [{"sku": "SKU-001", "qty": 1, "quantity": "one"}]
    });

    // When
    let response = sut.oneshot(post_json("/orders", payload)).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response_body(response).await;
    assert_eq!(body.error, "/items/0/quantity must be integer");
    assert!(body.error_type.ends_with("schema-violation"));
    assert_eq!(generator.issued(), 0);
}

#[tokio::test]
async fn test_契約モードでもフィールド検査のメッセージが優先される() {
    let sut = contract_app(Arc::new(SequentialIdGenerator::new()));

    let response = sut
        .oneshot(post_json("/orders", json!({"customerId": "c-1", "items": []})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response_body(response).await;
    assert_eq!(body.error, "missing or empty item list");
    assert!(body.error_type.ends_with("invalid-payload"));
}

// ===== 顧客 =====

#[tokio::test]
async fn test_顧客登録のレスポンスは契約を満たす() {
    let contract = shipped_contract();
    let sut = build_app(Arc::new(OrderState::new(
        Some(contract.clone()),
        Arc::new(RandomIdGenerator),
    )));

    let response = sut
        .oneshot(post_json("/customers", json!({"name": "山田太郎"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response_body(response).await;
    let result = contract.validate_response("createCustomer", 201, &body);
    assert!(result.valid, "{:?}", result.issues);
}

#[tokio::test]
async fn test_顧客登録の契約違反は400になる() {
    let generator = Arc::new(SequentialIdGenerator::new());
    let sut = contract_app(generator.clone());

    let response = sut
        .oneshot(post_json("/customers", json!({"name": "山田太郎", "email": 1})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response_body(response).await;
    assert_eq!(body.error, "/email must be string");
    assert_eq!(generator.issued(), 0);
}

// ===== Readiness =====

#[tokio::test]
async fn test_同梱の契約ではreadinessが200になる() {
    let sut = contract_app(Arc::new(SequentialIdGenerator::new()));

    let response = sut
        .oneshot(
            Request::builder()
                .uri("/health/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: ReadinessResponse = response_body(response).await;
    assert!(body.is_ready());
}
