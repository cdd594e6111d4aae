//! # ヘルスチェックハンドラ
//!
//! - `/health` - Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready` - Readiness Check（契約モードでは契約に必要な operation が揃っているか確認）

use std::{collections::BTreeMap, sync::Arc};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use dofd_shared::{CheckStatus, HealthResponse, ReadinessResponse};

use super::OrderState;
use crate::usecase::{CREATE_CUSTOMER_OPERATION, CREATE_ORDER_OPERATION};

/// Order Service のヘルスチェックエンドポイント
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "サーバー稼働中", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Order Service の Readiness Check エンドポイント
///
/// 全チェック OK（または対象外）→ 200、1 つでも失敗 → 503。
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "リクエストを受け付け可能", body = ReadinessResponse),
        (status = 503, description = "契約に必要な operation が欠けている", body = ReadinessResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<OrderState>>) -> impl IntoResponse {
    let mut checks = BTreeMap::new();
    checks.insert("contract".to_string(), check_contract(&state));

    let response = ReadinessResponse::from_checks(checks);
    let http_status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(response))
}

fn check_contract(state: &OrderState) -> CheckStatus {
    let Some(contract) = state.contract.as_deref() else {
        return CheckStatus::Skipped;
    };

    let missing: Vec<&str> = [CREATE_ORDER_OPERATION, CREATE_CUSTOMER_OPERATION]
        .into_iter()
        .filter(|op| !contract.has_operation(op))
        .collect();

    if missing.is_empty() {
        CheckStatus::Ok
    } else {
        tracing::warn!(?missing, "readiness check: 契約に operation が定義されていません");
        CheckStatus::Error
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::Request, routing::get};
    use dofd_domain::id_generator::RandomIdGenerator;
    use dofd_infra::{ContractValidator, OpenApiContract};
    use dofd_shared::ReadinessStatus;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;

    fn create_test_app(contract: Option<ContractValidator>) -> Router {
        let state = Arc::new(OrderState::new(
            contract.map(Arc::new),
            Arc::new(RandomIdGenerator),
        ));
        Router::new()
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .with_state(state)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn response_body<T: serde::de::DeserializeOwned>(
        response: axum::http::Response<Body>,
    ) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn contract_with(operation_ids: &[&str]) -> ContractValidator {
        let paths: serde_json::Map<String, serde_json::Value> = operation_ids
            .iter()
            .map(|op| (format!("/{op}"), json!({"post": {"operationId": op}})))
            .collect();
        ContractValidator::new(
            OpenApiContract::from_value(json!({"openapi": "3.0.3", "paths": paths})).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_health_healthyとバージョンを返す() {
        let sut = create_test_app(None);

        let response = sut.oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: HealthResponse = response_body(response).await;
        assert_eq!(body, HealthResponse::healthy(env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn test_ready_basicモードでは契約チェックをスキップする() {
        let sut = create_test_app(None);

        let response = sut.oneshot(get_request("/health/ready")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: ReadinessResponse = response_body(response).await;
        assert_eq!(body.status, ReadinessStatus::Ready);
        assert_eq!(body.checks.get("contract"), Some(&CheckStatus::Skipped));
    }

    #[tokio::test]
    async fn test_ready_契約に必要なoperationが揃っていれば200() {
        let sut = create_test_app(Some(contract_with(&["createOrder", "createCustomer"])));

        let response = sut.oneshot(get_request("/health/ready")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: ReadinessResponse = response_body(response).await;
        assert_eq!(body.checks.get("contract"), Some(&CheckStatus::Ok));
    }

    #[tokio::test]
    async fn test_ready_operationが欠けていれば503() {
        let sut = create_test_app(Some(contract_with(&["createOrder"])));

        let response = sut.oneshot(get_request("/health/ready")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: ReadinessResponse = response_body(response).await;
        assert_eq!(body.status, ReadinessStatus::NotReady);
        assert_eq!(body.checks.get("contract"), Some(&CheckStatus::Error));
    }
}
