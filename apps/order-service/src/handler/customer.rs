//! # 顧客ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /customers` - 顧客登録（ID と参照トークンの採番のみ）

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use dofd_domain::customer::RegisteredCustomer;
use dofd_shared::{
    ErrorResponse,
    event_log::{error as log_error, event},
    log_business_event,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{OrderState, ensure_response_contract, json_payload};
use crate::{
    error::ServiceError,
    usecase::{CREATE_CUSTOMER_OPERATION, register_customer},
};

/// 顧客登録リクエスト（OpenAPI ドキュメント用）
#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerCreateRequest {
    #[schema(example = "山田太郎")]
    pub name: String,
}

/// 顧客登録レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreatedDto {
    pub customer_id: String,
    #[schema(example = "tok_0123456789abcdef0123456789abcdef")]
    pub token:       String,
}

impl From<&RegisteredCustomer> for CustomerCreatedDto {
    fn from(customer: &RegisteredCustomer) -> Self {
        Self {
            customer_id: customer.customer_id().as_str().to_string(),
            token:       customer.token().as_str().to_string(),
        }
    }
}

/// POST /customers
#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    request_body = CustomerCreateRequest,
    responses(
        (status = 201, description = "顧客を登録した", body = CustomerCreatedDto),
        (status = 400, description = "ペイロードの欠落・不正、または契約違反", body = ErrorResponse),
        (status = 500, description = "内部エラー", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_customer(
    State(state): State<Arc<OrderState>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let payload = json_payload(payload).inspect_err(log_rejected)?;
    let contract = state.contract.as_deref();

    let customer = register_customer(&payload, contract, state.id_generator.as_ref())
        .map_err(ServiceError::from)
        .inspect_err(log_rejected)?;

    let dto = CustomerCreatedDto::from(&customer);
    ensure_response_contract(contract, CREATE_CUSTOMER_OPERATION, 201, &dto)?;

    log_business_event!(
        event.category = event::category::CUSTOMER,
        event.action = event::action::CUSTOMER_CREATED,
        event.entity_type = event::entity_type::CUSTOMER,
        event.entity_id = %customer.customer_id(),
        event.result = event::result::SUCCESS,
        "顧客を登録しました"
    );

    Ok((StatusCode::CREATED, Json(dto)))
}

fn log_rejected(err: &ServiceError) {
    let kind = match err {
        ServiceError::SchemaViolation(_) => log_error::kind::SCHEMA_VIOLATION,
        _ => log_error::kind::INVALID_PAYLOAD,
    };
    log_business_event!(
        event.category = event::category::CUSTOMER,
        event.action = event::action::CUSTOMER_REJECTED,
        event.entity_type = event::entity_type::CUSTOMER,
        event.result = event::result::FAILURE,
        event.reason = %err,
        error.category = log_error::category::VALIDATION,
        error.kind = kind,
        "顧客登録を拒否しました"
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Router, body::Body, http::Request, routing::post};
    use dofd_domain::id_generator::SequentialIdGenerator;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;

    fn create_test_app(generator: Arc<SequentialIdGenerator>) -> Router {
        let state = Arc::new(OrderState::new(None, generator));
        Router::new()
            .route("/customers", post(create_customer))
            .with_state(state)
    }

    fn post_json(body: String) -> Request<Body> {
        Request::builder()
            .method(axum::http::Method::POST)
            .uri("/customers")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn response_body<T: serde::de::DeserializeOwned>(
        response: axum::http::Response<Body>,
    ) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_post_名前があれば201と顧客idとトークンが返る() {
        // Given
        let generator = Arc::new(SequentialIdGenerator::new());
        let sut = create_test_app(generator.clone());

        // When
        let response = sut
            .oneshot(post_json(json!({"name": "山田太郎"}).to_string()))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: CustomerCreatedDto = response_body(response).await;
        assert_eq!(body.customer_id, "00000000-0000-0000-0000-000000000001");
        assert_eq!(body.token, "tok_00000000000000000000000000000002");
        assert_eq!(generator.issued(), 2);
    }

    #[tokio::test]
    async fn test_post_名前がなければ400で採番されない() {
        let generator = Arc::new(SequentialIdGenerator::new());
        let sut = create_test_app(generator.clone());

        let response = sut
            .oneshot(post_json(json!({"email": "a@example.com"}).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response_body(response).await;
        assert_eq!(body.error, "missing/invalid customer name");
        assert_eq!(generator.issued(), 0);
    }

    #[tokio::test]
    async fn test_post_jsonとして解釈できないボディは400() {
        let sut = create_test_app(Arc::new(SequentialIdGenerator::new()));

        let response = sut.oneshot(post_json("not json".to_string())).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
