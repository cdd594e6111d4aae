//! # 注文ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /orders` - 注文受付

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use dofd_domain::order::Order;
use dofd_shared::{
    ErrorResponse,
    event_log::{error as log_error, event},
    log_business_event,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{OrderState, ensure_response_contract, json_payload};
use crate::{
    error::ServiceError,
    usecase::{CREATE_ORDER_OPERATION, issue_order},
};

// --- リクエスト/レスポンス型 ---

/// 注文作成リクエスト（OpenAPI ドキュメント用）
///
/// ハンドラは生の JSON を受け取り、ユースケース層で検証する。
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// 注文者の識別子
    #[schema(example = "11111111-1111-1111-1111-111111111111")]
    pub customer_id: String,
    /// 注文明細（1 件以上）
    pub items:       Vec<LineItemRequest>,
}

/// 注文明細リクエスト（`quantity` は `qty` の別名として受け付ける）
#[derive(Debug, Deserialize, ToSchema)]
pub struct LineItemRequest {
    #[schema(example = "SKU-1")]
    pub sku: String,
    #[serde(alias = "quantity")]
    #[schema(minimum = 1)]
    pub qty: u64,
}

/// 注文 DTO
///
/// `items` はリクエストの明細をそのまま返す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id:          Uuid,
    pub customer_id: String,
    #[schema(value_type = Vec<LineItemRequest>)]
    pub items:       Vec<serde_json::Value>,
    #[schema(example = "CREATED")]
    pub status:      String,
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        Self {
            id:          *order.id().as_uuid(),
            customer_id: order.customer_id().as_str().to_string(),
            items:       order.items().iter().map(|item| item.raw().clone()).collect(),
            status:      order.status().to_string(),
        }
    }
}

// --- ハンドラ ---

/// POST /orders
///
/// ペイロードを検証し、注文 ID を採番して作成済みの注文を返す。
/// 同一ペイロードを複数回送った場合も、毎回新しい ID を採番する。
///
/// ## レスポンス
///
/// - `201 Created`: 作成された注文
/// - `400 Bad Request`: 必須フィールドの欠落・空、契約違反
/// - `500 Internal Server Error`: 自身のレスポンスが契約を満たさない
#[utoipa::path(
    post,
    path = "/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "注文を受け付けた", body = OrderDto),
        (status = 400, description = "ペイロードの欠落・不正、または契約違反", body = ErrorResponse),
        (status = 500, description = "内部エラー", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_order(
    State(state): State<Arc<OrderState>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let payload = json_payload(payload).inspect_err(log_rejected)?;
    let contract = state.contract.as_deref();

    let order = match issue_order(&payload, contract, state.id_generator.as_ref()) {
        Ok(order) => order,
        Err(err) => {
            let err = ServiceError::from(err);
            log_rejected(&err);
            return Err(err);
        }
    };

    let dto = OrderDto::from(&order);
    ensure_response_contract(contract, CREATE_ORDER_OPERATION, 201, &dto)?;

    log_business_event!(
        event.category = event::category::ORDER,
        event.action = event::action::ORDER_CREATED,
        event.entity_type = event::entity_type::ORDER,
        event.entity_id = %order.id(),
        event.item_count = order.items().len(),
        event.result = event::result::SUCCESS,
        "注文を受け付けました"
    );

    Ok((StatusCode::CREATED, Json(dto)))
}

fn log_rejected(err: &ServiceError) {
    let kind = match err {
        ServiceError::SchemaViolation(_) => log_error::kind::SCHEMA_VIOLATION,
        _ => log_error::kind::INVALID_PAYLOAD,
    };
    log_business_event!(
        event.category = event::category::ORDER,
        event.action = event::action::ORDER_REJECTED,
        event.entity_type = event::entity_type::ORDER,
        event.result = event::result::FAILURE,
        event.reason = %err,
        error.category = log_error::category::VALIDATION,
        error.kind = kind,
        "注文を拒否しました"
    );
}
