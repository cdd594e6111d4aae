//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置し、この `handler.rs` で re-export する
//! - ハンドラは薄く保ち、検証と採番はユースケース層に委譲する
//! - ボディは `serde_json::Value` として受け取る。JSON として解釈できない場合も
//!   axum 既定の 415 / 422 ではなく 400 を返すため

pub mod customer;
pub mod health;
pub mod order;

use std::sync::Arc;

use axum::{Json, extract::rejection::JsonRejection};
pub use customer::{CustomerCreatedDto, create_customer};
use dofd_domain::IdGenerator;
use dofd_infra::ContractValidator;
use dofd_shared::event_log::error as log_error;
pub use health::{health_check, readiness_check};
pub use order::{OrderDto, create_order};
use serde::Serialize;

use crate::error::ServiceError;

/// 全ハンドラで共有する状態
///
/// 起動時に構築し、以後変更しない。
pub struct OrderState {
    /// 契約検証器（basic モードでは `None`）
    pub contract:     Option<Arc<ContractValidator>>,
    /// 識別子プロバイダ
    pub id_generator: Arc<dyn IdGenerator>,
}

impl OrderState {
    pub fn new(
        contract: Option<Arc<ContractValidator>>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            contract,
            id_generator,
        }
    }
}

/// `Json` 抽出の失敗を [`ServiceError::InvalidPayload`] に変換する
pub(crate) fn json_payload(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<serde_json::Value, ServiceError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(rejection = %rejection.body_text(), "JSON ボディを解釈できません");
            let message = match rejection {
                JsonRejection::MissingJsonContentType(_) => {
                    "content-type must be application/json"
                }
                _ => "request body must be valid JSON",
            };
            Err(ServiceError::InvalidPayload(message.to_string()))
        }
    }
}

/// 自身のレスポンスが契約を満たすことを確認する
///
/// 違反はサーバーの不具合のため、`error!` で記録して [`ServiceError::Internal`] を返す。
pub(crate) fn ensure_response_contract(
    contract: Option<&ContractValidator>,
    operation_id: &str,
    status_code: u16,
    body: &impl Serialize,
) -> Result<(), ServiceError> {
    let Some(contract) = contract else {
        return Ok(());
    };

    let value = serde_json::to_value(body).map_err(|e| ServiceError::Internal(e.to_string()))?;
    let result = contract.validate_response(operation_id, status_code, &value);
    if result.valid {
        return Ok(());
    }

    let issue = result
        .first_issue()
        .map(ToString::to_string)
        .unwrap_or_default();
    tracing::error!(
        error.category = log_error::category::CONTRACT,
        error.kind = log_error::kind::RESPONSE_CONTRACT,
        operation_id,
        status_code,
        issue = %issue,
        "レスポンスが契約を満たしていません"
    );
    Err(ServiceError::Internal(format!(
        "{operation_id} のレスポンスが契約を満たしていません: {issue}"
    )))
}

#[cfg(test)]
mod tests {
    use dofd_infra::OpenApiContract;
    use serde_json::json;

    use super::*;

    fn strict_response_contract() -> ContractValidator {
        ContractValidator::new(
            OpenApiContract::from_value(json!({
                "openapi": "3.0.3",
                "paths": {"/orders": {"post": {
                    "operationId": "createOrder",
                    "responses": {"201": {"content": {"application/json": {"schema": {
                        "type": "object",
                        "required": ["id"],
                        "properties": {"id": {"type": "string", "format": "uuid"}}
                    }}}}}
                }}}
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_ensure_response_contract_契約違反はinternalになる() {
        let contract = strict_response_contract();

        let result = ensure_response_contract(
            Some(&contract),
            "createOrder",
            201,
            &json!({"id": "not-a-uuid"}),
        );

        assert!(matches!(result, Err(ServiceError::Internal(msg)) if msg.contains("/id")));
    }

    #[test]
    fn test_ensure_response_contract_契約なしなら常に成功する() {
        let result = ensure_response_contract(None, "createOrder", 201, &json!({}));

        assert_eq!(result, Ok(()));
    }
}
