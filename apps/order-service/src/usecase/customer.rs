//! # 顧客登録ユースケース
//!
//! 顧客登録ペイロードを検証し、顧客 ID と参照トークンを採番する。
//! 永続化は行わない。

use dofd_domain::{
    IdGenerator,
    customer::{CustomerName, RegisteredCustomer},
};
use dofd_infra::ContractValidator;
use serde_json::Value;
use thiserror::Error;

use super::check_request_contract;

/// 契約上の顧客登録 operation
pub const CREATE_CUSTOMER_OPERATION: &str = "createCustomer";

/// 顧客登録の拒否理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerIssueError {
    #[error("{0}")]
    InvalidPayload(String),

    #[error("{0}")]
    SchemaViolation(String),
}

/// ペイロードを検証して顧客を登録する
///
/// 検証順序: オブジェクトであること → `name` → 契約（契約モードのみ）。
/// すべて通過した場合のみ識別子を 2 回採番する。
pub fn register_customer(
    payload: &Value,
    contract: Option<&ContractValidator>,
    id_generator: &dyn IdGenerator,
) -> Result<RegisteredCustomer, CustomerIssueError> {
    let object = payload.as_object().ok_or_else(|| {
        CustomerIssueError::InvalidPayload("payload must be a JSON object".to_string())
    })?;

    // 名前は検証のみで保持しない
    let has_valid_name = object
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|raw| CustomerName::new(raw).is_ok());
    if !has_valid_name {
        return Err(CustomerIssueError::InvalidPayload(
            "missing/invalid customer name".to_string(),
        ));
    }

    check_request_contract(contract, CREATE_CUSTOMER_OPERATION, payload)
        .map_err(CustomerIssueError::SchemaViolation)?;

    Ok(RegisteredCustomer::issue(id_generator))
}
