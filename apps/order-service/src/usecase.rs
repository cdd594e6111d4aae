//! # ユースケース層
//!
//! 注文受付・顧客登録の検証と採番を実装する。
//!
//! ## 設計方針
//!
//! - **純粋な関数**: 入力は生のペイロード・契約検証器・識別子プロバイダのみで、
//!   グローバル状態を参照しない
//! - **採番は検証成功後**: 失敗時は識別子を一切消費しない
//! - **薄いハンドラ**: HTTP の都合（ステータスコード、ログ）はハンドラに残す
//!
//! ## モジュール構成
//!
//! - `order`: 注文受付
//! - `customer`: 顧客登録

pub mod customer;
pub mod order;

pub use customer::{CREATE_CUSTOMER_OPERATION, CustomerIssueError, register_customer};
use dofd_infra::ContractValidator;
pub use order::{CREATE_ORDER_OPERATION, OrderIssueError, issue_order};
use serde_json::Value;

/// 契約のリクエストスキーマで検証し、最初の違反メッセージを返す
///
/// 契約検証器が渡されていない場合（basic モード）は常に成功する。
pub(crate) fn check_request_contract(
    contract: Option<&ContractValidator>,
    operation_id: &str,
    payload: &Value,
) -> Result<(), String> {
    let Some(contract) = contract else {
        return Ok(());
    };

    let result = contract.validate_request(operation_id, payload);
    if result.valid {
        return Ok(());
    }

    Err(result
        .first_issue()
        .map_or_else(|| "request does not satisfy the contract".to_string(), ToString::to_string))
}
