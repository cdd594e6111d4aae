//! # 契約検証器
//!
//! `operationId` を指定してリクエスト / レスポンスのボディを契約のスキーマで検証する。
//!
//! operation が契約に存在しない場合や、スキーマが定義されていない場合は
//! 検証を行わず成功として扱い、ログにその旨を残す。

use serde_json::Value;
use tracing::{debug, warn};

use super::{OpenApiContract, schema, schema::SchemaIssue};

/// 検証結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// 検証を通過したか
    pub valid:   bool,
    /// 違反の一覧（スキーマの記述順）
    pub issues:  Vec<SchemaIssue>,
    /// スキーマに照らして検証したか（スキーマ未定義で素通しした場合は false）
    pub checked: bool,
}

impl ValidationResult {
    fn skipped() -> Self {
        Self {
            valid:   true,
            issues:  vec![],
            checked: false,
        }
    }

    fn from_issues(issues: Vec<SchemaIssue>) -> Self {
        Self {
            valid: issues.is_empty(),
            issues,
            checked: true,
        }
    }

    /// 最初の違反
    pub fn first_issue(&self) -> Option<&SchemaIssue> {
        self.issues.first()
    }
}

/// 契約に基づいてリクエスト / レスポンスを検証する
///
/// 起動時に一度だけ構築し、`Arc` で共有する。内部状態を持たないため
/// 複数スレッドから同時に使用できる。
#[derive(Debug, Clone)]
pub struct ContractValidator {
    contract: OpenApiContract,
}

impl ContractValidator {
    pub fn new(contract: OpenApiContract) -> Self {
        debug!(
            operation_count = contract.operation_ids().count(),
            "契約検証器を初期化しました"
        );
        Self { contract }
    }

    pub fn contract(&self) -> &OpenApiContract {
        &self.contract
    }

    /// 契約に operation が定義されているか
    pub fn has_operation(&self, operation_id: &str) -> bool {
        self.contract.operation(operation_id).is_some()
    }

    /// リクエストボディを operation のリクエストスキーマで検証する
    pub fn validate_request(&self, operation_id: &str, body: &Value) -> ValidationResult {
        let Some(operation) = self.contract.operation(operation_id) else {
            warn!(operation_id, "検証対象の operation が契約に見つかりません");
            return ValidationResult::skipped();
        };

        let Some(schema) = &operation.request_schema else {
            debug!(operation_id, "リクエストスキーマが未定義のため検証をスキップします");
            return ValidationResult::skipped();
        };

        ValidationResult::from_issues(schema::validate(schema, body, self.contract.document()))
    }

    /// レスポンスボディを operation のレスポンススキーマで検証する
    pub fn validate_response(
        &self,
        operation_id: &str,
        status_code: u16,
        body: &Value,
    ) -> ValidationResult {
        let Some(operation) = self.contract.operation(operation_id) else {
            warn!(operation_id, "検証対象の operation が契約に見つかりません");
            return ValidationResult::skipped();
        };

        let Some(schema) = operation.response_schema(status_code) else {
            debug!(
                operation_id,
                status_code, "ステータスコードに対応するレスポンススキーマがありません"
            );
            return ValidationResult::skipped();
        };

        ValidationResult::from_issues(schema::validate(schema, body, self.contract.document()))
    }
}
