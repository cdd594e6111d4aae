//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ## 形式
//!
//! RFC 9457 の標準メンバー（`type`, `title`, `status`, `detail`）に加え、
//! 拡張メンバー `error` に `detail` と同じ人間可読メッセージを載せる。
//! `{ "error": string }` 形式を期待するクライアントとの互換のため。
//!
//! ```json
//! {
//!   "type": "https://dofd.example.com/errors/invalid-payload",
//!   "title": "Invalid Payload",
//!   "status": 400,
//!   "detail": "missing/invalid owner identifier",
//!   "error": "missing/invalid owner identifier"
//! }
//! ```
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は各サービスの責務（shared に axum 依存を入れない）

use serde::{Deserialize, Serialize};

/// error_type URI のベースパス
const ERROR_TYPE_BASE: &str = "https://dofd.example.com/errors";

/// エラーレスポンス（RFC 9457 Problem Details + `error` 拡張メンバー）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
    /// `detail` と同じ文言（互換用の拡張メンバー）
    pub error:      String,
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    ///
    /// `error_type_suffix` はベース URI に付加される（例: `"invalid-payload"`）。
    pub fn new(
        error_type_suffix: &str,
        title: impl Into<String>,
        status: u16,
        detail: impl Into<String>,
    ) -> Self {
        let detail = detail.into();
        Self {
            error_type: format!("{ERROR_TYPE_BASE}/{error_type_suffix}"),
            title: title.into(),
            status,
            error: detail.clone(),
            detail,
        }
    }

    /// 400 必須フィールドの欠落・空
    pub fn invalid_payload(detail: impl Into<String>) -> Self {
        Self::new("invalid-payload", "Invalid Payload", 400, detail)
    }

    /// 400 契約（スキーマ）違反
    pub fn schema_violation(detail: impl Into<String>) -> Self {
        Self::new("schema-violation", "Schema Violation", 400, detail)
    }

    /// 500 Internal Server Error
    ///
    /// detail は固定値（内部情報を漏らさないため）。
    pub fn internal_error() -> Self {
        Self::new(
            "internal-error",
            "Internal Server Error",
            500,
            "内部エラーが発生しました",
        )
    }
}
