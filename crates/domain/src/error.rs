//! # ドメイン層エラー定義
//!
//! 値オブジェクトやエンティティの不変条件違反を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//!
//! 注文受付は永続化を伴わないため、NotFound や Conflict に相当する状態は存在しない。
//!
//! ## 使用例
//!
//! ```rust
//! use dofd_domain::DomainError;
//!
//! fn validate_sku(sku: &str) -> Result<(), DomainError> {
//!     if sku.is_empty() {
//!         return Err(DomainError::Validation("SKU は必須です".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がビジネスルールに違反している場合に使用する。
    ///
    /// # 例
    ///
    /// - 必須フィールドが空
    /// - 数量が 0
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}

impl DomainError {
    /// エラーメッセージ本体（プレフィックスなし）を取得する
    ///
    /// レスポンスの `detail` に載せる文言として使用する。
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(msg) => msg,
        }
    }
}
