//! # ビジネスイベントログとエラーコンテキストの構造化ヘルパー
//!
//! 注文受付・顧客登録の結果を `jq` で追跡できるよう、ログフィールドの命名規約と
//! ヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## エラーコンテキスト
//!
//! `tracing::warn!` / `tracing::error!` に `error.category` + `error.kind` フィールドを
//! 直接追加する。定数は [`error`] モジュールで提供。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`error.kind`）を使用する。JSON 出力ではフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
///
/// ## 推奨フィールド
///
/// - `event.entity_type`: エンティティ種別（[`event::entity_type`] の定数を使用）
/// - `event.entity_id`: エンティティ ID（成功時のみ。拒否時は採番されていない）
/// - `event.reason`: 拒否理由
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const ORDER: &str = "order";
        pub const CUSTOMER: &str = "customer";
    }

    /// イベントアクション
    pub mod action {
        // 注文
        pub const ORDER_CREATED: &str = "order.created";
        pub const ORDER_REJECTED: &str = "order.rejected";

        // 顧客
        pub const CUSTOMER_CREATED: &str = "customer.created";
        pub const CUSTOMER_REJECTED: &str = "customer.rejected";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const ORDER: &str = "order";
        pub const CUSTOMER: &str = "customer";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// リクエストペイロードの検証
        pub const VALIDATION: &str = "validation";
        /// API 契約（OpenAPI ドキュメント）との照合
        pub const CONTRACT: &str = "contract";
    }

    /// エラー種別
    pub mod kind {
        pub const INVALID_PAYLOAD: &str = "invalid_payload";
        pub const SCHEMA_VIOLATION: &str = "schema_violation";
        pub const RESPONSE_CONTRACT: &str = "response_contract";
        pub const INTERNAL: &str = "internal";
    }
}
