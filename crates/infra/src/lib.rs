//! # DoFD インフラ層
//!
//! 外部から供給される API 契約（OpenAPI ドキュメント）の読み込みと、
//! それに基づくリクエスト / レスポンスの検証を担当する。
//!
//! ## 設計方針
//!
//! 契約ドキュメントは外部協力者として扱う。注文受付のコアロジックは
//! ファイルを読み込まず、起動時に構築された [`ContractValidator`] を
//! 引数として受け取る。
//!
//! ## 依存関係
//!
//! ```text
//! order-service → infra
//! ```
//!
//! ドメイン層には依存しない。検証結果は [`SchemaIssue`] として返し、
//! ドメインの拒否理由への変換は呼び出し側が行う。
//!
//! ## モジュール構成
//!
//! - [`contract`] - OpenAPI ドキュメントの読み込み、スキーマ検証
//! - [`error`] - インフラ層エラー定義
//!
//! ## 使用例
//!
//! ```rust
//! use dofd_infra::contract::{ContractValidator, OpenApiContract};
//!
//! # fn main() -> Result<(), dofd_infra::ContractError> {
//! let contract = OpenApiContract::from_yaml_str(
//!     r#"
//! openapi: 3.0.3
//! info: { title: demo, version: "1" }
//! paths:
//!   /orders:
//!     post:
//!       operationId: createOrder
//!       requestBody:
//!         content:
//!           application/json:
//!             schema:
//!               type: object
//!               required: [customerId]
//! "#,
//! )?;
//! let validator = ContractValidator::new(contract);
//!
//! let result = validator.validate_request("createOrder", &serde_json::json!({}));
//! assert!(!result.valid);
//! # Ok(())
//! # }
//! ```

pub mod contract;
pub mod error;

pub use contract::{ContractValidator, OpenApiContract, SchemaIssue, ValidationResult};
pub use error::{ContractError, ContractErrorKind};
