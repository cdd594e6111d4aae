//! # DoFD Order Service
//!
//! 注文受付と顧客登録を提供する HTTP サービス。
//!
//! ## 処理の流れ
//!
//! ```text
//! HTTP リクエスト
//!   → handler（JSON 抽出、ログ、ステータスコード）
//!   → usecase（フィールド検査 → 契約検証 → 採番）
//!   → handler（契約モードではレスポンスも契約で検証）
//!   → HTTP レスポンス
//! ```
//!
//! ## モジュール構成
//!
//! - [`app_builder`]: ルーターとミドルウェアの組み立て
//! - [`config`]: 環境変数からの設定読み込み
//! - [`error`]: エラーと HTTP レスポンスへの変換
//! - [`handler`]: HTTP ハンドラ
//! - [`openapi`]: utoipa による OpenAPI 仕様生成
//! - [`usecase`]: 検証と採番

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod openapi;
pub mod usecase;
