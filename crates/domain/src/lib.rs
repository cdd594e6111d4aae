//! # DoFD ドメイン層
//!
//! 注文受付サービスの中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: [`order::Order`]）
//! - **値オブジェクト**: 生成時に検証され、以後変更されない（例: [`order::Sku`],
//!   [`order::Quantity`]）
//! - **ドメインエラー**: 値オブジェクトの不変条件違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! order-service → domain
//!       ↓
//!     infra
//! ```
//!
//! ドメイン層はインフラ層（契約ファイル、HTTP）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`id_generator`] - 識別子の採番を抽象化するトレイト
//! - [`order`] - 注文エンティティと明細の値オブジェクト
//! - [`customer`] - 顧客登録の結果
//!
//! ## 使用例
//!
//! ```rust
//! use dofd_domain::{
//!     id_generator::RandomIdGenerator,
//!     order::{CustomerId, LineItem, NewOrder, Order, OrderId, OrderStatus, Quantity, Sku},
//! };
//!
//! # fn main() -> Result<(), dofd_domain::DomainError> {
//! let order = Order::new(NewOrder {
//!     id:          OrderId::generate(&RandomIdGenerator),
//!     customer_id: CustomerId::new("11111111-1111-1111-1111-111111111111")?,
//!     items:       vec![LineItem::new(Sku::new("SKU-1")?, Quantity::new(1)?)],
//! })?;
//!
//! assert_eq!(order.status(), OrderStatus::Created);
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod customer;
pub mod error;
pub mod id_generator;
pub mod order;

pub use error::DomainError;
pub use id_generator::IdGenerator;
