//! # 注文（Order）
//!
//! 注文受付で生成されるエンティティと、その構成要素の値オブジェクトを定義する。
//!
//! ## 含まれる型
//!
//! | 型 | ラップ対象 | 用途 |
//! |---|-----------|------|
//! | [`OrderId`] | `Uuid` | 注文の一意識別子（作成時に一度だけ採番） |
//! | [`CustomerId`] | `String` | 注文者の不透明な識別子 |
//! | [`Sku`] | `String` | 在庫管理単位の不透明な識別子 |
//! | [`Quantity`] | `u64` | 数量（1 以上） |
//! | [`LineItem`] | `Sku + Quantity + 元の JSON` | 注文明細 |
//! | [`OrderStatus`] | enum | 注文ステータス |
//! | [`Order`] | entity | 注文 |
//!
//! ## 不変条件
//!
//! - [`Order`] は検証済みの値オブジェクトからのみ構築される
//! - 明細は 1 件以上で、リクエストの順序と内容をそのまま保持する
//! - 識別子と SKU の長さは制限しない（上限は外部の契約で定義する）
//! - ID とステータスは構築後に変更されない（セッターを持たない）

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::DomainError;

define_uuid_id! {
    /// 注文の一意識別子
    ///
    /// 注文作成時に一度だけ採番され、再利用されない。
    pub struct OrderId;
}

define_opaque_string! {
    /// 注文者の識別子（値オブジェクト）
    ///
    /// 形式は規定しない（UUID とは限らない）。空白のみの値は拒否する。
    pub struct CustomerId {
        label: "顧客 ID",
    }
}

impl CustomerId {
    /// 採番した UUID から顧客 ID を作成する
    ///
    /// UUID の正規形は空にならないため検証を省略する。
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.to_string())
    }
}

define_opaque_string! {
    /// 在庫管理単位（SKU）の識別子（値オブジェクト）
    pub struct Sku {
        label: "SKU",
    }
}

// =========================================================================
// Quantity（数量）
// =========================================================================

/// 数量（値オブジェクト）
///
/// # 不変条件
///
/// - 1 以上
///
/// # 使用例
///
/// ```rust
/// # fn main() -> Result<(), dofd_domain::DomainError> {
/// use dofd_domain::order::Quantity;
///
/// let qty = Quantity::new(3)?;
/// assert_eq!(qty.as_u64(), 3);
/// assert!(Quantity::new(0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quantity(u64);

impl Quantity {
    /// 指定した値から数量を作成する
    ///
    /// # エラー
    ///
    /// 0 の場合は `DomainError::Validation` を返す。
    pub fn new(value: u64) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::Validation(
                "数量は 1 以上である必要があります".to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// LineItem（注文明細）
// =========================================================================

/// 注文明細
///
/// 検証済みの SKU と数量に加えて、リクエストで受け取った明細の JSON をそのまま保持する。
/// レスポンスには [`LineItem::raw`] を返すため、未知のフィールドや `quantity` 表記も
/// 入力どおりに残る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    sku:      Sku,
    quantity: Quantity,
    raw:      serde_json::Value,
}

impl LineItem {
    /// SKU と数量から明細を作成する（JSON 表現は `{"sku", "qty"}`）
    pub fn new(sku: Sku, quantity: Quantity) -> Self {
        let raw = serde_json::json!({
            "sku": sku.as_str(),
            "qty": quantity.as_u64(),
        });
        Self { sku, quantity, raw }
    }

    /// リクエストの明細から作成する
    ///
    /// `raw` は `sku` と `quantity` の取り出し元であること。
    pub fn from_request(sku: Sku, quantity: Quantity, raw: serde_json::Value) -> Self {
        Self { sku, quantity, raw }
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// リクエストで受け取った明細の JSON
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }
}

// =========================================================================
// OrderStatus（注文ステータス）
// =========================================================================

/// 注文ステータス
///
/// 受付スコープでは作成時に `Created` が設定され、以後変更されない。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// 受付済み
    Created,
    /// 受付拒否
    Rejected,
}

// =========================================================================
// Order（注文）
// =========================================================================

/// 注文の新規作成パラメータ
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id:          OrderId,
    pub customer_id: CustomerId,
    pub items:       Vec<LineItem>,
}

/// 注文エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id:          OrderId,
    customer_id: CustomerId,
    items:       Vec<LineItem>,
    status:      OrderStatus,
}

impl Order {
    /// 新しい注文を作成する
    ///
    /// ステータスは常に [`OrderStatus::Created`] で初期化される。
    ///
    /// # エラー
    ///
    /// 明細が空の場合は `DomainError::Validation` を返す。
    pub fn new(params: NewOrder) -> Result<Self, DomainError> {
        if params.items.is_empty() {
            return Err(DomainError::Validation(
                "注文明細は 1 件以上必要です".to_string(),
            ));
        }

        Ok(Self {
            id:          params.id,
            customer_id: params.customer_id,
            items:       params.items,
            status:      OrderStatus::Created,
        })
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }
}
