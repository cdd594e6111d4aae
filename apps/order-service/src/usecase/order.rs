//! # 注文受付ユースケース
//!
//! 生のペイロードを検証し、成功した場合のみ注文 ID を採番して [`Order`] を返す。
//!
//! ## 検証順序
//!
//! 先に失敗したものを返す。
//!
//! 1. `customerId`: 文字列で、空白除去後に空でないこと
//! 2. `items`: 配列で、1 件以上あること
//! 3. 各明細: オブジェクトで、`sku` が空でない文字列、数量（`qty`、別名 `quantity`）が 1 以上の整数
//!
//! 長さや上限値は検査しない（契約モードで契約が定義する）。
//! 4. 契約モードのみ: 契約の `createOrder` リクエストスキーマ
//!
//! 識別子は 4 までを通過した後に 1 回だけ採番する。

use dofd_domain::{
    DomainError,
    IdGenerator,
    order::{CustomerId, LineItem, NewOrder, Order, OrderId, Quantity, Sku},
};
use dofd_infra::ContractValidator;
use serde_json::{Map, Value};
use thiserror::Error;

use super::check_request_contract;

/// 契約上の注文作成 operation
pub const CREATE_ORDER_OPERATION: &str = "createOrder";

/// 注文受付の拒否理由
///
/// どちらも 400 としてクライアントに返し、リトライやエスカレーションは行わない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderIssueError {
    /// 必須フィールドの欠落・空・型違い
    #[error("{0}")]
    InvalidPayload(String),

    /// 契約（スキーマ）違反
    #[error("{0}")]
    SchemaViolation(String),
}

impl OrderIssueError {
    fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }
}

/// ペイロードを検証して注文を作成する
///
/// # エラー
///
/// - フィールド検査に失敗: [`OrderIssueError::InvalidPayload`]
/// - 契約検証に失敗: [`OrderIssueError::SchemaViolation`]（最初の違反メッセージ）
pub fn issue_order(
    payload: &Value,
    contract: Option<&ContractValidator>,
    id_generator: &dyn IdGenerator,
) -> Result<Order, OrderIssueError> {
    let customer_id = parse_customer_id(payload)?;
    let items = parse_items(payload)?;

    check_request_contract(contract, CREATE_ORDER_OPERATION, payload)
        .map_err(OrderIssueError::SchemaViolation)?;

    Order::new(NewOrder {
        id: OrderId::generate(id_generator),
        customer_id,
        items,
    })
    .map_err(|e: DomainError| OrderIssueError::invalid(e.message()))
}

fn parse_customer_id(payload: &Value) -> Result<CustomerId, OrderIssueError> {
    payload
        .get("customerId")
        .and_then(Value::as_str)
        .and_then(|raw| CustomerId::new(raw).ok())
        .ok_or_else(|| OrderIssueError::invalid("missing/invalid owner identifier"))
}

fn parse_items(payload: &Value) -> Result<Vec<LineItem>, OrderIssueError> {
    let raw_items = payload
        .get("items")
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| OrderIssueError::invalid("missing or empty item list"))?;

    raw_items
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            parse_line_item(raw).map_err(|reason| {
                OrderIssueError::invalid(format!("invalid line item at index {index}: {reason}"))
            })
        })
        .collect()
}

fn parse_line_item(raw: &Value) -> Result<LineItem, &'static str> {
    let item = raw.as_object().ok_or("line item must be an object")?;

    let sku = item
        .get("sku")
        .and_then(Value::as_str)
        .and_then(|raw| Sku::new(raw).ok())
        .ok_or("missing/invalid sku")?;

    let quantity = quantity_field(item)
        .and_then(Value::as_u64)
        .and_then(|qty| Quantity::new(qty).ok())
        .ok_or("qty must be a positive integer")?;

    Ok(LineItem::from_request(sku, quantity, raw.clone()))
}

/// `qty` を優先し、なければ別名の `quantity` を使う
fn quantity_field(item: &Map<String, Value>) -> Option<&Value> {
    item.get("qty").or_else(|| item.get("quantity"))
}
