//! # OpenAPI 仕様定義
//!
//! utoipa を使用して Order Service の OpenAPI 仕様を Rust の型から生成する。
//! `ApiDoc::openapi()` で OpenAPI ドキュメントを取得できる。
//!
//! 実行時の契約検証に使う `contracts/openapi.yaml` とは別物で、こちらは
//! 実装から導出した参照用ドキュメントである。

use utoipa::OpenApi;

use crate::handler::{customer, health, order};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DoFD Order Service API",
        version = "0.1.0",
        description = "契約検証付きの注文受付・顧客登録 API"
    ),
    paths(
        // health
        health::health_check,
        health::readiness_check,
        // orders
        order::create_order,
        // customers
        customer::create_customer,
    ),
    components(schemas(
        dofd_shared::ErrorResponse,
        order::CreateOrderRequest,
        order::LineItemRequest,
        order::OrderDto,
        customer::CustomerCreateRequest,
        customer::CustomerCreatedDto,
    )),
    tags(
        (name = "health", description = "ヘルスチェック"),
        (name = "orders", description = "注文受付"),
        (name = "customers", description = "顧客登録"),
    )
)]
pub struct ApiDoc;
