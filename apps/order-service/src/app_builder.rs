//! # Order Service アプリケーション構築
//!
//! ルーター定義とミドルウェアの組み立てを担当する。
//! `main.rs` は設定読み込みと State の初期化、サーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use dofd_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{OrderState, create_customer, create_order, health_check, readiness_check};

/// ルーターを構築する
///
/// Request ID + TraceLayer により、すべての HTTP リクエストに request_id が付与され
/// ログに自動注入される。レイヤーは下から順に外側になる。
pub fn build_app(state: Arc<OrderState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .route("/orders", post(create_order))
        .route("/customers", post(create_customer))
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
