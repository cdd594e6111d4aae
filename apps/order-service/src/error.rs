//! # Order Service エラー定義
//!
//! Order Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! クライアント起因のエラー（ペイロード不正・契約違反）は 400、
//! サーバー起因のエラー（自身のレスポンスが契約を満たさない等）は 500 を返す。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dofd_shared::{ErrorResponse, event_log::error as log_error};
use thiserror::Error;

use crate::usecase::{CustomerIssueError, OrderIssueError};

/// Order Service で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// 必須フィールドの欠落・空、または JSON として解釈できないボディ
    #[error("不正なペイロード: {0}")]
    InvalidPayload(String),

    /// 契約（スキーマ）違反
    #[error("契約違反: {0}")]
    SchemaViolation(String),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<OrderIssueError> for ServiceError {
    fn from(err: OrderIssueError) -> Self {
        match err {
            OrderIssueError::InvalidPayload(msg) => Self::InvalidPayload(msg),
            OrderIssueError::SchemaViolation(msg) => Self::SchemaViolation(msg),
        }
    }
}

impl From<CustomerIssueError> for ServiceError {
    fn from(err: CustomerIssueError) -> Self {
        match err {
            CustomerIssueError::InvalidPayload(msg) => Self::InvalidPayload(msg),
            CustomerIssueError::SchemaViolation(msg) => Self::SchemaViolation(msg),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServiceError::InvalidPayload(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::invalid_payload(msg))
            }
            ServiceError::SchemaViolation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::schema_violation(msg))
            }
            ServiceError::Internal(msg) => {
                tracing::error!(
                    error.kind = log_error::kind::INTERNAL,
                    "内部エラー: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error(),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
