//! # インフラ層エラー定義
//!
//! 契約ドキュメント（OpenAPI）の読み込み・解析で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **起動時専用**: 契約の読み込みはプロセス起動時にのみ行う。
//!   リクエスト処理中にこのエラーが発生することはない
//! - **SpanTrace 自動捕捉**: `From` 実装や convenience constructor で
//!   エラー生成時の呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`ContractError`]: エラー種別（[`ContractErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`ContractErrorKind`]: エラーの具体的な種別（Io, Yaml, Json 等）

use std::{fmt, path::Path};

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// 契約ドキュメントの読み込みで発生するエラー
///
/// エラー種別に応じた処理には [`kind()`](ContractError::kind) を使用する。
#[derive(Display)]
#[display("{kind}")]
pub struct ContractError {
    kind:       ContractErrorKind,
    span_trace: SpanTrace,
}

/// 契約エラーの種別
#[derive(Debug, Error)]
pub enum ContractErrorKind {
    /// ファイルの読み込み失敗
    #[error("契約ファイルを読み込めません: {path}: {source}")]
    Io {
        path:   String,
        #[source]
        source: std::io::Error,
    },

    /// YAML の構文エラー
    #[error("YAML の解析に失敗しました: {0}")]
    Yaml(#[source] serde_yaml::Error),

    /// JSON の構文エラー
    #[error("JSON の解析に失敗しました: {0}")]
    Json(#[source] serde_json::Error),

    /// 拡張子から形式を判別できない
    #[error("未対応の契約ファイル形式です: {0}")]
    UnsupportedFormat(String),

    /// OpenAPI ドキュメントとして不正な構造
    #[error("契約ドキュメントが不正です: {0}")]
    InvalidDocument(String),
}

// ===== ContractError のメソッド =====

impl ContractError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &ContractErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    // ===== Convenience constructors =====

    /// ファイル読み込みエラーを生成する
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::from_kind(ContractErrorKind::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// 未対応形式エラーを生成する
    pub fn unsupported_format(path: &Path) -> Self {
        Self::from_kind(ContractErrorKind::UnsupportedFormat(
            path.display().to_string(),
        ))
    }

    /// 不正ドキュメントエラーを生成する
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::from_kind(ContractErrorKind::InvalidDocument(msg.into()))
    }

    fn from_kind(kind: ContractErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for ContractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<serde_yaml::Error> for ContractError {
    fn from(source: serde_yaml::Error) -> Self {
        Self::from_kind(ContractErrorKind::Yaml(source))
    }
}

impl From<serde_json::Error> for ContractError {
    fn from(source: serde_json::Error) -> Self {
        Self::from_kind(ContractErrorKind::Json(source))
    }
}
