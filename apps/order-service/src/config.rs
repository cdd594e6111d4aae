//! # Order Service 設定
//!
//! 環境変数から Order Service サーバーの設定を読み込む。
//!
//! 読み込みは [`ServiceConfig::from_lookup`] に集約し、`from_env` は
//! `std::env::var` を渡すだけの薄いラッパーとする。

use std::{env, path::PathBuf, str::FromStr};

use strum::{Display, EnumString, IntoStaticStr};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CONTRACT_PATH: &str = "contracts/openapi.yaml";

/// リクエストの検証方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ValidationMode {
    /// 手書きのフィールド検査のみ
    #[default]
    Basic,
    /// フィールド検査の後に OpenAPI 契約で検証する
    Contract,
}

/// 設定読み込みのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} は有効なポート番号である必要があります: {value}")]
    InvalidPort { name: &'static str, value: String },

    #[error("{name} は basic または contract である必要があります: {value}")]
    InvalidValidationMode { name: &'static str, value: String },
}

/// Order Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// バインドアドレス
    pub host:            String,
    /// ポート番号
    pub port:            u16,
    /// 検証方式
    pub validation_mode: ValidationMode,
    /// 契約ドキュメントのパス（`validation_mode = contract` の場合のみ使用）
    pub contract_path:   PathBuf,
}

impl ServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 未設定の項目はデフォルト値を使う。値が不正な場合はエラーを返す。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("ORDER_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidPort {
                name: "ORDER_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let validation_mode = match lookup("VALIDATION_MODE") {
            Some(value) => ValidationMode::from_str(value.trim()).map_err(|_| {
                ConfigError::InvalidValidationMode {
                    name: "VALIDATION_MODE",
                    value,
                }
            })?,
            None => ValidationMode::default(),
        };

        Ok(Self {
            host: lookup("ORDER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            validation_mode,
            contract_path: lookup("CONTRACT_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_CONTRACT_PATH), PathBuf::from),
        })
    }
}
