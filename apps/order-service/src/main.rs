//! # Order Service サーバー
//!
//! 注文受付・顧客登録の HTTP サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `ORDER_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `ORDER_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `VALIDATION_MODE` | No | `basic`（デフォルト）または `contract` |
//! | `CONTRACT_PATH` | No | 契約ドキュメントのパス（デフォルト: `contracts/openapi.yaml`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト） |
//! | `RUST_LOG` | No | ログフィルタ |
//!
//! ## 起動方法
//!
//! ```bash
//! # basic モード
//! cargo run -p dofd-order-service
//!
//! # contract モード
//! VALIDATION_MODE=contract cargo run -p dofd-order-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use dofd_domain::{IdGenerator, id_generator::RandomIdGenerator};
use dofd_infra::{ContractValidator, OpenApiContract};
use dofd_order_service::{
    app_builder::build_app,
    config::{ServiceConfig, ValidationMode},
    handler::OrderState,
};
use dofd_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// アプリケーションのエントリーポイント
///
/// 1. `.env` の読み込みとトレーシング初期化
/// 2. 設定の読み込み
/// 3. 契約モードでは契約ドキュメントを読み込む（失敗したら起動しない）
/// 4. ルーターの構築とサーバー起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("order-service");
    init_tracing(&tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "order-service").entered();

    let config = ServiceConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        validation_mode = %config.validation_mode,
        "Order Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let contract = match config.validation_mode {
        ValidationMode::Basic => None,
        ValidationMode::Contract => {
            let contract = OpenApiContract::load(&config.contract_path).with_context(|| {
                format!(
                    "契約ドキュメントの読み込みに失敗しました: {}",
                    config.contract_path.display()
                )
            })?;
            tracing::info!(
                path = %config.contract_path.display(),
                operations = contract.operation_ids().count(),
                "契約ドキュメントを読み込みました"
            );
            Some(Arc::new(ContractValidator::new(contract)))
        }
    };

    let id_generator: Arc<dyn IdGenerator> = Arc::new(RandomIdGenerator);
    let app = build_app(Arc::new(OrderState::new(contract, id_generator)));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("不正なバインドアドレス: {}:{}", config.host, config.port))?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Order Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
