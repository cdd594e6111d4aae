//! # 顧客登録
//!
//! `POST /customers` で発行される顧客識別子と参照トークンを定義する。
//! 受付スコープでは永続化を行わないため、登録結果は採番された値のみを持つ。

use uuid::Uuid;

use crate::{id_generator::IdGenerator, order::CustomerId};

define_opaque_string! {
    /// 顧客名（値オブジェクト）
    ///
    /// 登録リクエストの検証にのみ使用し、保持しない。
    pub struct CustomerName {
        label: "顧客名",
    }
}

/// 顧客の参照トークン
///
/// `tok_` プレフィックス + UUID の 32 桁 16 進表記。
/// 個人情報の代わりに外部へ渡す不透明な参照として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct CustomerToken(String);

impl CustomerToken {
    const PREFIX: &'static str = "tok_";

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(format!("{}{}", Self::PREFIX, uuid.simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 顧客登録の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredCustomer {
    customer_id: CustomerId,
    token:       CustomerToken,
}

impl RegisteredCustomer {
    /// 顧客 ID とトークンを採番する
    ///
    /// 識別子プロバイダから 2 回採番する（1 回目: 顧客 ID、2 回目: トークン）。
    pub fn issue(generator: &dyn IdGenerator) -> Self {
        let customer_id = CustomerId::from_uuid(generator.generate());
        let token = CustomerToken::from_uuid(generator.generate());
        Self { customer_id, token }
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn token(&self) -> &CustomerToken {
        &self.token
    }
}
