//! # IdGenerator（識別子プロバイダ）
//!
//! ユースケース層での `Uuid::new_v4()` 直接呼び出しを置き換え、
//! テストで決定的な識別子を注入可能にするための抽象化。
//!
//! 本番では [`RandomIdGenerator`]（UUID v4、実効 122 bit の乱数）を使う。
//! 呼び出し間に順序保証や依存関係はない。

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// 新しい識別子を提供するトレイト
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Uuid;
}

/// 暗号論的乱数から UUID v4 を生成する実装
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// 1 から始まる連番を UUID として返すテスト用実装
///
/// `00000000-0000-0000-0000-000000000001`, `...0002`, ... の順に返す。
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// これまでに採番した件数
    pub fn issued(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> Uuid {
        let next = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Uuid::from_u128(u128::from(next))
    }
}

/// 常に同じ UUID を返すテスト用実装
///
/// 識別子の衝突を意図的に起こしたい場合に使う。
#[derive(Debug, Clone, Copy)]
pub struct FixedIdGenerator {
    id: Uuid,
}

impl FixedIdGenerator {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl IdGenerator for FixedIdGenerator {
    fn generate(&self) -> Uuid {
        self.id
    }
}
