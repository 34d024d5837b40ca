//! # 槽位置换
//!
//! 由整数密钥确定性地生成槽位的随机排列。
//! 相同的 `(size, seed)` 总是得到相同的排列，提取端据此还原嵌入时的映射。

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// 槽位索引到基准槽位的双射。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    slots: Vec<usize>,
}

impl Permutation {
    /// 对 `[0, size)` 做 Fisher-Yates 洗牌。
    ///
    /// 每次调用都用 `seed` 重新构造本地随机数生成器，不影响任何共享状态。
    pub fn generate(size: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut slots: Vec<usize> = (0..size).collect();
        slots.shuffle(&mut rng);
        Self { slots }
    }

    /// 第 `slot` 个逻辑槽位对应的基准槽位。
    #[inline]
    pub fn base_slot(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.slots
    }
}
