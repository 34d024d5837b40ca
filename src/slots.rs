//! # 槽位分配
//!
//! 一个槽位是编码一个字符所需的 `U` 个存储单元。
//! 顺序模式下第 `s` 个槽位就是第 `s` 组单元；密钥模式下先经过置换，
//! 但同一字符的 `U` 个单元始终作为整体移动。

use std::ops::Range;

use crate::bits::BitDepth;
use crate::error::EmbedError;
use crate::permutation::Permutation;

/// 槽位到基准槽位的映射方式。
#[derive(Debug, Clone)]
pub enum SlotMap {
    /// 恒等映射，无密钥。
    Sequential,
    /// 由整数密钥生成的置换。
    Keyed(Permutation),
}

/// 把逻辑槽位索引映射到载体中的存储单元位置。
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    units_per_symbol: usize,
    total_slots: usize,
    map: SlotMap,
}

impl SlotAllocator {
    /// 为长度为 `carrier_len` 的载体构造分配器。
    ///
    /// 总槽位数为 `floor(carrier_len / U)`，末尾不足一个槽位的单元不会被使用。
    pub fn new(carrier_len: usize, depth: BitDepth, seed: Option<u64>) -> Self {
        let units_per_symbol = depth.units_per_symbol();
        let total_slots = carrier_len / units_per_symbol;
        let map = match seed {
            Some(seed) => SlotMap::Keyed(Permutation::generate(total_slots, seed)),
            None => SlotMap::Sequential,
        };
        Self {
            units_per_symbol,
            total_slots,
            map,
        }
    }

    pub fn total_slots(&self) -> usize {
        self.total_slots
    }

    pub fn is_keyed(&self) -> bool {
        matches!(self.map, SlotMap::Keyed(_))
    }

    /// 第 `slot` 个槽位占用的存储单元位置，越界时返回 `None`。
    pub fn offsets_for_slot(&self, slot: usize) -> Option<Range<usize>> {
        if slot >= self.total_slots {
            return None;
        }
        let base = match &self.map {
            SlotMap::Sequential => slot,
            SlotMap::Keyed(perm) => perm.base_slot(slot)?,
        };
        let start = base * self.units_per_symbol;
        Some(start..start + self.units_per_symbol)
    }

    /// 检查 `required` 个槽位是否放得下。
    ///
    /// # Errors
    ///
    /// 超出总槽位数时返回 [`EmbedError::CapacityExceeded`]。
    pub fn ensure_capacity(&self, required: usize) -> Result<(), EmbedError> {
        if required > self.total_slots {
            return Err(EmbedError::CapacityExceeded {
                required,
                available: self.total_slots,
            });
        }
        Ok(())
    }
}
