//! # 位编解码模块
//!
//! 把一个 8 位字符拆分成若干个 `B` 位的小块 (低位块在前)，
//! 以及把这些小块重新拼回字符。

use crate::constants::{BITS_PER_CHAR, DEFAULT_BIT_DEPTH};
use crate::error::EmbedError;

/// 每个存储单元用于承载数据的低位数量 `B`，取值 1..=8。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitDepth(u8);

impl BitDepth {
    /// 校验并构造位深度。
    ///
    /// # Errors
    ///
    /// `bits` 不在 1..=8 之间时返回 [`EmbedError::InvalidBitDepth`]。
    pub fn new(bits: u8) -> Result<Self, EmbedError> {
        if (1..=8).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(EmbedError::InvalidBitDepth(bits))
        }
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// 编码一个字符所需的存储单元数 `U = ceil(8 / B)`。
    pub fn units_per_symbol(self) -> usize {
        BITS_PER_CHAR.div_ceil(u32::from(self.0)) as usize
    }

    /// 低 `B` 位的掩码。
    pub fn low_mask(self) -> u8 {
        u8::MAX >> (8 - self.0)
    }

    /// 需要保留的高 `8 - B` 位的掩码。
    pub fn high_mask(self) -> u8 {
        !self.low_mask()
    }
}

impl Default for BitDepth {
    fn default() -> Self {
        Self(DEFAULT_BIT_DEPTH)
    }
}

/// 把字符拆成 `U` 个取值在 `[0, 2^B)` 的块，第 `i` 块为 `(c >> (B * i)) & mask`。
pub fn char_to_units(c: u8, depth: BitDepth) -> impl Iterator<Item = u8> {
    let shift = u32::from(depth.bits());
    let mask = depth.low_mask();
    (0..depth.units_per_symbol() as u32).map(move |i| ((u32::from(c) >> (shift * i)) as u8) & mask)
}

/// `char_to_units` 的逆运算：把 `values[i] << (B * i)` 按位或在一起。
///
/// 只取每个值的低 `B` 位，超出 8 位的部分被截断。
pub fn units_to_char<I>(values: I, depth: BitDepth) -> u8
where
    I: IntoIterator<Item = u8>,
{
    let shift = u32::from(depth.bits());
    let mask = depth.low_mask();
    values
        .into_iter()
        .take(depth.units_per_symbol())
        .enumerate()
        .fold(0u32, |acc, (i, value)| {
            acc | (u32::from(value & mask) << (shift * i as u32))
        }) as u8
}
