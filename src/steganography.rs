//! # 隐写核心
//!
//! 按槽位把帧写入载体的低位，或从载体低位读回帧。
//! 两个方向都是对内存缓冲区的纯同步变换，不持有载体的任何引用。

use std::ops::Range;

use log::debug;

use crate::bits::{BitDepth, char_to_units, units_to_char};
use crate::error::{EmbedError, StegaError};
use crate::frame::{decode_header, encode_frame, frame_len, max_payload};
use crate::slots::SlotAllocator;

/// 嵌入与提取共用的参数：位深度与可选的置换密钥。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LsbCodec {
    pub depth: BitDepth,
    pub seed: Option<u64>,
}

impl LsbCodec {
    pub fn new(depth: BitDepth, seed: Option<u64>) -> Self {
        Self { depth, seed }
    }

    /// 长度为 `carrier_len` 的载体提供的槽位数。
    pub fn total_slots(&self, carrier_len: usize) -> usize {
        carrier_len / self.depth.units_per_symbol()
    }

    /// 长度为 `payload_len` 的消息需要的槽位数。
    pub fn required_slots(&self, payload_len: usize) -> usize {
        frame_len(payload_len)
    }

    /// 载体能隐藏的最长消息长度。
    pub fn capacity(&self, carrier_len: usize) -> Option<usize> {
        max_payload(self.total_slots(carrier_len))
    }

    pub fn embed(&self, carrier: &mut [u8], message: &[u8]) -> Result<(), EmbedError> {
        embed(carrier, message, self.seed, self.depth)
    }

    pub fn extract(&self, carrier: &[u8]) -> Result<Vec<u8>, StegaError> {
        extract(carrier, self.seed, self.depth)
    }
}

/// 把 `message` 封装成帧后写入载体。
///
/// 容量检查在修改载体之前完成，失败时载体保持原样。
/// 每个被写入的存储单元只替换低 `B` 位，高位保持不变；未被选中的单元不受影响。
///
/// # Errors
///
/// 帧长度超过可用槽位数时返回 [`EmbedError::CapacityExceeded`]。
pub fn embed(
    carrier: &mut [u8],
    message: &[u8],
    seed: Option<u64>,
    depth: BitDepth,
) -> Result<(), EmbedError> {
    let frame = encode_frame(message);
    let slots = SlotAllocator::new(carrier.len(), depth, seed);
    slots.ensure_capacity(frame.len())?;

    debug!(
        "embedding {} frame characters into {} slots (B={}, keyed={})",
        frame.len(),
        slots.total_slots(),
        depth.bits(),
        slots.is_keyed()
    );

    for (slot, &c) in frame.iter().enumerate() {
        let offsets = slot_offsets(&slots, slot)?;
        write_symbol(&mut carrier[offsets], c, depth);
    }

    Ok(())
}

/// 从载体中读回帧并返回载荷。
///
/// 帧头扫描以总槽位数为上限。
///
/// # Errors
///
/// * 扫描上限内没有分隔符，或长度字段不是数字：[`crate::error::FrameError::MalformedHeader`]。
/// * 剩余槽位不足以容纳声明的载荷：[`EmbedError::CapacityExceeded`]。
pub fn extract(carrier: &[u8], seed: Option<u64>, depth: BitDepth) -> Result<Vec<u8>, StegaError> {
    let slots = SlotAllocator::new(carrier.len(), depth, seed);

    let mut symbols = (0..slots.total_slots()).map(|slot| {
        slots
            .offsets_for_slot(slot)
            .map_or(0, |offsets| read_symbol(&carrier[offsets], depth))
    });

    let header = decode_header(&mut symbols)?;
    let required = header.header_len.saturating_add(header.declared_len);
    slots.ensure_capacity(required)?;

    debug!(
        "extracting {} payload characters after a {}-character header",
        header.declared_len, header.header_len
    );

    Ok(symbols.take(header.declared_len).collect())
}

fn slot_offsets(slots: &SlotAllocator, slot: usize) -> Result<Range<usize>, EmbedError> {
    slots
        .offsets_for_slot(slot)
        .ok_or(EmbedError::CapacityExceeded {
            required: slot + 1,
            available: slots.total_slots(),
        })
}

/// 把一个字符写入一组存储单元的低 `B` 位。
fn write_symbol(units: &mut [u8], c: u8, depth: BitDepth) {
    let high = depth.high_mask();
    for (unit, value) in units.iter_mut().zip(char_to_units(c, depth)) {
        *unit = (*unit & high) | value;
    }
}

/// 从一组存储单元的低 `B` 位读回一个字符。
fn read_symbol(units: &[u8], depth: BitDepth) -> u8 {
    units_to_char(units.iter().copied(), depth)
}
