//! # 帧编解码模块
//!
//! 帧格式为 `十进制长度 + '%' + 载荷`，提取端据此自描述地得知载荷长度。

use log::trace;

use crate::constants::FRAME_FLAG;
use crate::error::{FrameError, HeaderFault};

/// 解析出的帧头。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// 帧头声明的载荷字符数。
    pub declared_len: usize,
    /// 帧头本身 (含分隔符) 占用的字符数，即载荷起始位置。
    pub header_len: usize,
}

/// 构造帧：`len(message) + '%' + message`。
pub fn encode_frame(message: &[u8]) -> Vec<u8> {
    let header = message.len().to_string();
    let mut frame = Vec::with_capacity(header.len() + 1 + message.len());
    frame.extend_from_slice(header.as_bytes());
    frame.push(FRAME_FLAG);
    frame.extend_from_slice(message);
    frame
}

/// 长度为 `payload_len` 的消息编码后的帧长度 (字符数)。
pub fn frame_len(payload_len: usize) -> usize {
    decimal_digits(payload_len) + 1 + payload_len
}

/// 在 `total_slots` 个槽位中能容纳的最长消息长度。
///
/// 连空消息的帧 (`"0%"`) 都放不下时返回 `None`。
pub fn max_payload(total_slots: usize) -> Option<usize> {
    let mut candidate = total_slots.checked_sub(2)?;
    while frame_len(candidate) > total_slots {
        candidate -= 1;
    }
    Some(candidate)
}

/// 从字符流中逐个读取，直到遇到分隔符，解析出声明的载荷长度。
///
/// 调用返回后，`stream` 停在载荷的第一个字符之前。
///
/// # Errors
///
/// * 字符流耗尽仍未遇到分隔符：[`HeaderFault::DelimiterNotFound`]。
/// * 分隔符之前的内容不是非负十进制整数：[`HeaderFault::NotANumber`]。
pub fn decode_header<I>(stream: &mut I) -> Result<FrameHeader, FrameError>
where
    I: Iterator<Item = u8>,
{
    let mut digits = Vec::new();
    loop {
        match stream.next() {
            Some(FRAME_FLAG) => break,
            Some(c) => digits.push(c),
            None => {
                return Err(FrameError::MalformedHeader(
                    HeaderFault::DelimiterNotFound {
                        scanned: digits.len(),
                    },
                ));
            }
        }
    }

    let declared_len = parse_length(&digits)?;
    trace!("decoded frame header: {declared_len} payload characters");
    Ok(FrameHeader {
        declared_len,
        header_len: digits.len() + 1,
    })
}

fn parse_length(digits: &[u8]) -> Result<usize, FrameError> {
    let not_a_number = || {
        FrameError::MalformedHeader(HeaderFault::NotANumber(
            String::from_utf8_lossy(&digits[..digits.len().min(32)]).into_owned(),
        ))
    };

    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(not_a_number());
    }
    std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(not_a_number)
}

fn decimal_digits(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}
