//! # 错误类型
//!
//! 隐写核心返回的类型化错误。核心从不吞掉错误，
//! 由边界层 (`handler`) 附加上下文后报告给用户。

use std::path::PathBuf;
use thiserror::Error;

/// 嵌入阶段 (以及载体被截断时的提取阶段) 的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmbedError {
    /// 帧所需的槽位数超过了载体能提供的槽位数。
    #[error("Capacity exceeded: {required} slots required, {available} available")]
    CapacityExceeded { required: usize, available: usize },

    /// 位深度不在 1..=8 范围内。
    #[error("Invalid bit depth {0}: must be between 1 and 8")]
    InvalidBitDepth(u8),
}

/// 帧头解析失败的具体原因。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderFault {
    /// 在扫描上限内没有遇到分隔符。
    #[error("no delimiter within {scanned} scanned characters")]
    DelimiterNotFound { scanned: usize },
    /// 分隔符之前的内容不是非负十进制整数。
    #[error("length field {0:?} is not a number")]
    NotANumber(String),
}

/// 帧格式错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("Malformed frame header: {0}")]
    MalformedHeader(HeaderFault),
}

/// 库的顶层错误类型。
#[derive(Error, Debug)]
pub enum StegaError {
    /// 无法读取或解码载体图像。
    #[error("Carrier unavailable: {}", path.display())]
    CarrierUnavailable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// 无法把载体写回磁盘。
    #[error("Unable to save carrier: {}", path.display())]
    CarrierNotSaved {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Embed(#[from] EmbedError),

    #[error(transparent)]
    Frame(#[from] FrameError),
}
