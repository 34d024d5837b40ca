//! # lsb_stego 库
//!
//! 本库包含帧格式 LSB 隐写的核心逻辑：位编解码、槽位置换与分配、
//! 帧编解码，以及嵌入和提取。图像读写与命令行属于外围协作者。

// 声明库包含的所有模块。

pub mod bits;
pub mod carrier;
pub mod cli;
pub mod constants;
pub mod error;
pub mod frame;
pub mod handler;
pub mod permutation;
pub mod slots;
pub mod steganography;

pub use bits::BitDepth;
pub use error::{EmbedError, FrameError, HeaderFault, StegaError};
pub use steganography::{LsbCodec, embed, extract};
