//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 位深度与置换密钥是嵌入和提取双方必须一致的全部参数。

use clap::{Args, Parser};
use std::path::PathBuf;

use crate::constants::{DEFAULT_ASSETS_DIR, DEFAULT_BIT_DEPTH};

/// 基于帧格式的 LSB 隐写工具，支持可调位深度与基于密钥的槽位置换。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "基于帧格式的 LSB 隐写工具。消息以 `长度%内容` 的帧写入像素字节的低位，可选整数密钥打乱字符的存放位置。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 list (列出载体)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 把文本隐藏到图像中。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文本。
    Recover(RecoverArgs),

    /// 列出目录中可用作载体的图像。
    List(ListArgs),
}

/// 嵌入与提取共用的编解码参数。
#[derive(Args, Debug, Clone, Copy)]
pub struct CodecArgs {
    /// 每个像素字节使用的低位数量 (1-8)。
    #[arg(short, long, default_value_t = DEFAULT_BIT_DEPTH, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub bits: u8,

    /// 置换密钥；省略时按顺序存放。
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl Default for CodecArgs {
    fn default() -> Self {
        Self {
            bits: DEFAULT_BIT_DEPTH,
            seed: None,
        }
    }
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long, required_unless_present = "message", conflicts_with = "message")]
    pub text: Option<PathBuf>,

    /// 直接在命令行中给出要隐藏的文本。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 结果图像的输出路径，默认为输入文件名加 `_lsb_embedded` 后缀。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    #[command(flatten)]
    pub codec: CodecArgs,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复文本的输出路径，默认为输入文件名加 `_recovered.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    #[command(flatten)]
    pub codec: CodecArgs,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'list' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// 要搜索的目录。
    #[arg(short, long, default_value = DEFAULT_ASSETS_DIR)]
    pub dir: PathBuf,
}
