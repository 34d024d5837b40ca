//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `list` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::bits::BitDepth;
use crate::carrier::Carrier;
use crate::cli::{CodecArgs, HideArgs, ListArgs, RecoverArgs};
use crate::constants::{
    CARRIER_EXTENSIONS, EMBEDDED_SUFFIX, LOSSLESS_EXTENSIONS, RECOVERED_SUFFIX,
};
use crate::steganography::LsbCodec;
use anyhow::{Context, Result};
use colored::Colorize;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和文本、检查隐写空间是否足够、调用隐写核心函数写入帧，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与编解码参数的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件。
/// * 图像没有足够的槽位来容纳整个帧。
/// * 输出路径是有损格式 (如 JPEG)，会破坏隐藏的数据。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let codec = build_codec(args.codec)?;

    let mut carrier = Carrier::load(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    anyhow::ensure!(
        !carrier.is_empty(),
        "The image contains no pixel data: {}",
        args.image.to_string_lossy().red().bold()
    );

    let text = match (&args.text, &args.message) {
        (Some(path), _) => fs::read(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        })?,
        (None, Some(message)) => message.clone().into_bytes(),
        (None, None) => anyhow::bail!("Either a text file or a message must be provided."),
    };

    let required_space = codec.required_slots(text.len());
    let available_space = codec.total_slots(carrier.len());

    anyhow::ensure!(
        available_space >= required_space,
        "Not enough space in the image to hide the text. \nRequired: {}, Available: {} (max message length: {})",
        required_space.to_string().red().bold(),
        available_space.to_string().green().bold(),
        codec.capacity(carrier.len()).unwrap_or(0).to_string().green()
    );

    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_embedded_path(&args.image));
    anyhow::ensure!(
        has_extension(&dest, LOSSLESS_EXTENSIONS),
        "Output format would destroy the hidden data: {} \nUse a lossless format such as png, bmp, tiff, webp or qoi.",
        dest.to_string_lossy().red().bold()
    );
    ensure_writable(&dest, args.force)?;

    debug!(
        "hiding {} bytes in {} using {}/{} slots",
        text.len(),
        args.image.display(),
        required_space,
        available_space
    );

    codec.embed(carrier.units_mut(), &text).with_context(|| {
        "Failed to hide the message in the image. \nThe image might not have enough capacity."
    })?;

    carrier.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、用相同的位深度和密钥解析帧，
/// 最后将恢复的文本内容写入目标文本文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 图像中没有可解析的帧，或参数与嵌入时不一致。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let codec = build_codec(args.codec)?;

    let carrier = Carrier::load(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let text = codec.extract(carrier.units()).with_context(|| {
        format!(
            "Failed to recover the message from '{}'. \nThe image may not contain a hidden message, or the bit depth/seed differ from those used to hide it.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let dest = args
        .text
        .clone()
        .unwrap_or_else(|| default_recovered_path(&args.image));
    ensure_writable(&dest, args.force)?;

    fs::write(&dest, &text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'List' 命令：按编号列出目录中的载体图像。
pub fn handle_list(args: ListArgs) -> Result<()> {
    let carriers = list_carriers(&args.dir)?;

    if carriers.is_empty() {
        println!(
            "No images found in the directory: {}",
            args.dir.to_string_lossy().yellow().bold()
        );
        return Ok(());
    }

    println!("Available images:");
    for (idx, path) in carriers.iter().enumerate() {
        let name = path.file_name().unwrap_or(path.as_os_str());
        println!(
            "{}. {}",
            (idx + 1).to_string().green(),
            name.to_string_lossy()
        );
    }
    Ok(())
}

/// 返回 `dir` 中扩展名受支持的图像文件，按路径排序。
pub fn list_carriers(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| {
        format!(
            "Unable to read directory: {}",
            dir.to_string_lossy().red().bold()
        )
    })?;

    let mut carriers = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<PathBuf>>>()?
        .into_iter()
        .filter(|path| path.is_file() && has_extension(path, CARRIER_EXTENSIONS))
        .collect::<Vec<_>>();
    carriers.sort();
    Ok(carriers)
}

/// 未指定输出时的隐写图像路径：`<stem>_lsb_embedded.<ext>`。
///
/// 有损格式 (如 JPEG) 会破坏低位数据，因此改用 PNG。
pub fn default_embedded_path(image: &Path) -> PathBuf {
    let ext = image
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .filter(|e| LOSSLESS_EXTENSIONS.contains(&e.as_str()))
        .unwrap_or_else(|| "png".to_string());
    sibling_with_suffix(image, EMBEDDED_SUFFIX, &ext)
}

/// 未指定输出时的恢复文本路径：`<stem>_recovered.txt`。
pub fn default_recovered_path(image: &Path) -> PathBuf {
    sibling_with_suffix(image, RECOVERED_SUFFIX, "txt")
}

fn sibling_with_suffix(path: &Path, suffix: &str, ext: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}{suffix}.{ext}"))
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|e| extensions.contains(&e.as_str()))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {} \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn build_codec(args: CodecArgs) -> Result<LsbCodec> {
    let depth = BitDepth::new(args.bits).context("Invalid --bits value")?;
    Ok(LsbCodec::new(depth, args.seed))
}
