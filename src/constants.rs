/// 默认每个像素字节用于承载数据的低位数量。
pub const DEFAULT_BIT_DEPTH: u8 = 2;

/// 帧头中长度字段与载荷之间的分隔符。
/// 长度字段只包含十进制数字，因此不会与分隔符冲突。
pub const FRAME_FLAG: u8 = b'%';

/// 每个字符固定按 8 bits 处理。
pub const BITS_PER_CHAR: u32 = 8;

/// 未指定输出路径时，隐写图像文件名追加的后缀。
pub const EMBEDDED_SUFFIX: &str = "_lsb_embedded";

/// 未指定输出路径时，恢复文本文件名追加的后缀。
pub const RECOVERED_SUFFIX: &str = "_recovered";

/// 可以无损写回的图像扩展名，其余格式的输出一律改为 PNG。
pub const LOSSLESS_EXTENSIONS: &[&str] = &["png", "bmp", "tif", "tiff", "webp", "qoi"];

/// `list` 子命令识别的载体图像扩展名。
pub const CARRIER_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "bmp", "tif", "tiff", "webp", "qoi",
];

/// `list` 子命令的默认目录。
pub const DEFAULT_ASSETS_DIR: &str = "./assets";
