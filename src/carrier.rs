//! # 载体读写
//!
//! 把图像文件解码为按行优先、通道交错排列的扁平字节缓冲区，
//! 并记住原始形状以便写回。缓冲区长度在加载后固定不变。

use std::path::Path;

use image::{ColorType, DynamicImage};
use log::debug;

use crate::error::StegaError;

/// 载体的原始形状。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub width: u32,
    pub height: u32,
    pub color: ColorType,
}

/// 已解码的载体：扁平存储单元加上形状。
#[derive(Debug, Clone)]
pub struct Carrier {
    units: Vec<u8>,
    shape: Shape,
}

impl Carrier {
    /// 读取并解码图像。
    ///
    /// 8 位的灰度、灰度+透明、RGB、RGBA 图像保留原始通道布局，其他类型先转换为 RGBA8。
    pub fn load(path: &Path) -> Result<Self, StegaError> {
        let image = image::open(path).map_err(|source| StegaError::CarrierUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let carrier = Self::from_image(image);
        debug!(
            "loaded carrier {}: {}x{} {:?}, {} units",
            path.display(),
            carrier.shape.width,
            carrier.shape.height,
            carrier.shape.color,
            carrier.units.len()
        );
        Ok(carrier)
    }

    pub fn from_image(image: DynamicImage) -> Self {
        let image = match image.color() {
            ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => image,
            _ => DynamicImage::ImageRgba8(image.to_rgba8()),
        };
        let shape = Shape {
            width: image.width(),
            height: image.height(),
            color: image.color(),
        };
        Self {
            units: image.into_bytes(),
            shape,
        }
    }

    /// 按原始形状写回图像，格式由扩展名决定。
    pub fn save(&self, path: &Path) -> Result<(), StegaError> {
        image::save_buffer(
            path,
            &self.units,
            self.shape.width,
            self.shape.height,
            self.shape.color,
        )
        .map_err(|source| StegaError::CarrierNotSaved {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn units(&self) -> &[u8] {
        &self.units
    }

    /// 可变访问存储单元；切片无法改变缓冲区长度。
    pub fn units_mut(&mut self) -> &mut [u8] {
        &mut self.units
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
