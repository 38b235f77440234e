//! # 图像适配模块
//!
//! 编解码器只处理 [`PixelBuffer`]。把任意图像解码为缓冲区、再把缓冲区编码为
//! 可传输的图像，是由 [`PixelAdapter`] 注入的外部协作者完成的。
//!
//! 输出必须是无损格式：任何有损压缩都会破坏最低位中的数据。

use crate::constants::DEFAULT_MAX_WIDTH;
use crate::error::AdapterError;
use crate::pixel::PixelBuffer;
use image::{DynamicImage, ImageFormat, RgbaImage, imageops::FilterType};
use std::io::Cursor;

/// 图像字节与像素缓冲区之间的双向转换。
pub trait PixelAdapter {
    /// 把源图像字节解码为完整的 RGBA 缓冲区。
    fn rasterize(&self, source: &[u8]) -> Result<PixelBuffer, AdapterError>;

    /// 把缓冲区编码为无损图像字节。
    fn serialize(&self, buffer: &PixelBuffer) -> Result<Vec<u8>, AdapterError>;
}

/// 判断格式是否能原样保留每个像素的字节。
pub fn is_lossless(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png
            | ImageFormat::Bmp
            | ImageFormat::Tiff
            | ImageFormat::Qoi
            | ImageFormat::WebP
    )
}

/// 基于 `image` crate 的适配器。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageAdapter {
    max_width: Option<u32>,
    format: ImageFormat,
}

impl Default for ImageAdapter {
    fn default() -> Self {
        Self {
            max_width: Some(DEFAULT_MAX_WIDTH),
            format: ImageFormat::Png,
        }
    }
}

impl ImageAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置源图像的最大宽度，`None` 表示保持原尺寸。
    pub fn with_max_width(mut self, max_width: Option<u32>) -> Self {
        self.max_width = max_width.filter(|&width| width > 0);
        self
    }

    /// 设置输出格式。
    ///
    /// # Errors
    ///
    /// 有损格式返回 [`AdapterError::LossyFormat`]。
    pub fn with_format(mut self, format: ImageFormat) -> Result<Self, AdapterError> {
        if !is_lossless(format) {
            return Err(AdapterError::LossyFormat(format));
        }
        self.format = format;
        Ok(self)
    }

    fn fit_width(&self, image: DynamicImage) -> DynamicImage {
        match self.max_width {
            Some(max_width) if image.width() > max_width => {
                let ratio = f64::from(max_width) / f64::from(image.width());
                let height = ((f64::from(image.height()) * ratio).floor() as u32).max(1);
                log::debug!(
                    "resizing {}x{} source to {}x{}",
                    image.width(),
                    image.height(),
                    max_width,
                    height
                );
                image.resize_exact(max_width, height, FilterType::Triangle)
            }
            _ => image,
        }
    }
}

impl PixelAdapter for ImageAdapter {
    fn rasterize(&self, source: &[u8]) -> Result<PixelBuffer, AdapterError> {
        let image = image::load_from_memory(source)?;
        let rgba = self.fit_width(image).to_rgba8();
        Ok(PixelBuffer::try_from(rgba)?)
    }

    fn serialize(&self, buffer: &PixelBuffer) -> Result<Vec<u8>, AdapterError> {
        let image = RgbaImage::try_from(buffer.clone())?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), self.format)?;
        Ok(bytes)
    }
}
