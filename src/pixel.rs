//! # 像素缓冲区模块
//!
//! 定义编解码器唯一的输入/输出类型 [`PixelBuffer`]，以及用于寻址单个通道字节的
//! [`BitCursor`]。所有对扁平字节数组的访问都经过游标，避免手工计算偏移量。

use crate::constants::{CHANNELS, SIGNATURE_PIXELS};
use crate::error::BufferError;
use image::RgbaImage;

/// RGBA 像素内的通道角色，取值即通道在像素内的字节偏移。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
    Alpha = 3,
}

/// 指向某个像素某个通道的游标。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitCursor {
    pub pixel: usize,
    pub role: Channel,
}

impl BitCursor {
    pub const fn new(pixel: usize, role: Channel) -> Self {
        Self { pixel, role }
    }

    /// 第 `pixel` 个像素的蓝色通道，承载消息位。
    pub const fn message(pixel: usize) -> Self {
        Self::new(pixel, Channel::Blue)
    }

    /// 第 `pixel` 个像素的 Alpha 通道，承载签名。
    pub const fn signature(pixel: usize) -> Self {
        Self::new(pixel, Channel::Alpha)
    }

    /// 游标在扁平 RGBA 数组中的字节下标。
    pub const fn byte_index(self) -> usize {
        self.pixel * CHANNELS + self.role as usize
    }
}

/// 按行优先顺序排列的 RGBA 像素数据，每像素 4 字节 `[R, G, B, A]`。
///
/// 只能通过 [`PixelBuffer::new`] 等构造函数创建，因此
/// `data.len() == width * height * 4` 始终成立。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// 用给定尺寸和原始 RGBA 数据创建缓冲区。
    ///
    /// # Errors
    ///
    /// * 尺寸相乘溢出时返回 [`BufferError::DimensionsOverflow`]。
    /// * 数据长度与尺寸不符时返回 [`BufferError::LengthMismatch`]。
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BufferError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .ok_or(BufferError::DimensionsOverflow { width, height })?;

        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// 创建所有字节都为 `fill` 的缓冲区。
    pub fn filled(width: u32, height: u32, fill: u8) -> Result<Self, BufferError> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .ok_or(BufferError::DimensionsOverflow { width, height })?;
        Self::new(width, height, vec![fill; len])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// 读取游标所指的通道字节。游标越界时返回 `None`。
    pub fn get(&self, cursor: BitCursor) -> Option<u8> {
        self.data.get(cursor.byte_index()).copied()
    }

    /// 游标所指通道字节的可变引用。
    pub fn get_mut(&mut self, cursor: BitCursor) -> Option<&mut u8> {
        self.data.get_mut(cursor.byte_index())
    }

    /// 确认缓冲区至少有容纳签名所需的像素数。
    pub fn ensure_signable(&self) -> Result<(), BufferError> {
        let pixels = self.pixel_count();
        if pixels < SIGNATURE_PIXELS {
            return Err(BufferError::TooSmall {
                pixels,
                required: SIGNATURE_PIXELS,
            });
        }
        Ok(())
    }
}

impl TryFrom<RgbaImage> for PixelBuffer {
    type Error = BufferError;

    fn try_from(image: RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }
}

impl TryFrom<PixelBuffer> for RgbaImage {
    type Error = BufferError;

    fn try_from(buffer: PixelBuffer) -> Result<Self, Self::Error> {
        let (width, height) = (buffer.width, buffer.height);
        let actual = buffer.data.len();
        RgbaImage::from_raw(width, height, buffer.data).ok_or(BufferError::LengthMismatch {
            width,
            height,
            expected: width as usize * height as usize * CHANNELS,
            actual,
        })
    }
}
