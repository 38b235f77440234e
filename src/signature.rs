//! # 签名模块
//!
//! 在前 4 个像素的 Alpha 通道低 4 位中写入/检测签名 `STEG`。
//! 检测只读取 4 个字节，耗时与图像大小无关，用于在完整提取之前快速排除。

use crate::constants::{SIGNATURE, SIGNATURE_NIBBLE_MASK};
use crate::error::BufferError;
use crate::pixel::{BitCursor, PixelBuffer};

fn signature_slots() -> impl Iterator<Item = (BitCursor, u8)> {
    SIGNATURE
        .iter()
        .enumerate()
        .map(|(pixel, &byte)| (BitCursor::signature(pixel), byte & SIGNATURE_NIBBLE_MASK))
}

/// 写入签名，保留每个 Alpha 值的高 4 位。
///
/// # Errors
///
/// 缓冲区少于 4 个像素时返回 [`BufferError::TooSmall`]。
pub fn write_signature(buffer: &mut PixelBuffer) -> Result<(), BufferError> {
    buffer.ensure_signable()?;

    for (cursor, nibble) in signature_slots() {
        if let Some(alpha) = buffer.get_mut(cursor) {
            *alpha = (*alpha & !SIGNATURE_NIBBLE_MASK) | nibble;
        }
    }

    Ok(())
}

/// 检查缓冲区是否带有签名。遇到第一个不匹配的半字节即返回 `false`。
///
/// # Errors
///
/// 缓冲区少于 4 个像素时返回 [`BufferError::TooSmall`]。
pub fn has_signature(buffer: &PixelBuffer) -> Result<bool, BufferError> {
    buffer.ensure_signable()?;

    Ok(signature_slots().all(|(cursor, nibble)| {
        buffer
            .get(cursor)
            .is_some_and(|alpha| alpha & SIGNATURE_NIBBLE_MASK == nibble)
    }))
}
