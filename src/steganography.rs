use crate::bits::{BitStream, bits_to_text, pack_byte, text_to_bits};
use crate::capacity::{can_embed, capacity_bits};
use crate::constants::{BITS_PER_CHAR, TERMINATOR};
use crate::error::{DecodeError, EncodeError};
use crate::pixel::{BitCursor, PixelBuffer};
use crate::signature::{has_signature, write_signature};

/// 把位序列写入各像素蓝色通道的最低位，从像素 0 开始，写完即停。
/// 调用前必须已通过 `can_embed` 检查。
fn embed(pix: &mut PixelBuffer, bits: &BitStream) {
    for (pixel, bit) in bits.iter().enumerate() {
        if let Some(blue) = pix.get_mut(BitCursor::message(pixel)) {
            *blue = (*blue & 0xFE) | u8::from(bit);
        }
    }
}

/// 按相同顺序读取蓝色通道最低位，直到遇到结束符字节。
/// 返回结束符之前的所有完整字节对应的位。
pub fn extract(pix: &PixelBuffer) -> Result<BitStream, DecodeError> {
    let mut message = BitStream::new();
    let mut pending = Vec::with_capacity(BITS_PER_CHAR);

    for pixel in 0..pix.pixel_count() {
        let Some(blue) = pix.get(BitCursor::message(pixel)) else {
            break;
        };
        pending.push(blue & 1 == 1);

        if pending.len() == BITS_PER_CHAR {
            if pack_byte(&pending) == TERMINATOR {
                log::debug!("terminator found at pixel {pixel}");
                return Ok(message);
            }
            pending.drain(..).for_each(|bit| message.push(bit));
        }
    }

    Err(DecodeError::CorruptedOrAbsentMessage)
}

/// 把消息隐藏进缓冲区的副本，并写入签名。
///
/// 所有检查 (签名空间、字符范围、容量) 都在复制和修改之前完成，
/// 失败时不会产生任何部分写入的结果。调用方的缓冲区从不被修改。
///
/// # Errors
///
/// * [`EncodeError::InvalidPixelBuffer`] - 缓冲区少于 4 个像素。
/// * [`EncodeError::UnsupportedCharacter`] - 消息包含无法用 8 位表示的字符。
/// * [`EncodeError::CapacityExceeded`] - 消息 (含结束符) 超出容量。
pub fn encode(buffer: &PixelBuffer, message: &str) -> Result<PixelBuffer, EncodeError> {
    buffer.ensure_signable()?;

    let bits = text_to_bits(message)?;
    if !can_embed(buffer, bits.len()) {
        return Err(EncodeError::CapacityExceeded {
            required: bits.len(),
            available: capacity_bits(buffer),
        });
    }

    log::debug!(
        "embedding {} bits into {}x{} buffer ({} bits available)",
        bits.len(),
        buffer.width(),
        buffer.height(),
        capacity_bits(buffer)
    );

    let mut encoded = buffer.clone();
    embed(&mut encoded, &bits);
    write_signature(&mut encoded)?;

    Ok(encoded)
}

/// 从带签名的缓冲区中恢复消息。
///
/// 先做常数时间的签名检查，不带签名的缓冲区不会被扫描。
///
/// # Errors
///
/// * [`DecodeError::InvalidPixelBuffer`] - 缓冲区少于 4 个像素。
/// * [`DecodeError::NoSignatureFound`] - 缓冲区没有签名。
/// * [`DecodeError::CorruptedOrAbsentMessage`] - 有签名但扫描到末尾也没有结束符。
pub fn decode(buffer: &PixelBuffer) -> Result<String, DecodeError> {
    if !has_signature(buffer)? {
        return Err(DecodeError::NoSignatureFound);
    }

    let bits = extract(buffer)?;
    log::debug!("extracted {} message bytes", bits.len() / BITS_PER_CHAR);

    Ok(bits_to_text(bits.as_slice()))
}
