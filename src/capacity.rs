//! # 容量规划模块
//!
//! 每个像素的蓝色通道承载 1 位，因此容量等于像素数。
//! 嵌入之前必须先通过检查，失败时缓冲区保持原样。

use crate::constants::BITS_PER_CHAR;
use crate::pixel::PixelBuffer;

/// 缓冲区可承载的总位数。
pub fn capacity_bits(buffer: &PixelBuffer) -> usize {
    buffer.pixel_count()
}

/// 隐藏 `char_count` 个字符 (含结束符) 需要的位数。
pub fn required_bits(char_count: usize) -> usize {
    char_count.saturating_add(1).saturating_mul(BITS_PER_CHAR)
}

pub fn can_embed(buffer: &PixelBuffer, bit_count: usize) -> bool {
    bit_count <= capacity_bits(buffer)
}

/// 缓冲区能容纳的最长消息 (字符数)。
/// 连结束符都放不下时返回 `None`，此时即使空消息也无法隐藏。
pub fn max_message_chars(buffer: &PixelBuffer) -> Option<usize> {
    (capacity_bits(buffer) / BITS_PER_CHAR).checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_by_ten_holds_eleven_characters() {
        let buffer = PixelBuffer::filled(10, 10, 0).unwrap();
        assert_eq!(capacity_bits(&buffer), 100);
        assert_eq!(max_message_chars(&buffer), Some(11));
        assert!(can_embed(&buffer, required_bits(11)));
        assert!(!can_embed(&buffer, required_bits(12)));
        assert!(can_embed(&buffer, 100));
        assert!(!can_embed(&buffer, 101));
    }

    #[test]
    fn tiny_buffer_has_no_room_for_text() {
        // 4 到 7 个像素可以带签名，但连结束符都放不下
        for (width, height) in [(2, 2), (7, 1)] {
            let buffer = PixelBuffer::filled(width, height, 0).unwrap();
            assert_eq!(max_message_chars(&buffer), None);
            assert!(!can_embed(&buffer, required_bits(0)));
        }

        let buffer = PixelBuffer::filled(8, 1, 0).unwrap();
        assert_eq!(max_message_chars(&buffer), Some(0));
        assert!(can_embed(&buffer, required_bits(0)));
    }
}
