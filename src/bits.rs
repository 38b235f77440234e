//! # 位/文本转换模块
//!
//! 文本与定宽位序列之间的无状态转换。每个字符占 8 位 (高位在前)，
//! 序列末尾追加一个全零字节作为结束符，不带长度前缀。

use crate::constants::{BITS_PER_CHAR, TERMINATOR};
use crate::error::EncodeError;

/// 有序的位序列。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    bits: Vec<bool>,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// 按高位在前的顺序追加一个字节的 8 位。
    pub fn push_byte(&mut self, byte: u8) {
        (0..BITS_PER_CHAR)
            .rev()
            .for_each(|shift| self.bits.push((byte >> shift) & 1 == 1));
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

/// 把最多 8 个位 (高位在前) 组装成一个字节。
pub(crate) fn pack_byte(bits: &[bool]) -> u8 {
    bits.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit))
}

/// 把消息转换为位序列，并在末尾追加结束符。
///
/// # Errors
///
/// 字符码点超出 `U+0001..=U+00FF` 时返回 [`EncodeError::UnsupportedCharacter`]。
/// `U+0000` 与结束符无法区分，因此同样被拒绝。
pub fn text_to_bits(message: &str) -> Result<BitStream, EncodeError> {
    let mut stream = BitStream::with_capacity((message.chars().count() + 1) * BITS_PER_CHAR);

    for (index, character) in message.chars().enumerate() {
        let byte = u8::try_from(u32::from(character))
            .ok()
            .filter(|&byte| byte != TERMINATOR)
            .ok_or(EncodeError::UnsupportedCharacter { character, index })?;
        stream.push_byte(byte);
    }

    stream.push_byte(TERMINATOR);
    Ok(stream)
}

/// 把位序列还原为文本。
///
/// 每次消费 8 位，遇到第一个全零字节即停止 (结束符不计入结果)；
/// 末尾不足 8 位的残余部分被忽略。
pub fn bits_to_text(bits: &[bool]) -> String {
    bits.chunks_exact(BITS_PER_CHAR)
        .map(pack_byte)
        .take_while(|&byte| byte != TERMINATOR)
        .map(char::from)
        .collect()
}
