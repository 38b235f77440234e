//! # 错误类型模块
//!
//! 编解码器的所有失败都以带类型的结果返回给调用方，不会 panic，也不会重试。

use thiserror::Error;

/// 像素缓冲区本身不合法。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("pixel data length {actual} does not match {width}x{height} RGBA (expected {expected} bytes)")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("image dimensions {width}x{height} are too large")]
    DimensionsOverflow { width: u32, height: u32 },

    #[error("image has {pixels} pixels but at least {required} are needed to carry the signature")]
    TooSmall { pixels: usize, required: usize },
}

/// 嵌入 (encode) 路径上的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Not enough space in the image: the message needs {required} bits but only {available} are available")]
    CapacityExceeded { required: usize, available: usize },

    #[error("Unsupported character {character:?} at index {index}: only code points U+0001..U+00FF can be hidden")]
    UnsupportedCharacter { character: char, index: usize },

    #[error("Invalid pixel buffer: {0}")]
    InvalidPixelBuffer(#[from] BufferError),
}

/// 提取 (decode) 路径上的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("No signature found: the image does not contain a hidden message")]
    NoSignatureFound,

    #[error("The signature is present but no message terminator was found; the data is corrupted or incomplete")]
    CorruptedOrAbsentMessage,

    #[error("Invalid pixel buffer: {0}")]
    InvalidPixelBuffer(#[from] BufferError),
}

/// 可选加密步骤的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed")]
    EncryptionFailed,

    #[error("the hidden message is not an encrypted envelope")]
    MalformedEnvelope,

    #[error("decryption failed (wrong password?)")]
    DecryptionFailed,

    #[error("decrypted text is not valid UTF-8")]
    InvalidUtf8,
}

/// 图像与像素缓冲区之间转换的错误。
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("{0:?} is not a lossless format; the hidden bits would be destroyed")]
    LossyFormat(image::ImageFormat),

    #[error(transparent)]
    Buffer(#[from] BufferError),
}
