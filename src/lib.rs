//! # lsb_steg 库
//!
//! 把文本隐藏在 RGBA 像素缓冲区蓝色通道的最低有效位中，并在前 4 个像素的
//! Alpha 通道写入签名，以便在完整提取之前快速判断图像是否携带消息。
//!
//! 编解码器 ([`encode`] / [`decode`]) 是纯函数，不保留任何状态，
//! 可以在多个线程中对互不相关的缓冲区并发调用。

// 声明库包含的所有模块。

pub mod adapter;
pub mod bits;
pub mod capacity;
pub mod cli;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod handler;
pub mod pixel;
pub mod service;
pub mod signature;
pub mod steganography;

pub use error::{AdapterError, BufferError, CryptoError, DecodeError, EncodeError};
pub use pixel::PixelBuffer;
pub use signature::has_signature;
pub use steganography::{decode, encode};
