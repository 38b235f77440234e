//! # 服务边界模块
//!
//! 把编解码器包装成稳定的请求/响应接口：每个操作返回
//! `{ success, data?, error? }` 记录，错误被映射为面向用户的文字。
//! 即使是进程内调用，这个形状也保持不变。

use crate::adapter::{ImageAdapter, PixelAdapter};
use crate::capacity::{capacity_bits, max_message_chars};
use crate::crypto;
use crate::error::{AdapterError, BufferError, CryptoError, DecodeError, EncodeError};
use crate::signature::has_signature;
use crate::steganography::{decode, encode};
use base64::{Engine as _, engine::general_purpose};
use image::ImageFormat;
use serde::Serialize;
use thiserror::Error;

/// 请求/响应记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// 转回 `Result`，方便在应用层继续用 `?` 传播。
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data, self.error) {
            (true, Some(data), _) => Ok(data),
            (_, _, Some(error)) => Err(error),
            _ => Err("The operation returned no data".to_string()),
        }
    }
}

/// 服务层内部汇总的错误。
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error("No hidden message found in this image")]
    EmptyMessage,
}

impl ServiceError {
    /// 面向用户的错误描述。
    pub fn user_message(&self) -> String {
        match self {
            Self::Decode(DecodeError::NoSignatureFound) => "This image doesn't appear to contain a hidden message. Please try with an image that has been encoded using this tool.".to_string(),
            Self::Encode(EncodeError::CapacityExceeded { required, available }) => format!(
                "Not enough space in the image: the message needs {required} bits but the image only holds {available}. Use a larger image or a shorter message."
            ),
            Self::Adapter(AdapterError::Image(_)) => "Failed to load image: the file is not a supported image format".to_string(),
            other => other.to_string(),
        }
    }
}

/// 编码请求：源图像字节、消息以及可选密码。
#[derive(Debug, Clone, Copy)]
pub struct EncodeRequest<'a> {
    pub image: &'a [u8],
    pub message: &'a str,
    pub password: Option<&'a str>,
}

/// 解码请求。
#[derive(Debug, Clone, Copy)]
pub struct DecodeRequest<'a> {
    pub image: &'a [u8],
    pub password: Option<&'a str>,
}

/// 图像检查结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReport {
    pub width: u32,
    pub height: u32,
    pub has_signature: bool,
    pub capacity_bits: usize,
    /// 图像连空消息都放不下时为 `None`。
    pub max_message_chars: Option<usize>,
}

/// 把编码后的图像字节包装为可直接分享的 data URL。
pub fn to_data_url(image: &[u8], format: ImageFormat) -> String {
    format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        general_purpose::STANDARD.encode(image)
    )
}

/// 组合适配器与编解码器的服务。
#[derive(Debug, Clone, Default)]
pub struct SteganographyService<A = ImageAdapter> {
    adapter: A,
}

impl<A: PixelAdapter> SteganographyService<A> {
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    /// 把消息隐藏进图像，返回无损编码后的图像字节。
    pub fn encode_image(&self, request: EncodeRequest<'_>) -> ApiResponse<Vec<u8>> {
        log::info!("encoding message into image");
        respond(self.try_encode(request), "encode")
    }

    /// 从图像中恢复消息。
    pub fn decode_image(&self, request: DecodeRequest<'_>) -> ApiResponse<String> {
        log::info!("decoding message from image");
        respond(self.try_decode(request), "decode")
    }

    /// 报告图像尺寸、容量以及是否带有签名，不做完整提取。
    pub fn inspect_image(&self, image: &[u8]) -> ApiResponse<ImageReport> {
        respond(self.try_inspect(image), "inspect")
    }

    fn try_encode(&self, request: EncodeRequest<'_>) -> Result<Vec<u8>, ServiceError> {
        let buffer = self.adapter.rasterize(request.image)?;

        let payload = match request.password {
            Some(password) => crypto::encrypt(request.message, password)?,
            None => request.message.to_string(),
        };

        let encoded = encode(&buffer, &payload)?;
        Ok(self.adapter.serialize(&encoded)?)
    }

    fn try_decode(&self, request: DecodeRequest<'_>) -> Result<String, ServiceError> {
        let buffer = self.adapter.rasterize(request.image)?;

        // decode 先做签名检查，不是本工具生成的图像会被快速排除
        let extracted = decode(&buffer)?;
        if extracted.is_empty() {
            return Err(ServiceError::EmptyMessage);
        }

        match request.password {
            Some(password) => Ok(crypto::decrypt(&extracted, password)?),
            None => Ok(extracted),
        }
    }

    fn try_inspect(&self, image: &[u8]) -> Result<ImageReport, ServiceError> {
        let buffer = self.adapter.rasterize(image)?;
        Ok(ImageReport {
            width: buffer.width(),
            height: buffer.height(),
            has_signature: has_signature(&buffer)?,
            capacity_bits: capacity_bits(&buffer),
            max_message_chars: max_message_chars(&buffer),
        })
    }
}

fn respond<T>(result: Result<T, ServiceError>, operation: &str) -> ApiResponse<T> {
    match result {
        Ok(data) => ApiResponse::ok(data),
        Err(e) => {
            log::warn!("{operation} failed: {e}");
            ApiResponse::fail(e.user_message())
        }
    }
}
