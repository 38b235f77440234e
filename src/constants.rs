//! # 常量模块
//!
//! 隐写格式的二进制约定以及程序的默认配置值。

/// 每个像素的通道数 (RGBA)。
pub const CHANNELS: usize = 4;

/// 标记图像已被本工具处理的签名。
/// 每个字节的低 4 位写入前 4 个像素 Alpha 通道的低 4 位。
pub const SIGNATURE: [u8; 4] = *b"STEG";

/// 签名占用的像素数，也是可以携带签名的最小像素数。
pub const SIGNATURE_PIXELS: usize = SIGNATURE.len();

/// 签名写入 Alpha 通道时使用的掩码 (低 4 位)。
pub const SIGNATURE_NIBBLE_MASK: u8 = 0x0F;

/// 每个字符占用的位数。
pub const BITS_PER_CHAR: usize = 8;

/// 消息结束符 (全零字节)。
pub const TERMINATOR: u8 = 0x00;

/// 读取源图像时的默认最大宽度 (像素)，超出时按比例缩小。
pub const DEFAULT_MAX_WIDTH: u32 = 800;

/// 未指定输出路径时，隐写图像文件名的前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复文本文件名的前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";

/// 可从环境变量读取的密码。
pub const PASSWORD_ENV: &str = "LSB_STEG_PASSWORD";
