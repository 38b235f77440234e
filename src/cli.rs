//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::{DEFAULT_MAX_WIDTH, PASSWORD_ENV};
use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，把文本隐藏在图像蓝色通道的最低位中。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，把文本隐藏在图像蓝色通道的最低位中。\n输出始终为无损格式 (PNG, BMP, TIFF, QOI, WebP)，任何有损压缩都会破坏隐藏的数据。"
)]
pub struct Cli {
    /// 输出更详细的日志 (可重复，如 -vv)。也可以用 RUST_LOG 控制。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// 结果的输出形式。
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// 结果输出形式：彩色文本，或 `{ success, data?, error? }` JSON 记录。
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 可用的子命令。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 把文本隐藏到图像中。
    Encode(EncodeArgs),

    /// 从经过隐写的图像中恢复隐藏的文本。
    Decode(DecodeArgs),

    /// 检查图像是否带有本工具的签名 (不做完整提取)。
    Check(CheckArgs),

    /// 显示图像能隐藏的最大文本长度。
    Capacity(CapacityArgs),
}

/// 'encode' 命令所需的参数。
#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("payload").required(true).args(["text", "message"])))]
pub struct EncodeArgs {
    /// 用于隐写的输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 直接在命令行上给出要隐藏的文本。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 结果图像的输出路径，扩展名决定格式。默认为输入图像旁的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 隐藏之前用该密码加密文本。
    #[arg(short, long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: Option<String>,

    /// 源图像的最大宽度，超出时按比例缩小；0 表示不缩放。
    #[arg(long, default_value_t = DEFAULT_MAX_WIDTH)]
    pub max_width: u32,

    /// 同时输出结果图像的 data URL，便于直接粘贴分享。
    #[arg(long)]
    pub data_url: bool,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'decode' 命令所需的参数。
#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复文本的保存路径。默认为图像旁的 `recovered_<名称>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 隐藏时使用的密码。
    #[arg(short, long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: Option<String>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'check' 命令所需的参数。
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}

/// 'capacity' 命令所需的参数。
#[derive(Args, Debug, Clone)]
pub struct CapacityArgs {
    /// 要计算容量的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 与 'encode' 相同的缩放宽度；0 表示不缩放。
    #[arg(long, default_value_t = DEFAULT_MAX_WIDTH)]
    pub max_width: u32,
}
