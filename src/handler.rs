//! # 命令处理逻辑模块
//!
//! 包含处理各子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、通过服务边界调用隐写编解码器以及向用户报告结果。

use crate::adapter::ImageAdapter;
use crate::cli::{CapacityArgs, CheckArgs, DecodeArgs, EncodeArgs, OutputFormat};
use crate::constants::{DOCTORED_PREFIX, RECOVERED_PREFIX};
use crate::service::{
    ApiResponse, DecodeRequest, EncodeRequest, ImageReport, SteganographyService, to_data_url,
};
use anyhow::{Context, Result};
use colored::Colorize;
use image::ImageFormat;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 根据输入文件生成默认输出路径：`<目录>/<前缀><文件名>.<扩展名>`。
pub fn default_output_path(input: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{prefix}{stem}.{extension}"))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}\nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn read_image(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 按输出形式报告结果。JSON 模式下无论成败都输出一条记录。
fn report<T: Serialize>(
    result: Result<T>,
    output: OutputFormat,
    on_success: impl FnOnce(&T),
) -> Result<()> {
    match output {
        OutputFormat::Json => {
            let response = match &result {
                Ok(data) => ApiResponse::ok(data),
                Err(e) => ApiResponse::fail(format!("{e:#}")),
            };
            println!("{}", serde_json::to_string(&response)?);
        }
        OutputFormat::Text => {
            if let Ok(data) = &result {
                on_success(data);
            }
        }
    }
    result.map(|_| ())
}

/// 处理 'Encode' 命令的执行逻辑。
///
/// 读取图像和文本、确定输出路径与格式、通过服务层隐藏文本，
/// 最后把无损编码的结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `EncodeArgs` 结构体。
/// * `output` - 结果的输出形式。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件。
/// * 目标文件已存在且未指定 `--force`，或目标扩展名不是无损格式。
/// * 图像没有足够的空间，或文本包含无法隐藏的字符。
/// * 无法写入到目标图像文件。
pub fn handle_encode(args: EncodeArgs, output: OutputFormat) -> Result<()> {
    let result = encode_to_file(&args);
    report(result, output, |outcome: &EncodeOutcome| {
        println!(
            "The text has been successfully hidden and saved: {}",
            outcome.path.green().bold()
        );
        if let Some(url) = &outcome.data_url {
            println!("{url}");
        }
    })
}

/// 'encode' 的结果：输出文件路径，以及按需生成的 data URL。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeOutcome {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
}

/// 执行 'encode' 并写出结果图像，不向终端输出任何内容。
///
/// # Errors
///
/// 与 [`handle_encode`] 相同。
pub fn encode_to_file(args: &EncodeArgs) -> Result<EncodeOutcome> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_output_path(&args.image, DOCTORED_PREFIX, "png"));
    ensure_writable(&dest, args.force)?;

    let format = ImageFormat::from_path(&dest).with_context(|| {
        format!(
            "Unable to determine the image format of: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;
    let adapter = ImageAdapter::new()
        .with_max_width(Some(args.max_width))
        .with_format(format)
        .with_context(|| {
            format!(
                "Cannot write to {}. \nChoose a lossless format such as .png or .bmp.",
                dest.to_string_lossy().red().bold()
            )
        })?;

    let picture = read_image(&args.image)?;
    let message = match (&args.message, &args.text) {
        (Some(message), _) => message.clone(),
        (None, Some(text)) => fs::read_to_string(text).with_context(|| {
            format!(
                "Unable to read text file: {}",
                text.to_string_lossy().red().bold()
            )
        })?,
        (None, None) => anyhow::bail!("Either --text or --message must be given."),
    };

    let encoded = SteganographyService::new(adapter)
        .encode_image(EncodeRequest {
            image: &picture,
            message: &message,
            password: args.password.as_deref(),
        })
        .into_result()
        .map_err(anyhow::Error::msg)?;

    let data_url = args.data_url.then(|| to_data_url(&encoded, format));

    fs::write(&dest, encoded).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    Ok(EncodeOutcome {
        path: dest.to_string_lossy().into_owned(),
        data_url,
    })
}

/// 处理 'Decode' 命令的执行逻辑。
///
/// 读取经过隐写的图像、通过服务层恢复文本 (必要时解密)，
/// 最后将恢复的文本内容写入目标文本文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件，或目标文件已存在且未指定 `--force`。
/// * 图像不带签名、数据已损坏，或密码错误。
/// * 无法写入到目标文本文件。
pub fn handle_decode(args: DecodeArgs, output: OutputFormat) -> Result<()> {
    let text_path = args
        .text
        .clone()
        .unwrap_or_else(|| default_output_path(&args.image, RECOVERED_PREFIX, "txt"));

    let result = decode_to_file(&args, &text_path);
    report(result, output, |_: &String| {
        println!(
            "The text has been successfully recovered and saved: {}",
            text_path.to_string_lossy().green().bold()
        );
    })
}

fn decode_to_file(args: &DecodeArgs, text_path: &Path) -> Result<String> {
    ensure_writable(text_path, args.force)?;

    let picture = read_image(&args.image)?;
    // 缩放会破坏最低位，解码时始终保持原尺寸
    let service = SteganographyService::new(ImageAdapter::new().with_max_width(None));
    let text = service
        .decode_image(DecodeRequest {
            image: &picture,
            password: args.password.as_deref(),
        })
        .into_result()
        .map_err(anyhow::Error::msg)
        .with_context(|| {
            format!(
                "Failed to recover a message from '{}'.",
                args.image.to_string_lossy().red().bold()
            )
        })?;

    fs::write(text_path, &text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            text_path.to_string_lossy().red().bold()
        )
    })?;

    Ok(text)
}

/// 读取图像并报告尺寸、容量以及是否带有签名。
///
/// `max_width` 为 `None` 时保持原尺寸，签名检查必须这样做。
pub fn inspect_file(image: &Path, max_width: Option<u32>) -> Result<ImageReport> {
    let picture = read_image(image)?;
    SteganographyService::new(ImageAdapter::new().with_max_width(max_width))
        .inspect_image(&picture)
        .into_result()
        .map_err(anyhow::Error::msg)
}

/// 处理 'Check' 命令：只检查签名，不扫描消息位。
pub fn handle_check(args: CheckArgs, output: OutputFormat) -> Result<()> {
    let result = inspect_file(&args.image, None);

    report(result, output, |summary| {
        let name = args.image.to_string_lossy();
        if summary.has_signature {
            println!("{} contains a hidden message.", name.green().bold());
        } else {
            println!("{} does not contain a hidden message.", name.yellow().bold());
        }
    })
}

/// 处理 'Capacity' 命令：按 'encode' 相同的缩放规则计算可隐藏的最大长度。
pub fn handle_capacity(args: CapacityArgs, output: OutputFormat) -> Result<()> {
    let result = inspect_file(&args.image, Some(args.max_width));

    report(result, output, |summary| match summary.max_message_chars {
        Some(chars) => println!(
            "{}x{} pixels: {} bits available, up to {} characters.",
            summary.width,
            summary.height,
            summary.capacity_bits.to_string().green().bold(),
            chars.to_string().green().bold()
        ),
        None => println!(
            "{}x{} pixels: {} bits available, {}",
            summary.width,
            summary.height,
            summary.capacity_bits.to_string().red().bold(),
            "too small to hide any message.".red().bold()
        ),
    })
}
