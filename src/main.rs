use clap::Parser;
use env_logger::{Builder, Env};

use lsb_steg::{
    cli::{Cli, Commands},
    handler::{handle_capacity, handle_check, handle_decode, handle_encode},
};

/// 根据 `-v` 的次数选择默认日志级别，`RUST_LOG` 优先。
fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// 程序的主入口点
///
/// 负责解析命令行参数，并根据指定的子命令
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();
    init_logger(cli.verbose);

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Encode(args) => handle_encode(args, cli.output),
        Commands::Decode(args) => handle_decode(args, cli.output),
        Commands::Check(args) => handle_check(args, cli.output),
        Commands::Capacity(args) => handle_capacity(args, cli.output),
    }
}
