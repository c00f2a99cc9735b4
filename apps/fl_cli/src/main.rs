// apps/fl_cli/src/main.rs

//! FVlite 命令行界面
//!
//! 二维 Euler 方程有限体积求解器的命令行工具：
//! - `run`: 按配置文件运行模拟并写出最终状态
//! - `validate`: 解析、校验配置并尝试构建求解器
//! - `info`: 显示默认配置与可选的格式/模块名称

mod commands;
mod output;

use clap::{Parser, Subcommand};
use tracing::Level;

/// FVlite 二维可压缩流求解器命令行工具
#[derive(Parser)]
#[command(name = "fl_cli")]
#[command(author = "FVlite Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "FVlite 2D Euler finite-volume solver with cut cells", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行模拟
    Run(commands::run::RunArgs),
    /// 显示信息
    Info(commands::info::InfoArgs),
    /// 验证配置
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // try_init 同时安装 log → tracing 桥接，库中的 log 记录经同一订阅者输出
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("初始化日志失败: {}", e))?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
