// apps/fl_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示默认配置（JSON）以及各注册表中可选的名称。

use anyhow::{Context, Result};
use clap::Args;
use fl_config::SolverConfig;
use fl_physics::boundary::BOUNDARY_KINDS;
use fl_physics::fvm::FVM_KINDS;
use fl_physics::initialisation::{LEVELSET_MODULES, STATE_MODULES};
use fl_physics::schemes::FLUX_SCHEMES;
use tracing::info;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 只显示默认配置
    #[arg(long)]
    pub defaults: bool,

    /// 只显示可选名称
    #[arg(long)]
    pub modules: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== FVlite 信息 ===");

    let show_all = !args.defaults && !args.modules;
    if args.defaults || show_all {
        print_default_config()?;
    }
    if show_all {
        println!();
    }
    if args.modules || show_all {
        print_modules();
    }
    Ok(())
}

fn print_default_config() -> Result<()> {
    println!("=== 默认配置 ===");
    let json = serde_json::to_string_pretty(&SolverConfig::default())
        .context("序列化默认配置失败")?;
    println!("{}", json);
    Ok(())
}

fn print_modules() {
    println!("=== 可选名称 ===");
    println!("FVlite CLI 版本: {}", env!("CARGO_PKG_VERSION"));
    let tables = [
        (FVM_KINDS.key(), FVM_KINDS.names()),
        (FLUX_SCHEMES.key(), FLUX_SCHEMES.names()),
        ("boundaries.{left,right,bottom,top}", BOUNDARY_KINDS.names()),
        (STATE_MODULES.key(), STATE_MODULES.names()),
        (LEVELSET_MODULES.key(), LEVELSET_MODULES.names()),
    ];
    for (key, names) in tables {
        println!("  {:<36} {}", key, names.join(", "));
    }
}
