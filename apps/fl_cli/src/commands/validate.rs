// apps/fl_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 依次检查：JSON 解析与数值范围、名称解析与求解器构建（含初始时间步）、
//! 以及可能导致失稳或耗时过长的设置（警告）。

use anyhow::{bail, Result};
use clap::Args;
use fl_config::SolverConfig;
use fl_physics::Solver;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn is_ok_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== FVlite 配置验证 ===");
    println!("检查配置文件: {}", args.config.display());

    let mut result = ValidationResult::default();
    match SolverConfig::from_file(&args.config) {
        Ok(config) => {
            println!("  ✓ 配置格式与数值范围有效");
            check_settings(&config, &mut result);
            match Solver::new(&config) {
                Ok(solver) => println!(
                    "  ✓ 求解器构建成功，初始 dt = {:.4e}",
                    solver.timer().dt()
                ),
                Err(e) => result.add_error(format!("构建求解器失败: {}", e)),
            }
        }
        Err(e) => result.add_error(e.to_string()),
    }

    print_validation_result(&result, args.strict)
}

fn check_settings(config: &SolverConfig, result: &mut ValidationResult) {
    if config.fvm.fvm_type == "CutCell" {
        if config.timing.cfl > 0.5 {
            result.add_warning(format!(
                "切割单元格式 CFL = {} > 0.5，小单元可能失稳",
                config.timing.cfl
            ));
        }
        if config.initialisation.levelset.kind == "None" {
            result.add_warning("CutCell 类型未设置水平集，等价于 Std");
        }
    } else if config.initialisation.levelset.kind != "None" {
        result.add_warning("Std 类型忽略水平集，嵌入边界不会生效");
    }

    let n_cells = config.grid.nx * config.grid.ny;
    if n_cells > 4_000_000 {
        result.add_warning(format!("网格单元数 {} 较大，计算可能耗时较长", n_cells));
    }

    let aspect = config.grid.dx() / config.grid.dy();
    if config.grid.ny > 1 && !(0.1..=10.0).contains(&aspect) {
        result.add_warning(format!("网格长宽比 dx/dy = {:.2} 偏离 1 较大", aspect));
    }
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    for msg in &result.warnings {
        warn!("{}", msg);
        println!("  ⚠ {}", msg);
    }
    for msg in &result.errors {
        error!("{}", msg);
        println!("  ✗ {}", msg);
    }

    let ok = if strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };
    if !ok {
        bail!(
            "验证失败: {} 个错误, {} 个警告",
            result.errors.len(),
            result.warnings.len()
        );
    }
    println!("验证通过 ({} 个警告)", result.warnings.len());
    Ok(())
}
