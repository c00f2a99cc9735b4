// apps/fl_cli/src/commands/run.rs

//! 运行模拟命令
//!
//! 构建求解器，推进到结束时间，写出最终状态（可选写出切割单元几何与中间快照）。
//! 数值不稳定或配置错误直接以非零状态退出。

use anyhow::{Context, Result};
use clap::Args;
use fl_config::SolverConfig;
use fl_physics::Solver;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use crate::output;

/// 运行模拟参数
#[derive(Args)]
pub struct RunArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,

    /// 覆盖结束时间
    #[arg(short = 't', long)]
    pub end_time: Option<f64>,

    /// 覆盖最大步数
    #[arg(long)]
    pub max_steps: Option<u64>,

    /// 覆盖输出目录
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 同时输出切割单元几何
    #[arg(long)]
    pub geometry: bool,

    /// 每 N 步写出一次状态快照
    #[arg(long)]
    pub snapshot_interval: Option<u64>,
}

impl RunArgs {
    /// 加载配置并应用命令行覆盖
    fn load_config(&self) -> Result<SolverConfig> {
        let mut config = SolverConfig::from_file(&self.config)
            .with_context(|| format!("加载配置文件失败: {}", self.config.display()))?;
        if let Some(end_time) = self.end_time {
            config.timing.end_time = end_time;
        }
        if self.max_steps.is_some() {
            config.timing.max_steps = self.max_steps;
        }
        if let Some(dir) = &self.output {
            config.output.directory = dir.clone();
        }
        if self.geometry {
            config.output.write_geometry = true;
        }
        if self.snapshot_interval.is_some() {
            config.output.snapshot_interval = self.snapshot_interval;
        }
        config.validate().context("命令行覆盖后的配置无效")?;
        Ok(config)
    }
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== FVlite 模拟启动 ===");

    let config = args.load_config()?;
    info!(
        "配置: FVM={}, 通量={}, CFL={}, 结束时间={}",
        config.fvm.fvm_type, config.fvm.scheme, config.timing.cfl, config.timing.end_time
    );

    let dir = &config.output.directory;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("无法创建输出目录: {}", dir.display()))?;

    let mut solver = Solver::new(&config).context("构建求解器失败")?;
    let initial = solver.conserved_totals();

    let start = Instant::now();
    let mut steps = 0u64;
    while !solver.is_complete() {
        solver.advance().context("模拟失败")?;
        steps += 1;

        let step = solver.timer().step();
        if let Some(interval) = config.output.snapshot_interval {
            if step % interval == 0 && !solver.is_complete() {
                let path = dir.join(output::snapshot_file(step));
                output::write_state(solver.grid(), &path)?;
                info!("快照已写出: {}", path.display());
            }
        }
    }
    let elapsed = start.elapsed();

    let totals = solver.conserved_totals();
    info!("=== 模拟完成 ===");
    info!("总步数: {}, 模拟时间: {:.6}", steps, solver.timer().time());
    info!("计算时间: {:.2} s", elapsed.as_secs_f64());
    if steps > 0 {
        info!("平均步耗时: {:.3} ms", elapsed.as_secs_f64() * 1000.0 / steps as f64);
    }
    // 总量按 max(α, alpha_min) 加权，与切割单元更新的体积一致；开放边界下包含进出流量
    info!(
        "守恒量变化: Δm={:.3e}, ΔE={:.3e}",
        totals.rho() - initial.rho(),
        totals.energy() - initial.energy()
    );

    let data_path = dir.join(output::STATE_FILE);
    output::write_state(solver.grid(), &data_path)?;
    info!("状态已写出: {}", data_path.display());

    if config.output.write_geometry {
        let geom_path = dir.join(output::GEOMETRY_FILE);
        output::write_geometry(solver.grid(), &geom_path)?;
        let vertices_path = dir.join(output::VERTICES_FILE);
        output::write_levelset_vertices(solver.grid(), &vertices_path)?;
        info!("几何已写出: {}, {}", geom_path.display(), vertices_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &std::path::Path) -> PathBuf {
        let mut config = SolverConfig::default();
        config.grid.nx = 20;
        config.grid.ny = 1;
        config.grid.y_max = 0.05;
        config.timing.end_time = 10.0;
        config.timing.max_steps = Some(6);
        config.output.directory = dir.join("out");
        let path = dir.join("config.json");
        config.save_to_file(&path).unwrap();
        path
    }

    fn args(config: PathBuf) -> RunArgs {
        RunArgs {
            config,
            end_time: None,
            max_steps: None,
            output: None,
            geometry: false,
            snapshot_interval: None,
        }
    }

    #[test]
    fn test_run_writes_final_state() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        execute(args(config)).unwrap();

        let out = dir.path().join("out");
        let content = std::fs::read_to_string(out.join(output::STATE_FILE)).unwrap();
        assert_eq!(content.lines().filter(|l| !l.is_empty() && !l.starts_with('#')).count(), 20);
        assert!(!out.join(output::GEOMETRY_FILE).exists());
        assert!(!out.join(output::snapshot_file(2)).exists());
    }

    #[test]
    fn test_run_writes_snapshots_and_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let mut args = args(config);
        args.snapshot_interval = Some(2);
        args.geometry = true;
        execute(args).unwrap();

        let out = dir.path().join("out");
        assert!(out.join(output::snapshot_file(2)).exists());
        assert!(out.join(output::snapshot_file(4)).exists());
        // 最后一步只写最终状态
        assert!(!out.join(output::snapshot_file(6)).exists());
        assert!(out.join(output::STATE_FILE).exists());
        assert!(out.join(output::GEOMETRY_FILE).exists());
        assert!(out.join(output::VERTICES_FILE).exists());
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let mut args = args(config);
        args.end_time = Some(-1.0);
        assert!(execute(args).is_err());
    }
}
