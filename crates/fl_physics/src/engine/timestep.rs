// crates/fl_physics/src/engine/timestep.rs

//! 时间步长控制
//!
//! ## CFL 条件
//!
//! $$ \Delta t = C \cdot \min_{i,j} \min\left(\frac{\Delta x}{|u_x| + a}, \frac{\Delta y}{|u_y| + a}\right) $$
//!
//! 最小值只在非固体内部单元上取，使用 rayon 并行归约。
//! 最后一步被截断，使累计时间恰好到达结束时间。

use fl_config::TimingConfig;
use rayon::prelude::*;

use crate::error::{SolverError, SolverResult};
use crate::grid::Grid;
use crate::state::IdealGas;

/// 完成判定的相对容差
const TIME_TOLERANCE: f64 = 1e-12;

/// 整个网格的 CFL 稳定时间步（未截断到结束时间）
///
/// # 错误
/// 某单元的局部时间步为 NaN 或非正（如负压导致声速非有限）时返回数值不稳定错误。
pub fn stable_timestep(grid: &Grid, eos: &IdealGas, cfl: f64) -> SolverResult<f64> {
    let layout = *grid.layout();
    let cells: Vec<(usize, usize)> = layout.interior_cells().collect();
    let (dx, dy) = (layout.dx(), layout.dy());

    let min_limit = cells
        .par_iter()
        .filter(|&&(i, j)| !grid.boundary(i, j).is_solid())
        .map(|&(i, j)| {
            let u = grid.state(i, j);
            let a = u.sound_speed(eos);
            let limit = (dx / (u.ux().abs() + a)).min(dy / (u.uy().abs() + a));
            if limit.is_nan() || limit <= 0.0 || a.is_nan() {
                Err(SolverError::instability("dt", limit, "CFL 时间步").at(i, j))
            } else {
                Ok(limit)
            }
        })
        .try_reduce(|| f64::INFINITY, |a, b| Ok(a.min(b)))?;

    let dt = cfl * min_limit;
    if dt.is_nan() || dt <= 0.0 {
        return Err(SolverError::instability("dt", dt, "CFL 时间步"));
    }
    Ok(dt)
}

/// 计时器
#[derive(Debug, Clone)]
pub struct Timer {
    cfl: f64,
    end_time: f64,
    max_steps: Option<u64>,
    time: f64,
    dt: f64,
    step: u64,
}

impl Timer {
    /// 创建计时器
    pub fn new(cfl: f64, end_time: f64, max_steps: Option<u64>) -> Self {
        Self {
            cfl,
            end_time,
            max_steps,
            time: 0.0,
            dt: 0.0,
            step: 0,
        }
    }

    /// 从配置创建
    pub fn from_config(cfg: &TimingConfig) -> Self {
        Self::new(cfg.cfl, cfg.end_time, cfg.max_steps)
    }

    /// CFL 数
    #[inline]
    pub fn cfl(&self) -> f64 {
        self.cfl
    }

    /// 结束时间
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// 当前时间
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// 当前时间步长
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// 已完成步数
    #[inline]
    pub fn step(&self) -> u64 {
        self.step
    }

    /// 最大步数
    #[inline]
    pub fn max_steps(&self) -> Option<u64> {
        self.max_steps
    }

    /// 是否完成：到达结束时间（容差内）或步数上限
    pub fn is_complete(&self) -> bool {
        if self.max_steps.is_some_and(|max| self.step >= max) {
            return true;
        }
        self.end_time - self.time <= TIME_TOLERANCE * self.end_time.abs().max(1.0)
    }

    /// 按当前时间步推进
    pub fn advance(&mut self) {
        self.time += self.dt;
        self.step += 1;
        // 截断误差内视为恰好到达
        if (self.end_time - self.time).abs() <= TIME_TOLERANCE * self.end_time.abs().max(1.0) {
            self.time = self.end_time;
        }
    }

    /// 由网格状态重新计算时间步，并截断到剩余时间
    pub fn calibrate_timestep(&mut self, grid: &Grid, eos: &IdealGas) -> SolverResult<f64> {
        let stable = stable_timestep(grid, eos, self.cfl)?;
        let remaining = (self.end_time - self.time).max(0.0);
        self.dt = stable.min(remaining);
        Ok(self.dt)
    }
}
