// crates/fl_physics/src/engine/updater.rs

//! 单步更新器
//!
//! 一个完整时间步：
//!
//! 1. `FvmSolver::new_time_step` 刷新切割单元几何
//! 2. 按分裂顺序执行各方向扫描，每次扫描后填充幽灵单元
//! 3. 计时器推进并重新计算下一步的 dt
//!
//! | 分裂 | 扫描序列 |
//! |------|---------|
//! | `strang` | X(dt/2) Y(dt) X(dt/2) |
//! | `alternating` | 偶数步 X(dt) Y(dt)，奇数步 Y(dt) X(dt) |

use fl_config::SplittingOrder;

use crate::boundary::BoundaryManager;
use crate::engine::timestep::Timer;
use crate::error::SolverResult;
use crate::fvm::FvmSolver;
use crate::grid::Grid;
use crate::types::Axis;

const STRANG: &[(Axis, f64)] = &[(Axis::X, 0.5), (Axis::Y, 1.0), (Axis::X, 0.5)];
const XY: &[(Axis, f64)] = &[(Axis::X, 1.0), (Axis::Y, 1.0)];
const YX: &[(Axis, f64)] = &[(Axis::Y, 1.0), (Axis::X, 1.0)];

/// 单步更新器
#[derive(Debug, Clone)]
pub struct Updater {
    fvm: FvmSolver,
    boundaries: BoundaryManager,
    splitting: SplittingOrder,
}

impl Updater {
    /// 创建更新器
    pub fn new(fvm: FvmSolver, boundaries: BoundaryManager, splitting: SplittingOrder) -> Self {
        Self {
            fvm,
            boundaries,
            splitting,
        }
    }

    /// 有限体积求解器
    pub fn fvm(&self) -> &FvmSolver {
        &self.fvm
    }

    /// 边界管理器
    pub fn boundaries(&self) -> &BoundaryManager {
        &self.boundaries
    }

    /// 分裂顺序
    pub fn splitting(&self) -> SplittingOrder {
        self.splitting
    }

    /// 第 `step` 步的扫描序列：(方向, dt 系数)
    pub fn sweeps(&self, step: u64) -> &'static [(Axis, f64)] {
        match self.splitting {
            SplittingOrder::Strang => STRANG,
            SplittingOrder::Alternating if step % 2 == 0 => XY,
            SplittingOrder::Alternating => YX,
        }
    }

    /// 执行一个完整时间步
    ///
    /// # 错误
    /// 任一次扫描或时间步重算出现数值不稳定即返回，不做重试。
    pub fn exec(&self, grid: &mut Grid, timer: &mut Timer) -> SolverResult<()> {
        self.fvm.new_time_step(grid);

        let dt = timer.dt();
        for &(axis, fraction) in self.sweeps(timer.step()) {
            self.fvm.exec(grid, axis, dt * fraction)?;
            self.boundaries.apply(grid);
        }

        timer.advance();
        if !timer.is_complete() {
            timer.calibrate_timestep(grid, self.fvm.eos())?;
        }
        Ok(())
    }
}
