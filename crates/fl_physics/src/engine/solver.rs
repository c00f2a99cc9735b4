// crates/fl_physics/src/engine/solver.rs

//! 顶层求解器
//!
//! 由 [`SolverConfig`] 构建全部组件并独占网格：
//!
//! 1. 校验配置，经注册表解析 FVM 类型、通量格式、边界类型与初始化模块
//! 2. 初始化状态与水平集，填充幽灵单元，计算初始几何
//! 3. 计算第一步的时间步长
//!
//! 任何配置错误都在第一步之前返回。

use fl_config::SolverConfig;

use crate::boundary::BoundaryManager;
use crate::engine::timestep::Timer;
use crate::engine::updater::Updater;
use crate::error::SolverResult;
use crate::fvm::FvmSolver;
use crate::grid::Grid;
use crate::initialisation::InitialisationManager;
use crate::state::{IdealGas, StateVector};

/// 顶层求解器
#[derive(Debug)]
pub struct Solver {
    config: SolverConfig,
    eos: IdealGas,
    grid: Grid,
    timer: Timer,
    updater: Updater,
    initialisation: InitialisationManager,
}

impl Solver {
    /// 从配置构建求解器
    pub fn new(config: &SolverConfig) -> SolverResult<Self> {
        config.validate()?;

        let eos = IdealGas::new(config.physics.gamma);
        let fvm = FvmSolver::from_config(&config.fvm, eos)?;
        let boundaries = BoundaryManager::from_config(&config.boundaries)?;
        let initialisation = InitialisationManager::from_config(&config.initialisation, eos)?;
        let updater = Updater::new(fvm, boundaries, config.timing.splitting);

        let mut grid = Grid::from_config(&config.grid);
        log::info!(
            "网格: {}x{} 单元, dx={:.4e}, dy={:.4e}, 幽灵层={}",
            config.grid.nx,
            config.grid.ny,
            grid.dx(),
            grid.dy(),
            config.grid.ghost
        );

        initialisation.exec(&mut grid);
        updater.boundaries().apply(&mut grid);
        updater.fvm().compute_geometry(&mut grid);

        let mut timer = Timer::from_config(&config.timing);
        let dt = timer.calibrate_timestep(&grid, &eos)?;
        log::info!(
            "求解器就绪: CFL={}, 结束时间={}, 初始 dt={:.4e}, 分裂={:?}",
            timer.cfl(),
            timer.end_time(),
            dt,
            config.timing.splitting
        );

        Ok(Self {
            config: config.clone(),
            eos,
            grid,
            timer,
            updater,
            initialisation,
        })
    }

    /// 配置
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// 状态方程
    pub fn eos(&self) -> &IdealGas {
        &self.eos
    }

    /// 网格
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// 计时器
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// 单步更新器
    pub fn updater(&self) -> &Updater {
        &self.updater
    }

    /// 初始化管理器
    pub fn initialisation(&self) -> &InitialisationManager {
        &self.initialisation
    }

    /// 是否已完成
    pub fn is_complete(&self) -> bool {
        self.timer.is_complete()
    }

    /// 推进一个时间步
    pub fn advance(&mut self) -> SolverResult<()> {
        self.updater.exec(&mut self.grid, &mut self.timer)?;

        let step = self.timer.step();
        log::debug!("步 {}: t={:.6e}, dt={:.4e}", step, self.timer.time(), self.timer.dt());
        let interval = self.config.output.log_interval;
        if interval > 0 && step % interval == 0 {
            log::info!("步 {}: t={:.6}/{}", step, self.timer.time(), self.timer.end_time());
        }
        Ok(())
    }

    /// 推进到完成，返回执行的步数
    pub fn solve(&mut self) -> SolverResult<u64> {
        let start = self.timer.step();
        while !self.is_complete() {
            self.advance()?;
        }
        let steps = self.timer.step() - start;
        log::info!("计算完成: {} 步, t={:.6}", steps, self.timer.time());
        Ok(steps)
    }

    /// 流体区域守恒量积分，按 `max(α, fvm.alpha_min)` 加权
    pub fn conserved_totals(&self) -> StateVector {
        self.grid.conserved_totals(self.config.fvm.alpha_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fl_config::ModuleConfig;

    #[test]
    fn test_build_and_solve_default() {
        let mut config = SolverConfig::default();
        config.grid.nx = 50;
        config.timing.end_time = 0.05;
        let mut solver = Solver::new(&config).unwrap();
        assert!(solver.timer().dt() > 0.0);

        let steps = solver.solve().unwrap();
        assert!(steps > 0);
        assert!(solver.is_complete());
        assert_eq!(solver.timer().time(), 0.05);
    }

    #[test]
    fn test_config_fault_before_first_step() {
        let mut config = SolverConfig::default();
        config.initialisation.levelset = ModuleConfig::named("Sphere");
        let err = Solver::new(&config).unwrap_err();
        assert!(!err.is_numerical());
        assert!(err.to_string().contains("initialisation.levelset.kind"));

        let mut config = SolverConfig::default();
        config.fvm.scheme = "Roe".to_string();
        assert!(Solver::new(&config).unwrap_err().to_string().contains("fvm.scheme"));
    }
}
