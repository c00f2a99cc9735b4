// crates/fl_physics/src/lib.rs

//! FVlite 物理核心
//!
//! 二维 Euler 方程的维度分裂有限体积求解器，支持基于水平集的切割单元
//! 嵌入边界。包括：
//! - 守恒状态与理想气体状态方程 (state)
//! - 结构化网格、水平集与单元几何 (grid)
//! - 近似黎曼求解器 (schemes) - HLLC、Rusanov
//! - 切割单元管理器 (cutcell)
//! - 单方向扫描的有限体积更新 (fvm)
//! - 计算域边界 (boundary)
//! - 初始条件 (initialisation)
//! - 时间推进引擎 (engine) - 计时器、单步更新器、顶层求解器
//!
//! # 数据流
//!
//! ```text
//! SolverConfig ─> Solver::new ─> InitialisationManager ─> Grid
//!                                                          │
//!   ┌──────────────── Updater::exec (每步) ───────────────┘
//!   │  FvmSolver::new_time_step  (CutCellManager 重算几何)
//!   │  FvmSolver::exec(X/Y)      (FluxSolver 计算界面通量)
//!   │  BoundaryManager::apply    (填充幽灵单元)
//!   └─ Timer::advance / calibrate_timestep
//! ```
//!
//! # 使用示例
//!
//! ```ignore
//! use fl_config::SolverConfig;
//! use fl_physics::Solver;
//!
//! let config = SolverConfig::from_file("shock_tube.json")?;
//! let mut solver = Solver::new(&config)?;
//! solver.solve()?;
//! println!("质量: {}", solver.conserved_totals().rho());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod cutcell;
pub mod engine;
pub mod error;
pub mod fvm;
pub mod grid;
pub mod initialisation;
pub mod registry;
pub mod schemes;
pub mod state;
pub mod types;

// 重导出常用类型
pub use boundary::{BoundaryKind, BoundaryManager, Side};
pub use cutcell::{CutCellManager, CutCellScheme, NullCutCell, StandardCutCell};
pub use engine::{stable_timestep, Solver, Timer, Updater};
pub use error::{CellLocation, SolverError, SolverResult};
pub use fvm::{FvmKind, FvmSolver};
pub use grid::{BoundaryGeometry, Grid, GridLayout, LevelSet, FLUID_LEVEL_SET};
pub use initialisation::{
    InitialisationManager, LevelSetInitialiser, LevelSetModule, StateInitialiser, StateModule,
};
pub use registry::Registry;
pub use schemes::{FluxScheme, FluxSolver, HllcSolver, RusanovSolver};
pub use state::{FluxVector, IdealGas, Primitive, StateVector};
pub use types::Axis;
