// crates/fl_physics/src/engine/mod.rs

//! 时间推进引擎
//!
//! - [`Timer`]: CFL 时间步与完成判定
//! - [`Updater`]: 一个完整时间步（几何刷新、维度分裂扫描、边界、计时）
//! - [`Solver`]: 由配置构建的顶层求解器

mod solver;
mod timestep;
mod updater;

pub use solver::Solver;
pub use timestep::{stable_timestep, Timer};
pub use updater::Updater;
