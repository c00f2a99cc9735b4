// crates/fl_physics/src/schemes/mod.rs

//! 数值格式模块
//!
//! 提供界面通量计算所需的近似黎曼求解器。

pub mod riemann;

// 重导出常用类型
pub use riemann::{FluxScheme, FluxSolver, HllcSolver, RusanovSolver, FLUX_SCHEMES};
