// crates/fl_config/src/lib.rs

//! FVlite 配置层
//!
//! 提供求解器配置结构、参数校验和 JSON 读写。
//!
//! # 模块概览
//!
//! - [`solver_config`]: SolverConfig 及各分节配置
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! fl_cli      ─> uses SolverConfig, Solver
//! fl_physics  ─> 按名称解析 SolverConfig 中的格式/类型
//! fl_config   ─> SolverConfig, ConfigError (本层)
//! ```
//!
//! 本层只描述"要什么"，名称到具体实现的解析在 `fl_physics::registry` 中完成。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod solver_config;

// 重导出核心类型
pub use error::ConfigError;
pub use solver_config::{
    BoundaryConfig, FvmConfig, GridConfig, InitialisationConfig, ModuleConfig, OutputConfig,
    PhysicsConfig, SolverConfig, SplittingOrder, TimingConfig,
};
