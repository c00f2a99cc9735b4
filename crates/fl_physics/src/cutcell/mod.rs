// crates/fl_physics/src/cutcell/mod.rs

//! 切割单元管理器
//!
//! 把水平集场翻译为每个单元的 [`BoundaryGeometry`]（面积分数 α、
//! 四个面覆盖分数 β、边界截点与法向）。几何每个时间步在扫描之前重算一次。
//!
//! - [`NullCutCell`]: 全流体几何，标准有限体积格式使用
//! - [`StandardCutCell`]: 由单元角点水平集值构造线性界面
//!
//! [`BoundaryGeometry`]: crate::grid::BoundaryGeometry

mod none;
mod standard;

pub use none::NullCutCell;
pub use standard::{face_fraction, StandardCutCell};

use crate::grid::Grid;

/// 切割单元管理器接口
pub trait CutCellManager: Send + Sync {
    /// 名称
    fn name(&self) -> &'static str;

    /// 由水平集计算全部单元的边界几何
    fn compute_geometry(&self, grid: &mut Grid);

    /// 每个时间步开始时的刷新钩子
    fn new_time_step_setup(&self, grid: &mut Grid) {
        self.compute_geometry(grid);
    }
}

/// 切割单元管理器（封闭变体集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutCellScheme {
    /// 无切割单元
    None(NullCutCell),
    /// 标准切割单元
    Std(StandardCutCell),
}

impl CutCellScheme {
    /// 无切割单元
    pub fn none() -> Self {
        Self::None(NullCutCell)
    }

    /// 标准切割单元
    pub fn standard() -> Self {
        Self::Std(StandardCutCell)
    }
}

impl CutCellManager for CutCellScheme {
    fn name(&self) -> &'static str {
        match self {
            Self::None(m) => m.name(),
            Self::Std(m) => m.name(),
        }
    }

    fn compute_geometry(&self, grid: &mut Grid) {
        match self {
            Self::None(m) => m.compute_geometry(grid),
            Self::Std(m) => m.compute_geometry(grid),
        }
    }

    fn new_time_step_setup(&self, grid: &mut Grid) {
        match self {
            Self::None(m) => m.new_time_step_setup(grid),
            Self::Std(m) => m.new_time_step_setup(grid),
        }
    }
}
