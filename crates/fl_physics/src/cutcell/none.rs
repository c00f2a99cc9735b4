// crates/fl_physics/src/cutcell/none.rs

//! 无切割单元：每个单元都是纯流体

use super::CutCellManager;
use crate::grid::{BoundaryGeometry, Grid};

/// 无切割单元管理器
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullCutCell;

impl CutCellManager for NullCutCell {
    fn name(&self) -> &'static str {
        "None"
    }

    fn compute_geometry(&self, grid: &mut Grid) {
        let layout = *grid.layout();
        for (idx, geom) in grid.geometry_mut().iter_mut().enumerate() {
            let (i, j) = layout.unravel(idx);
            *geom = BoundaryGeometry::fluid(layout.cell_center(i, j));
        }
    }

    // 几何与水平集无关，初始化后无需刷新
    fn new_time_step_setup(&self, _grid: &mut Grid) {}
}
