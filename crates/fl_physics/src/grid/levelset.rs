// crates/fl_physics/src/grid/levelset.rs

//! 水平集场
//!
//! 标量场定义在单元中心，零等值线即嵌入边界：正值为流体，负值为固体。
//! 任意实坐标处的值由相邻四个单元中心双线性插值得到，用于定位亚单元边界。

use std::ops::{Index, IndexMut};

use super::GridLayout;

/// 纯流体区域的水平集取值
pub const FLUID_LEVEL_SET: f64 = 1.0e10;

/// 水平集场
#[derive(Debug, Clone)]
pub struct LevelSet {
    layout: GridLayout,
    values: Vec<f64>,
}

impl LevelSet {
    /// 创建常值水平集
    pub fn new(layout: GridLayout, value: f64) -> Self {
        Self {
            layout,
            values: vec![value; layout.n_cells()],
        }
    }

    /// 全部值（行优先，含幽灵层）
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// 双线性插值
    ///
    /// 查询点超出单元中心覆盖范围时按最近的单元中心钳制。
    pub fn interpolate(&self, x: f64, y: f64) -> f64 {
        let l = &self.layout;
        let (i0, tx) = Self::bracket(
            (x - l.x(0)) / l.dx(),
            l.size_x(),
        );
        let (j0, ty) = Self::bracket(
            (y - l.y(0)) / l.dy(),
            l.size_y(),
        );

        let v00 = self[(i0, j0)];
        let v10 = self[(i0 + 1, j0)];
        let v01 = self[(i0, j0 + 1)];
        let v11 = self[(i0 + 1, j0 + 1)];

        (1.0 - ty) * ((1.0 - tx) * v00 + tx * v10) + ty * ((1.0 - tx) * v01 + tx * v11)
    }

    /// 连续索引坐标 → (左下单元索引, 插值权重)
    #[inline]
    fn bracket(s: f64, size: usize) -> (usize, f64) {
        let max_base = size.saturating_sub(2);
        let base = if s.is_finite() { s.floor().max(0.0) as usize } else { 0 };
        let base = base.min(max_base);
        let t = (s - base as f64).clamp(0.0, 1.0);
        (base, t)
    }
}

impl Index<(usize, usize)> for LevelSet {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.values[self.layout.index(i, j)]
    }
}

impl IndexMut<(usize, usize)> for LevelSet {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        let idx = self.layout.index(i, j);
        &mut self.values[idx]
    }
}
