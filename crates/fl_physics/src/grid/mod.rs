// crates/fl_physics/src/grid/mod.rs

//! 结构化网格
//!
//! 稠密二维单元存储，外加一圈幽灵单元：
//!
//! ```text
//!  j
//!  ^   g g g g g g
//!  |   g . . . . g      内部单元: [start_x, end_x) × [start_y, end_y)
//!  |   g . . . . g      幽灵单元: 其余位置，由边界管理器填充
//!  |   g g g g g g
//!  +-------------> i
//! ```
//!
//! 每个单元持有守恒状态、水平集值和边界几何。网格是唯一的可变共享资源，
//! 其余组件只在调用期间借用它。

mod geometry;
mod levelset;

pub use geometry::BoundaryGeometry;
pub use levelset::{LevelSet, FLUID_LEVEL_SET};

use std::ops::Range;

use fl_config::GridConfig;
use glam::DVec2;

use crate::state::StateVector;
use crate::types::Axis;

// ============================================================
// 网格布局
// ============================================================

/// 网格布局：尺寸、间距与坐标映射
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    nx: usize,
    ny: usize,
    ghost: usize,
    dx: f64,
    dy: f64,
    x_min: f64,
    y_min: f64,
}

impl GridLayout {
    /// 创建布局
    ///
    /// # Panics
    /// 单元数为零或区间退化时 panic（配置层已提前校验）
    pub fn new(nx: usize, ny: usize, ghost: usize, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        assert!(nx > 0 && ny > 0, "网格单元数必须为正: nx={}, ny={}", nx, ny);
        assert!(x_range.1 > x_range.0 && y_range.1 > y_range.0, "计算域区间退化");
        Self {
            nx,
            ny,
            ghost,
            dx: (x_range.1 - x_range.0) / nx as f64,
            dy: (y_range.1 - y_range.0) / ny as f64,
            x_min: x_range.0,
            y_min: y_range.0,
        }
    }

    /// 从配置创建
    pub fn from_config(cfg: &GridConfig) -> Self {
        Self::new(cfg.nx, cfg.ny, cfg.ghost, (cfg.x_min, cfg.x_max), (cfg.y_min, cfg.y_max))
    }

    /// x 方向内部单元数
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// y 方向内部单元数
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// 幽灵层宽度
    #[inline]
    pub fn ghost(&self) -> usize {
        self.ghost
    }

    /// x 方向总单元数（含幽灵层）
    #[inline]
    pub fn size_x(&self) -> usize {
        self.nx + 2 * self.ghost
    }

    /// y 方向总单元数（含幽灵层）
    #[inline]
    pub fn size_y(&self) -> usize {
        self.ny + 2 * self.ghost
    }

    /// 第一个内部单元的 x 索引
    #[inline]
    pub fn start_x(&self) -> usize {
        self.ghost
    }

    /// 内部单元 x 索引上界（不含）
    #[inline]
    pub fn end_x(&self) -> usize {
        self.ghost + self.nx
    }

    /// 第一个内部单元的 y 索引
    #[inline]
    pub fn start_y(&self) -> usize {
        self.ghost
    }

    /// 内部单元 y 索引上界（不含）
    #[inline]
    pub fn end_y(&self) -> usize {
        self.ghost + self.ny
    }

    /// x 方向间距
    #[inline]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// y 方向间距
    #[inline]
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// 沿给定方向的间距
    #[inline]
    pub fn spacing(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.dx,
            Axis::Y => self.dy,
        }
    }

    /// 单元面积
    #[inline]
    pub fn cell_area(&self) -> f64 {
        self.dx * self.dy
    }

    /// 单元中心 x 坐标
    #[inline]
    pub fn x(&self, i: usize) -> f64 {
        self.x_min + (i as f64 - self.ghost as f64 + 0.5) * self.dx
    }

    /// 单元中心 y 坐标
    #[inline]
    pub fn y(&self, j: usize) -> f64 {
        self.y_min + (j as f64 - self.ghost as f64 + 0.5) * self.dy
    }

    /// 单元中心
    #[inline]
    pub fn cell_center(&self, i: usize, j: usize) -> DVec2 {
        DVec2::new(self.x(i), self.y(j))
    }

    /// 总单元数（含幽灵层）
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.size_x() * self.size_y()
    }

    /// 线性索引
    ///
    /// # Panics
    /// 越界索引属于编程错误，直接 panic
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.size_x() && j < self.size_y(),
            "单元索引 ({}, {}) 越界: 网格尺寸 {}x{}",
            i,
            j,
            self.size_x(),
            self.size_y()
        );
        j * self.size_x() + i
    }

    /// 沿给定方向的内部索引范围
    #[inline]
    pub fn interior_range(&self, axis: Axis) -> Range<usize> {
        match axis {
            Axis::X => self.start_x()..self.end_x(),
            Axis::Y => self.start_y()..self.end_y(),
        }
    }

    /// (扫描方向索引, 垂直方向索引) → (i, j)
    #[inline]
    pub fn cell_along(axis: Axis, along: usize, line: usize) -> (usize, usize) {
        match axis {
            Axis::X => (along, line),
            Axis::Y => (line, along),
        }
    }

    /// 线性索引 → (i, j)
    #[inline]
    pub fn unravel(&self, idx: usize) -> (usize, usize) {
        (idx % self.size_x(), idx / self.size_x())
    }

    /// 遍历内部单元 (i, j)，j 为外层循环
    pub fn interior_cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (sx, ex) = (self.start_x(), self.end_x());
        (self.start_y()..self.end_y()).flat_map(move |j| (sx..ex).map(move |i| (i, j)))
    }
}

// ============================================================
// 网格
// ============================================================

/// 网格：状态、水平集与边界几何的唯一所有者
#[derive(Debug, Clone)]
pub struct Grid {
    layout: GridLayout,
    states: Vec<StateVector>,
    levelset: LevelSet,
    geometry: Vec<BoundaryGeometry>,
}

impl Grid {
    /// 创建网格：状态为零，水平集为纯流体，几何为全覆盖
    pub fn new(layout: GridLayout) -> Self {
        let n = layout.n_cells();
        let mut geometry = Vec::with_capacity(n);
        for j in 0..layout.size_y() {
            for i in 0..layout.size_x() {
                geometry.push(BoundaryGeometry::fluid(layout.cell_center(i, j)));
            }
        }
        Self {
            layout,
            states: vec![StateVector::ZERO; n],
            levelset: LevelSet::new(layout, FLUID_LEVEL_SET),
            geometry,
        }
    }

    /// 从配置创建
    pub fn from_config(cfg: &GridConfig) -> Self {
        Self::new(GridLayout::from_config(cfg))
    }

    /// 网格布局
    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// x 方向间距
    #[inline]
    pub fn dx(&self) -> f64 {
        self.layout.dx()
    }

    /// y 方向间距
    #[inline]
    pub fn dy(&self) -> f64 {
        self.layout.dy()
    }

    /// 沿给定方向的间距
    #[inline]
    pub fn spacing(&self, axis: Axis) -> f64 {
        self.layout.spacing(axis)
    }

    /// 单元中心 x 坐标
    #[inline]
    pub fn x(&self, i: usize) -> f64 {
        self.layout.x(i)
    }

    /// 单元中心 y 坐标
    #[inline]
    pub fn y(&self, j: usize) -> f64 {
        self.layout.y(j)
    }

    /// 第一个内部单元的 x 索引
    #[inline]
    pub fn start_x(&self) -> usize {
        self.layout.start_x()
    }

    /// 内部单元 x 索引上界
    #[inline]
    pub fn end_x(&self) -> usize {
        self.layout.end_x()
    }

    /// 第一个内部单元的 y 索引
    #[inline]
    pub fn start_y(&self) -> usize {
        self.layout.start_y()
    }

    /// 内部单元 y 索引上界
    #[inline]
    pub fn end_y(&self) -> usize {
        self.layout.end_y()
    }

    /// x 方向总单元数
    #[inline]
    pub fn size_x(&self) -> usize {
        self.layout.size_x()
    }

    /// y 方向总单元数
    #[inline]
    pub fn size_y(&self) -> usize {
        self.layout.size_y()
    }

    // ========== 状态访问 ==========

    /// 单元状态
    #[inline]
    pub fn state(&self, i: usize, j: usize) -> &StateVector {
        &self.states[self.layout.index(i, j)]
    }

    /// 单元状态（可变）
    #[inline]
    pub fn state_mut(&mut self, i: usize, j: usize) -> &mut StateVector {
        let idx = self.layout.index(i, j);
        &mut self.states[idx]
    }

    /// 全部状态（行优先，含幽灵层）
    #[inline]
    pub fn states(&self) -> &[StateVector] {
        &self.states
    }

    // ========== 水平集与几何 ==========

    /// 水平集场
    #[inline]
    pub fn levelset(&self) -> &LevelSet {
        &self.levelset
    }

    /// 水平集场（可变）
    #[inline]
    pub fn levelset_mut(&mut self) -> &mut LevelSet {
        &mut self.levelset
    }

    /// 单元边界几何
    #[inline]
    pub fn boundary(&self, i: usize, j: usize) -> &BoundaryGeometry {
        &self.geometry[self.layout.index(i, j)]
    }

    /// 全部单元几何（行优先，含幽灵层）
    #[inline]
    pub fn geometry(&self) -> &[BoundaryGeometry] {
        &self.geometry
    }

    /// 全部单元几何（可变）
    #[inline]
    pub fn geometry_mut(&mut self) -> &mut [BoundaryGeometry] {
        &mut self.geometry
    }

    // ========== 统计 ==========

    /// 内部单元状态逐分量求和
    pub fn interior_sum(&self) -> StateVector {
        let mut total = StateVector::ZERO;
        for (i, j) in self.layout.interior_cells() {
            total += *self.state(i, j);
        }
        total
    }

    /// 流体区域守恒量积分 `Σ α_s·U·dx·dy`
    ///
    /// `α_s = max(α, alpha_min)` 与切割单元更新所除的体积一致，固体单元权重为零。
    /// 这样加权的总量在固壁与周期边界下被格式精确守恒（至舍入误差）。
    pub fn conserved_totals(&self, alpha_min: f64) -> StateVector {
        let mut total = StateVector::ZERO;
        for (i, j) in self.layout.interior_cells() {
            let geom = self.boundary(i, j);
            if geom.is_solid() {
                continue;
            }
            total += *self.state(i, j) * geom.alpha().max(alpha_min);
        }
        total * self.layout.cell_area()
    }
}
