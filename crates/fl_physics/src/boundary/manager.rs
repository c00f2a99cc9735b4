// crates/fl_physics/src/boundary/manager.rs

//! 边界管理器
//!
//! 幽灵层填充顺序：先沿 x 方向填充内部行的左右幽灵单元，再沿 y 方向
//! 对整行宽度（含左右幽灵列）填充上下幽灵单元，四个角因此也被填充。
//! 水平集在幽灵单元中保持初始化时的值，不随边界条件更新。

use std::ops::Range;

use fl_config::{BoundaryConfig, ConfigError};

use super::types::{BoundaryKind, BOUNDARY_KINDS};
use crate::grid::{Grid, GridLayout};
use crate::types::Axis;

/// 计算域的一条边
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// x = x_min
    Left,
    /// x = x_max
    Right,
    /// y = y_min
    Bottom,
    /// y = y_max
    Top,
}

impl Side {
    /// 全部边（按配置顺序）
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Bottom, Side::Top];

    /// 法向所在的轴
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Side::Left | Side::Right => Axis::X,
            Side::Bottom | Side::Top => Axis::Y,
        }
    }

    /// 是否为下界一侧
    #[inline]
    fn is_low(self) -> bool {
        matches!(self, Side::Left | Side::Bottom)
    }

    /// 配置键
    pub fn config_key(self) -> &'static str {
        match self {
            Side::Left => "boundaries.left",
            Side::Right => "boundaries.right",
            Side::Bottom => "boundaries.bottom",
            Side::Top => "boundaries.top",
        }
    }
}

/// 边界管理器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryManager {
    left: BoundaryKind,
    right: BoundaryKind,
    bottom: BoundaryKind,
    top: BoundaryKind,
}

impl Default for BoundaryManager {
    fn default() -> Self {
        Self::uniform(BoundaryKind::Transmissive)
    }
}

impl BoundaryManager {
    /// 四边使用同一种边界
    pub fn uniform(kind: BoundaryKind) -> Self {
        Self {
            left: kind,
            right: kind,
            bottom: kind,
            top: kind,
        }
    }

    /// 逐边指定
    ///
    /// # 错误
    /// 周期边界未在相对两边成对设置时返回配置错误。
    pub fn new(
        left: BoundaryKind,
        right: BoundaryKind,
        bottom: BoundaryKind,
        top: BoundaryKind,
    ) -> Result<Self, ConfigError> {
        let manager = Self {
            left,
            right,
            bottom,
            top,
        };
        manager.check_periodic_pairs()?;
        Ok(manager)
    }

    /// 从配置创建
    pub fn from_config(cfg: &BoundaryConfig) -> Result<Self, ConfigError> {
        let resolve = |side: Side, name: &str| BOUNDARY_KINDS.lookup_as(side.config_key(), name);
        Self::new(
            resolve(Side::Left, &cfg.left)?,
            resolve(Side::Right, &cfg.right)?,
            resolve(Side::Bottom, &cfg.bottom)?,
            resolve(Side::Top, &cfg.top)?,
        )
    }

    /// 某条边的边界类型
    pub fn kind(&self, side: Side) -> BoundaryKind {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Top => self.top,
        }
    }

    fn check_periodic_pairs(&self) -> Result<(), ConfigError> {
        for (low, high) in [(Side::Left, Side::Right), (Side::Bottom, Side::Top)] {
            let (a, b) = (self.kind(low), self.kind(high));
            if a.is_periodic() != b.is_periodic() {
                let (side, kind) = if a.is_periodic() { (high, b) } else { (low, a) };
                return Err(ConfigError::invalid(
                    side.config_key(),
                    kind,
                    "周期边界必须在相对两边成对设置",
                ));
            }
        }
        Ok(())
    }

    /// 填充全部幽灵单元
    pub fn apply(&self, grid: &mut Grid) {
        let rows = grid.start_y()..grid.end_y();
        for side in [Side::Left, Side::Right] {
            self.fill_side(grid, side, rows.clone());
        }
        let columns = 0..grid.size_x();
        for side in [Side::Bottom, Side::Top] {
            self.fill_side(grid, side, columns.clone());
        }
    }

    /// 填充一条边的幽灵层
    ///
    /// `lines` 为垂直于法向的索引范围（x 边为行号 j，y 边为列号 i）。
    fn fill_side(&self, grid: &mut Grid, side: Side, lines: Range<usize>) {
        let kind = self.kind(side);
        let axis = side.axis();
        let layout = *grid.layout();
        let ghost = layout.ghost();
        let Range { start, end } = layout.interior_range(axis);
        let n = end - start;

        for line in lines {
            for k in 0..ghost {
                // k 为离边界的层数（0 为紧贴边界的一层）
                let (target, source) = if side.is_low() {
                    let source = match kind {
                        BoundaryKind::Transmissive => start,
                        BoundaryKind::Reflective => start + k.min(n - 1),
                        BoundaryKind::Periodic => start + (n - 1 - k % n),
                    };
                    (start - 1 - k, source)
                } else {
                    let source = match kind {
                        BoundaryKind::Transmissive => end - 1,
                        BoundaryKind::Reflective => end - 1 - k.min(n - 1),
                        BoundaryKind::Periodic => start + k % n,
                    };
                    (end + k, source)
                };

                let (si, sj) = GridLayout::cell_along(axis, source, line);
                let value = kind.ghost_state(grid.state(si, sj), axis);
                let (ti, tj) = GridLayout::cell_along(axis, target, line);
                *grid.state_mut(ti, tj) = value;
            }
        }
    }
}
