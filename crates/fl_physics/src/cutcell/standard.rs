// crates/fl_physics/src/cutcell/standard.rs

//! 标准切割单元几何
//!
//! 每个单元的四个角点水平集值由双线性插值得到，单元内界面近似为
//! 角点值的线性零等值线：
//!
//! ```text
//!   TL ───── TR        β_t = 上边 TL→TR 的流体长度分数
//!   │  流体 /  │        β_b, β_l, β_r 同理
//!   │     /    │        α  = 流体多边形面积 / (dx·dy)
//!   │   / 固体 │
//!   BL ───── BR
//! ```
//!
//! α 由 marching-squares 方式裁剪出的流体多边形（φ ≥ 0 的角点加上
//! 边上的零点）经鞋带公式求得。

use glam::DVec2;
use rayon::prelude::*;

use super::CutCellManager;
use crate::grid::{BoundaryGeometry, Grid, LevelSet};

/// 标准切割单元管理器
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardCutCell;

/// 单边流体覆盖分数
///
/// 两端都非负为 1，两端都非正（且不都非负）为 0，否则为流体段长度
/// `max(φa,0) + max(φb,0)` 占 `|φa| + |φb|` 的比例。
#[inline]
pub fn face_fraction(a: f64, b: f64) -> f64 {
    if a >= 0.0 && b >= 0.0 {
        1.0
    } else if a <= 0.0 && b <= 0.0 {
        0.0
    } else {
        (a.max(0.0) + b.max(0.0)) / (a.abs() + b.abs())
    }
}

/// 单元角点（逆时针：BL, BR, TR, TL）
struct Corners {
    points: [DVec2; 4],
    phi: [f64; 4],
}

const BL: usize = 0;
const BR: usize = 1;
const TR: usize = 2;
const TL: usize = 3;

impl Corners {
    fn sample(levelset: &LevelSet, center: DVec2, half: DVec2) -> Self {
        let points = [
            center + DVec2::new(-half.x, -half.y),
            center + DVec2::new(half.x, -half.y),
            center + DVec2::new(half.x, half.y),
            center + DVec2::new(-half.x, half.y),
        ];
        let phi = points.map(|p| levelset.interpolate(p.x, p.y));
        Self { points, phi }
    }

    fn all_fluid(&self) -> bool {
        self.phi.iter().all(|&v| v >= 0.0)
    }

    /// 流体多边形面积（鞋带公式）
    fn fluid_area(&self) -> f64 {
        let mut polygon: Vec<DVec2> = Vec::with_capacity(8);
        for k in 0..4 {
            let next = (k + 1) % 4;
            let (pa, pb) = (self.points[k], self.points[next]);
            let (a, b) = (self.phi[k], self.phi[next]);
            if a >= 0.0 {
                polygon.push(pa);
            }
            if (a >= 0.0) != (b >= 0.0) {
                let t = a / (a - b);
                polygon.push(pa + (pb - pa) * t);
            }
        }
        if polygon.len() < 3 {
            return 0.0;
        }
        let twice_area: f64 = (0..polygon.len())
            .map(|k| polygon[k].perp_dot(polygon[(k + 1) % polygon.len()]))
            .sum();
        0.5 * twice_area.abs()
    }

    /// 角点差分梯度
    fn gradient(&self, spacing: DVec2) -> DVec2 {
        let p = &self.phi;
        DVec2::new(
            (p[BR] + p[TR] - p[BL] - p[TL]) / (2.0 * spacing.x),
            (p[TL] + p[TR] - p[BL] - p[BR]) / (2.0 * spacing.y),
        )
    }
}

impl StandardCutCell {
    /// 计算单个单元的几何
    pub fn cell_geometry(levelset: &LevelSet, center: DVec2, spacing: DVec2) -> BoundaryGeometry {
        let corners = Corners::sample(levelset, center, spacing * 0.5);
        if corners.all_fluid() {
            return BoundaryGeometry::fluid(center);
        }

        let phi = &corners.phi;
        let betas = [
            face_fraction(phi[BL], phi[TL]),
            face_fraction(phi[BR], phi[TR]),
            face_fraction(phi[TL], phi[TR]),
            face_fraction(phi[BL], phi[BR]),
        ];
        let alpha = corners.fluid_area() / (spacing.x * spacing.y);

        let grad = corners.gradient(spacing);
        let grad_norm = grad.length();
        let (xb, nb) = if grad_norm > 0.0 && grad_norm.is_finite() {
            let nb = grad / grad_norm;
            let phi_c = levelset.interpolate(center.x, center.y);
            (center - nb * (phi_c / grad_norm), nb)
        } else {
            (center, DVec2::X)
        };

        BoundaryGeometry::new(alpha, betas, xb, nb)
    }
}

impl CutCellManager for StandardCutCell {
    fn name(&self) -> &'static str {
        "Std"
    }

    fn compute_geometry(&self, grid: &mut Grid) {
        let layout = *grid.layout();
        let spacing = DVec2::new(layout.dx(), layout.dy());
        let levelset = grid.levelset();
        let geometry: Vec<BoundaryGeometry> = (0..layout.n_cells())
            .into_par_iter()
            .map(|idx| {
                let (i, j) = layout.unravel(idx);
                Self::cell_geometry(levelset, layout.cell_center(i, j), spacing)
            })
            .collect();

        let n_cut = geometry.iter().filter(|g| g.is_cut()).count();
        log::debug!("切割单元几何更新: {} 个切割单元", n_cut);
        grid.geometry_mut().copy_from_slice(&geometry);
    }
}
