// crates/fl_physics/src/grid/geometry.rs

//! 单元边界几何
//!
//! 由水平集每步重算一次，生命周期恰为一个时间步。

use glam::DVec2;

use crate::types::Axis;

/// 单元边界几何
///
/// - `alpha`: 单元内流体面积分数 ∈ [0, 1]
/// - `beta_*`: 左/右/上/下四个面的流体覆盖分数 ∈ [0, 1]
/// - `xb`: 边界截点
/// - `nb`: 边界法向（指向流体），`alpha < 1` 时为单位向量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryGeometry {
    alpha: f64,
    beta_l: f64,
    beta_r: f64,
    beta_t: f64,
    beta_b: f64,
    xb: DVec2,
    nb: DVec2,
}

impl BoundaryGeometry {
    /// 纯流体单元
    pub fn fluid(center: DVec2) -> Self {
        Self {
            alpha: 1.0,
            beta_l: 1.0,
            beta_r: 1.0,
            beta_t: 1.0,
            beta_b: 1.0,
            xb: center,
            nb: DVec2::ZERO,
        }
    }

    /// 一般单元
    ///
    /// 分数被钳制到 [0, 1]；`alpha < 1` 时法向被归一化，零向量退化为 +x。
    pub fn new(alpha: f64, betas: [f64; 4], xb: DVec2, nb: DVec2) -> Self {
        let [beta_l, beta_r, beta_t, beta_b] = betas.map(|b| b.clamp(0.0, 1.0));
        let alpha = alpha.clamp(0.0, 1.0);
        let nb = if alpha < 1.0 {
            nb.try_normalize().unwrap_or(DVec2::X)
        } else {
            nb
        };
        Self {
            alpha,
            beta_l,
            beta_r,
            beta_t,
            beta_b,
            xb,
            nb,
        }
    }

    /// 流体面积分数
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// 左面覆盖分数
    #[inline]
    pub fn beta_l(&self) -> f64 {
        self.beta_l
    }

    /// 右面覆盖分数
    #[inline]
    pub fn beta_r(&self) -> f64 {
        self.beta_r
    }

    /// 上面覆盖分数
    #[inline]
    pub fn beta_t(&self) -> f64 {
        self.beta_t
    }

    /// 下面覆盖分数
    #[inline]
    pub fn beta_b(&self) -> f64 {
        self.beta_b
    }

    /// 边界截点
    #[inline]
    pub fn xb(&self) -> DVec2 {
        self.xb
    }

    /// 边界法向
    #[inline]
    pub fn nb(&self) -> DVec2 {
        self.nb
    }

    /// 沿给定方向的（负侧, 正侧）面覆盖分数
    #[inline]
    pub fn face_fractions(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.beta_l, self.beta_r),
            Axis::Y => (self.beta_b, self.beta_t),
        }
    }

    /// 纯流体单元
    #[inline]
    pub fn is_fluid(&self) -> bool {
        self.alpha >= 1.0
            && self.beta_l >= 1.0
            && self.beta_r >= 1.0
            && self.beta_t >= 1.0
            && self.beta_b >= 1.0
    }

    /// 纯固体单元
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.alpha <= 0.0
    }

    /// 切割单元（部分被固体覆盖）
    #[inline]
    pub fn is_cut(&self) -> bool {
        !self.is_fluid() && !self.is_solid()
    }
}
