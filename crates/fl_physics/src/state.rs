// crates/fl_physics/src/state.rs

//! Euler 方程状态与通量
//!
//! 本模块提供：
//! - [`StateVector`]: 单元守恒变量 `[ρ, ρu_x, ρu_y, E]`
//! - [`FluxVector`]: 沿某一方向穿过单位界面的通量，形状与状态相同
//! - [`IdealGas`]: γ 律理想气体状态方程，负责守恒量与导出量之间的映射
//! - [`Primitive`]: 原始变量 `(ρ, u_x, u_y, p)`，用于初始化
//!
//! # 不变量
//!
//! 每次被接受的更新之后必须满足 ρ > 0 且 p ≥ 0，见 [`StateVector::check_physical`]。

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use crate::error::SolverError;
use crate::types::Axis;

/// 守恒变量个数
pub const NUM_VARS: usize = 4;
/// 密度分量索引
pub const RHO: usize = 0;
/// x 动量分量索引
pub const MOM_X: usize = 1;
/// y 动量分量索引
pub const MOM_Y: usize = 2;
/// 总能量分量索引
pub const ENERGY: usize = 3;

/// 沿给定方向的动量分量索引
#[inline]
pub fn momentum_index(axis: Axis) -> usize {
    match axis {
        Axis::X => MOM_X,
        Axis::Y => MOM_Y,
    }
}

macro_rules! impl_vector_ops {
    ($name:ident) => {
        impl $name {
            /// 零向量
            pub const ZERO: Self = Self([0.0; NUM_VARS]);

            /// 从数组创建
            #[inline]
            pub const fn from_array(data: [f64; NUM_VARS]) -> Self {
                Self(data)
            }

            /// 底层数组
            #[inline]
            pub fn as_array(&self) -> &[f64; NUM_VARS] {
                &self.0
            }

            /// 分量个数
            #[inline]
            pub const fn size() -> usize {
                NUM_VARS
            }

            /// 全部分量是否有限
            #[inline]
            pub fn is_finite(&self) -> bool {
                self.0.iter().all(|v| v.is_finite())
            }

            /// 逐分量最大绝对差
            pub fn max_abs_diff(&self, other: &Self) -> f64 {
                self.0
                    .iter()
                    .zip(other.0.iter())
                    .map(|(a, b)| (a - b).abs())
                    .fold(0.0, f64::max)
            }
        }

        impl Index<usize> for $name {
            type Output = f64;
            #[inline]
            fn index(&self, k: usize) -> &f64 {
                &self.0[k]
            }
        }

        impl IndexMut<usize> for $name {
            #[inline]
            fn index_mut(&mut self, k: usize) -> &mut f64 {
                &mut self.0[k]
            }
        }

        impl Add for $name {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self(std::array::from_fn(|k| self.0[k] + rhs.0[k]))
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self(std::array::from_fn(|k| self.0[k] - rhs.0[k]))
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: f64) -> Self {
                Self(self.0.map(|v| v * rhs))
            }
        }

        impl Mul<$name> for f64 {
            type Output = $name;
            #[inline]
            fn mul(self, rhs: $name) -> $name {
                rhs * self
            }
        }

        impl Div<f64> for $name {
            type Output = Self;
            #[inline]
            fn div(self, rhs: f64) -> Self {
                Self(self.0.map(|v| v / rhs))
            }
        }

        impl Neg for $name {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self(self.0.map(|v| -v))
            }
        }

        impl AddAssign for $name {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                for k in 0..NUM_VARS {
                    self.0[k] += rhs.0[k];
                }
            }
        }

        impl SubAssign for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                for k in 0..NUM_VARS {
                    self.0[k] -= rhs.0[k];
                }
            }
        }
    };
}

// ============================================================
// 守恒状态
// ============================================================

/// 单元守恒状态 `[ρ, ρu_x, ρu_y, E]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StateVector([f64; NUM_VARS]);

impl_vector_ops!(StateVector);

impl StateVector {
    /// 从守恒量创建
    #[inline]
    pub const fn new(rho: f64, mom_x: f64, mom_y: f64, energy: f64) -> Self {
        Self([rho, mom_x, mom_y, energy])
    }

    /// 从原始变量创建
    #[inline]
    pub fn from_primitive(prim: Primitive, eos: &IdealGas) -> Self {
        Self::new(
            prim.rho,
            prim.rho * prim.ux,
            prim.rho * prim.uy,
            eos.total_energy(prim.rho, prim.ux, prim.uy, prim.p),
        )
    }

    /// 密度
    #[inline]
    pub fn rho(&self) -> f64 {
        self.0[RHO]
    }

    /// 总能量
    #[inline]
    pub fn energy(&self) -> f64 {
        self.0[ENERGY]
    }

    /// 沿给定方向的动量
    #[inline]
    pub fn momentum(&self, axis: Axis) -> f64 {
        self.0[momentum_index(axis)]
    }

    /// x 方向速度
    #[inline]
    pub fn ux(&self) -> f64 {
        self.0[MOM_X] / self.0[RHO]
    }

    /// y 方向速度
    #[inline]
    pub fn uy(&self) -> f64 {
        self.0[MOM_Y] / self.0[RHO]
    }

    /// 沿给定方向的速度
    #[inline]
    pub fn velocity(&self, axis: Axis) -> f64 {
        self.momentum(axis) / self.rho()
    }

    /// 压力
    #[inline]
    pub fn pressure(&self, eos: &IdealGas) -> f64 {
        eos.pressure(self)
    }

    /// 声速
    #[inline]
    pub fn sound_speed(&self, eos: &IdealGas) -> f64 {
        eos.sound_speed(self)
    }

    /// 转换为原始变量
    pub fn to_primitive(&self, eos: &IdealGas) -> Primitive {
        Primitive {
            rho: self.rho(),
            ux: self.ux(),
            uy: self.uy(),
            p: self.pressure(eos),
        }
    }

    /// 沿给定方向镜像（法向动量取反）
    #[inline]
    pub fn reflected(&self, axis: Axis) -> Self {
        let mut out = *self;
        let k = momentum_index(axis);
        out.0[k] = -out.0[k];
        out
    }

    /// 检查物理可行性：ρ > 0，p ≥ 0，且全部分量有限
    pub fn check_physical(&self, eos: &IdealGas) -> Result<(), SolverError> {
        if !self.is_finite() {
            let bad = self.0.iter().copied().find(|v| !v.is_finite()).unwrap_or(f64::NAN);
            return Err(SolverError::instability("state", bad, "非有限守恒量"));
        }
        let rho = self.rho();
        if rho <= 0.0 {
            return Err(SolverError::instability("density", rho, "密度非正"));
        }
        let p = self.pressure(eos);
        if !(p >= 0.0) {
            return Err(SolverError::instability("pressure", p, "压力为负"));
        }
        Ok(())
    }
}

impl From<FluxVector> for StateVector {
    #[inline]
    fn from(flux: FluxVector) -> Self {
        Self(flux.0)
    }
}

// ============================================================
// 通量
// ============================================================

/// 沿某一方向穿过单位界面的通量
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FluxVector([f64; NUM_VARS]);

impl_vector_ops!(FluxVector);

impl FluxVector {
    /// 状态的物理通量
    ///
    /// - x: `[ρu, ρu² + p, ρuv, u(E + p)]`
    /// - y: `[ρv, ρuv, ρv² + p, v(E + p)]`
    pub fn physical(state: &StateVector, axis: Axis, eos: &IdealGas) -> Self {
        let u = state.velocity(axis);
        let p = state.pressure(eos);
        let mut flux = Self([
            state.rho() * u,
            state[MOM_X] * u,
            state[MOM_Y] * u,
            u * (state.energy() + p),
        ]);
        flux.0[momentum_index(axis)] += p;
        flux
    }
}

impl From<StateVector> for FluxVector {
    #[inline]
    fn from(state: StateVector) -> Self {
        Self(state.0)
    }
}

// ============================================================
// 状态方程
// ============================================================

/// γ 律理想气体状态方程
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealGas {
    gamma: f64,
}

impl Default for IdealGas {
    fn default() -> Self {
        Self { gamma: 1.4 }
    }
}

impl IdealGas {
    /// 创建状态方程
    pub fn new(gamma: f64) -> Self {
        Self { gamma }
    }

    /// 比热比 γ
    #[inline]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// 压力 `p = (γ − 1)(E − ½ρ|u|²)`
    #[inline]
    pub fn pressure(&self, u: &StateVector) -> f64 {
        let kinetic = 0.5 * (u[MOM_X] * u[MOM_X] + u[MOM_Y] * u[MOM_Y]) / u.rho();
        (self.gamma - 1.0) * (u.energy() - kinetic)
    }

    /// 声速 `a = sqrt(γp/ρ)`
    #[inline]
    pub fn sound_speed(&self, u: &StateVector) -> f64 {
        (self.gamma * self.pressure(u) / u.rho()).sqrt()
    }

    /// 总能量 `E = p/(γ − 1) + ½ρ|u|²`
    #[inline]
    pub fn total_energy(&self, rho: f64, ux: f64, uy: f64, p: f64) -> f64 {
        p / (self.gamma - 1.0) + 0.5 * rho * (ux * ux + uy * uy)
    }
}

// ============================================================
// 原始变量
// ============================================================

/// 原始变量 `(ρ, u_x, u_y, p)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    /// 密度
    pub rho: f64,
    /// x 方向速度
    #[serde(default)]
    pub ux: f64,
    /// y 方向速度
    #[serde(default)]
    pub uy: f64,
    /// 压力
    pub p: f64,
}

impl Primitive {
    /// 创建原始变量
    pub const fn new(rho: f64, ux: f64, uy: f64, p: f64) -> Self {
        Self { rho, ux, uy, p }
    }

    /// 转换为守恒状态
    pub fn to_conserved(self, eos: &IdealGas) -> StateVector {
        StateVector::from_primitive(self, eos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_conversion() {
        let eos = IdealGas::new(1.4);
        let state = Primitive::new(1.2, 0.5, -0.3, 2.0).to_conserved(&eos);
        let prim = state.to_primitive(&eos);
        assert!((prim.rho - 1.2).abs() < 1e-14);
        assert!((prim.ux - 0.5).abs() < 1e-14);
        assert!((prim.uy + 0.3).abs() < 1e-14);
        assert!((prim.p - 2.0).abs() < 1e-13);
        assert!((state.sound_speed(&eos) - (1.4f64 * 2.0 / 1.2).sqrt()).abs() < 1e-13);
    }

    #[test]
    fn test_physical_flux_at_rest() {
        // 静止气体只有压力通量
        let eos = IdealGas::new(1.4);
        let state = Primitive::new(1.0, 0.0, 0.0, 1.0).to_conserved(&eos);
        let fx = FluxVector::physical(&state, Axis::X, &eos);
        let fy = FluxVector::physical(&state, Axis::Y, &eos);
        let p = state.pressure(&eos);
        assert!((p - 1.0).abs() < 1e-12);
        assert_eq!(fx.as_array(), &[0.0, p, 0.0, 0.0]);
        assert_eq!(fy.as_array(), &[0.0, 0.0, p, 0.0]);
    }

    #[test]
    fn test_physical_flux_moving() {
        let eos = IdealGas::new(1.4);
        let state = Primitive::new(2.0, 3.0, 1.0, 0.5).to_conserved(&eos);
        let fx = FluxVector::physical(&state, Axis::X, &eos);
        assert!((fx[RHO] - 6.0).abs() < 1e-12);
        assert!((fx[MOM_X] - (2.0 * 9.0 + 0.5)).abs() < 1e-12);
        assert!((fx[MOM_Y] - 6.0).abs() < 1e-12);
        assert!((fx[ENERGY] - 3.0 * (state.energy() + 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_reflected() {
        let state = StateVector::new(1.0, 2.0, 3.0, 10.0);
        let rx = state.reflected(Axis::X);
        assert_eq!(rx.as_array(), &[1.0, -2.0, 3.0, 10.0]);
        let ry = state.reflected(Axis::Y);
        assert_eq!(ry.as_array(), &[1.0, 2.0, -3.0, 10.0]);
    }

    #[test]
    fn test_check_physical() {
        let eos = IdealGas::new(1.4);
        assert!(StateVector::new(1.0, 0.0, 0.0, 2.5).check_physical(&eos).is_ok());

        let err = StateVector::new(-1.0, 0.0, 0.0, 2.5).check_physical(&eos).unwrap_err();
        assert!(err.to_string().contains("density"));

        // 动能超过总能量，压力为负
        let err = StateVector::new(1.0, 3.0, 0.0, 1.0).check_physical(&eos).unwrap_err();
        assert!(err.to_string().contains("pressure"));

        let err = StateVector::new(f64::NAN, 0.0, 0.0, 1.0).check_physical(&eos).unwrap_err();
        assert!(err.is_numerical());
    }

    #[test]
    fn test_vector_ops() {
        let a = StateVector::new(1.0, 2.0, 3.0, 4.0);
        let b = StateVector::new(0.5, 0.5, 0.5, 0.5);
        assert_eq!((a - b).as_array(), &[0.5, 1.5, 2.5, 3.5]);
        assert_eq!((2.0 * b).as_array(), &[1.0, 1.0, 1.0, 1.0]);
        assert_eq!((a / 2.0)[ENERGY], 2.0);
        let mut c = a;
        c += b;
        assert_eq!(c[RHO], 1.5);
        assert_eq!(a.max_abs_diff(&b), 3.5);
    }
}
