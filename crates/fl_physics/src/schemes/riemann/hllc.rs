// crates/fl_physics/src/schemes/riemann/hllc.rs

//! HLLC 近似黎曼求解器
//!
//! HLLC (Harten-Lax-van Leer-Contact) 用左波、接触波、右波三个波速构造界面通量，
//! 能够精确分辨静止接触间断。参见 Toro《Riemann Solvers and Numerical Methods
//! for Fluid Dynamics》第 10.6 节。
//!
//! # 核心算法
//!
//! 1. 线性化 (PVRS) 估计星区压力 `p*`
//! 2. 按激波/稀疏波判别计算波强因子 `q`，得到外波速 `S_L`、`S_R`
//! 3. 超声速情形直接返回迎风侧物理通量，否则由 Rankine–Hugoniot
//!    关系构造接触波所在侧的星区状态

use crate::error::SolverError;
use crate::schemes::riemann::traits::FluxSolver;
use crate::state::{momentum_index, FluxVector, IdealGas, StateVector, ENERGY};
use crate::types::Axis;

/// HLLC 求解器
#[derive(Debug, Clone)]
pub struct HllcSolver {
    eos: IdealGas,
}

/// 单侧状态的导出量
#[derive(Debug, Clone, Copy)]
struct Side {
    rho: f64,
    u: f64,
    p: f64,
    a: f64,
}

impl Side {
    #[inline]
    fn new(state: &StateVector, axis: Axis, eos: &IdealGas) -> Self {
        Self {
            rho: state.rho(),
            u: state.velocity(axis),
            p: state.pressure(eos),
            a: state.sound_speed(eos),
        }
    }
}

impl HllcSolver {
    /// 创建新的 HLLC 求解器
    pub fn new(eos: IdealGas) -> Self {
        Self { eos }
    }

    /// 状态方程
    pub fn eos(&self) -> &IdealGas {
        &self.eos
    }

    /// 波强因子：稀疏波为 1，激波按 `sqrt(1 + (γ+1)/(2γ)·(p*/p − 1))`
    #[inline]
    fn wave_factor(&self, p_star: f64, p: f64) -> f64 {
        if p_star <= p {
            1.0
        } else {
            let gamma = self.eos.gamma();
            (1.0 + (gamma + 1.0) / (2.0 * gamma) * (p_star / p - 1.0)).sqrt()
        }
    }

    /// 外波速估计 (S_L, S_R)
    fn wave_speeds(&self, l: &Side, r: &Side) -> Result<(f64, f64), SolverError> {
        let rho_bar = 0.5 * (l.rho + r.rho);
        let a_bar = 0.5 * (l.a + r.a);
        let p_pvrs = 0.5 * (l.p + r.p) - 0.5 * (r.u - l.u) * rho_bar * a_bar;
        let p_star = p_pvrs.max(0.0);

        let q_l = self.wave_factor(p_star, l.p);
        if !q_l.is_finite() {
            return Err(SolverError::instability("q_L", q_l, "HLLC 波强因子"));
        }
        let q_r = self.wave_factor(p_star, r.p);
        if !q_r.is_finite() {
            return Err(SolverError::instability("q_R", q_r, "HLLC 波强因子"));
        }

        let s_l = l.u - l.a * q_l;
        if !s_l.is_finite() {
            return Err(SolverError::instability("S_L", s_l, "HLLC 波速"));
        }
        let s_r = r.u + r.a * q_r;
        if !s_r.is_finite() {
            return Err(SolverError::instability("S_R", s_r, "HLLC 波速"));
        }
        Ok((s_l, s_r))
    }

    /// 接触波速 S*
    fn contact_speed(&self, l: &Side, r: &Side, s_l: f64, s_r: f64) -> Result<f64, SolverError> {
        let delta_l = s_l - l.u;
        let delta_r = s_r - r.u;
        let denom = l.rho * delta_l - r.rho * delta_r;
        let s_star =
            (r.p - l.p + l.rho * l.u * delta_l - r.rho * r.u * delta_r) / denom;
        if denom == 0.0 || !s_star.is_finite() {
            return Err(SolverError::instability("S_star", s_star, "HLLC 接触波速"));
        }
        Ok(s_star)
    }

    /// 星区通量 `F_K + S_K (U*_K − U_K)`
    fn star_flux(
        &self,
        axis: Axis,
        state: &StateVector,
        side: &Side,
        s: f64,
        s_star: f64,
    ) -> FluxVector {
        let delta = s - side.u;
        let mut star = *state / side.rho;
        star[momentum_index(axis)] = s_star;
        star[ENERGY] = state.energy() / side.rho
            + (s_star - side.u) * (s_star + side.p / (side.rho * delta));
        let star = star * (side.rho * delta / (s - s_star));

        FluxVector::physical(state, axis, &self.eos) + FluxVector::from(star - *state) * s
    }
}

impl FluxSolver for HllcSolver {
    fn name(&self) -> &'static str {
        "HLLC"
    }

    fn intercell_flux(
        &self,
        _ds: f64,
        _dt: f64,
        axis: Axis,
        left: &StateVector,
        right: &StateVector,
    ) -> Result<FluxVector, SolverError> {
        let l = Side::new(left, axis, &self.eos);
        let r = Side::new(right, axis, &self.eos);

        let (s_l, s_r) = self.wave_speeds(&l, &r)?;

        // 超声速：全部波向同一侧传播
        if s_l >= 0.0 {
            return Ok(FluxVector::physical(left, axis, &self.eos));
        }
        if s_r <= 0.0 {
            return Ok(FluxVector::physical(right, axis, &self.eos));
        }

        let s_star = self.contact_speed(&l, &r, s_l, s_r)?;
        let flux = if s_star >= 0.0 {
            self.star_flux(axis, left, &l, s_l, s_star)
        } else {
            self.star_flux(axis, right, &r, s_r, s_star)
        };

        if !flux.is_finite() {
            return Err(SolverError::instability("flux", f64::NAN, "HLLC 星区通量"));
        }
        Ok(flux)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Primitive, MOM_X, MOM_Y, RHO};

    fn eos() -> IdealGas {
        IdealGas::new(1.4)
    }

    fn state(rho: f64, ux: f64, uy: f64, p: f64) -> StateVector {
        Primitive::new(rho, ux, uy, p).to_conserved(&eos())
    }

    fn assert_close(a: &FluxVector, b: &FluxVector, tol: f64) {
        for k in 0..FluxVector::size() {
            let scale = 1.0 + a[k].abs().max(b[k].abs());
            assert!((a[k] - b[k]).abs() <= tol * scale, "分量 {}: {} vs {}", k, a[k], b[k]);
        }
    }

    #[test]
    fn test_consistency() {
        let solver = HllcSolver::new(eos());
        for u in [
            state(1.0, 0.0, 0.0, 1.0),
            state(0.125, 0.3, -0.2, 0.1),
            state(2.5, -0.7, 1.1, 4.0),
        ] {
            for axis in Axis::ALL {
                let flux = solver.intercell_flux(0.01, 0.001, axis, &u, &u).unwrap();
                assert_close(&flux, &FluxVector::physical(&u, axis, &eos()), 1e-12);
            }
        }
    }

    #[test]
    fn test_supersonic_left() {
        let solver = HllcSolver::new(eos());
        // u = 3 远大于声速 ≈ 1.18
        let left = state(1.0, 3.0, 0.2, 1.0);
        let right = state(0.8, 2.8, 0.0, 0.9);
        let flux = solver.intercell_flux(0.01, 0.001, Axis::X, &left, &right).unwrap();
        assert_eq!(flux, FluxVector::physical(&left, Axis::X, &eos()));
    }

    #[test]
    fn test_supersonic_right() {
        let solver = HllcSolver::new(eos());
        let left = state(1.0, 0.0, -3.0, 1.0);
        let right = state(0.9, 0.0, -3.2, 0.8);
        let flux = solver.intercell_flux(0.01, 0.001, Axis::Y, &left, &right).unwrap();
        assert_eq!(flux, FluxVector::physical(&right, Axis::Y, &eos()));
    }

    #[test]
    fn test_sod_interface() {
        let solver = HllcSolver::new(eos());
        let left = state(1.0, 0.0, 0.0, 1.0);
        let right = state(0.125, 0.0, 0.0, 0.1);
        let flux = solver.intercell_flux(0.01, 0.001, Axis::X, &left, &right).unwrap();
        assert!(flux.is_finite());
        // 激波向右、稀疏波向左：质量与能量向右输运
        assert!(flux[RHO] > 0.0);
        assert!(flux[ENERGY] > 0.0);
        assert!(flux[MOM_X] > 0.1);
        assert!(flux[MOM_Y].abs() < 1e-14);
    }

    #[test]
    fn test_reflective_pair_has_no_mass_flux() {
        // 状态与其镜像构成固壁黎曼问题，质量通量为零，动量通量为壁面压力
        let solver = HllcSolver::new(eos());
        let u = state(1.0, 0.5, 0.1, 1.0);
        let flux = solver
            .intercell_flux(0.01, 0.001, Axis::X, &u, &u.reflected(Axis::X))
            .unwrap();
        assert!(flux[RHO].abs() < 1e-12);
        assert!(flux[ENERGY].abs() < 1e-12);
        // 流体撞向壁面：壁面压力高于来流压力
        assert!(flux[MOM_X] > 1.0);
    }

    #[test]
    fn test_contact_discontinuity_preserved() {
        // 静止接触间断：密度跳跃、压力速度相同，通量只有压力项
        let solver = HllcSolver::new(eos());
        let left = state(1.0, 0.0, 0.0, 1.0);
        let right = state(0.2, 0.0, 0.0, 1.0);
        let flux = solver.intercell_flux(0.01, 0.001, Axis::X, &left, &right).unwrap();
        assert!(flux[RHO].abs() < 1e-12);
        assert!((flux[MOM_X] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_pressure_is_fatal() {
        let solver = HllcSolver::new(eos());
        let good = state(1.0, 0.0, 0.0, 1.0);
        // 动能超过总能量
        let bad = StateVector::new(1.0, 3.0, 0.0, 1.0);
        let err = solver.intercell_flux(0.01, 0.001, Axis::X, &good, &bad).unwrap_err();
        assert!(err.is_numerical());
    }
}
