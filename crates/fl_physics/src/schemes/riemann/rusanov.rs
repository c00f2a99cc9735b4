// crates/fl_physics/src/schemes/riemann/rusanov.rs

//! Rusanov (局部 Lax-Friedrichs) 求解器
//!
//! `F = ½(F_L + F_R) − ½ s_max (U_R − U_L)`，`s_max = max(|u_L|+a_L, |u_R|+a_R)`。
//! 只用一个波速，接触间断被抹平，但对强激波和近真空状态非常鲁棒。

use crate::error::SolverError;
use crate::schemes::riemann::traits::FluxSolver;
use crate::state::{FluxVector, IdealGas, StateVector};
use crate::types::Axis;

/// Rusanov 求解器
#[derive(Debug, Clone)]
pub struct RusanovSolver {
    eos: IdealGas,
}

impl RusanovSolver {
    /// 创建新的 Rusanov 求解器
    pub fn new(eos: IdealGas) -> Self {
        Self { eos }
    }

    /// 状态方程
    pub fn eos(&self) -> &IdealGas {
        &self.eos
    }

    #[inline]
    fn max_signal_speed(&self, state: &StateVector, axis: Axis) -> f64 {
        state.velocity(axis).abs() + state.sound_speed(&self.eos)
    }
}

impl FluxSolver for RusanovSolver {
    fn name(&self) -> &'static str {
        "Rusanov"
    }

    fn intercell_flux(
        &self,
        _ds: f64,
        _dt: f64,
        axis: Axis,
        left: &StateVector,
        right: &StateVector,
    ) -> Result<FluxVector, SolverError> {
        let s_l = self.max_signal_speed(left, axis);
        let s_r = self.max_signal_speed(right, axis);
        // f64::max 会吞掉 NaN，逐侧检查
        if !s_l.is_finite() {
            return Err(SolverError::instability("s_max", s_l, "Rusanov 波速"));
        }
        if !s_r.is_finite() {
            return Err(SolverError::instability("s_max", s_r, "Rusanov 波速"));
        }
        let s_max = s_l.max(s_r);

        let f_l = FluxVector::physical(left, axis, &self.eos);
        let f_r = FluxVector::physical(right, axis, &self.eos);
        let flux = (f_l + f_r) * 0.5 - FluxVector::from(*right - *left) * (0.5 * s_max);

        if !flux.is_finite() {
            return Err(SolverError::instability("flux", f64::NAN, "Rusanov 通量"));
        }
        Ok(flux)
    }
}
