// crates/fl_physics/src/fvm/update.rs

//! 单元更新公式
//!
//! 标准单元：`U ← U − (dt/ds)(F₊ − F₋)`
//!
//! 切割单元：`U ← U − dt/(α_s·ds)·(β₊F₊ − β₋F₋ + (β₋ − β₊)F_w)`，
//! 其中 `α_s = max(α, α_min)`，`F_w` 为被遮挡一侧的固壁通量。

use crate::error::SolverResult;
use crate::grid::BoundaryGeometry;
use crate::schemes::FluxSolver;
use crate::state::{FluxVector, StateVector};
use crate::types::Axis;

/// 标准守恒更新
#[inline]
pub fn standard_update(
    state: &StateVector,
    f_minus: &FluxVector,
    f_plus: &FluxVector,
    ds: f64,
    dt: f64,
) -> StateVector {
    *state - StateVector::from(*f_plus - *f_minus) * (dt / ds)
}

/// 固壁通量
///
/// 以单元状态及其沿 `axis` 的镜像构成固壁黎曼问题。`wall_on_plus_side`
/// 为真时固壁位于单元正侧，镜像状态放在右侧，否则放在左侧。
pub fn wall_flux<F: FluxSolver + ?Sized>(
    flux: &F,
    state: &StateVector,
    axis: Axis,
    ds: f64,
    dt: f64,
    wall_on_plus_side: bool,
) -> SolverResult<FluxVector> {
    let mirror = state.reflected(axis);
    if wall_on_plus_side {
        flux.intercell_flux(ds, dt, axis, state, &mirror)
    } else {
        flux.intercell_flux(ds, dt, axis, &mirror, state)
    }
}

/// 切割单元更新
#[allow(clippy::too_many_arguments)]
pub fn cut_cell_update<F: FluxSolver + ?Sized>(
    flux: &F,
    state: &StateVector,
    geom: &BoundaryGeometry,
    axis: Axis,
    f_minus: &FluxVector,
    f_plus: &FluxVector,
    ds: f64,
    dt: f64,
    alpha_min: f64,
) -> SolverResult<StateVector> {
    let (beta_minus, beta_plus) = geom.face_fractions(axis);
    let alpha = geom.alpha().max(alpha_min);

    let mut net = *f_plus * beta_plus - *f_minus * beta_minus;
    if beta_minus != beta_plus {
        let f_wall = wall_flux(flux, state, axis, ds, dt, beta_minus > beta_plus)?;
        net += f_wall * (beta_minus - beta_plus);
    }

    Ok(*state - StateVector::from(net) * (dt / (alpha * ds)))
}
