// crates/fl_physics/src/schemes/riemann/traits.rs

//! 通量求解器统一接口

use crate::error::SolverError;
use crate::state::{FluxVector, StateVector};
use crate::types::Axis;

/// 通量求解器 trait
///
/// 实现必须无状态、无副作用：同一扫描内的各界面可以独立、并发地求值。
pub trait FluxSolver: Send + Sync {
    /// 求解器名称
    fn name(&self) -> &'static str;

    /// 计算界面数值通量
    ///
    /// # 参数
    /// - `ds`: 界面法向网格间距
    /// - `dt`: 时间步长
    /// - `axis`: 扫描方向
    /// - `left`: 界面负侧状态
    /// - `right`: 界面正侧状态
    ///
    /// # 错误
    /// 非有限波速或退化的接触波速返回 [`SolverError::NumericalInstability`]，
    /// 单元位置由调用方通过 [`SolverError::at`] 补全。
    fn intercell_flux(
        &self,
        ds: f64,
        dt: f64,
        axis: Axis,
        left: &StateVector,
        right: &StateVector,
    ) -> Result<FluxVector, SolverError>;
}
