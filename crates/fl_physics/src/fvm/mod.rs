// crates/fl_physics/src/fvm/mod.rs

//! 维度分裂有限体积求解器
//!
//! 一次 [`FvmSolver::exec`] 沿一个方向完成一次扫描：
//!
//! 1. 以未修改的网格为快照，按行（或列）并行计算全部界面通量
//! 2. 逐单元计算新状态写入缓冲区并检查物理可行性
//! 3. 整个扫描无错误后一次性提交
//!
//! 任何单元更新失败时网格保持扫描前的状态。
//!
//! | 类型 | 切割单元管理器 |
//! |------|---------------|
//! | `Std` | [`NullCutCell`](crate::cutcell::NullCutCell) |
//! | `CutCell` | [`StandardCutCell`](crate::cutcell::StandardCutCell) |

mod update;

pub use update::{cut_cell_update, standard_update, wall_flux};

use fl_config::FvmConfig;
use rayon::prelude::*;

use crate::cutcell::{CutCellManager, CutCellScheme};
use crate::error::SolverResult;
use crate::grid::{Grid, GridLayout};
use crate::registry::Registry;
use crate::schemes::{FluxScheme, FluxSolver};
use crate::state::{FluxVector, IdealGas, StateVector};
use crate::types::Axis;

/// FVM 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FvmKind {
    /// 标准有限体积
    Std,
    /// 切割单元有限体积
    CutCell,
}

/// FVM 类型注册表（配置键 `fvm.type`）
pub static FVM_KINDS: Registry<FvmKind> = Registry::new(
    "fvm.type",
    &[("Std", FvmKind::Std), ("CutCell", FvmKind::CutCell)],
);

impl FvmKind {
    /// 对应的切割单元管理器
    pub fn cut_cell(self) -> CutCellScheme {
        match self {
            Self::Std => CutCellScheme::none(),
            Self::CutCell => CutCellScheme::standard(),
        }
    }

    /// 名称
    pub fn name(self) -> &'static str {
        match self {
            Self::Std => "Std",
            Self::CutCell => "CutCell",
        }
    }
}

/// 有限体积求解器
#[derive(Debug, Clone)]
pub struct FvmSolver {
    kind: FvmKind,
    flux: FluxScheme,
    cut_cell: CutCellScheme,
    eos: IdealGas,
    alpha_min: f64,
}

impl FvmSolver {
    /// 创建求解器
    pub fn new(kind: FvmKind, flux: FluxScheme, eos: IdealGas, alpha_min: f64) -> Self {
        Self {
            kind,
            flux,
            cut_cell: kind.cut_cell(),
            eos,
            alpha_min,
        }
    }

    /// 从配置创建（类型与通量格式经注册表解析）
    pub fn from_config(cfg: &FvmConfig, eos: IdealGas) -> SolverResult<Self> {
        let kind = FVM_KINDS.lookup(&cfg.fvm_type)?;
        let flux = FluxScheme::from_name(&cfg.scheme, eos)?;
        log::info!(
            "FVM 求解器: 类型={}, 通量={}, 切割单元={}",
            kind.name(),
            flux.name(),
            kind.cut_cell().name()
        );
        Ok(Self::new(kind, flux, eos, cfg.alpha_min))
    }

    /// FVM 类型
    pub fn kind(&self) -> FvmKind {
        self.kind
    }

    /// 通量格式
    pub fn flux(&self) -> &FluxScheme {
        &self.flux
    }

    /// 切割单元管理器
    pub fn cut_cell(&self) -> &CutCellScheme {
        &self.cut_cell
    }

    /// 状态方程
    pub fn eos(&self) -> &IdealGas {
        &self.eos
    }

    /// 由水平集计算初始几何
    pub fn compute_geometry(&self, grid: &mut Grid) {
        self.cut_cell.compute_geometry(grid);
    }

    /// 每个时间步开始时刷新几何（每步恰好一次）
    pub fn new_time_step(&self, grid: &mut Grid) {
        self.cut_cell.new_time_step_setup(grid);
    }

    /// 沿 `axis` 执行一次扫描
    ///
    /// # 错误
    /// 通量计算或更新后状态非物理时返回数值不稳定错误（含单元位置），
    /// 此时网格未被修改。
    pub fn exec(&self, grid: &mut Grid, axis: Axis, dt: f64) -> SolverResult<()> {
        let layout = *grid.layout();
        let lines = layout.interior_range(axis.other());

        let snapshot: &Grid = grid;
        let updated: Vec<Vec<StateVector>> = lines
            .clone()
            .into_par_iter()
            .map(|line| self.sweep_line(snapshot, axis, line, dt))
            .collect::<SolverResult<_>>()?;

        let along = layout.interior_range(axis);
        for (line, states) in lines.zip(updated) {
            for (a, state) in along.clone().zip(states) {
                let (i, j) = GridLayout::cell_along(axis, a, line);
                *grid.state_mut(i, j) = state;
            }
        }
        Ok(())
    }

    /// 计算一条扫描线上全部内部单元的新状态
    fn sweep_line(
        &self,
        grid: &Grid,
        axis: Axis,
        line: usize,
        dt: f64,
    ) -> SolverResult<Vec<StateVector>> {
        let layout = grid.layout();
        let along = layout.interior_range(axis);
        let ds = layout.spacing(axis);

        // 第 k 个界面位于单元 start+k-1 与 start+k 之间
        let fluxes = (along.start..=along.end)
            .map(|a| {
                let (li, lj) = GridLayout::cell_along(axis, a - 1, line);
                let (ri, rj) = GridLayout::cell_along(axis, a, line);
                if grid.boundary(li, lj).is_solid() && grid.boundary(ri, rj).is_solid() {
                    return Ok(FluxVector::ZERO);
                }
                self.flux
                    .intercell_flux(ds, dt, axis, grid.state(li, lj), grid.state(ri, rj))
                    .map_err(|e| e.at(ri, rj))
            })
            .collect::<SolverResult<Vec<_>>>()?;

        along
            .enumerate()
            .map(|(k, a)| {
                let (i, j) = GridLayout::cell_along(axis, a, line);
                self.update_cell(grid, i, j, axis, &fluxes[k], &fluxes[k + 1], ds, dt)
                    .map_err(|e| e.at(i, j))
            })
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn update_cell(
        &self,
        grid: &Grid,
        i: usize,
        j: usize,
        axis: Axis,
        f_minus: &FluxVector,
        f_plus: &FluxVector,
        ds: f64,
        dt: f64,
    ) -> SolverResult<StateVector> {
        let state = grid.state(i, j);
        let geom = grid.boundary(i, j);
        if geom.is_solid() {
            return Ok(*state);
        }

        let (beta_minus, beta_plus) = geom.face_fractions(axis);
        let updated = if geom.alpha() >= 1.0 && beta_minus >= 1.0 && beta_plus >= 1.0 {
            standard_update(state, f_minus, f_plus, ds, dt)
        } else {
            cut_cell_update(
                &self.flux,
                state,
                geom,
                axis,
                f_minus,
                f_plus,
                ds,
                dt,
                self.alpha_min,
            )?
        };

        updated.check_physical(&self.eos)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Primitive, RHO};

    fn solver(kind: FvmKind) -> FvmSolver {
        let eos = IdealGas::new(1.4);
        FvmSolver::new(kind, FluxScheme::from_name("HLLC", eos).unwrap(), eos, 0.5)
    }

    fn uniform_grid(state: StateVector) -> Grid {
        let mut grid = Grid::new(GridLayout::new(6, 4, 1, (0.0, 1.0), (0.0, 1.0)));
        for idx in 0..grid.layout().n_cells() {
            let (i, j) = grid.layout().unravel(idx);
            *grid.state_mut(i, j) = state;
        }
        grid
    }

    #[test]
    fn test_registry() {
        assert_eq!(FVM_KINDS.lookup("CutCell").unwrap(), FvmKind::CutCell);
        assert_eq!(FvmKind::Std.cut_cell().name(), "None");
        assert_eq!(FvmKind::CutCell.cut_cell().name(), "Std");
        let cfg = FvmConfig {
            fvm_type: "Upwind".to_string(),
            ..FvmConfig::default()
        };
        let err = FvmSolver::from_config(&cfg, IdealGas::new(1.4)).unwrap_err();
        assert!(err.to_string().contains("fvm.type"));
    }

    #[test]
    fn test_uniform_state_unchanged() {
        let eos = IdealGas::new(1.4);
        let u = Primitive::new(1.0, 0.3, -0.2, 1.0).to_conserved(&eos);
        let mut grid = uniform_grid(u);
        let fvm = solver(FvmKind::Std);
        fvm.exec(&mut grid, Axis::X, 0.01).unwrap();
        fvm.exec(&mut grid, Axis::Y, 0.01).unwrap();
        for (i, j) in grid.layout().interior_cells() {
            assert!(grid.state(i, j).max_abs_diff(&u) < 1e-12);
        }
    }

    #[test]
    fn test_failed_sweep_leaves_grid_untouched() {
        let eos = IdealGas::new(1.4);
        let u = Primitive::new(1.0, 0.0, 0.0, 1.0).to_conserved(&eos);
        let mut grid = uniform_grid(u);
        // 一个非物理单元
        *grid.state_mut(3, 2) = StateVector::new(1.0, 5.0, 0.0, 1.0);
        let before = grid.states().to_vec();

        let err = solver(FvmKind::Std).exec(&mut grid, Axis::X, 0.01).unwrap_err();
        assert!(err.is_numerical());
        assert_eq!(grid.states(), &before[..]);
    }

    #[test]
    fn test_solid_cells_not_updated() {
        let eos = IdealGas::new(1.4);
        let u = Primitive::new(1.0, 0.4, 0.0, 1.0).to_conserved(&eos);
        let mut grid = uniform_grid(u);
        // 左半边为固体
        let layout = *grid.layout();
        for idx in 0..layout.n_cells() {
            let (i, j) = layout.unravel(idx);
            grid.levelset_mut()[(i, j)] = layout.x(i) - 0.5;
        }
        let fvm = solver(FvmKind::CutCell);
        fvm.new_time_step(&mut grid);
        *grid.state_mut(2, 2) = StateVector::new(7.0, 0.0, 0.0, 20.0);

        fvm.exec(&mut grid, Axis::X, 0.005).unwrap();
        assert!(grid.boundary(2, 2).is_solid());
        assert_eq!(grid.state(2, 2)[RHO], 7.0);
    }
}
