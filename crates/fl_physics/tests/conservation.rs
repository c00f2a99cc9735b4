// crates/fl_physics/tests/conservation.rs

//! 守恒性测试
//!
//! 周期边界下每次扫描前后内部单元守恒量之和不变；
//! 反射边界下质量与能量守恒。

use fl_config::{ModuleConfig, SolverConfig, SplittingOrder};
use fl_physics::{
    Axis, BoundaryKind, BoundaryManager, FluxScheme, FvmKind, FvmSolver, Grid, GridLayout,
    IdealGas, Primitive, Solver, StateVector,
};
use serde_json::json;

fn relative_diff(a: &StateVector, b: &StateVector) -> f64 {
    let scale = 1.0 + a.as_array().iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    a.max_abs_diff(b) / scale
}

/// 光滑的非均匀初始场
fn wavy_grid(eos: &IdealGas) -> Grid {
    let mut grid = Grid::new(GridLayout::new(16, 12, 2, (0.0, 1.0), (0.0, 0.75)));
    let layout = *grid.layout();
    for idx in 0..layout.n_cells() {
        let (i, j) = layout.unravel(idx);
        let (x, y) = (layout.x(i), layout.y(j));
        let rho = 1.0 + 0.3 * (6.0 * x).sin() * (8.0 * y).cos();
        let prim = Primitive::new(rho, 0.4 * (4.0 * y).sin(), -0.3, 1.0 + 0.2 * (5.0 * x).cos());
        *grid.state_mut(i, j) = prim.to_conserved(eos);
    }
    grid
}

#[test]
fn test_periodic_sweeps_conserve() {
    let eos = IdealGas::new(1.4);
    let boundaries = BoundaryManager::uniform(BoundaryKind::Periodic);
    for scheme in ["HLLC", "Rusanov"] {
        let fvm = FvmSolver::new(FvmKind::Std, FluxScheme::from_name(scheme, eos).unwrap(), eos, 0.5);
        let mut grid = wavy_grid(&eos);
        boundaries.apply(&mut grid);
        let dt = 0.4 * fl_physics::stable_timestep(&grid, &eos, 1.0).unwrap();

        for axis in [Axis::X, Axis::Y, Axis::Y, Axis::X] {
            let before = grid.interior_sum();
            fvm.exec(&mut grid, axis, dt).unwrap();
            boundaries.apply(&mut grid);
            let after = grid.interior_sum();
            assert!(relative_diff(&before, &after) < 1e-13, "{} {:?}", scheme, axis);
        }
    }
}

#[test]
fn test_periodic_solver_conserves() {
    let mut config = SolverConfig::default();
    config.grid.nx = 24;
    config.grid.ny = 24;
    config.grid.x_max = 2.0;
    config.grid.y_max = 2.0;
    config.timing.end_time = 0.1;
    config.timing.splitting = SplittingOrder::Alternating;
    for side in [
        &mut config.boundaries.left,
        &mut config.boundaries.right,
        &mut config.boundaries.bottom,
        &mut config.boundaries.top,
    ] {
        *side = "Periodic".to_string();
    }
    config.initialisation.state = ModuleConfig::named("Explosion");

    let mut solver = Solver::new(&config).unwrap();
    let before = solver.conserved_totals();
    solver.solve().unwrap();
    let after = solver.conserved_totals();
    assert!(relative_diff(&before, &after) < 1e-12);
}

#[test]
fn test_reflective_box_conserves_mass_and_energy() {
    let mut config = SolverConfig::default();
    config.grid.nx = 20;
    config.grid.ny = 20;
    config.timing.end_time = 0.15;
    for side in [
        &mut config.boundaries.left,
        &mut config.boundaries.right,
        &mut config.boundaries.bottom,
        &mut config.boundaries.top,
    ] {
        *side = "Reflective".to_string();
    }
    config.initialisation.state = ModuleConfig::with_params(
        "Explosion",
        json!({ "center": [0.3, 0.4], "radius": 0.2 }),
    );

    let mut solver = Solver::new(&config).unwrap();
    let before = solver.conserved_totals();
    solver.solve().unwrap();
    let after = solver.conserved_totals();
    assert!((after.rho() - before.rho()).abs() < 1e-12 * before.rho());
    assert!((after.energy() - before.energy()).abs() < 1e-12 * before.energy());
}
