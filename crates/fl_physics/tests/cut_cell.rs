// crates/fl_physics/tests/cut_cell.rs

//! 切割单元测试
//!
//! 固体圆柱嵌入均匀流场：几何分数、静止气体保持、绕流推进。

use fl_config::{ModuleConfig, SolverConfig};
use fl_physics::{
    CutCellManager, Grid, GridLayout, IdealGas, InitialisationManager, LevelSetModule, Primitive,
    Solver, StandardCutCell, StateModule,
};
use serde_json::json;

fn cylinder_config(ux: f64) -> SolverConfig {
    let mut config = SolverConfig::default();
    config.grid.nx = 40;
    config.grid.ny = 20;
    config.grid.x_max = 2.0;
    config.fvm.fvm_type = "CutCell".to_string();
    config.timing.cfl = 0.4;
    config.timing.end_time = 0.05;
    config.boundaries.bottom = "Reflective".to_string();
    config.boundaries.top = "Reflective".to_string();
    config.initialisation.state = ModuleConfig::with_params(
        "Uniform",
        json!({ "rho": 1.4, "ux": ux, "uy": 0.0, "p": 1.0 }),
    );
    config.initialisation.levelset = ModuleConfig::with_params(
        "Circle",
        json!({ "center": [0.6, 0.5], "radius": 0.2 }),
    );
    config
}

#[test]
fn test_cylinder_geometry() {
    let solver = Solver::new(&cylinder_config(0.0)).unwrap();
    let grid = solver.grid();
    let (dx, dy) = (grid.dx(), grid.dy());

    let mut solid_area = 0.0;
    let mut n_cut = 0;
    for (i, j) in grid.layout().interior_cells() {
        let geom = grid.boundary(i, j);
        assert!((0.0..=1.0).contains(&geom.alpha()));
        if geom.alpha() < 1.0 {
            assert!((geom.nb().length() - 1.0).abs() < 1e-12);
        }
        if geom.is_cut() {
            n_cut += 1;
        }
        solid_area += (1.0 - geom.alpha()) * dx * dy;
    }
    assert!(n_cut > 0);

    // 多边形近似的圆面积
    let exact = std::f64::consts::PI * 0.2 * 0.2;
    assert!((solid_area - exact).abs() < 0.05 * exact, "{} vs {}", solid_area, exact);

    // 圆心单元为固体，远场单元为流体
    let i_c = grid.start_x() + (0.6 / dx) as usize;
    let j_c = grid.start_y() + (0.5 / dy) as usize;
    assert!(grid.boundary(i_c, j_c).is_solid());
    assert!(grid.boundary(grid.end_x() - 1, grid.start_y()).is_fluid());
}

#[test]
fn test_quiescent_gas_stays_at_rest() {
    let mut solver = Solver::new(&cylinder_config(0.0)).unwrap();
    let initial = solver.grid().clone();
    for _ in 0..5 {
        solver.advance().unwrap();
    }
    let grid = solver.grid();
    for (i, j) in grid.layout().interior_cells() {
        let diff = grid.state(i, j).max_abs_diff(initial.state(i, j));
        assert!(diff < 1e-12, "单元 ({}, {}) 偏离静止状态 {}", i, j, diff);
    }
}

#[test]
fn test_flow_past_cylinder() {
    let mut solver = Solver::new(&cylinder_config(0.5)).unwrap();
    let initial = solver.grid().clone();
    solver.solve().unwrap();

    let grid = solver.grid();
    let eos = IdealGas::new(1.4);
    let mut max_p: f64 = 0.0;
    for (i, j) in grid.layout().interior_cells() {
        let u = grid.state(i, j);
        if grid.boundary(i, j).is_solid() {
            assert_eq!(u, initial.state(i, j));
            continue;
        }
        assert!(u.rho() > 0.0 && u.pressure(&eos) > 0.0);
        max_p = max_p.max(u.pressure(&eos));
    }
    // 迎风面滞止：压力高于来流
    assert!(max_p > 1.05, "最大压力 {}", max_p);
}

#[test]
fn test_manual_pipeline() {
    // 不经过 Solver，手动组装初始化与几何
    let eos = IdealGas::new(1.4);
    let init = InitialisationManager::new(
        StateModule::from_config(&ModuleConfig::named("Uniform"), eos).unwrap(),
        LevelSetModule::from_config(&ModuleConfig::with_params(
            "HalfPlane",
            json!({ "point": [0.0, 0.3], "normal": [0.0, 1.0] }),
        ))
        .unwrap(),
    );
    let mut grid = Grid::new(GridLayout::new(5, 5, 1, (0.0, 1.0), (0.0, 1.0)));
    init.exec(&mut grid);
    StandardCutCell.compute_geometry(&mut grid);

    // y = 0.3 穿过第二行单元 [0.2, 0.4]
    let geom = grid.boundary(3, 2);
    assert!((geom.alpha() - 0.5).abs() < 1e-12);
    assert!((geom.beta_l() - 0.5).abs() < 1e-12);
    assert!(geom.beta_b() < 1e-12);
    assert!(geom.beta_t() > 1.0 - 1e-12);
    assert!(grid.boundary(3, 1).is_solid());
    assert!(grid.boundary(3, 3).is_fluid());

    let prim = Primitive::new(1.0, 0.0, 0.0, 1.0);
    assert_eq!(*grid.state(3, 3), prim.to_conserved(&eos));
}

#[test]
fn test_closed_box_conserves_mass_around_body() {
    let mut config = cylinder_config(0.0);
    config.boundaries.left = "Reflective".to_string();
    config.boundaries.right = "Reflective".to_string();
    config.timing.end_time = 1.0;
    config.initialisation.state = ModuleConfig::with_params(
        "Explosion",
        json!({
            "center": [1.3, 0.5],
            "radius": 0.25,
            "inside": { "rho": 1.0, "p": 2.0 },
            "outside": { "rho": 1.0, "p": 1.0 }
        }),
    );

    let mut solver = Solver::new(&config).unwrap();
    let before = solver.conserved_totals();
    for _ in 0..20 {
        solver.advance().unwrap();
    }
    let after = solver.conserved_totals();

    // 波已到达圆柱，小单元与固壁通量都参与了更新
    let rel = (after.rho() - before.rho()).abs() / before.rho();
    assert!(rel < 1e-10, "质量相对误差 {:.3e}", rel);
}
