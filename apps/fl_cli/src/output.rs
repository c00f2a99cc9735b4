// apps/fl_cli/src/output.rs

//! 结果输出
//!
//! 制表符分隔的纯文本，每行一个点，网格行之间以空行分隔（gnuplot `splot` 可直接读取）。

use anyhow::{Context, Result};
use fl_physics::Grid;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 状态文件名
pub const STATE_FILE: &str = "state.dat";

/// 几何文件名
pub const GEOMETRY_FILE: &str = "geometry.dat";

/// 单元角点水平集文件名
pub const VERTICES_FILE: &str = "levelset_vertices.dat";

/// 第 `step` 步的状态快照文件名
pub fn snapshot_file(step: u64) -> String {
    format!("state_{:06}.dat", step)
}

/// 写出内部单元守恒量与水平集
///
/// 列: `x y rho rhoUx rhoUy E levelset`
pub fn write_state(grid: &Grid, path: &Path) -> Result<()> {
    write_rows(
        grid,
        path,
        "x\ty\trho\trhoUx\trhoUy\tE\tlevelset",
        |out, i, j| {
            for v in grid.state(i, j).as_array() {
                write!(out, "\t{:.10e}", v)?;
            }
            write!(out, "\t{:.10e}", grid.levelset()[(i, j)])
        },
    )
}

/// 写出切割单元几何
///
/// 列: `x y levelset betaL betaR betaT betaB alpha Xb.x Xb.y Nb.x Nb.y`
pub fn write_geometry(grid: &Grid, path: &Path) -> Result<()> {
    write_rows(
        grid,
        path,
        "x\ty\tlevelset\tbetaL\tbetaR\tbetaT\tbetaB\talpha\tXb.x\tXb.y\tNb.x\tNb.y",
        |out, i, j| {
            let g = grid.boundary(i, j);
            write!(out, "\t{:.10e}", grid.levelset()[(i, j)])?;
            for v in [g.beta_l(), g.beta_r(), g.beta_t(), g.beta_b(), g.alpha()] {
                write!(out, "\t{:.6}", v)?;
            }
            let (xb, nb) = (g.xb(), g.nb());
            write!(out, "\t{:.10e}\t{:.10e}\t{:.6}\t{:.6}", xb.x, xb.y, nb.x, nb.y)
        },
    )
}

/// 写出内部区域单元角点上的插值水平集
///
/// 列: `x y levelset`，共 `(nx+1)·(ny+1)` 个点。
pub fn write_levelset_vertices(grid: &Grid, path: &Path) -> Result<()> {
    let (hx, hy) = (0.5 * grid.dx(), 0.5 * grid.dy());
    let mut out = create(path)?;
    let mut write_all = || -> std::io::Result<()> {
        writeln!(out, "# x\ty\tlevelset")?;
        for j in grid.start_y()..=grid.end_y() {
            let y = grid.y(j) - hy;
            for i in grid.start_x()..=grid.end_x() {
                let x = grid.x(i) - hx;
                writeln!(
                    out,
                    "{:.10e}\t{:.10e}\t{:.10e}",
                    x,
                    y,
                    grid.levelset().interpolate(x, y)
                )?;
            }
            writeln!(out)?;
        }
        out.flush()
    };
    write_all().with_context(|| format!("写入输出文件失败: {}", path.display()))
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("无法创建输出文件: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn write_rows<F>(grid: &Grid, path: &Path, header: &str, mut columns: F) -> Result<()>
where
    F: FnMut(&mut BufWriter<File>, usize, usize) -> std::io::Result<()>,
{
    let mut out = create(path)?;
    let mut write_all = || -> std::io::Result<()> {
        writeln!(out, "# {}", header)?;
        for j in grid.start_y()..grid.end_y() {
            for i in grid.start_x()..grid.end_x() {
                write!(out, "{:.10e}\t{:.10e}", grid.x(i), grid.y(j))?;
                columns(&mut out, i, j)?;
                writeln!(out)?;
            }
            writeln!(out)?;
        }
        out.flush()
    };
    write_all().with_context(|| format!("写入输出文件失败: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fl_physics::{GridLayout, StateVector};

    fn small_grid() -> Grid {
        Grid::new(GridLayout::new(3, 2, 2, (0.0, 3.0), (0.0, 2.0)))
    }

    fn data_rows(content: &str) -> Vec<Vec<f64>> {
        content
            .lines()
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(|l| l.split('\t').map(|s| s.parse().unwrap()).collect())
            .collect()
    }

    #[test]
    fn test_write_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STATE_FILE);
        write_state(&small_grid(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# x\ty\trho\trhoUx\trhoUy\tE\tlevelset"));
        let rows = data_rows(&content);
        assert_eq!(rows.len(), 6);
        for row in &rows {
            assert_eq!(row.len(), 7);
        }
        // 第一行是左下角单元中心 (0.5, 0.5)
        assert!((rows[0][0] - 0.5).abs() < 1e-12);
        assert!((rows[0][1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_state_columns_are_conserved_quantities() {
        let mut grid = Grid::new(GridLayout::new(1, 1, 1, (0.0, 1.0), (0.0, 1.0)));
        *grid.state_mut(1, 1) = StateVector::new(2.0, 4.0, 6.0, 20.0);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STATE_FILE);
        write_state(&grid, &path).unwrap();

        let rows = data_rows(&std::fs::read_to_string(&path).unwrap());
        assert_eq!(rows.len(), 1);
        // 动量列写出 ρu 而非速度
        assert_eq!(&rows[0][2..6], &[2.0, 4.0, 6.0, 20.0]);
    }

    #[test]
    fn test_write_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(GEOMETRY_FILE);
        write_geometry(&small_grid(), &path).unwrap();

        let rows = data_rows(&std::fs::read_to_string(&path).unwrap());
        assert_eq!(rows.len(), 6);
        for row in &rows {
            assert_eq!(row.len(), 12);
            // 纯流体网格
            assert_eq!(row[7], 1.0);
        }
    }

    #[test]
    fn test_write_levelset_vertices() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(VERTICES_FILE);
        write_levelset_vertices(&small_grid(), &path).unwrap();

        let rows = data_rows(&std::fs::read_to_string(&path).unwrap());
        assert_eq!(rows.len(), 4 * 3);
        assert!(rows[0][0].abs() < 1e-12 && rows[0][1].abs() < 1e-12);
        let last = rows.last().unwrap();
        assert!((last[0] - 3.0).abs() < 1e-12 && (last[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_file_name() {
        assert_eq!(snapshot_file(42), "state_000042.dat");
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(STATE_FILE);
        assert!(write_state(&small_grid(), &path).is_err());
    }
}
