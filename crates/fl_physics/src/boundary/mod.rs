// crates/fl_physics/src/boundary/mod.rs

//! 计算域边界条件
//!
//! 通过幽灵单元实现：每次扫描之后由 [`BoundaryManager`] 按四条边各自的
//! [`BoundaryKind`] 填充幽灵层，内部单元的通量计算因此无需区分边界。
//!
//! - [`BoundaryKind`]: 边界类型（透射、反射、周期）
//! - [`BoundaryManager`]: 四边边界的配置与应用

mod manager;
mod types;

pub use manager::{BoundaryManager, Side};
pub use types::{BoundaryKind, BOUNDARY_KINDS};
