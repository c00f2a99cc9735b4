// crates/fl_physics/src/boundary/types.rs

//! 边界类型定义

use serde::{Deserialize, Serialize};

use crate::registry::Registry;
use crate::state::StateVector;
use crate::types::Axis;

// ============================================================
// 边界类型枚举
// ============================================================

/// 边界类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BoundaryKind {
    /// 透射边界（零梯度外推）
    ///
    /// 幽灵单元复制最近的内部单元，波动可自由传出计算域。
    #[default]
    Transmissive,

    /// 反射边界（固壁）
    ///
    /// 幽灵单元为内部单元的镜像，法向动量反向。
    Reflective,

    /// 周期边界
    ///
    /// 需要在相对的两边成对设置。
    Periodic,
}

/// 边界类型注册表（四条边共用，配置键 `boundaries.<side>`）
pub static BOUNDARY_KINDS: Registry<BoundaryKind> = Registry::new(
    "boundaries",
    &[
        ("Transmissive", BoundaryKind::Transmissive),
        ("Reflective", BoundaryKind::Reflective),
        ("Periodic", BoundaryKind::Periodic),
    ],
);

impl BoundaryKind {
    /// 是否为周期边界
    #[inline]
    pub fn is_periodic(&self) -> bool {
        matches!(self, Self::Periodic)
    }

    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transmissive => "Transmissive",
            Self::Reflective => "Reflective",
            Self::Periodic => "Periodic",
        }
    }

    /// 由镜像源单元计算幽灵状态
    ///
    /// `source` 已由调用方按边界类型选好（最近单元、镜像单元或周期映像），
    /// 这里只处理动量的变换。
    #[inline]
    pub fn ghost_state(&self, source: &StateVector, axis: Axis) -> StateVector {
        match self {
            Self::Reflective => source.reflected(axis),
            Self::Transmissive | Self::Periodic => *source,
        }
    }
}

impl std::fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
