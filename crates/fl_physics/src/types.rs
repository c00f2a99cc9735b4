// crates/fl_physics/src/types.rs

//! 核心类型定义
//!
//! - [`Axis`]: 维度分裂的扫描方向

use serde::{Deserialize, Serialize};

use crate::error::SolverError;

/// 扫描方向
///
/// 二维求解器只有 x/y 两个方向；其他标签在解析时即被拒绝。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// x 方向
    X,
    /// y 方向
    Y,
}

impl Axis {
    /// 全部方向（按分裂顺序）
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// 从字符标签解析
    ///
    /// # 错误
    /// 非 `'x'`/`'y'`（大小写不敏感）的标签返回 [`SolverError::Dimension`]。
    pub fn from_tag(tag: char) -> Result<Self, SolverError> {
        match tag {
            'x' | 'X' => Ok(Axis::X),
            'y' | 'Y' => Ok(Axis::Y),
            _ => Err(SolverError::Dimension {
                tag,
                context: "轴标签解析",
            }),
        }
    }

    /// 字符标签
    #[inline]
    pub fn tag(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
        }
    }

    /// 另一个方向
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

impl TryFrom<char> for Axis {
    type Error = SolverError;

    fn try_from(tag: char) -> Result<Self, Self::Error> {
        Axis::from_tag(tag)
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
