// crates/fl_physics/src/error.rs

//! 求解器错误类型
//!
//! 三类错误均不可恢复：
//! - 配置错误：构建阶段即终止，任何时间步都不会执行
//! - 数值不稳定：非有限波速、负密度/压力、接触波速退化
//! - 维度错误：不支持的轴标签，属于调用方缺陷
//!
//! 出现数值不稳定时不做重试：不改变离散参数的重试无法修复，
//! 而单个坏单元会通过双曲系统传播到整个计算域。

use fl_config::ConfigError;

/// 求解器结果类型
pub type SolverResult<T> = Result<T, SolverError>;

/// 单元位置 (i, j)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLocation {
    /// x 方向索引
    pub i: usize,
    /// y 方向索引
    pub j: usize,
}

impl std::fmt::Display for CellLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

/// 求解器错误
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 数值不稳定
    #[error("数值不稳定: {quantity}={value:e} 于单元 {location} ({context})")]
    NumericalInstability {
        /// 出错的物理量
        quantity: &'static str,
        /// 出错的数值
        value: f64,
        /// 出错的单元（通量计算阶段由调用方补全）
        location: CellLocation,
        /// 出错的计算环节
        context: &'static str,
    },

    /// 不支持的维度标签
    #[error("不支持的维度标签 '{tag}' ({context})")]
    Dimension {
        /// 收到的标签
        tag: char,
        /// 出错的计算环节
        context: &'static str,
    },
}

impl SolverError {
    /// 构造数值不稳定错误（位置未知时使用 (0, 0)，由上层通过 [`Self::at`] 补全）
    pub fn instability(quantity: &'static str, value: f64, context: &'static str) -> Self {
        Self::NumericalInstability {
            quantity,
            value,
            location: CellLocation { i: 0, j: 0 },
            context,
        }
    }

    /// 为数值不稳定错误附加单元位置
    pub fn at(self, i: usize, j: usize) -> Self {
        match self {
            Self::NumericalInstability {
                quantity,
                value,
                context,
                ..
            } => Self::NumericalInstability {
                quantity,
                value,
                location: CellLocation { i, j },
                context,
            },
            other => other,
        }
    }

    /// 是否为数值不稳定错误
    pub fn is_numerical(&self) -> bool {
        matches!(self, Self::NumericalInstability { .. })
    }
}
