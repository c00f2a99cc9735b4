// crates/fl_physics/src/initialisation/levelset.rs

//! 水平集初始化模块（正值为流体，负值为固体）

use fl_config::ConfigError;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{parse_params, LevelSetInitialiser, LEVELSET_PARAMS_KEY};
use crate::grid::FLUID_LEVEL_SET;

/// 无嵌入边界
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLevelSet;

impl LevelSetInitialiser for NoLevelSet {
    fn get_level_set(&self, _x: f64, _y: f64) -> f64 {
        FLUID_LEVEL_SET
    }
}

// ============================================================
// Circle
// ============================================================

/// 圆参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CircleParams {
    /// 圆心
    pub center: [f64; 2],
    /// 半径
    pub radius: f64,
    /// 为真时圆内为流体（圆形容器），否则圆内为固体（圆柱绕流）
    pub fluid_inside: bool,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            center: [0.5, 0.5],
            radius: 0.2,
            fluid_inside: false,
        }
    }
}

/// 圆：符号距离 `|x − c| − r`（圆外为流体）或其相反数
#[derive(Debug, Clone)]
pub struct Circle {
    center: DVec2,
    radius: f64,
    sign: f64,
}

impl Circle {
    /// 固体圆盘
    pub fn solid(center: DVec2, radius: f64) -> Self {
        Self {
            center,
            radius,
            sign: 1.0,
        }
    }

    /// 从 JSON 参数创建
    pub fn from_params(params: &Value) -> Result<Self, ConfigError> {
        let p: CircleParams = parse_params(LEVELSET_PARAMS_KEY, params)?;
        if !(p.radius > 0.0 && p.radius.is_finite()) {
            return Err(ConfigError::invalid(LEVELSET_PARAMS_KEY, p.radius, "半径必须为正"));
        }
        let mut circle = Self::solid(DVec2::from_array(p.center), p.radius);
        if p.fluid_inside {
            circle.sign = -1.0;
        }
        Ok(circle)
    }
}

impl LevelSetInitialiser for Circle {
    fn get_level_set(&self, x: f64, y: f64) -> f64 {
        self.sign * (DVec2::new(x, y).distance(self.center) - self.radius)
    }
}

// ============================================================
// HalfPlane
// ============================================================

/// 半平面参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HalfPlaneParams {
    /// 界面上一点
    pub point: [f64; 2],
    /// 指向流体一侧的法向（无需归一化）
    pub normal: [f64; 2],
}

impl Default for HalfPlaneParams {
    fn default() -> Self {
        Self {
            point: [0.5, 0.5],
            normal: [1.0, 0.0],
        }
    }
}

/// 半平面：`n̂ · (x − p)`
#[derive(Debug, Clone)]
pub struct HalfPlane {
    point: DVec2,
    normal: DVec2,
}

impl HalfPlane {
    /// 从 JSON 参数创建
    pub fn from_params(params: &Value) -> Result<Self, ConfigError> {
        let p: HalfPlaneParams = parse_params(LEVELSET_PARAMS_KEY, params)?;
        let normal = DVec2::from_array(p.normal).try_normalize().ok_or_else(|| {
            ConfigError::invalid(
                LEVELSET_PARAMS_KEY,
                format!("{:?}", p.normal),
                "法向不能为零向量",
            )
        })?;
        Ok(Self {
            point: DVec2::from_array(p.point),
            normal,
        })
    }
}

impl LevelSetInitialiser for HalfPlane {
    fn get_level_set(&self, x: f64, y: f64) -> f64 {
        self.normal.dot(DVec2::new(x, y) - self.point)
    }
}
