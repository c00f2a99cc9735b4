// crates/fl_physics/src/initialisation/state.rs

//! 守恒状态初始化模块

use fl_config::ConfigError;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{check_primitive, parse_params, StateInitialiser, STATE_PARAMS_KEY};
use crate::state::{IdealGas, Primitive, StateVector};
use crate::types::Axis;

/// Sod 激波管高压侧
const SOD_LEFT: Primitive = Primitive::new(1.0, 0.0, 0.0, 1.0);
/// Sod 激波管低压侧
const SOD_RIGHT: Primitive = Primitive::new(0.125, 0.0, 0.0, 0.1);

// ============================================================
// Uniform
// ============================================================

/// 均匀状态参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UniformParams {
    /// 密度
    pub rho: f64,
    /// x 方向速度
    pub ux: f64,
    /// y 方向速度
    pub uy: f64,
    /// 压力
    pub p: f64,
}

impl Default for UniformParams {
    fn default() -> Self {
        Self {
            rho: 1.0,
            ux: 0.0,
            uy: 0.0,
            p: 1.0,
        }
    }
}

/// 均匀状态
#[derive(Debug, Clone)]
pub struct Uniform {
    state: StateVector,
}

impl Uniform {
    /// 由原始变量创建
    pub fn new(prim: Primitive, eos: &IdealGas) -> Self {
        Self {
            state: prim.to_conserved(eos),
        }
    }

    /// 从 JSON 参数创建
    pub fn from_params(params: &Value, eos: IdealGas) -> Result<Self, ConfigError> {
        let p: UniformParams = parse_params(STATE_PARAMS_KEY, params)?;
        let prim = Primitive::new(p.rho, p.ux, p.uy, p.p);
        check_primitive(STATE_PARAMS_KEY, &prim)?;
        Ok(Self::new(prim, &eos))
    }
}

impl StateInitialiser for Uniform {
    fn get_state(&self, _x: f64, _y: f64) -> StateVector {
        self.state
    }
}

// ============================================================
// ShockTube
// ============================================================

/// 激波管参数（默认 Sod 问题，间断位于 x = 0.5）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShockTubeParams {
    /// 间断法向
    pub axis: Axis,
    /// 间断位置
    pub position: f64,
    /// 间断负侧状态
    pub left: Primitive,
    /// 间断正侧状态
    pub right: Primitive,
}

impl Default for ShockTubeParams {
    fn default() -> Self {
        Self {
            axis: Axis::X,
            position: 0.5,
            left: SOD_LEFT,
            right: SOD_RIGHT,
        }
    }
}

/// 一维黎曼问题：`axis` 方向坐标小于 `position` 取左状态
#[derive(Debug, Clone)]
pub struct ShockTube {
    axis: Axis,
    position: f64,
    left: StateVector,
    right: StateVector,
}

impl ShockTube {
    /// 创建激波管
    pub fn new(axis: Axis, position: f64, left: Primitive, right: Primitive, eos: &IdealGas) -> Self {
        Self {
            axis,
            position,
            left: left.to_conserved(eos),
            right: right.to_conserved(eos),
        }
    }

    /// Sod 激波管
    pub fn sod(axis: Axis, position: f64, eos: &IdealGas) -> Self {
        Self::new(axis, position, SOD_LEFT, SOD_RIGHT, eos)
    }

    /// 从 JSON 参数创建
    pub fn from_params(params: &Value, eos: IdealGas) -> Result<Self, ConfigError> {
        let p: ShockTubeParams = parse_params(STATE_PARAMS_KEY, params)?;
        if !p.position.is_finite() {
            return Err(ConfigError::invalid(STATE_PARAMS_KEY, p.position, "间断位置必须有限"));
        }
        check_primitive(STATE_PARAMS_KEY, &p.left)?;
        check_primitive(STATE_PARAMS_KEY, &p.right)?;
        Ok(Self::new(p.axis, p.position, p.left, p.right, &eos))
    }
}

impl StateInitialiser for ShockTube {
    fn get_state(&self, x: f64, y: f64) -> StateVector {
        let s = match self.axis {
            Axis::X => x,
            Axis::Y => y,
        };
        if s < self.position {
            self.left
        } else {
            self.right
        }
    }
}

// ============================================================
// Explosion
// ============================================================

/// 圆形爆炸参数（默认 Toro 二维爆炸问题）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplosionParams {
    /// 圆心
    pub center: [f64; 2],
    /// 半径
    pub radius: f64,
    /// 圆内状态
    pub inside: Primitive,
    /// 圆外状态
    pub outside: Primitive,
}

impl Default for ExplosionParams {
    fn default() -> Self {
        Self {
            center: [1.0, 1.0],
            radius: 0.4,
            inside: SOD_LEFT,
            outside: SOD_RIGHT,
        }
    }
}

/// 圆形爆炸：圆内（含边界）取 `inside`，其余取 `outside`
#[derive(Debug, Clone)]
pub struct Explosion {
    center: DVec2,
    radius: f64,
    inside: StateVector,
    outside: StateVector,
}

impl Explosion {
    /// 从 JSON 参数创建
    pub fn from_params(params: &Value, eos: IdealGas) -> Result<Self, ConfigError> {
        let p: ExplosionParams = parse_params(STATE_PARAMS_KEY, params)?;
        if !(p.radius > 0.0 && p.radius.is_finite()) {
            return Err(ConfigError::invalid(STATE_PARAMS_KEY, p.radius, "半径必须为正"));
        }
        check_primitive(STATE_PARAMS_KEY, &p.inside)?;
        check_primitive(STATE_PARAMS_KEY, &p.outside)?;
        Ok(Self {
            center: DVec2::from_array(p.center),
            radius: p.radius,
            inside: p.inside.to_conserved(&eos),
            outside: p.outside.to_conserved(&eos),
        })
    }
}

impl StateInitialiser for Explosion {
    fn get_state(&self, x: f64, y: f64) -> StateVector {
        if DVec2::new(x, y).distance(self.center) <= self.radius {
            self.inside
        } else {
            self.outside
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eos() -> IdealGas {
        IdealGas::new(1.4)
    }

    #[test]
    fn test_shock_tube_defaults_to_sod() {
        let tube = ShockTube::from_params(&Value::Null, eos()).unwrap();
        assert_eq!(tube.get_state(0.49, 0.0).rho(), 1.0);
        assert_eq!(tube.get_state(0.51, 0.0).rho(), 0.125);
        let p = tube.get_state(0.9, 0.0).pressure(&eos());
        assert!((p - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_shock_tube_along_y() {
        let tube = ShockTube::from_params(
            &json!({ "axis": "Y", "position": 0.25, "left": { "rho": 2.0, "uy": 1.0, "p": 3.0 } }),
            eos(),
        )
        .unwrap();
        let s = tube.get_state(0.9, 0.1);
        assert_eq!(s.rho(), 2.0);
        assert!((s.uy() - 1.0).abs() < 1e-15);
        assert_eq!(tube.get_state(0.1, 0.9).rho(), 0.125);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ShockTube::from_params(&json!({ "positon": 0.3 }), eos()).unwrap_err();
        assert_eq!(err.key(), Some(STATE_PARAMS_KEY));
    }

    #[test]
    fn test_explosion() {
        let blast = Explosion::from_params(
            &json!({ "center": [0.0, 0.0], "radius": 0.5 }),
            eos(),
        )
        .unwrap();
        assert_eq!(blast.get_state(0.3, 0.3).rho(), 1.0);
        assert_eq!(blast.get_state(0.4, 0.4).rho(), 0.125);

        let err = Explosion::from_params(&json!({ "radius": 0.0 }), eos()).unwrap_err();
        assert_eq!(err.key(), Some(STATE_PARAMS_KEY));
    }

    #[test]
    fn test_uniform() {
        let u = Uniform::from_params(&json!({ "rho": 1.4, "ux": 3.0, "p": 1.0 }), eos()).unwrap();
        let s = u.get_state(123.0, -4.0);
        assert!((s.ux() - 3.0).abs() < 1e-14);
        assert!((s.sound_speed(&eos()) - 1.0).abs() < 1e-12);
    }
}
