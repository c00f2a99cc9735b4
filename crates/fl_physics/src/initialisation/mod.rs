// crates/fl_physics/src/initialisation/mod.rs

//! 初始化模块
//!
//! 两种角色，各自只有一个能力：
//!
//! - [`StateInitialiser::get_state`]: 坐标 → 守恒状态
//! - [`LevelSetInitialiser::get_level_set`]: 坐标 → 水平集值（正为流体）
//!
//! 模块按名称从注册表解析，参数来自配置中的 `params` JSON 块。
//!
//! ```json
//! "initialisation": {
//!   "state":    { "kind": "ShockTube", "params": { "axis": "X", "position": 0.3 } },
//!   "levelset": { "kind": "Circle", "params": { "center": [0.6, 0.5], "radius": 0.1 } }
//! }
//! ```

mod levelset;
mod state;

pub use levelset::{Circle, CircleParams, HalfPlane, HalfPlaneParams, NoLevelSet};
pub use state::{Explosion, ExplosionParams, ShockTube, ShockTubeParams, Uniform, UniformParams};

use fl_config::{ConfigError, InitialisationConfig, ModuleConfig};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::SolverResult;
use crate::grid::Grid;
use crate::registry::Registry;
use crate::state::{IdealGas, Primitive, StateVector};

// ============================================================
// 接口
// ============================================================

/// 守恒状态初始化
pub trait StateInitialiser: Send + Sync {
    /// 坐标 (x, y) 处的初始守恒状态
    fn get_state(&self, x: f64, y: f64) -> StateVector;
}

/// 水平集初始化
pub trait LevelSetInitialiser: Send + Sync {
    /// 坐标 (x, y) 处的水平集值
    fn get_level_set(&self, x: f64, y: f64) -> f64;
}

// ============================================================
// 注册表
// ============================================================

/// 状态初始化模块
#[derive(Debug, Clone)]
pub enum StateModule {
    /// 均匀状态
    Uniform(Uniform),
    /// 激波管
    ShockTube(ShockTube),
    /// 圆形爆炸
    Explosion(Explosion),
}

/// 水平集初始化模块
#[derive(Debug, Clone)]
pub enum LevelSetModule {
    /// 全流体
    None(NoLevelSet),
    /// 圆
    Circle(Circle),
    /// 半平面
    HalfPlane(HalfPlane),
}

type StateCtor = fn(&Value, IdealGas) -> Result<StateModule, ConfigError>;
type LevelSetCtor = fn(&Value) -> Result<LevelSetModule, ConfigError>;

const STATE_PARAMS_KEY: &str = "initialisation.state.params";
const LEVELSET_PARAMS_KEY: &str = "initialisation.levelset.params";

fn build_uniform(params: &Value, eos: IdealGas) -> Result<StateModule, ConfigError> {
    Ok(StateModule::Uniform(Uniform::from_params(params, eos)?))
}

fn build_shock_tube(params: &Value, eos: IdealGas) -> Result<StateModule, ConfigError> {
    Ok(StateModule::ShockTube(ShockTube::from_params(params, eos)?))
}

fn build_explosion(params: &Value, eos: IdealGas) -> Result<StateModule, ConfigError> {
    Ok(StateModule::Explosion(Explosion::from_params(params, eos)?))
}

fn build_no_levelset(_params: &Value) -> Result<LevelSetModule, ConfigError> {
    Ok(LevelSetModule::None(NoLevelSet))
}

fn build_circle(params: &Value) -> Result<LevelSetModule, ConfigError> {
    Ok(LevelSetModule::Circle(Circle::from_params(params)?))
}

fn build_half_plane(params: &Value) -> Result<LevelSetModule, ConfigError> {
    Ok(LevelSetModule::HalfPlane(HalfPlane::from_params(params)?))
}

/// 状态初始化注册表（配置键 `initialisation.state.kind`）
pub static STATE_MODULES: Registry<StateCtor> = Registry::new(
    "initialisation.state.kind",
    &[
        ("Uniform", build_uniform as StateCtor),
        ("ShockTube", build_shock_tube as StateCtor),
        ("Explosion", build_explosion as StateCtor),
    ],
);

/// 水平集初始化注册表（配置键 `initialisation.levelset.kind`）
pub static LEVELSET_MODULES: Registry<LevelSetCtor> = Registry::new(
    "initialisation.levelset.kind",
    &[
        ("None", build_no_levelset as LevelSetCtor),
        ("Circle", build_circle as LevelSetCtor),
        ("HalfPlane", build_half_plane as LevelSetCtor),
    ],
);

impl StateModule {
    /// 从模块配置创建
    pub fn from_config(cfg: &ModuleConfig, eos: IdealGas) -> Result<Self, ConfigError> {
        let ctor = STATE_MODULES.lookup(&cfg.kind)?;
        ctor(&cfg.params, eos)
    }
}

impl StateInitialiser for StateModule {
    fn get_state(&self, x: f64, y: f64) -> StateVector {
        match self {
            Self::Uniform(m) => m.get_state(x, y),
            Self::ShockTube(m) => m.get_state(x, y),
            Self::Explosion(m) => m.get_state(x, y),
        }
    }
}

impl LevelSetModule {
    /// 从模块配置创建
    pub fn from_config(cfg: &ModuleConfig) -> Result<Self, ConfigError> {
        let ctor = LEVELSET_MODULES.lookup(&cfg.kind)?;
        ctor(&cfg.params)
    }
}

impl LevelSetInitialiser for LevelSetModule {
    fn get_level_set(&self, x: f64, y: f64) -> f64 {
        match self {
            Self::None(m) => m.get_level_set(x, y),
            Self::Circle(m) => m.get_level_set(x, y),
            Self::HalfPlane(m) => m.get_level_set(x, y),
        }
    }
}

// ============================================================
// 参数解析
// ============================================================

/// 解析模块参数；`null`（未给出 `params`）时使用默认值
pub(crate) fn parse_params<T: DeserializeOwned + Default>(
    key: &str,
    params: &Value,
) -> Result<T, ConfigError> {
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params.clone())
        .map_err(|e| ConfigError::invalid(key, params, e.to_string()))
}

/// 检查初始原始变量：ρ > 0，p ≥ 0，全部有限
pub(crate) fn check_primitive(key: &str, prim: &Primitive) -> Result<(), ConfigError> {
    let finite = [prim.rho, prim.ux, prim.uy, prim.p].iter().all(|v| v.is_finite());
    if !finite || prim.rho <= 0.0 || prim.p < 0.0 {
        return Err(ConfigError::invalid(
            key,
            format!("{:?}", prim),
            "初始状态必须满足 ρ > 0 且 p ≥ 0",
        ));
    }
    Ok(())
}

// ============================================================
// 初始化管理器
// ============================================================

/// 初始化管理器
#[derive(Debug, Clone)]
pub struct InitialisationManager {
    state: StateModule,
    levelset: LevelSetModule,
}

impl InitialisationManager {
    /// 由两个模块组成
    pub fn new(state: StateModule, levelset: LevelSetModule) -> Self {
        Self { state, levelset }
    }

    /// 从配置创建
    pub fn from_config(cfg: &InitialisationConfig, eos: IdealGas) -> SolverResult<Self> {
        let state = StateModule::from_config(&cfg.state, eos)?;
        let levelset = LevelSetModule::from_config(&cfg.levelset)?;
        log::info!(
            "初始化模块: 状态={}, 水平集={}",
            cfg.state.kind,
            cfg.levelset.kind
        );
        Ok(Self::new(state, levelset))
    }

    /// 状态模块
    pub fn state(&self) -> &StateModule {
        &self.state
    }

    /// 水平集模块
    pub fn levelset(&self) -> &LevelSetModule {
        &self.levelset
    }

    /// 填充全部单元（含幽灵层）的状态与水平集
    pub fn exec(&self, grid: &mut Grid) {
        let layout = *grid.layout();
        for j in 0..layout.size_y() {
            for i in 0..layout.size_x() {
                let (x, y) = (layout.x(i), layout.y(j));
                *grid.state_mut(i, j) = self.state.get_state(x, y);
                grid.levelset_mut()[(i, j)] = self.levelset.get_level_set(x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridLayout, FLUID_LEVEL_SET};
    use serde_json::json;

    #[test]
    fn test_manager_fills_ghosts() {
        let cfg = InitialisationConfig {
            state: ModuleConfig::with_params("ShockTube", json!({ "position": 0.5 })),
            levelset: ModuleConfig::with_params(
                "Circle",
                json!({ "center": [0.5, 0.5], "radius": 0.25 }),
            ),
        };
        let manager = InitialisationManager::from_config(&cfg, IdealGas::new(1.4)).unwrap();
        let mut grid = Grid::new(GridLayout::new(4, 4, 1, (0.0, 1.0), (0.0, 1.0)));
        manager.exec(&mut grid);

        // 左侧幽灵单元 x = -0.125 为高压侧
        assert_eq!(grid.state(0, 2).rho(), 1.0);
        assert_eq!(grid.state(5, 2).rho(), 0.125);
        // 角点幽灵单元在圆外
        assert!(grid.levelset()[(0, 0)] > 0.0);
        // 中心附近在圆盘内
        assert!(grid.levelset()[(2, 2)] < 0.0);
    }

    #[test]
    fn test_unknown_module_names_key() {
        let err = StateModule::from_config(&ModuleConfig::named("Vortex"), IdealGas::new(1.4))
            .unwrap_err();
        assert_eq!(err.key(), Some("initialisation.state.kind"));

        let err = LevelSetModule::from_config(&ModuleConfig::named("Square")).unwrap_err();
        assert_eq!(err.key(), Some("initialisation.levelset.kind"));
        assert!(err.to_string().contains("None, Circle, HalfPlane"));
    }

    #[test]
    fn test_malformed_params_names_key() {
        let cfg = ModuleConfig::with_params("Circle", json!({ "radius": "big" }));
        let err = LevelSetModule::from_config(&cfg).unwrap_err();
        assert_eq!(err.key(), Some(LEVELSET_PARAMS_KEY));

        let cfg = ModuleConfig::with_params("Uniform", json!({ "rho": -1.0, "p": 1.0 }));
        let err = StateModule::from_config(&cfg, IdealGas::new(1.4)).unwrap_err();
        assert_eq!(err.key(), Some(STATE_PARAMS_KEY));
    }

    #[test]
    fn test_no_levelset_is_fluid() {
        let m = LevelSetModule::from_config(&ModuleConfig::named("None")).unwrap();
        assert_eq!(m.get_level_set(0.3, -2.0), FLUID_LEVEL_SET);
    }
}
