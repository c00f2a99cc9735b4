// crates/fl_config/src/solver_config.rs

//! SolverConfig - 求解器配置
//!
//! 定义求解器的全部配置参数。格式、边界、初始化模块等以字符串名称给出，
//! 由 `fl_physics::registry` 在构建求解器时解析；本层只校验数值范围。
//!
//! ```json
//! {
//!   "physics": { "gamma": 1.4 },
//!   "grid": { "nx": 200, "ny": 200, "x_max": 1.0, "y_max": 1.0 },
//!   "fvm": { "type": "CutCell", "scheme": "HLLC" },
//!   "timing": { "cfl": 0.5, "end_time": 0.25, "splitting": "strang" },
//!   "boundaries": { "left": "Transmissive", "right": "Transmissive" },
//!   "initialisation": {
//!     "state": { "kind": "ShockTube", "params": { "position": 0.2 } },
//!     "levelset": { "kind": "Circle", "params": { "center": [0.5, 0.5], "radius": 0.15 } }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// 求解器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// 物理参数
    #[serde(default)]
    pub physics: PhysicsConfig,

    /// 网格配置
    #[serde(default)]
    pub grid: GridConfig,

    /// 有限体积格式配置
    #[serde(default)]
    pub fvm: FvmConfig,

    /// 时间推进配置
    #[serde(default)]
    pub timing: TimingConfig,

    /// 边界条件配置
    #[serde(default)]
    pub boundaries: BoundaryConfig,

    /// 初始化配置
    #[serde(default)]
    pub initialisation: InitialisationConfig,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
}

/// 物理参数配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// 理想气体比热比 γ
    #[serde(default = "default_gamma")]
    pub gamma: f64,
}

fn default_gamma() -> f64 { 1.4 }

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self { gamma: default_gamma() }
    }
}

/// 网格配置
///
/// 计算域为 `[x_min, x_max] × [y_min, y_max]`，外加宽度为 `ghost` 的幽灵层。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// x 方向内部单元数
    #[serde(default = "default_nx")]
    pub nx: usize,
    /// y 方向内部单元数
    #[serde(default = "default_ny")]
    pub ny: usize,
    /// x 下界
    #[serde(default)]
    pub x_min: f64,
    /// x 上界
    #[serde(default = "default_extent")]
    pub x_max: f64,
    /// y 下界
    #[serde(default)]
    pub y_min: f64,
    /// y 上界
    #[serde(default = "default_extent")]
    pub y_max: f64,
    /// 幽灵层宽度
    #[serde(default = "default_ghost")]
    pub ghost: usize,
}

fn default_nx() -> usize { 100 }
fn default_ny() -> usize { 1 }
fn default_extent() -> f64 { 1.0 }
fn default_ghost() -> usize { 1 }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            nx: default_nx(),
            ny: default_ny(),
            x_min: 0.0,
            x_max: default_extent(),
            y_min: 0.0,
            y_max: default_extent(),
            ghost: default_ghost(),
        }
    }
}

impl GridConfig {
    /// x 方向网格间距
    pub fn dx(&self) -> f64 {
        (self.x_max - self.x_min) / self.nx as f64
    }

    /// y 方向网格间距
    pub fn dy(&self) -> f64 {
        (self.y_max - self.y_min) / self.ny as f64
    }
}

/// 有限体积格式配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FvmConfig {
    /// FVM 类型："Std" 或 "CutCell"
    #[serde(rename = "type", default = "default_fvm_type")]
    pub fvm_type: String,
    /// 通量格式名称："HLLC" 或 "Rusanov"
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// 切割单元体积分数下限（小单元稳定化）
    #[serde(default = "default_alpha_min")]
    pub alpha_min: f64,
}

fn default_fvm_type() -> String { "Std".to_string() }
fn default_scheme() -> String { "HLLC".to_string() }
fn default_alpha_min() -> f64 { 0.5 }

impl Default for FvmConfig {
    fn default() -> Self {
        Self {
            fvm_type: default_fvm_type(),
            scheme: default_scheme(),
            alpha_min: default_alpha_min(),
        }
    }
}

/// 维度分裂顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplittingOrder {
    /// Strang 对称分裂：X(dt/2) Y(dt) X(dt/2)
    #[default]
    Strang,
    /// 交替分裂：偶数步 X→Y，奇数步 Y→X
    Alternating,
}

/// 时间推进配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// CFL 数
    #[serde(default = "default_cfl")]
    pub cfl: f64,
    /// 结束时间
    #[serde(default = "default_end_time")]
    pub end_time: f64,
    /// 最大步数（None 表示不限制）
    #[serde(default)]
    pub max_steps: Option<u64>,
    /// 维度分裂顺序
    #[serde(default)]
    pub splitting: SplittingOrder,
}

fn default_cfl() -> f64 { 0.9 }
fn default_end_time() -> f64 { 0.2 }

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            cfl: default_cfl(),
            end_time: default_end_time(),
            max_steps: None,
            splitting: SplittingOrder::default(),
        }
    }
}

/// 边界条件配置（按计算域四条边给出类型名称）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryConfig {
    /// x = x_min 边
    #[serde(default = "default_boundary")]
    pub left: String,
    /// x = x_max 边
    #[serde(default = "default_boundary")]
    pub right: String,
    /// y = y_min 边
    #[serde(default = "default_boundary")]
    pub bottom: String,
    /// y = y_max 边
    #[serde(default = "default_boundary")]
    pub top: String,
}

fn default_boundary() -> String { "Transmissive".to_string() }

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            left: default_boundary(),
            right: default_boundary(),
            bottom: default_boundary(),
            top: default_boundary(),
        }
    }
}

/// 按名称选择的模块及其参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// 模块名称
    pub kind: String,
    /// 模块参数（由模块自行解析）
    #[serde(default)]
    pub params: serde_json::Value,
}

impl ModuleConfig {
    /// 无参数模块
    pub fn named(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: serde_json::Value::Null,
        }
    }

    /// 带参数模块
    pub fn with_params(kind: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            params,
        }
    }
}

/// 初始化配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialisationConfig {
    /// 守恒状态初始化模块
    #[serde(default = "default_state_module")]
    pub state: ModuleConfig,
    /// 水平集初始化模块
    #[serde(default = "default_levelset_module")]
    pub levelset: ModuleConfig,
}

fn default_state_module() -> ModuleConfig { ModuleConfig::named("ShockTube") }
fn default_levelset_module() -> ModuleConfig { ModuleConfig::named("None") }

impl Default for InitialisationConfig {
    fn default() -> Self {
        Self {
            state: default_state_module(),
            levelset: default_levelset_module(),
        }
    }
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 输出目录
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
    /// 是否输出切割单元几何
    #[serde(default)]
    pub write_geometry: bool,
    /// 进度日志间隔（步）
    #[serde(default = "default_log_interval")]
    pub log_interval: u64,
    /// 中间状态快照间隔（步），未设置时只写出最终状态
    #[serde(default)]
    pub snapshot_interval: Option<u64>,
}

fn default_output_dir() -> PathBuf { PathBuf::from("output") }
fn default_log_interval() -> u64 { 100 }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            write_geometry: false,
            log_interval: default_log_interval(),
            snapshot_interval: None,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            grid: GridConfig::default(),
            fvm: FvmConfig::default(),
            timing: TimingConfig::default(),
            boundaries: BoundaryConfig::default(),
            initialisation: InitialisationConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl SolverConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gamma = self.physics.gamma;
        if !gamma.is_finite() || gamma <= 1.0 {
            return Err(ConfigError::invalid("physics.gamma", gamma, "γ 必须大于 1"));
        }

        let grid = &self.grid;
        if grid.nx == 0 {
            return Err(ConfigError::invalid("grid.nx", grid.nx, "单元数必须为正"));
        }
        if grid.ny == 0 {
            return Err(ConfigError::invalid("grid.ny", grid.ny, "单元数必须为正"));
        }
        if grid.ghost == 0 {
            return Err(ConfigError::invalid("grid.ghost", grid.ghost, "幽灵层宽度至少为 1"));
        }
        if !(grid.x_max > grid.x_min) {
            return Err(ConfigError::invalid("grid.x_max", grid.x_max, "x_max 必须大于 x_min"));
        }
        if !(grid.y_max > grid.y_min) {
            return Err(ConfigError::invalid("grid.y_max", grid.y_max, "y_max 必须大于 y_min"));
        }

        let cfl = self.timing.cfl;
        if !(cfl > 0.0 && cfl <= 1.0) {
            return Err(ConfigError::invalid("timing.cfl", cfl, "CFL 必须在 (0, 1] 范围内"));
        }
        let end_time = self.timing.end_time;
        if !end_time.is_finite() || end_time <= 0.0 {
            return Err(ConfigError::invalid("timing.end_time", end_time, "结束时间必须为正"));
        }
        if self.timing.max_steps == Some(0) {
            return Err(ConfigError::invalid("timing.max_steps", 0, "最大步数必须为正"));
        }

        let alpha_min = self.fvm.alpha_min;
        if !(alpha_min > 0.0 && alpha_min <= 1.0) {
            return Err(ConfigError::invalid("fvm.alpha_min", alpha_min, "必须在 (0, 1] 范围内"));
        }

        if self.output.snapshot_interval == Some(0) {
            return Err(ConfigError::invalid("output.snapshot_interval", 0, "快照间隔必须为正"));
        }

        if self.fvm.fvm_type == "CutCell" && cfl > 0.5 {
            log::warn!("切割单元格式 CFL={:.2} > 0.5，小单元可能失稳", cfl);
        }

        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }
}
