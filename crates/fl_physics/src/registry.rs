// crates/fl_physics/src/registry.rs

//! 名称 → 构造函数注册表
//!
//! 配置中按名称选择的组件（FVM 类型、通量格式、边界类型、初始化模块）
//! 都通过静态注册表解析。注册表是编译期确定的有序表，查找结果与
//! 进程启动顺序无关；未注册的名称返回带配置键的 [`ConfigError::UnknownName`]。

use fl_config::ConfigError;

/// 静态注册表
#[derive(Debug)]
pub struct Registry<C: 'static> {
    key: &'static str,
    entries: &'static [(&'static str, C)],
}

impl<C: Copy> Registry<C> {
    /// 创建注册表
    ///
    /// `key` 为该注册表服务的配置键，出错时原样写入错误信息。
    pub const fn new(key: &'static str, entries: &'static [(&'static str, C)]) -> Self {
        Self { key, entries }
    }

    /// 配置键
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// 已注册名称（按注册顺序）
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    /// 按名称查找构造函数
    pub fn lookup(&self, name: &str) -> Result<C, ConfigError> {
        self.lookup_as(self.key, name)
    }

    /// 按名称查找，错误信息使用指定的配置键
    ///
    /// 同一注册表服务多个配置键时使用（如四条边界共用边界类型表）。
    pub fn lookup_as(&self, key: &str, name: &str) -> Result<C, ConfigError> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, ctor)| *ctor)
            .ok_or_else(|| ConfigError::UnknownName {
                key: key.to_string(),
                value: name.to_string(),
                available: self.names().join(", "),
            })
    }
}
