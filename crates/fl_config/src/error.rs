// crates/fl_config/src/error.rs

//! 配置层错误类型

/// 配置错误
///
/// 所有变体都携带出错的配置键，便于用户定位配置文件中的问题。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 未注册的名称
    #[error("未知的 '{key}': '{value}' (可选: {available})")]
    UnknownName {
        /// 配置键
        key: String,
        /// 请求的名称
        value: String,
        /// 已注册名称列表
        available: String,
    },
}

impl ConfigError {
    /// 构造无效值错误
    pub fn invalid(key: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// 出错的配置键（IO/解析错误没有对应的键）
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::InvalidValue { key, .. } | Self::UnknownName { key, .. } => Some(key),
            Self::Io(_) | Self::Parse(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid("timing.cfl", -1.0, "必须为正");
        assert!(err.to_string().contains("timing.cfl"));
        assert_eq!(err.key(), Some("timing.cfl"));
    }

    #[test]
    fn test_unknown_name_display() {
        let err = ConfigError::UnknownName {
            key: "fvm.scheme".to_string(),
            value: "Roe".to_string(),
            available: "HLLC, Rusanov".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("fvm.scheme"));
        assert!(msg.contains("Roe"));
        assert!(msg.contains("HLLC"));
    }
}
