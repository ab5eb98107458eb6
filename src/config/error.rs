// ==========================================
// 钢筋发货价差系统 - 配置模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置模块错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 文件相关错误 =====
    #[error("配置文件不存在: {0}")]
    FileNotFound(String),

    #[error("配置文件读取失败: {0}")]
    FileReadError(String),

    #[error("配置文件格式错误: {0}")]
    JsonParseError(String),

    // ===== 取值校验错误 =====
    #[error("吨位偏差超出范围: {value}（允许 [{min}, {max}] 吨）")]
    ToleranceOutOfRange { value: f64, min: f64, max: f64 },

    #[error("加价规则 {name} 金额无效: {amount}")]
    InvalidSurchargeAmount { name: String, amount: f64 },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::FileReadError(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::JsonParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
