// ==========================================
// 钢筋发货价差系统 - 配置层
// ==========================================
// 职责: 引擎配置定义、加载与校验
// 来源: 内置默认值 / JSON 配置文件 / 环境变量
// ==========================================

pub mod config_manager;
pub mod engine_config;
pub mod error;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use engine_config::{EngineConfig, DEFAULT_TOLERANCE, TOLERANCE_MAX, TOLERANCE_MIN};
pub use error::{ConfigError, ConfigResult};
