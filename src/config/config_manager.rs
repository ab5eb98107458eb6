// ==========================================
// 钢筋发货价差系统 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写、校验、快照
// 优先级: 环境变量 > 配置文件 > 内置默认值
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::config::error::{ConfigError, ConfigResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// 仅使用内置默认值 + 环境变量
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// 指定 JSON 配置文件
    pub fn with_file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// 加载最终生效的配置
    ///
    /// # 返回
    /// - Ok(EngineConfig): 已通过校验的配置
    /// - Err(ConfigError): 文件缺失/格式错误/取值越界
    pub fn load(&self) -> ConfigResult<EngineConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// 加载配置（环境变量读取可注入，便于测试）
    pub fn load_with_env<F>(&self, env: F) -> ConfigResult<EngineConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.config_path {
            Some(path) => Self::read_file(path)?,
            None => EngineConfig::default(),
        };

        apply_env_overrides(&mut config, env)?;
        config.validate()?;

        info!(
            tonnage_tolerance = config.tonnage_tolerance,
            surcharge_enabled = config.surcharge_enabled,
            surcharge_rules = config.surcharge_rules.len(),
            "配置加载完成"
        );
        Ok(config)
    }

    /// 从 JSON 字符串解析配置（未出现的字段取默认值）
    pub fn from_json_str(raw: &str) -> ConfigResult<EngineConfig> {
        let config: EngineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 配置快照（JSON）
    pub fn get_config_snapshot(config: &EngineConfig) -> ConfigResult<String> {
        Ok(serde_json::to_string(config)?)
    }

    fn read_file(path: &Path) -> ConfigResult<EngineConfig> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        debug!(path = %path.display(), "读取配置文件");
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

fn is_true(v: &str) -> Option<bool> {
    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn apply_env_overrides<F>(config: &mut EngineConfig, env: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = env(config_keys::ENV_TOLERANCE) {
        config.tonnage_tolerance =
            raw.trim()
                .parse::<f64>()
                .map_err(|e| ConfigError::ConfigValueError {
                    key: config_keys::ENV_TOLERANCE.to_string(),
                    value: raw.clone(),
                    message: e.to_string(),
                })?;
    }

    if let Some(raw) = env(config_keys::ENV_SURCHARGE_ENABLED) {
        config.surcharge_enabled = is_true(&raw).ok_or_else(|| ConfigError::ConfigValueError {
            key: config_keys::ENV_SURCHARGE_ENABLED.to_string(),
            value: raw.clone(),
            message: "期望布尔值 (1/0/true/false)".to_string(),
        })?;
    }

    Ok(())
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 环境变量
    pub const ENV_TOLERANCE: &str = "REBAR_SPREAD_TOLERANCE";
    pub const ENV_SURCHARGE_ENABLED: &str = "REBAR_SPREAD_SURCHARGE_ENABLED";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_defaults_without_file() {
        let config = ConfigManager::new().load_with_env(no_env).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"{{"tonnage_tolerance": 0.8, "surcharge_enabled": false}}"#
        )
        .unwrap();

        let config = ConfigManager::with_file(temp_file.path())
            .load_with_env(no_env)
            .unwrap();
        assert_eq!(config.tonnage_tolerance, 0.8);
        assert!(!config.surcharge_enabled);
        assert_eq!(config.coil_specs.len(), 3);
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigManager::with_file("no_such_config.json").load_with_env(no_env);
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            (config_keys::ENV_TOLERANCE, "1.6"),
            (config_keys::ENV_SURCHARGE_ENABLED, "off"),
        ]
        .into_iter()
        .collect();

        let config = ConfigManager::new()
            .load_with_env(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.tonnage_tolerance, 1.6);
        assert!(!config.surcharge_enabled);
    }

    #[test]
    fn test_env_override_out_of_range_rejected() {
        let result = ConfigManager::new().load_with_env(|k| {
            (k == config_keys::ENV_TOLERANCE).then(|| "3.0".to_string())
        });
        assert!(matches!(
            result,
            Err(ConfigError::ToleranceOutOfRange { .. })
        ));
    }

    #[test]
    fn test_env_override_bad_bool() {
        let result = ConfigManager::new().load_with_env(|k| {
            (k == config_keys::ENV_SURCHARGE_ENABLED).then(|| "maybe".to_string())
        });
        assert!(matches!(result, Err(ConfigError::ConfigValueError { .. })));
    }

    #[test]
    fn test_from_json_str_with_custom_rule() {
        let raw = r#"{
            "surcharge_rules": [
                {"name": "9m加价", "mills": ["沙钢"], "length": "9m",
                 "specs": ["HRB400E16"], "amount": 15}
            ]
        }"#;
        let config = ConfigManager::from_json_str(raw).unwrap();
        assert_eq!(config.surcharge_rules.len(), 1);
        assert!(config.surcharge_rules[0].enabled);
        assert!(config.surcharge_rules[0].matches("沙钢", "9m", "HRB400E16"));

        let snapshot = ConfigManager::get_config_snapshot(&config).unwrap();
        assert!(snapshot.contains("9m加价"));
    }
}
