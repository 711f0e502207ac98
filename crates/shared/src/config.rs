//! 配置加载
//!
//! 配置来源按固定顺序叠加：默认文件、环境文件、服务文件、环境变量。
//! 所有配置项最终反序列化为强类型的 [`AppConfig`]。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::observability::ObservabilityConfig;

/// Kafka 配置
#[derive(Debug, Clone, Deserialize)]
pub struct KafkaConfig {
    pub brokers: String,
    pub consumer_group: String,
    pub auto_offset_reset: String,
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            brokers: "localhost:9092".to_string(),
            consumer_group: "greencity-email".to_string(),
            auto_offset_reset: "earliest".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    #[serde(default)]
    pub kafka: KafkaConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// 加载指定服务的配置
    ///
    /// 叠加顺序，后加载的覆盖先加载的同名项：
    /// 1. `{CONFIG_DIR}/default.toml`
    /// 2. `{CONFIG_DIR}/{GREENCITY_ENV}.toml`（如 `production.toml`）
    /// 3. `{CONFIG_DIR}/{service_name}.toml`（如 `email-worker.toml`）
    /// 4. `GREENCITY_` 前缀的环境变量（如 `GREENCITY_KAFKA_BROKERS` -> `kafka.brokers`）
    ///
    /// 三个文件都允许缺失，此时整体落回各字段的默认值。
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("GREENCITY_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
        let dir = Path::new(&config_dir);

        Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            .add_source(File::from(dir.join("default.toml")).required(false))
            .add_source(File::from(dir.join(format!("{env}.toml"))).required(false))
            .add_source(File::from(dir.join(format!("{service_name}.toml"))).required(false))
            .add_source(
                Environment::with_prefix("GREENCITY")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.kafka.brokers, "localhost:9092");
        assert_eq!(config.kafka.consumer_group, "greencity-email");
        assert_eq!(config.kafka.auto_offset_reset, "earliest");
    }

    #[test]
    fn test_load_without_config_files() {
        // 配置文件缺失时应回退到默认值，而不是报错
        // SAFETY: 测试环境中单线程执行，不会有并发问题
        unsafe {
            std::env::set_var("CONFIG_DIR", "nonexistent-config-dir");
        }

        let config = AppConfig::load("email-worker").expect("load should fall back to defaults");
        assert_eq!(config.service_name, "email-worker");
        assert_eq!(config.kafka.brokers, "localhost:9092");
        assert_eq!(config.observability.log_level, "info");

        unsafe {
            std::env::remove_var("CONFIG_DIR");
        }
    }

    #[test]
    fn test_is_production() {
        let mut config = AppConfig::default();
        assert!(!config.is_production());

        config.environment = "production".to_string();
        assert!(config.is_production());
    }
}
