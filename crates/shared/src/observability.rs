//! 日志初始化
//!
//! 所有服务通过同一个入口配置 tracing 订阅器，
//! 保证输出格式和过滤规则一致。

use anyhow::Result;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// 日志级别（如 "info", "debug"）
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// 是否启用 JSON 格式日志
    #[serde(default)]
    pub json_logs: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

/// 可观测性资源守卫
///
/// 由服务入口持有，标记日志系统的生命周期。
/// Guard 被 drop 时记录关闭日志，作为进程退出的最后一条输出。
pub struct ObservabilityGuard {
    _private: (),
}

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        info!("Shutting down observability...");
    }
}

/// 初始化日志系统
///
/// 过滤规则优先取 `RUST_LOG` 环境变量，其次取配置中的 `log_level`。
/// 生产环境建议开启 `json_logs` 以便日志采集系统解析。
pub fn init(service_name: &str, config: &ObservabilityConfig) -> Result<ObservabilityGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = if config.json_logs {
        fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_thread_ids(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    info!(
        service = %service_name,
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "Observability initialized"
    );

    Ok(ObservabilityGuard { _private: () })
}
