//! 共享错误类型
//!
//! 基础设施层（Kafka、序列化、验证、外部服务调用）的失败统一收敛到
//! [`GreenCityError`]，各服务在此之上定义自己的业务错误。

use thiserror::Error;

/// 基础设施错误
#[derive(Debug, Error)]
pub enum GreenCityError {
    // ==================== Kafka ====================
    #[error("Kafka 错误: {0}")]
    Kafka(String),

    // ==================== 序列化 ====================
    #[error("消息序列化失败: {0}")]
    Serialization(String),

    // ==================== 参数验证 ====================
    #[error("参数验证失败: {0}")]
    Validation(String),

    // ==================== 外部服务 ====================
    #[error("外部服务调用失败: {service}: {message}")]
    ExternalService { service: String, message: String },
}

/// 共享结果类型别名
pub type Result<T> = std::result::Result<T, GreenCityError>;

impl From<serde_json::Error> for GreenCityError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<validator::ValidationErrors> for GreenCityError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
