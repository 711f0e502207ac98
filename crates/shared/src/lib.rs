//! 共享库
//!
//! 包含邮件平台各服务共用的配置、错误处理、Kafka、消息契约等基础设施代码。

pub mod config;
pub mod dlq;
pub mod dto;
pub mod error;
pub mod kafka;
pub mod messages;
pub mod observability;
pub mod test_utils;
