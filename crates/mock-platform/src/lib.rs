//! 绿色城市平台模拟工具
//!
//! 向邮件队列发送模拟业务消息，用于本地开发和联调 email-worker：
//!
//! - [`cli`] - 命令行接口与命令执行
//! - [`generator`] - 各队列消息的随机样本生成

pub mod cli;
pub mod generator;
