//! CLI 命令定义
//!
//! clap derive 宏声明的命令行接口。
//! 子命令对应消息发送的两种方式：指定队列发送、全队列各发一条。

use clap::{Parser, Subcommand};

/// 平台模拟命令行工具
///
/// 向邮件队列发送模拟业务消息，驱动 email-worker 的本地联调。
/// 使用 `--help` 查看各子命令的详细说明。
#[derive(Parser, Debug)]
#[command(name = "mock-platform")]
#[command(version, about = "绿色城市邮件队列模拟工具")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别（trace/debug/info/warn/error）
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Kafka broker 地址列表
    #[arg(long, default_value = "localhost:9092")]
    pub kafka_brokers: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// 子命令枚举
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 向指定队列发送模拟消息
    ///
    /// 支持的队列：password-recovery-queue, change-place-status,
    /// eco_news_queue, verify-email-queue, send-report
    Send {
        /// 目标队列名
        #[arg(short, long)]
        queue: String,

        /// 发送数量
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// 收件邮箱（默认随机生成）
        #[arg(long)]
        email: Option<String>,

        /// 生态新闻 ID（仅 eco_news_queue，默认取演示数据范围内随机值）
        #[arg(long)]
        news_id: Option<i64>,
    },

    /// 向全部五个邮件队列各发送一条模拟消息
    SendAll,
}

// ============================================================================
// 单元测试
// ============================================================================
