//! 命令行接口
//!
//! 两个子命令覆盖本地联调所需的发送方式：
//!
//! - `send` - 向指定邮件队列发送模拟消息
//! - `send-all` - 向全部五个邮件队列各发送一条模拟消息
//!
//! # 使用示例
//!
//! ```bash
//! # 发送一条密码找回消息
//! mock-platform send -q password-recovery-queue
//!
//! # 发送 10 条生态新闻消息，指定新闻 ID
//! mock-platform send -q eco_news_queue -c 10 --news-id 3
//!
//! # 指定收件邮箱
//! mock-platform send -q verify-email-queue --email dev@example.com
//!
//! # 全部队列各发一条
//! mock-platform send-all
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands};
pub use runner::CommandRunner;
