//! Mock Platform CLI
//!
//! 平台模拟工具的命令行入口点。
//! 向邮件队列发送模拟业务消息，驱动 email-worker 的本地联调。

use clap::Parser;
use mock_platform::cli::{Cli, CommandRunner, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 日志过滤先看 RUST_LOG，没有再落回 --log-level 参数
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .init();

    let runner = CommandRunner::new(cli.kafka_brokers);

    match cli.command {
        Commands::Send {
            queue,
            count,
            email,
            news_id,
        } => {
            runner.run_send(&queue, count, email, news_id).await?;
        }
        Commands::SendAll => {
            runner.run_send_all().await?;
        }
    }

    Ok(())
}
