//! 邮件分发服务入口
//!
//! 加载配置、初始化可观测性，组装分发器依赖并启动消费循环。

use std::sync::Arc;

use anyhow::Result;
use greencity_shared::config::AppConfig;
use greencity_shared::kafka::KafkaProducer;
use greencity_shared::observability;
use tokio::sync::watch;
use tracing::info;

use email_worker::consumer::EmailConsumer;
use email_worker::dispatcher::EmailDispatcher;
use email_worker::lookup::{
    InMemoryEcoNewsRepository, InMemorySubscriberDirectory, InMemoryTranslationRepository,
};
use email_worker::sender::LoggingEmailSender;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 加载配置
    let config = AppConfig::load("email-worker").unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    // 2. 初始化可观测性
    let _guard = observability::init(&config.service_name, &config.observability)?;

    info!("Starting email-worker...");
    info!(environment = %config.environment, "Configuration loaded");

    // 3. 死信生产者
    let producer = KafkaProducer::new(&config.kafka)?;

    // 4. 邮件发送方与生态新闻查找依赖
    let email_sender = Arc::new(LoggingEmailSender);
    let news_repo = Arc::new(InMemoryEcoNewsRepository::with_demo_data().await);
    let translation_repo = Arc::new(InMemoryTranslationRepository::with_demo_data().await);
    let subscriber_directory = Arc::new(InMemorySubscriberDirectory::with_demo_data().await);

    // 5. 分发器与消费者
    let dispatcher = EmailDispatcher::new(
        email_sender,
        news_repo,
        translation_repo,
        subscriber_directory,
    );
    let consumer = EmailConsumer::new(&config, dispatcher, producer)?;

    // 6. 优雅停机
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    consumer.run(shutdown_rx).await?;

    info!("Service shutdown complete");
    Ok(())
}

/// 等待停机信号（Ctrl+C 或 SIGTERM）
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        }
    }
}
