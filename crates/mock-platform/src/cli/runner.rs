//! 命令执行器
//!
//! 负责执行各 CLI 子命令的具体逻辑。
//! 将命令行参数转化为发往邮件队列的 Kafka 消息。

use anyhow::{Context, Result, bail};
use tracing::info;
use uuid::Uuid;

use greencity_shared::config::KafkaConfig;
use greencity_shared::kafka::{KafkaProducer, queues};

use crate::generator;

/// 发送类命令支持的目标队列
const SENDABLE_QUEUES: [&str; 5] = [
    queues::PASSWORD_RECOVERY,
    queues::CHANGE_PLACE_STATUS,
    queues::ADD_ECO_NEWS,
    queues::VERIFY_EMAIL,
    queues::SEND_REPORT,
];

/// 命令执行器
///
/// 封装 Kafka 连接参数和各命令的执行逻辑。
/// 作为 CLI 与消息生成之间的桥梁，简化 main 函数的复杂度。
pub struct CommandRunner {
    kafka_brokers: String,
}

impl CommandRunner {
    /// 创建命令执行器
    pub fn new(kafka_brokers: String) -> Self {
        Self { kafka_brokers }
    }

    /// 执行 send 命令
    ///
    /// 向指定队列发送 count 条随机消息，可覆盖收件邮箱和新闻 ID。
    pub async fn run_send(
        &self,
        queue: &str,
        count: usize,
        email: Option<String>,
        news_id: Option<i64>,
    ) -> Result<()> {
        info!(queue, count, "发送模拟消息");

        let producer = self.make_producer()?;
        for _ in 0..count {
            let (key, payload) = build_sample(queue, email.as_deref(), news_id)?;
            producer
                .send_json(queue, &key, &payload)
                .await
                .context("发送消息失败")?;
            info!(queue, key = %key, "已发送模拟消息");
        }

        info!(queue, count, "模拟消息发送完成");
        Ok(())
    }

    /// 执行 send-all 命令
    ///
    /// 向全部五个邮件队列各发送一条随机消息，用于一次性验证
    /// email-worker 的所有处理路径。
    pub async fn run_send_all(&self) -> Result<()> {
        let producer = self.make_producer()?;

        for queue in SENDABLE_QUEUES {
            let (key, payload) = build_sample(queue, None, None)?;
            producer
                .send_json(queue, &key, &payload)
                .await
                .context("发送消息失败")?;
            info!(queue, key = %key, "已发送模拟消息");
        }

        info!("全部邮件队列各发送一条模拟消息");
        Ok(())
    }

    fn make_producer(&self) -> Result<KafkaProducer> {
        let kafka_config = KafkaConfig {
            brokers: self.kafka_brokers.clone(),
            consumer_group: "mock-platform".to_string(),
            ..Default::default()
        };
        KafkaProducer::new(&kafka_config).context("创建 Kafka 生产者失败")
    }
}

/// 构造一条模拟消息，返回消息键与 JSON 负载
///
/// 消息键取负载的业务标识，报表消息没有单一业务主键则使用随机键。
/// 与发送解耦，便于在测试中校验队列名处理和负载结构。
fn build_sample(
    queue: &str,
    email: Option<&str>,
    news_id: Option<i64>,
) -> Result<(String, serde_json::Value)> {
    let sample = match queue {
        queues::PASSWORD_RECOVERY => {
            let msg = generator::sample_password_recovery(email);
            (msg.user_id.to_string(), serde_json::to_value(&msg)?)
        }
        queues::CHANGE_PLACE_STATUS => {
            let msg = generator::sample_change_place_status(email);
            (msg.author_email.clone(), serde_json::to_value(&msg)?)
        }
        queues::ADD_ECO_NEWS => {
            let msg = generator::sample_add_eco_news(news_id);
            (msg.id.to_string(), serde_json::to_value(&msg)?)
        }
        queues::VERIFY_EMAIL => {
            let msg = generator::sample_verify_email(email);
            (msg.id.to_string(), serde_json::to_value(&msg)?)
        }
        queues::SEND_REPORT => {
            let msg = generator::sample_send_report(email);
            (Uuid::new_v4().to_string(), serde_json::to_value(&msg)?)
        }
        other => bail!(
            "未知队列 '{}'\n可用队列: {}",
            other,
            SENDABLE_QUEUES.join(", ")
        ),
    };
    Ok(sample)
}

// ============================================================================
// 单元测试
// ============================================================================
