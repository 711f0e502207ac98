//! Kafka 接入层
//!
//! 邮件链路的所有 Kafka 访问都经过这里：五个业务队列名、消费到的消息的
//! 持有型表示、JSON 生产者以及带优雅关闭语义的消费循环。
//! 各服务不直接接触 rdkafka 的底层类型。

use std::time::Duration;

use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::{BorrowedMessage, Message};
use rdkafka::producer::{FutureProducer, FutureRecord};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::config::KafkaConfig;
use crate::error::GreenCityError;

// ---------------------------------------------------------------------------
// 队列常量
// ---------------------------------------------------------------------------

/// 集中管理所有 Kafka 队列名称，防止字符串散落在各服务中导致拼写不一致
///
/// 前五个名称是与平台生产者约定的线上契约，修改任何一个都会
/// 导致已部署的生产者与消费者失配。
pub mod queues {
    pub const PASSWORD_RECOVERY: &str = "password-recovery-queue";
    pub const CHANGE_PLACE_STATUS: &str = "change-place-status";
    pub const ADD_ECO_NEWS: &str = "eco_news_queue";
    pub const VERIFY_EMAIL: &str = "verify-email-queue";
    pub const SEND_REPORT: &str = "send-report";
    pub const DEAD_LETTER: &str = "email-dlq";
}

// ---------------------------------------------------------------------------
// ConsumerMessage
// ---------------------------------------------------------------------------

/// 消费到的一条队列消息
///
/// rdkafka 的 `BorrowedMessage` 借用消费者内部缓冲区，不能跨 await 点持有。
/// 这里复制出全部字段，处理函数拿到的是独立的所有权。
#[derive(Debug, Clone)]
pub struct ConsumerMessage {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub key: Option<String>,
    pub payload: Vec<u8>,
    pub timestamp: Option<i64>,
}

impl ConsumerMessage {
    fn from_borrowed(msg: &BorrowedMessage<'_>) -> Self {
        Self {
            topic: msg.topic().to_string(),
            partition: msg.partition(),
            offset: msg.offset(),
            // 业务键都是 id/邮箱/uuid 文本，非 UTF-8 的键按损失性解码保留
            key: msg.key().map(|k| String::from_utf8_lossy(k).into_owned()),
            payload: msg.payload().map(<[u8]>::to_vec).unwrap_or_default(),
            timestamp: msg.timestamp().to_millis(),
        }
    }

    /// 将 JSON 负载反序列化为目标类型
    pub fn deserialize_payload<T: DeserializeOwned>(&self) -> Result<T, GreenCityError> {
        serde_json::from_slice(&self.payload)
            .map_err(|e| GreenCityError::Serialization(format!("负载反序列化失败: {e}")))
    }
}

// ---------------------------------------------------------------------------
// KafkaProducer
// ---------------------------------------------------------------------------

/// JSON 消息生产者
///
/// 邮件链路的出站消息（死信、模拟消息）全部是 JSON 文本，
/// 因此只暴露 [`send_json`](Self::send_json) 一个发送入口。
/// `FutureProducer` 内部是 Arc 包装，Clone 开销可忽略。
#[derive(Clone)]
pub struct KafkaProducer {
    producer: FutureProducer,
}

impl KafkaProducer {
    /// 根据配置创建生产者
    ///
    /// `message.timeout.ms` 固定 5 秒：5 秒内投递不出去的消息交由调用方
    /// 决定记日志还是丢弃，不在这里无限等待。
    pub fn new(config: &KafkaConfig) -> Result<Self, GreenCityError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", "5000")
            .create()
            .map_err(|e| GreenCityError::Kafka(format!("创建生产者失败: {e}")))?;

        info!(brokers = %config.brokers, "Kafka 生产者已初始化");
        Ok(Self { producer })
    }

    /// 将值序列化为 JSON 并发送到指定队列，返回落盘的分区和位点
    pub async fn send_json<T: Serialize>(
        &self,
        queue: &str,
        key: &str,
        value: &T,
    ) -> Result<(i32, i64), GreenCityError> {
        let payload = serde_json::to_vec(value)
            .map_err(|e| GreenCityError::Serialization(format!("序列化失败: {e}")))?;

        let record = FutureRecord::to(queue).key(key).payload(&payload);
        let delivery = self
            .producer
            .send(record, Duration::from_secs(5))
            .await
            .map_err(|(e, _)| GreenCityError::Kafka(format!("投递 '{queue}' 失败: {e}")))?;

        debug!(
            queue,
            key,
            partition = delivery.partition,
            offset = delivery.offset,
            "消息已投递"
        );
        Ok((delivery.partition, delivery.offset))
    }
}

// ---------------------------------------------------------------------------
// KafkaConsumer
// ---------------------------------------------------------------------------

/// 带优雅关闭语义的队列消费者
///
/// 关闭信号通过 `watch` channel 下发。循环退出前正在执行的处理函数
/// 会自然跑完，不会被中途丢弃。
pub struct KafkaConsumer {
    consumer: StreamConsumer,
}

impl KafkaConsumer {
    pub fn new(config: &KafkaConfig) -> Result<Self, GreenCityError> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.consumer_group)
            .set("auto.offset.reset", &config.auto_offset_reset)
            .set("enable.auto.commit", "true")
            .create()
            .map_err(|e| GreenCityError::Kafka(format!("创建消费者失败: {e}")))?;

        info!(
            brokers = %config.brokers,
            group_id = %config.consumer_group,
            "Kafka 消费者已初始化"
        );
        Ok(Self { consumer })
    }

    /// 订阅指定的队列列表
    pub fn subscribe(&self, queues: &[&str]) -> Result<(), GreenCityError> {
        self.consumer
            .subscribe(queues)
            .map_err(|e| GreenCityError::Kafka(format!("订阅队列失败: {e}")))?;

        info!(?queues, "已订阅 Kafka 队列");
        Ok(())
    }

    /// 运行消费循环，直到关闭信号变为 `true` 或消息流结束
    ///
    /// 处理函数返回的错误只记录日志，循环继续消费下一条。
    /// 单条坏消息不应拖停整个消费者。
    pub async fn start<F, Fut>(self, mut shutdown: watch::Receiver<bool>, handler: F)
    where
        F: Fn(ConsumerMessage) -> Fut,
        Fut: std::future::Future<Output = Result<(), GreenCityError>>,
    {
        use futures::StreamExt;

        let stream = self.consumer.stream();
        futures::pin_mut!(stream);

        info!("消费循环开始运行");

        loop {
            tokio::select! {
                // 关闭信号优先于待处理消息
                biased;

                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("消费循环收到关闭信号，停止拉取");
                        break;
                    }
                }

                next = stream.next() => {
                    match next {
                        Some(Ok(borrowed)) => {
                            let msg = ConsumerMessage::from_borrowed(&borrowed);
                            debug!(
                                queue = %msg.topic,
                                partition = msg.partition,
                                offset = msg.offset,
                                "拉取到一条消息"
                            );

                            if let Err(e) = handler(msg).await {
                                error!(error = %e, "消息处理返回错误");
                            }
                        }
                        Some(Err(e)) => {
                            error!(error = %e, "从 broker 拉取消息失败");
                        }
                        None => {
                            warn!("消息流已结束，消费循环退出");
                            break;
                        }
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 测试
// ---------------------------------------------------------------------------
