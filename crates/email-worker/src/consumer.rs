//! 邮件队列消费者
//!
//! 订阅五个邮件队列，把每条消息按队列名路由到分发器的对应处理方法。
//! 处理失败的消息包装为死信消息写入 `email-dlq`，不阻塞后续消费。

use greencity_shared::config::AppConfig;
use greencity_shared::dlq::DeadLetterMessage;
use greencity_shared::kafka::{ConsumerMessage, KafkaConsumer, KafkaProducer, queues};
use greencity_shared::messages::{
    AddEcoNewsMessage, ChangePlaceStatusMessage, PasswordRecoveryMessage, SendReportMessage,
    VerifyEmailMessage,
};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::dispatcher::EmailDispatcher;
use crate::error::DispatchError;

/// 邮件消费者
///
/// 持有 Kafka 消费者、分发器和死信生产者，生命周期与进程一致。
pub struct EmailConsumer {
    consumer: KafkaConsumer,
    dispatcher: EmailDispatcher,
    /// 处理失败的消息投递到死信队列，供人工排查后重新投递
    producer: KafkaProducer,
}

impl EmailConsumer {
    pub fn new(
        config: &AppConfig,
        dispatcher: EmailDispatcher,
        producer: KafkaProducer,
    ) -> Result<Self, DispatchError> {
        let consumer = KafkaConsumer::new(&config.kafka)?;
        Ok(Self {
            consumer,
            dispatcher,
            producer,
        })
    }

    /// 启动消费循环，直到收到 shutdown 信号
    pub async fn run(self, shutdown: watch::Receiver<bool>) -> Result<(), DispatchError> {
        self.consumer.subscribe(&[
            queues::PASSWORD_RECOVERY,
            queues::CHANGE_PLACE_STATUS,
            queues::ADD_ECO_NEWS,
            queues::VERIFY_EMAIL,
            queues::SEND_REPORT,
        ])?;

        info!("邮件消费者已启动");

        let dispatcher = self.dispatcher;
        let producer = self.producer;

        self.consumer
            .start(shutdown, |msg| {
                let dispatcher = &dispatcher;
                let producer = &producer;
                async move {
                    if let Err(e) = handle_message(dispatcher, &msg).await {
                        error!(
                            error = %e,
                            topic = %msg.topic,
                            partition = msg.partition,
                            offset = msg.offset,
                            "处理邮件消息失败"
                        );
                        send_to_dlq(producer, &msg, &e).await;
                    }
                    Ok(())
                }
            })
            .await;

        info!("邮件消费者已停止");
        Ok(())
    }
}

/// 处理单条 Kafka 消息
///
/// 拆分为独立函数而非方法，便于在测试中直接调用而无需构造完整的 Consumer。
/// 队列名到处理方法的绑定关系在这里集中列出，新增队列时只改这一处。
///
/// 队列按至少一次语义投递且本服务不做去重：同一条消息被重复投递时
/// 会重复发送邮件（生态新闻路径会重复通知全部订阅者）。是否需要
/// 基于业务键的幂等去重尚未决定，依赖方需自行容忍重复。
pub async fn handle_message(
    dispatcher: &EmailDispatcher,
    msg: &ConsumerMessage,
) -> Result<(), DispatchError> {
    match msg.topic.as_str() {
        queues::PASSWORD_RECOVERY => {
            let message: PasswordRecoveryMessage = msg.deserialize_payload()?;
            info!(user_id = message.user_id, "收到密码找回消息");
            dispatcher.handle_password_recovery(message).await
        }
        queues::CHANGE_PLACE_STATUS => {
            let message: ChangePlaceStatusMessage = msg.deserialize_payload()?;
            info!(
                place_name = %message.place_name,
                place_status = %message.place_status,
                "收到地点状态变更消息"
            );
            dispatcher.handle_change_place_status(message).await
        }
        queues::ADD_ECO_NEWS => {
            let message: AddEcoNewsMessage = msg.deserialize_payload()?;
            info!(news_id = message.id, "收到新增生态新闻消息");
            dispatcher.handle_add_eco_news(message).await
        }
        queues::VERIFY_EMAIL => {
            let message: VerifyEmailMessage = msg.deserialize_payload()?;
            info!(user_id = message.id, "收到邮箱验证消息");
            dispatcher.handle_verify_email(message).await
        }
        queues::SEND_REPORT => {
            let message: SendReportMessage = msg.deserialize_payload()?;
            info!(
                subscriber_count = message.subscribers.len(),
                "收到新增地点报表消息"
            );
            dispatcher.handle_send_report(message).await
        }
        other => Err(DispatchError::UnknownQueue {
            queue: other.to_string(),
        }),
    }
}

/// 将处理失败的消息包装为死信消息写入死信队列
///
/// 原始负载按 UTF-8 尽力解码保留，连同失败原因一起入队。
async fn send_to_dlq(producer: &KafkaProducer, msg: &ConsumerMessage, error: &DispatchError) {
    let envelope = DeadLetterMessage::new(
        msg.topic.as_str(),
        String::from_utf8_lossy(&msg.payload),
        error.to_string(),
        "email-worker",
    );

    match producer
        .send_json(queues::DEAD_LETTER, &envelope.message_id, &envelope)
        .await
    {
        Ok(_) => warn!(
            message_id = %envelope.message_id,
            source_queue = %msg.topic,
            "消息已写入死信队列"
        ),
        Err(e) => error!(
            source_queue = %msg.topic,
            error = %e,
            "发送到死信队列失败，消息可能丢失"
        ),
    }
}

// ---------------------------------------------------------------------------
// 测试
// ---------------------------------------------------------------------------
