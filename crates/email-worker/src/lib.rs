//! 邮件分发服务
//!
//! 从 Kafka 的五个邮件队列消费消息，按队列路由到对应的处理逻辑，
//! 将类型化载荷转发给外部邮件发送方。生态新闻路径在转发前
//! 补齐默认语言标题并取得全部订阅者。

pub mod consumer;
pub mod dispatcher;
pub mod error;
pub mod lookup;
pub mod sender;
