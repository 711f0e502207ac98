//! 死信消息信封
//!
//! 邮件消息处理失败后不直接丢弃，而是包装为死信消息写入 `email-dlq` 队列，
//! 保留原始负载与失败原因，等待人工排查后重新投递。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 死信消息信封
///
/// 包装原始消息，附加来源队列、失败原因等元数据。
/// `message_id` 为信封自身的标识（UUID v7），与原始消息无关，
/// 因为进入死信队列的负载可能连反序列化都失败，取不到业务 ID。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadLetterMessage {
    /// 信封标识（UUID v7），时间有序便于按入队顺序排查
    pub message_id: String,
    /// 原始队列名
    pub source_queue: String,
    /// 原始消息内容（按 UTF-8 尽力解码的字符串）
    pub payload: String,
    /// 失败原因
    pub error: String,
    /// 失败时间
    pub failed_at: DateTime<Utc>,
    /// 来源服务
    pub source_service: String,
}

impl DeadLetterMessage {
    /// 构造信封，自动填充信封标识和失败时间
    pub fn new(
        source_queue: impl Into<String>,
        payload: impl Into<String>,
        error: impl Into<String>,
        source_service: impl Into<String>,
    ) -> Self {
        Self {
            message_id: Uuid::now_v7().to_string(),
            source_queue: source_queue.into(),
            payload: payload.into(),
            error: error.into(),
            failed_at: Utc::now(),
            source_service: source_service.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_keeps_original_payload_and_error() {
        let msg = DeadLetterMessage::new(
            "eco_news_queue",
            r#"{"id":7}"#,
            "生态新闻未找到: id=7",
            "email-worker",
        );

        assert_eq!(msg.source_queue, "eco_news_queue");
        assert_eq!(msg.payload, r#"{"id":7}"#);
        assert_eq!(msg.error, "生态新闻未找到: id=7");
        assert_eq!(msg.source_service, "email-worker");
        assert!(!msg.message_id.is_empty());
    }

    #[test]
    fn test_message_id_is_unique() {
        let a = DeadLetterMessage::new("q", "p", "e", "svc");
        let b = DeadLetterMessage::new("q", "p", "e", "svc");
        assert_ne!(a.message_id, b.message_id);
    }

    #[test]
    fn test_envelope_uses_camel_case_keys() {
        let msg = DeadLetterMessage::new(
            "verify-email-queue",
            "not json",
            "负载反序列化失败",
            "email-worker",
        );

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("messageId"));
        assert!(json.contains("sourceQueue"));
        assert!(json.contains("failedAt"));
        assert!(json.contains("sourceService"));

        let parsed: DeadLetterMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.message_id, msg.message_id);
        assert_eq!(parsed.source_queue, "verify-email-queue");
    }
}
