//! 外部邮件发送方抽象
//!
//! 通过 `EmailSender` trait 抽象五类邮件的发送行为，真实投递
//! （SMTP、服务商 API、模板渲染）由外部协作方负责，本服务只
//! 传递结构化字段。当前提供模拟实现（仅记录日志），便于在无
//! 外部依赖的情况下验证消费管道的完整性。

use std::collections::HashMap;

use async_trait::async_trait;
use greencity_shared::error::Result;
use greencity_shared::messages::{
    AddEcoNewsMessage, EmailNotification, PlaceAuthor, PlaceNotification, PlaceStatus,
};
use tracing::info;
use uuid::Uuid;

use crate::lookup::NewsSubscriber;

/// 邮件发送方接口，每类邮件对应一个方法
///
/// 所有方法都是一次性的发送请求：本服务不重试、不落盘，
/// 失败语义与重试策略由发送方自己负责。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// 发送密码找回邮件
    async fn send_restore_email(
        &self,
        user_id: i64,
        user_first_name: &str,
        user_email: &str,
        recovery_token: &str,
    ) -> Result<()>;

    /// 发送地点状态变更通知邮件
    async fn send_change_place_status_email(
        &self,
        author_first_name: &str,
        place_name: &str,
        place_status: &PlaceStatus,
        author_email: &str,
    ) -> Result<()>;

    /// 向全部订阅者推送新的生态新闻
    async fn send_new_news_for_subscriber(
        &self,
        subscribers: &[NewsSubscriber],
        news: &AddEcoNewsMessage,
    ) -> Result<()>;

    /// 发送邮箱验证邮件
    async fn send_verification_email(
        &self,
        id: i64,
        name: &str,
        email: &str,
        token: &str,
    ) -> Result<()>;

    /// 发送新增地点报表邮件
    async fn send_added_new_places_report_email(
        &self,
        subscribers: &[PlaceAuthor],
        categories_with_places: &HashMap<String, Vec<PlaceNotification>>,
        email_notification: &EmailNotification,
    ) -> Result<()>;
}

// ---------------------------------------------------------------------------
// 模拟发送实现
// ---------------------------------------------------------------------------

/// 模拟邮件发送方
///
/// 生产环境中替换为真实邮件服务的客户端实现
pub struct LoggingEmailSender;

#[async_trait]
impl EmailSender for LoggingEmailSender {
    async fn send_restore_email(
        &self,
        user_id: i64,
        user_first_name: &str,
        user_email: &str,
        _recovery_token: &str,
    ) -> Result<()> {
        let message_id = Uuid::now_v7().to_string();

        // 令牌不落日志
        info!(
            message_id = %message_id,
            user_id,
            user_first_name,
            user_email,
            "模拟发送密码找回邮件"
        );
        Ok(())
    }

    async fn send_change_place_status_email(
        &self,
        author_first_name: &str,
        place_name: &str,
        place_status: &PlaceStatus,
        author_email: &str,
    ) -> Result<()> {
        let message_id = Uuid::now_v7().to_string();

        info!(
            message_id = %message_id,
            author_first_name,
            place_name,
            place_status = %place_status,
            author_email,
            "模拟发送地点状态变更邮件"
        );
        Ok(())
    }

    async fn send_new_news_for_subscriber(
        &self,
        subscribers: &[NewsSubscriber],
        news: &AddEcoNewsMessage,
    ) -> Result<()> {
        let message_id = Uuid::now_v7().to_string();

        info!(
            message_id = %message_id,
            news_id = news.id,
            title = %news.title,
            subscriber_count = subscribers.len(),
            "模拟推送生态新闻给订阅者"
        );
        Ok(())
    }

    async fn send_verification_email(
        &self,
        id: i64,
        name: &str,
        email: &str,
        _token: &str,
    ) -> Result<()> {
        let message_id = Uuid::now_v7().to_string();

        info!(
            message_id = %message_id,
            user_id = id,
            name,
            email,
            "模拟发送邮箱验证邮件"
        );
        Ok(())
    }

    async fn send_added_new_places_report_email(
        &self,
        subscribers: &[PlaceAuthor],
        categories_with_places: &HashMap<String, Vec<PlaceNotification>>,
        email_notification: &EmailNotification,
    ) -> Result<()> {
        let message_id = Uuid::now_v7().to_string();

        info!(
            message_id = %message_id,
            subscriber_count = subscribers.len(),
            category_count = categories_with_places.len(),
            email_notification = %email_notification,
            "模拟发送新增地点报表邮件"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// 测试
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use greencity_shared::test_utils::{test_add_eco_news_message, test_send_report_message};

    #[tokio::test]
    async fn test_logging_sender_restore_email() {
        let sender = LoggingEmailSender;
        let result = sender
            .send_restore_email(1, "Ana", "ana@example.com", "recovery-token-001")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_logging_sender_change_place_status() {
        let sender = LoggingEmailSender;
        let result = sender
            .send_change_place_status_email(
                "Taras",
                "Green Cafe",
                &PlaceStatus::Approved,
                "taras@example.com",
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_logging_sender_news_for_subscribers() {
        let sender = LoggingEmailSender;
        let subscribers = vec![NewsSubscriber {
            email: "reader@example.com".to_string(),
            unsubscribe_token: "unsub-001".to_string(),
        }];
        let news = test_add_eco_news_message(1);

        let result = sender.send_new_news_for_subscriber(&subscribers, &news).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_logging_sender_verification_email() {
        let sender = LoggingEmailSender;
        let result = sender
            .send_verification_email(42, "Ana", "ana@example.com", "verify-token-042")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_logging_sender_report_email() {
        let sender = LoggingEmailSender;
        let report = test_send_report_message();

        let result = sender
            .send_added_new_places_report_email(
                &report.subscribers,
                &report.categories_with_places,
                &report.email_notification,
            )
            .await;
        assert!(result.is_ok());
    }
}
