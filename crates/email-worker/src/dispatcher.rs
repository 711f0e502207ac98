//! 邮件分发处理逻辑
//!
//! 每个队列对应一个处理方法：解码后的消息在这里转发给外部邮件
//! 发送方，除生态新闻路径外不做任何加工。所有协作方在构造时注入，
//! 测试中可整体替换为 mock。

use std::sync::Arc;

use greencity_shared::messages::{
    AddEcoNewsMessage, ChangePlaceStatusMessage, DEFAULT_LANGUAGE_CODE, PasswordRecoveryMessage,
    SendReportMessage, VerifyEmailMessage,
};

use crate::error::DispatchError;
use crate::lookup::{EcoNewsRepository, EcoNewsTranslationRepository, SubscriberDirectory};
use crate::sender::EmailSender;

/// 邮件分发器
///
/// 无内部状态，处理方法之间互不依赖，可在多条消息间并发调用。
pub struct EmailDispatcher {
    email_sender: Arc<dyn EmailSender>,
    news_repo: Arc<dyn EcoNewsRepository>,
    translation_repo: Arc<dyn EcoNewsTranslationRepository>,
    subscriber_directory: Arc<dyn SubscriberDirectory>,
}

impl EmailDispatcher {
    pub fn new(
        email_sender: Arc<dyn EmailSender>,
        news_repo: Arc<dyn EcoNewsRepository>,
        translation_repo: Arc<dyn EcoNewsTranslationRepository>,
        subscriber_directory: Arc<dyn SubscriberDirectory>,
    ) -> Self {
        Self {
            email_sender,
            news_repo,
            translation_repo,
            subscriber_directory,
        }
    }

    /// 处理密码找回消息：四个字段原样转发
    pub async fn handle_password_recovery(
        &self,
        msg: PasswordRecoveryMessage,
    ) -> Result<(), DispatchError> {
        self.email_sender
            .send_restore_email(
                msg.user_id,
                &msg.user_first_name,
                &msg.user_email,
                &msg.recovery_token,
            )
            .await?;
        Ok(())
    }

    /// 处理地点状态变更消息
    pub async fn handle_change_place_status(
        &self,
        msg: ChangePlaceStatusMessage,
    ) -> Result<(), DispatchError> {
        self.email_sender
            .send_change_place_status_email(
                &msg.author_first_name,
                &msg.place_name,
                &msg.place_status,
                &msg.author_email,
            )
            .await?;
        Ok(())
    }

    /// 处理新增生态新闻消息
    ///
    /// 唯一带补齐步骤的路径，两次查找顺序执行且相互依赖：
    /// 新闻不存在或默认语言标题缺失都会中止处理，发送方不会被调用。
    pub async fn handle_add_eco_news(&self, msg: AddEcoNewsMessage) -> Result<(), DispatchError> {
        // 1. 确认新闻仍然存在
        let news = self
            .news_repo
            .find_by_id(msg.id)
            .await?
            .ok_or(DispatchError::EcoNewsNotFound { id: msg.id })?;

        // 2. 取默认语言的标题
        let title = self
            .translation_repo
            .find_title_by_news_and_language(&news, DEFAULT_LANGUAGE_CODE)
            .await?
            .ok_or_else(|| DispatchError::TranslationNotFound {
                news_id: msg.id,
                language: DEFAULT_LANGUAGE_CODE.to_string(),
            })?;

        // 3. 用翻译标题重建载荷，其余字段原样保留
        let enriched = AddEcoNewsMessage { title, ..msg };

        // 4. 取全部订阅者并转发
        let subscribers = self.subscriber_directory.find_all().await?;
        self.email_sender
            .send_new_news_for_subscriber(&subscribers, &enriched)
            .await?;
        Ok(())
    }

    /// 处理邮箱验证消息
    pub async fn handle_verify_email(&self, msg: VerifyEmailMessage) -> Result<(), DispatchError> {
        self.email_sender
            .send_verification_email(msg.id, &msg.name, &msg.email, &msg.token)
            .await?;
        Ok(())
    }

    /// 处理新增地点报表消息
    pub async fn handle_send_report(&self, msg: SendReportMessage) -> Result<(), DispatchError> {
        self.email_sender
            .send_added_new_places_report_email(
                &msg.subscribers,
                &msg.categories_with_places,
                &msg.email_notification,
            )
            .await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// 测试
// ---------------------------------------------------------------------------
