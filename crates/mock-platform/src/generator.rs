//! 消息样本生成器
//!
//! 为五个邮件队列生成随机业务消息，用于本地联调。
//! 使用 fake 生成贴近真实的姓名、邮箱和文案。

use std::collections::HashMap;

use chrono::Utc;
use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::{FirstName, Name};
use rand::Rng;
use uuid::Uuid;

use greencity_shared::messages::{
    AddEcoNewsMessage, ChangePlaceStatusMessage, EmailNotification, PasswordRecoveryMessage,
    PlaceAuthor, PlaceNotification, PlaceStatus, SendReportMessage, VerifyEmailMessage,
};

/// 报表样本使用的地点类别
const REPORT_CATEGORIES: [&str; 4] = ["Food", "Parks", "Recycling", "Transport"];

/// 生成随机密码找回消息
///
/// 可指定收件邮箱，覆盖随机生成的值
pub fn sample_password_recovery(email: Option<&str>) -> PasswordRecoveryMessage {
    let mut rng = rand::rng();

    PasswordRecoveryMessage {
        user_id: rng.random_range(1..=10_000),
        user_first_name: FirstName().fake(),
        user_email: email
            .map(str::to_string)
            .unwrap_or_else(|| SafeEmail().fake()),
        recovery_token: Uuid::new_v4().to_string(),
    }
}

/// 生成随机地点状态变更消息
pub fn sample_change_place_status(email: Option<&str>) -> ChangePlaceStatusMessage {
    let mut rng = rand::rng();

    let place_status = match rng.random_range(0..4) {
        0 => PlaceStatus::Proposed,
        1 => PlaceStatus::Declined,
        2 => PlaceStatus::Approved,
        _ => PlaceStatus::Deleted,
    };

    ChangePlaceStatusMessage {
        author_first_name: FirstName().fake(),
        place_name: CompanyName().fake(),
        place_status,
        author_email: email
            .map(str::to_string)
            .unwrap_or_else(|| SafeEmail().fake()),
    }
}

/// 生成随机生态新闻消息
///
/// 未指定 ID 时默认落在演示查找数据的范围内（1-5），
/// 保证 email-worker 的标题查找能够命中。
pub fn sample_add_eco_news(news_id: Option<i64>) -> AddEcoNewsMessage {
    let mut rng = rand::rng();

    let id = news_id.unwrap_or_else(|| rng.random_range(1..=5));

    // 一半的新闻带配图
    let image_path = if rng.random_bool(0.5) {
        Some(format!("/img/eco/{id}.png"))
    } else {
        None
    };

    AddEcoNewsMessage {
        id,
        title: Sentence(3..8).fake(),
        image_path,
        text: Paragraph(1..3).fake(),
        creation_date: Utc::now(),
    }
}

/// 生成随机邮箱验证消息
pub fn sample_verify_email(email: Option<&str>) -> VerifyEmailMessage {
    let mut rng = rand::rng();

    VerifyEmailMessage {
        id: rng.random_range(1..=10_000),
        name: FirstName().fake(),
        email: email
            .map(str::to_string)
            .unwrap_or_else(|| SafeEmail().fake()),
        token: Uuid::new_v4().to_string(),
    }
}

/// 生成随机新增地点报表消息
///
/// 1-3 名订阅者，1-4 个类别，每类 1-2 个新地点。
/// 指定邮箱时覆盖第一名订阅者的邮箱。
pub fn sample_send_report(email: Option<&str>) -> SendReportMessage {
    let mut rng = rand::rng();

    let subscriber_count = rng.random_range(1..=3);
    let mut subscribers = Vec::with_capacity(subscriber_count);
    for i in 0..subscriber_count {
        let subscriber_email = if i == 0 {
            email
                .map(str::to_string)
                .unwrap_or_else(|| SafeEmail().fake())
        } else {
            SafeEmail().fake()
        };
        subscribers.push(PlaceAuthor {
            id: rng.random_range(1..=10_000),
            name: Name().fake(),
            email: subscriber_email,
        });
    }

    let category_count = rng.random_range(1..=REPORT_CATEGORIES.len());
    let mut categories_with_places = HashMap::new();
    for category in REPORT_CATEGORIES.iter().take(category_count) {
        let place_count = rng.random_range(1..=2);
        let places = (0..place_count)
            .map(|_| PlaceNotification {
                name: CompanyName().fake(),
                category: (*category).to_string(),
            })
            .collect();
        categories_with_places.insert((*category).to_string(), places);
    }

    let email_notification = match rng.random_range(0..3) {
        0 => EmailNotification::Daily,
        1 => EmailNotification::Weekly,
        _ => EmailNotification::Monthly,
    };

    SendReportMessage {
        subscribers,
        categories_with_places,
        email_notification,
    }
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_password_recovery_random() {
        let msg = sample_password_recovery(None);

        assert!(msg.user_id >= 1);
        assert!(!msg.user_first_name.is_empty());
        assert!(msg.user_email.contains('@'));
        assert!(!msg.recovery_token.is_empty());
    }

    #[test]
    fn test_sample_password_recovery_respects_email_override() {
        let msg = sample_password_recovery(Some("dev@example.com"));

        assert_eq!(msg.user_email, "dev@example.com");
    }

    #[test]
    fn test_sample_change_place_status_shape() {
        let msg = sample_change_place_status(Some("author@example.com"));

        assert!(!msg.author_first_name.is_empty());
        assert!(!msg.place_name.is_empty());
        assert_eq!(msg.author_email, "author@example.com");
    }

    #[test]
    fn test_sample_add_eco_news_default_id_in_demo_range() {
        for _ in 0..20 {
            let msg = sample_add_eco_news(None);
            assert!((1..=5).contains(&msg.id));
        }
    }

    #[test]
    fn test_sample_add_eco_news_respects_id_override() {
        let msg = sample_add_eco_news(Some(42));

        assert_eq!(msg.id, 42);
        assert!(!msg.title.is_empty());
        assert!(!msg.text.is_empty());
    }

    #[test]
    fn test_sample_verify_email_respects_email_override() {
        let msg = sample_verify_email(Some("verify@example.com"));

        assert_eq!(msg.email, "verify@example.com");
        assert!(!msg.token.is_empty());
    }

    #[test]
    fn test_sample_send_report_shape() {
        let msg = sample_send_report(Some("subscriber@example.com"));

        assert!(!msg.subscribers.is_empty());
        assert_eq!(msg.subscribers[0].email, "subscriber@example.com");
        assert!(!msg.categories_with_places.is_empty());
        for (category, places) in &msg.categories_with_places {
            assert!(!places.is_empty());
            for place in places {
                assert_eq!(&place.category, category);
            }
        }
    }
}
