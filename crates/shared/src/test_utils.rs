//! 测试工具模块
//!
//! 提供各队列消息的测试数据构造器，供单元测试与集成测试复用。
//! 字段值固定，便于在断言中直接引用。

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::messages::{
    AddEcoNewsMessage, ChangePlaceStatusMessage, EmailNotification, PasswordRecoveryMessage,
    PlaceAuthor, PlaceNotification, PlaceStatus, SendReportMessage, VerifyEmailMessage,
};

// ==================== 时间辅助 ====================

/// 固定的新闻创建时间，保证测试断言可重复
pub fn test_creation_date() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-08-01T10:30:00Z")
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

// ==================== 消息构造器 ====================

/// 密码找回消息样例
pub fn test_password_recovery_message() -> PasswordRecoveryMessage {
    PasswordRecoveryMessage {
        user_id: 1,
        user_first_name: "Ana".to_string(),
        user_email: "ana@example.com".to_string(),
        recovery_token: "recovery-token-001".to_string(),
    }
}

/// 地点状态变更消息样例
pub fn test_change_place_status_message() -> ChangePlaceStatusMessage {
    ChangePlaceStatusMessage {
        author_first_name: "Taras".to_string(),
        place_name: "Green Cafe".to_string(),
        place_status: PlaceStatus::Approved,
        author_email: "taras@example.com".to_string(),
    }
}

/// 新增生态新闻消息样例
///
/// `id` 由调用方指定，便于与新闻查找服务的预置数据对应
pub fn test_add_eco_news_message(id: i64) -> AddEcoNewsMessage {
    AddEcoNewsMessage {
        id,
        title: "Draft".to_string(),
        image_path: None,
        text: "City parks are getting greener.".to_string(),
        creation_date: test_creation_date(),
    }
}

/// 邮箱验证消息样例
pub fn test_verify_email_message() -> VerifyEmailMessage {
    VerifyEmailMessage {
        id: 42,
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        token: "verify-token-042".to_string(),
    }
}

/// 新增地点报表消息样例
pub fn test_send_report_message() -> SendReportMessage {
    let mut categories = HashMap::new();
    categories.insert(
        "Food".to_string(),
        vec![PlaceNotification {
            name: "Green Cafe".to_string(),
            category: "Food".to_string(),
        }],
    );

    SendReportMessage {
        subscribers: vec![PlaceAuthor {
            id: 1,
            name: "Olya".to_string(),
            email: "olya@example.com".to_string(),
        }],
        categories_with_places: categories,
        email_notification: EmailNotification::Daily,
    }
}
