//! 邮件消息契约模块
//!
//! 定义平台侧与邮件服务之间通过 Kafka 传递的全部消息载荷。
//! 平台各业务模块（用户、地点、生态新闻、报表）作为生产者写入各自队列，
//! 邮件服务作为唯一消费者读取并转发给外部邮件发送方。
//! 字段名以 camelCase 序列化，与平台其余服务的 JSON 约定保持一致。

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 生态新闻标题的默认语言代码
///
/// 新闻以多语言维护，转发给订阅者时统一取该语言的标题。
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

// ---------------------------------------------------------------------------
// PlaceStatus — 地点审核状态
// ---------------------------------------------------------------------------

/// 地点审核状态
///
/// 状态变更时平台会通知地点作者，邮件内容按状态区分措辞。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaceStatus {
    Proposed,
    Declined,
    Approved,
    Deleted,
}

impl std::fmt::Display for PlaceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 与 serde 的 SCREAMING_SNAKE_CASE 保持一致，便于在日志中统一引用
        let s = match self {
            Self::Proposed => "PROPOSED",
            Self::Declined => "DECLINED",
            Self::Approved => "APPROVED",
            Self::Deleted => "DELETED",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// EmailNotification — 报表推送频率
// ---------------------------------------------------------------------------

/// 订阅者选择的报表推送频率
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmailNotification {
    Disabled,
    Immediately,
    Daily,
    Weekly,
    Monthly,
}

impl std::fmt::Display for EmailNotification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Disabled => "DISABLED",
            Self::Immediately => "IMMEDIATELY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// PasswordRecoveryMessage — 密码找回
// ---------------------------------------------------------------------------

/// 密码找回消息
///
/// 用户发起找回密码后，平台生成一次性 `recovery_token` 并投递此消息，
/// 邮件服务据此向用户发送携带令牌链接的找回邮件。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRecoveryMessage {
    pub user_id: i64,
    pub user_first_name: String,
    pub user_email: String,
    pub recovery_token: String,
}

// ---------------------------------------------------------------------------
// ChangePlaceStatusMessage — 地点状态变更
// ---------------------------------------------------------------------------

/// 地点状态变更消息
///
/// 地点审核状态变化后通知作者。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePlaceStatusMessage {
    pub author_first_name: String,
    pub place_name: String,
    pub place_status: PlaceStatus,
    pub author_email: String,
}

// ---------------------------------------------------------------------------
// AddEcoNewsMessage — 新增生态新闻
// ---------------------------------------------------------------------------

/// 新增生态新闻消息
///
/// 新闻发布后投递此消息，邮件服务为其补齐默认语言标题后
/// 推送给全部新闻订阅者。`title` 为发布时的原始标题，
/// 转发前会被默认语言的翻译标题替换。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEcoNewsMessage {
    pub id: i64,
    pub title: String,
    pub image_path: Option<String>,
    pub text: String,
    pub creation_date: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// VerifyEmailMessage — 邮箱验证
// ---------------------------------------------------------------------------

/// 邮箱验证消息
///
/// 用户注册后平台生成验证令牌并投递此消息，
/// 邮件服务向用户发送携带令牌链接的验证邮件。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub token: String,
}

// ---------------------------------------------------------------------------
// SendReportMessage — 新增地点报表
// ---------------------------------------------------------------------------

/// 报表收件人
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceAuthor {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// 报表中的单个地点条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceNotification {
    pub name: String,
    pub category: String,
}

/// 新增地点报表消息
///
/// 平台按订阅者选择的频率汇总新增地点，按分类分组后投递此消息，
/// 邮件服务将报表发送给全部订阅者。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReportMessage {
    pub subscribers: Vec<PlaceAuthor>,
    /// 分类名 -> 该分类下新增的地点列表
    pub categories_with_places: HashMap<String, Vec<PlaceNotification>>,
    pub email_notification: EmailNotification,
}

// ---------------------------------------------------------------------------
// 单元测试
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_recovery_message_serialization() {
        let message = PasswordRecoveryMessage {
            user_id: 1,
            user_first_name: "Ana".to_string(),
            user_email: "ana@example.com".to_string(),
            recovery_token: "recovery-token-001".to_string(),
        };

        let json = serde_json::to_string(&message).unwrap();

        // 验证 camelCase 序列化格式
        assert!(json.contains("userId"));
        assert!(json.contains("userFirstName"));
        assert!(json.contains("userEmail"));
        assert!(json.contains("recoveryToken"));

        // 验证反序列化能还原
        let deserialized: PasswordRecoveryMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, message);
    }

    #[test]
    fn test_change_place_status_message_serialization() {
        let message = ChangePlaceStatusMessage {
            author_first_name: "Taras".to_string(),
            place_name: "Green Cafe".to_string(),
            place_status: PlaceStatus::Approved,
            author_email: "taras@example.com".to_string(),
        };

        let json = serde_json::to_string(&message).unwrap();

        assert!(json.contains("authorFirstName"));
        assert!(json.contains("placeName"));
        assert!(json.contains("placeStatus"));
        assert!(json.contains("APPROVED"));

        let deserialized: ChangePlaceStatusMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.place_status, PlaceStatus::Approved);
        assert_eq!(deserialized, message);
    }

    #[test]
    fn test_add_eco_news_message_serialization() {
        let message = AddEcoNewsMessage {
            id: 7,
            title: "Draft".to_string(),
            image_path: None,
            text: "City parks are getting greener.".to_string(),
            creation_date: DateTime::parse_from_rfc3339("2025-08-01T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };

        let json = serde_json::to_string(&message).unwrap();

        assert!(json.contains("imagePath"));
        assert!(json.contains("creationDate"));

        let deserialized: AddEcoNewsMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.id, 7);
        assert_eq!(deserialized.image_path, None);
        assert_eq!(deserialized, message);
    }

    #[test]
    fn test_verify_email_message_serialization() {
        let message = VerifyEmailMessage {
            id: 42,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            token: "verify-token-042".to_string(),
        };

        let json = serde_json::to_string(&message).unwrap();
        let deserialized: VerifyEmailMessage = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.id, 42);
        assert_eq!(deserialized.name, "Ana");
        assert_eq!(deserialized, message);
    }

    #[test]
    fn test_send_report_message_serialization() {
        let mut categories = HashMap::new();
        categories.insert(
            "Food".to_string(),
            vec![PlaceNotification {
                name: "Green Cafe".to_string(),
                category: "Food".to_string(),
            }],
        );

        let message = SendReportMessage {
            subscribers: vec![PlaceAuthor {
                id: 1,
                name: "Olya".to_string(),
                email: "olya@example.com".to_string(),
            }],
            categories_with_places: categories,
            email_notification: EmailNotification::Daily,
        };

        let json = serde_json::to_string(&message).unwrap();

        assert!(json.contains("subscribers"));
        assert!(json.contains("categoriesWithPlaces"));
        assert!(json.contains("emailNotification"));
        assert!(json.contains("DAILY"));

        let deserialized: SendReportMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.subscribers.len(), 1);
        assert_eq!(deserialized.email_notification, EmailNotification::Daily);
        assert_eq!(
            deserialized.categories_with_places["Food"][0].name,
            "Green Cafe"
        );
    }

    #[test]
    fn test_place_status_display() {
        assert_eq!(PlaceStatus::Proposed.to_string(), "PROPOSED");
        assert_eq!(PlaceStatus::Declined.to_string(), "DECLINED");
        assert_eq!(PlaceStatus::Approved.to_string(), "APPROVED");
        assert_eq!(PlaceStatus::Deleted.to_string(), "DELETED");
    }

    #[test]
    fn test_email_notification_display() {
        assert_eq!(EmailNotification::Disabled.to_string(), "DISABLED");
        assert_eq!(EmailNotification::Immediately.to_string(), "IMMEDIATELY");
        assert_eq!(EmailNotification::Daily.to_string(), "DAILY");
        assert_eq!(EmailNotification::Weekly.to_string(), "WEEKLY");
        assert_eq!(EmailNotification::Monthly.to_string(), "MONTHLY");
    }
}
