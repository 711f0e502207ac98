//! 邮件分发服务错误类型
//!
//! 定义消息路由与生态新闻补齐过程中的错误分类，
//! 便于上层区分业务失败与基础设施失败。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// 消息引用的生态新闻在查找服务中不存在
    #[error("生态新闻未找到: id={id}")]
    EcoNewsNotFound { id: i64 },

    /// 新闻存在但缺少目标语言的标题翻译
    #[error("新闻标题翻译未找到: news_id={news_id}, language={language}")]
    TranslationNotFound { news_id: i64, language: String },

    /// 消息来自未绑定处理逻辑的队列
    #[error("未知队列: {queue}")]
    UnknownQueue { queue: String },

    #[error(transparent)]
    Shared(#[from] greencity_shared::error::GreenCityError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use greencity_shared::error::GreenCityError;

    #[test]
    fn test_error_display() {
        let not_found = DispatchError::EcoNewsNotFound { id: 7 };
        assert_eq!(not_found.to_string(), "生态新闻未找到: id=7");

        let translation = DispatchError::TranslationNotFound {
            news_id: 7,
            language: "en".to_string(),
        };
        assert_eq!(
            translation.to_string(),
            "新闻标题翻译未找到: news_id=7, language=en"
        );

        let unknown = DispatchError::UnknownQueue {
            queue: "mystery-queue".to_string(),
        };
        assert_eq!(unknown.to_string(), "未知队列: mystery-queue");
    }

    #[test]
    fn test_shared_error_is_transparent() {
        let shared = GreenCityError::Serialization("负载反序列化失败: EOF".to_string());
        let err: DispatchError = shared.into();
        assert_eq!(err.to_string(), "消息序列化失败: 负载反序列化失败: EOF");
    }
}
