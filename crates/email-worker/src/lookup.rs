//! 生态新闻路径的查找协作方
//!
//! 新闻主数据、标题翻译和订阅者名单都归平台其他服务所有，
//! 本服务只在转发前做同步查找。通过 trait 抽象查找行为，
//! 生产部署时替换为真实数据服务的客户端，测试与本地运行
//! 使用内存实现。

use std::collections::HashMap;

use async_trait::async_trait;
use greencity_shared::error::Result;
use tokio::sync::RwLock;

// ---------------------------------------------------------------------------
// 查找结果类型
// ---------------------------------------------------------------------------

/// 生态新闻主记录
///
/// 查找服务只返回补齐流程所需的最小字段。记录存在与否
/// 决定整条消息的成败：新闻不存在时处理必须中止。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcoNewsRecord {
    pub id: i64,
}

/// 新闻订阅者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsSubscriber {
    pub email: String,
    /// 退订链接中携带的令牌，由订阅者服务生成
    pub unsubscribe_token: String,
}

// ---------------------------------------------------------------------------
// 查找接口
// ---------------------------------------------------------------------------

/// 生态新闻主数据查找
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EcoNewsRepository: Send + Sync {
    /// 按 ID 查找新闻，不存在时返回 `None`
    async fn find_by_id(&self, id: i64) -> Result<Option<EcoNewsRecord>>;
}

/// 新闻标题翻译查找
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EcoNewsTranslationRepository: Send + Sync {
    /// 查找指定新闻在指定语言下的标题
    async fn find_title_by_news_and_language(
        &self,
        news: &EcoNewsRecord,
        language: &str,
    ) -> Result<Option<String>>;
}

/// 新闻订阅者名单查找
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriberDirectory: Send + Sync {
    /// 返回全部订阅者
    async fn find_all(&self) -> Result<Vec<NewsSubscriber>>;
}

// ---------------------------------------------------------------------------
// 内存实现
// ---------------------------------------------------------------------------

/// 内存版新闻主数据
#[derive(Debug, Default)]
pub struct InMemoryEcoNewsRepository {
    records: RwLock<HashMap<i64, EcoNewsRecord>>,
}

impl InMemoryEcoNewsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置本地演示数据，ID 与 mock-platform 生成的消息范围对应
    pub async fn with_demo_data() -> Self {
        let repo = Self::new();
        for id in 1..=5 {
            repo.insert(EcoNewsRecord { id }).await;
        }
        repo
    }

    pub async fn insert(&self, record: EcoNewsRecord) {
        let mut records = self.records.write().await;
        records.insert(record.id, record);
    }
}

#[async_trait]
impl EcoNewsRepository for InMemoryEcoNewsRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<EcoNewsRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }
}

/// 内存版标题翻译，按（新闻 ID，语言）检索
#[derive(Debug, Default)]
pub struct InMemoryTranslationRepository {
    titles: RwLock<HashMap<(i64, String), String>>,
}

impl InMemoryTranslationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置与 [`InMemoryEcoNewsRepository::with_demo_data`] 对应的英文标题
    pub async fn with_demo_data() -> Self {
        let repo = Self::new();
        let titles = [
            (1, "Community gardens expand across the city"),
            (2, "New recycling points open downtown"),
            (3, "River cleanup volunteers wanted"),
            (4, "Solar panels arrive at city schools"),
            (5, "Bike lane network doubles this year"),
        ];
        for (id, title) in titles {
            repo.insert(id, "en", title).await;
        }
        repo
    }

    pub async fn insert(&self, news_id: i64, language: impl Into<String>, title: impl Into<String>) {
        let mut titles = self.titles.write().await;
        titles.insert((news_id, language.into()), title.into());
    }
}

#[async_trait]
impl EcoNewsTranslationRepository for InMemoryTranslationRepository {
    async fn find_title_by_news_and_language(
        &self,
        news: &EcoNewsRecord,
        language: &str,
    ) -> Result<Option<String>> {
        let titles = self.titles.read().await;
        Ok(titles.get(&(news.id, language.to_string())).cloned())
    }
}

/// 内存版订阅者名单
#[derive(Debug, Default)]
pub struct InMemorySubscriberDirectory {
    subscribers: RwLock<Vec<NewsSubscriber>>,
}

impl InMemorySubscriberDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置两名本地演示订阅者
    pub async fn with_demo_data() -> Self {
        let directory = Self::new();
        directory
            .add(NewsSubscriber {
                email: "reader-one@example.com".to_string(),
                unsubscribe_token: "unsub-token-001".to_string(),
            })
            .await;
        directory
            .add(NewsSubscriber {
                email: "reader-two@example.com".to_string(),
                unsubscribe_token: "unsub-token-002".to_string(),
            })
            .await;
        directory
    }

    pub async fn add(&self, subscriber: NewsSubscriber) {
        let mut subscribers = self.subscribers.write().await;
        subscribers.push(subscriber);
    }
}

#[async_trait]
impl SubscriberDirectory for InMemorySubscriberDirectory {
    async fn find_all(&self) -> Result<Vec<NewsSubscriber>> {
        let subscribers = self.subscribers.read().await;
        Ok(subscribers.clone())
    }
}

// ---------------------------------------------------------------------------
// 测试
// ---------------------------------------------------------------------------
