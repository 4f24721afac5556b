//! 信号文档存储
//!
//! `SignalStore` 是查询层与 MongoDB 之间的接缝：
//! 生产环境使用 `MongoSignalStore`，测试和本地演示使用 `MemorySignalStore`。

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use std::collections::HashMap;
use std::time::Duration;

use crate::config::MongoConfig;

/// 按交易日期查询信号文档
#[async_trait]
pub trait SignalStore: Send + Sync {
    /// 查找 trade_date 等于 `date` 的文档，不存在返回 None
    async fn find_by_trade_date(&self, date: &str) -> Result<Option<Document>>;
}

/// MongoDB 实现
///
/// 启动时创建一次，所有请求共享（驱动内部自带连接池）
pub struct MongoSignalStore {
    collection: Collection<Document>,
    query_timeout: Duration,
}

impl MongoSignalStore {
    /// 根据配置创建客户端
    ///
    /// 驱动是惰性连接的，这里不会真正访问数据库
    pub async fn connect(config: &MongoConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .context("解析 MONGO_URI 失败")?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
        options.server_selection_timeout = Some(Duration::from_secs(config.query_timeout_secs));

        let client = Client::with_options(options).context("创建 MongoDB 客户端失败")?;
        let collection = client
            .database(&config.database)
            .collection::<Document>(&config.collection);

        log::info!(
            "MongoDB 客户端已创建: {}.{}",
            config.database,
            config.collection
        );

        Ok(Self {
            collection,
            query_timeout: Duration::from_secs(config.query_timeout_secs),
        })
    }
}

#[async_trait]
impl SignalStore for MongoSignalStore {
    async fn find_by_trade_date(&self, date: &str) -> Result<Option<Document>> {
        let filter = doc! { "trade_date": date };

        let doc = tokio::time::timeout(self.query_timeout, self.collection.find_one(filter, None))
            .await
            .map_err(|_| anyhow!("查询超时（{} 秒）: trade_date={}", self.query_timeout.as_secs(), date))?
            .with_context(|| format!("查询失败: trade_date={}", date))?;

        Ok(doc)
    }
}

/// 内存实现，按 trade_date 建索引
#[derive(Debug, Default, Clone)]
pub struct MemorySignalStore {
    documents: HashMap<String, Document>,
}

impl MemorySignalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入一份文档；trade_date 相同的后者覆盖前者，缺少 trade_date 的文档不可查
    pub fn with_document(mut self, doc: Document) -> Self {
        match doc.get_str("trade_date") {
            Ok(date) => {
                self.documents.insert(date.to_string(), doc);
            }
            Err(_) => log::warn!("文档缺少字符串类型的 trade_date，已忽略"),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl SignalStore for MemorySignalStore {
    async fn find_by_trade_date(&self, date: &str) -> Result<Option<Document>> {
        Ok(self.documents.get(date).cloned())
    }
}
