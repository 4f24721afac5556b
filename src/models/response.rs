//! API 响应模型
//!
//! /api/signals 的返回体有两种固定形状：找到 / 未找到。
//! 两种情况都返回 HTTP 200。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::signal::{optional_to_json, SignalRecord, StoredSignalDocument};

/// 健康检查返回信息
pub const HEALTH_MESSAGE: &str = "MongoDB Signals API running 🚀";

/// 未找到文档时的返回体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotFoundEnvelope {
    pub requested_date: String,
    pub found: bool,
    pub count: usize,
    pub data: Vec<SignalRecord>,
}

/// 找到文档时的返回体
///
/// 文档级字段（capital、margin、created_at）原样透传，缺失为 null
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundEnvelope {
    #[serde(rename = "_id")]
    pub id: String,
    pub trade_date: Value,
    pub capital: Value,
    pub margin: Value,
    pub created_at: Value,
    pub requested_date: String,
    pub found: bool,
    pub count: usize,
    pub data: Vec<SignalRecord>,
}

/// 信号接口返回体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalsEnvelope {
    Found(FoundEnvelope),
    NotFound(NotFoundEnvelope),
}

impl SignalsEnvelope {
    /// 构造未找到返回体
    pub fn not_found(requested_date: impl Into<String>) -> Self {
        Self::NotFound(NotFoundEnvelope {
            requested_date: requested_date.into(),
            found: false,
            count: 0,
            data: Vec::new(),
        })
    }

    /// 由库中文档构造找到返回体，buy_signals 逐条投影，不做过滤
    pub fn found(requested_date: impl Into<String>, doc: StoredSignalDocument) -> Self {
        let id = doc.id_string();
        let data: Vec<SignalRecord> = doc
            .buy_signals
            .unwrap_or_default()
            .into_iter()
            .map(SignalRecord::from)
            .collect();

        Self::Found(FoundEnvelope {
            id,
            trade_date: optional_to_json(doc.trade_date),
            capital: optional_to_json(doc.capital),
            margin: optional_to_json(doc.margin),
            created_at: optional_to_json(doc.created_at),
            requested_date: requested_date.into(),
            found: true,
            count: data.len(),
            data,
        })
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn requested_date(&self) -> &str {
        match self {
            Self::Found(e) => &e.requested_date,
            Self::NotFound(e) => &e.requested_date,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Self::Found(e) => e.count,
            Self::NotFound(e) => e.count,
        }
    }
}

/// 健康检查返回体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: HEALTH_MESSAGE.to_string(),
        }
    }
}

/// 服务端错误返回体
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
