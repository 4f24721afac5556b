//! 交易信号数据模型
//!
//! 库中文档是半结构化的 BSON，这里定义读取时的投影：
//! 所有字段均可缺失，未知字段直接忽略，缺失字段输出为 null。

use mongodb::bson::{self, Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 信号状态缺省值
pub const DEFAULT_STATUS: &str = "PENDING";

fn default_status() -> Bson {
    Bson::String(DEFAULT_STATUS.to_string())
}

/// 库中的单条买入信号（嵌套在每日文档的 buy_signals 中）
#[derive(Debug, Clone, Deserialize)]
pub struct StoredSignal {
    #[serde(default)]
    pub symbol: Option<Bson>,
    #[serde(default)]
    pub open: Option<Bson>,
    #[serde(default)]
    pub entry: Option<Bson>,
    #[serde(default)]
    pub target: Option<Bson>,
    #[serde(default)]
    pub stoploss: Option<Bson>,
    #[serde(default)]
    pub qty: Option<Bson>,
    #[serde(default)]
    pub entry_time: Option<Bson>,
    #[serde(default)]
    pub exit_time: Option<Bson>,
    #[serde(default)]
    pub hit: Option<Bson>,
    #[serde(default)]
    pub pnl: Option<Bson>,
    /// 键缺失时为 "PENDING"；显式存了 null 则保留 null
    #[serde(default = "default_status")]
    pub status: Bson,
}

/// 每日信号文档，trade_date 唯一
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoredSignalDocument {
    #[serde(rename = "_id", default)]
    pub id: Option<Bson>,
    #[serde(default)]
    pub trade_date: Option<Bson>,
    #[serde(default)]
    pub capital: Option<Bson>,
    #[serde(default)]
    pub margin: Option<Bson>,
    #[serde(default)]
    pub created_at: Option<Bson>,
    /// null 与缺失都视为空列表
    #[serde(default)]
    pub buy_signals: Option<Vec<StoredSignal>>,
}

impl StoredSignalDocument {
    /// 从原始 BSON 文档解析
    pub fn from_document(doc: Document) -> anyhow::Result<Self> {
        Ok(bson::from_document(doc)?)
    }

    /// 存储层主键的字符串形式
    pub fn id_string(&self) -> String {
        match &self.id {
            Some(Bson::ObjectId(oid)) => oid.to_hex(),
            Some(Bson::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

/// 对外输出的信号记录，11 个键始终存在
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub symbol: Value,
    pub open: Value,
    pub entry: Value,
    pub target: Value,
    pub stoploss: Value,
    pub qty: Value,
    pub entry_time: Value,
    pub exit_time: Value,
    pub hit: Value,
    pub pnl: Value,
    pub status: Value,
}

impl From<StoredSignal> for SignalRecord {
    fn from(s: StoredSignal) -> Self {
        Self {
            symbol: optional_to_json(s.symbol),
            open: optional_to_json(s.open),
            entry: optional_to_json(s.entry),
            target: optional_to_json(s.target),
            stoploss: optional_to_json(s.stoploss),
            qty: optional_to_json(s.qty),
            entry_time: optional_to_json(s.entry_time),
            exit_time: optional_to_json(s.exit_time),
            hit: optional_to_json(s.hit),
            pnl: optional_to_json(s.pnl),
            status: bson_to_json(s.status),
        }
    }
}

/// 缺失字段输出 null
pub fn optional_to_json(value: Option<Bson>) -> Value {
    value.map(bson_to_json).unwrap_or(Value::Null)
}

/// BSON 值转 JSON，保留原始类型
///
/// 数值仍为数值，字符串仍为字符串；时间输出 RFC 3339，ObjectId 输出十六进制串。
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        // NaN / Inf 在 JSON 中无法表示，输出 null
        Bson::Double(f) => Value::from(f),
        Bson::String(s) => Value::String(s),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => Value::Object(
            doc.into_iter()
                .map(|(k, v)| (k, bson_to_json(v)))
                .collect(),
        ),
        other => other.into_relaxed_extjson(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId, DateTime};
    use serde_json::json;

    #[test]
    fn test_missing_fields_become_null() {
        let doc = doc! {
            "trade_date": "2024-01-02",
            "buy_signals": [ { "symbol": "TCS", "entry": 3500, "qty": 10 } ],
        };
        let stored = StoredSignalDocument::from_document(doc).unwrap();
        let signals = stored.buy_signals.unwrap();
        let record = SignalRecord::from(signals[0].clone());

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "symbol": "TCS", "open": null, "entry": 3500, "target": null,
                "stoploss": null, "qty": 10, "entry_time": null, "exit_time": null,
                "hit": null, "pnl": null, "status": "PENDING"
            })
        );
    }

    #[test]
    fn test_status_passthrough() {
        let signal: StoredSignal = bson::from_document(doc! { "status": "FILLED" }).unwrap();
        assert_eq!(SignalRecord::from(signal).status, json!("FILLED"));
    }

    #[test]
    fn test_explicit_null_status_stays_null() {
        let signal: StoredSignal = bson::from_document(doc! { "status": Bson::Null }).unwrap();
        assert_eq!(SignalRecord::from(signal).status, Value::Null);
    }

    #[test]
    fn test_types_preserved() {
        let signal: StoredSignal = bson::from_document(doc! {
            "symbol": "INFY",
            "open": 1500.5,
            "qty": 7_i64,
            "hit": true,
            "pnl": (-12.25),
            "entry_time": "09:20",
            "unexpected": "ignored",
        })
        .unwrap();
        let record = SignalRecord::from(signal);

        assert_eq!(record.open, json!(1500.5));
        assert_eq!(record.qty, json!(7));
        assert_eq!(record.hit, json!(true));
        assert_eq!(record.pnl, json!(-12.25));
        assert_eq!(record.entry_time, json!("09:20"));
    }

    #[test]
    fn test_datetime_and_oid_rendering() {
        let dt = DateTime::from_millis(1_704_163_500_000); // 2024-01-02T02:45:00Z
        assert_eq!(bson_to_json(Bson::DateTime(dt)), json!("2024-01-02T02:45:00Z"));

        let oid = ObjectId::parse_str("65934b7c1f0c2a3d4e5f6789").unwrap();
        assert_eq!(bson_to_json(Bson::ObjectId(oid)), json!("65934b7c1f0c2a3d4e5f6789"));
        assert_eq!(bson_to_json(Bson::Double(f64::NAN)), Value::Null);
    }

    #[test]
    fn test_native_datetimes_through_document() {
        let created = DateTime::from_millis(1_704_163_500_000); // 2024-01-02T02:45:00Z
        let entered = DateTime::from_millis(1_704_167_100_000); // 2024-01-02T03:45:00Z
        let stored = StoredSignalDocument::from_document(doc! {
            "trade_date": "2024-01-02",
            "created_at": created,
            "buy_signals": [ { "symbol": "TCS", "entry_time": entered, "exit_time": "15:10" } ],
        })
        .unwrap();

        assert_eq!(optional_to_json(stored.created_at.clone()), json!("2024-01-02T02:45:00Z"));

        let record = SignalRecord::from(stored.buy_signals.unwrap()[0].clone());
        assert_eq!(record.entry_time, json!("2024-01-02T03:45:00Z"));
        assert_eq!(record.exit_time, json!("15:10"));
    }

    #[test]
    fn test_id_string() {
        let oid = ObjectId::parse_str("65934b7c1f0c2a3d4e5f6789").unwrap();
        let stored = StoredSignalDocument::from_document(doc! { "_id": oid }).unwrap();
        assert_eq!(stored.id_string(), "65934b7c1f0c2a3d4e5f6789");

        let stored = StoredSignalDocument::from_document(doc! { "_id": "day-1" }).unwrap();
        assert_eq!(stored.id_string(), "day-1");

        assert_eq!(StoredSignalDocument::default().id_string(), "");
    }

    #[test]
    fn test_null_buy_signals() {
        let stored =
            StoredSignalDocument::from_document(doc! { "buy_signals": Bson::Null }).unwrap();
        assert!(stored.buy_signals.unwrap_or_default().is_empty());
    }
}
