use anyhow::Result;

use crate::models::{SignalsEnvelope, StoredSignalDocument};
use crate::services::store::SignalStore;

/// 按日期查询信号并组装返回体
///
/// 只查一次库；未找到是正常结果，库访问失败则向上返回错误
pub async fn lookup(store: &dyn SignalStore, date: &str) -> Result<SignalsEnvelope> {
    log::debug!("查询信号: trade_date={}", date);

    let envelope = match store.find_by_trade_date(date).await? {
        None => SignalsEnvelope::not_found(date),
        Some(doc) => {
            let doc = StoredSignalDocument::from_document(doc)?;
            SignalsEnvelope::found(date, doc)
        }
    };

    log::info!(
        "信号查询完成: trade_date={}, found={}, count={}",
        date,
        envelope.is_found(),
        envelope.count()
    );
    Ok(envelope)
}
