//! 信号接口处理器
//!
//! - GET /api/signals?date=YYYY-MM-DD - 获取指定交易日的买入信号（缺省为 IST 当天）

use actix_web::{web, HttpResponse, Result};

use crate::handlers::AppState;
use crate::models::ErrorBody;
use crate::services::{date, signal_service};

/// 取第一个 date 参数；重复出现时忽略后面的值
fn first_date(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "date")
        .map(|(_, value)| value.as_str())
}

pub async fn get_signals(
    state: web::Data<AppState>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse> {
    let requested_date = date::resolve_trade_date(first_date(&query));

    match signal_service::lookup(state.store.as_ref(), &requested_date).await {
        Ok(envelope) => Ok(HttpResponse::Ok().json(envelope)),
        Err(e) => {
            log::error!("查询信号失败 trade_date={}: {:#}", requested_date, e);
            Ok(HttpResponse::InternalServerError().json(ErrorBody {
                error: e.to_string(),
            }))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/signals", web::get().to(get_signals))
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_first_date_wins() {
        let query = pairs(&[("x", "1"), ("date", "2024-01-02"), ("date", "2024-01-03")]);
        assert_eq!(first_date(&query), Some("2024-01-02"));
        assert_eq!(first_date(&pairs(&[("other", "v")])), None);
    }
}
