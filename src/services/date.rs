//! 交易日期解析
//!
//! 未传 date 时取印度标准时间（UTC+5:30，固定偏移，无夏令时）的当天日期。

use chrono::{DateTime, Duration, Utc};

/// IST 相对 UTC 的偏移（秒）
pub const IST_OFFSET_SECS: i64 = 5 * 3600 + 30 * 60;

/// 计算给定 UTC 时刻对应的 IST 日历日期（YYYY-MM-DD）
pub fn ist_date_of(utc: DateTime<Utc>) -> String {
    (utc.naive_utc() + Duration::seconds(IST_OFFSET_SECS))
        .format("%Y-%m-%d")
        .to_string()
}

/// 获取 IST 当天日期
pub fn today_ist() -> String {
    ist_date_of(Utc::now())
}

/// 解析查询日期
///
/// 传入非空字符串时原样作为查询键，不做格式校验；否则取 IST 当天。
pub fn resolve_trade_date(raw: Option<&str>) -> String {
    match raw {
        Some(date) if !date.is_empty() => date.to_string(),
        _ => today_ist(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_passthrough_unvalidated() {
        assert_eq!(resolve_trade_date(Some("2024-01-02")), "2024-01-02");
        assert_eq!(resolve_trade_date(Some("not-a-date")), "not-a-date");
    }

    #[test]
    fn test_empty_and_missing_use_today() {
        let today = today_ist();
        assert_eq!(today.len(), 10);
        assert_eq!(resolve_trade_date(None), today_ist());
        assert_eq!(resolve_trade_date(Some("")), today_ist());
    }

    #[test]
    fn test_ist_day_boundary() {
        // 18:29:59 UTC 仍是当天，18:30 UTC 进入 IST 次日
        let before = Utc.with_ymd_and_hms(2024, 1, 1, 18, 29, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 1, 1, 18, 30, 0).unwrap();
        assert_eq!(ist_date_of(before), "2024-01-01");
        assert_eq!(ist_date_of(after), "2024-01-02");
    }

    #[test]
    fn test_year_rollover() {
        let utc = Utc.with_ymd_and_hms(2024, 12, 31, 20, 0, 0).unwrap();
        assert_eq!(ist_date_of(utc), "2025-01-01");
    }
}
