//! 时间工具函数
//!
//! 所有日期→时间戳转换统一在 API handler 层完成，
//! repository 层只接收 `i64` Unix millis。

use chrono::{NaiveDate, Utc};

use super::{AppError, AppResult};

/// 当前 Unix 时间戳 (毫秒)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 日期开始 (00:00:00 UTC) → Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc()
        .timestamp_millis()
}

/// 日期结束 → 次日 00:00:00 的 Unix millis
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day)
}

/// 解析日期区间 (startDate/endDate) → [start, end) Unix millis
pub fn parse_date_range(start_date: &str, end_date: &str) -> AppResult<(i64, i64)> {
    let start = parse_date(start_date)?;
    let end = parse_date(end_date)?;
    if end < start {
        return Err(AppError::validation(format!(
            "endDate {} is before startDate {}",
            end_date, start_date
        )));
    }
    Ok((day_start_millis(start), day_end_millis(end)))
}

/// 毫秒差 → 分钟 (小数)
pub fn millis_to_minutes(millis: i64) -> f64 {
    millis as f64 / 60_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_range_inclusive_end() {
        let (start, end) = parse_date_range("2026-01-01", "2026-01-01").unwrap();
        // Single-day range covers the full day
        assert_eq!(end - start, 24 * 60 * 60 * 1000);
    }

    #[test]
    fn test_parse_date_range_rejects_inverted() {
        assert!(parse_date_range("2026-01-02", "2026-01-01").is_err());
    }

    #[test]
    fn test_millis_to_minutes() {
        assert_eq!(millis_to_minutes(90_000), 1.5);
    }
}
