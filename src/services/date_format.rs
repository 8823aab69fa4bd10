//! 印尼语日期格式化
//!
//! 输出格式为 `"<日> <月份名> <年>"`，例如 `5 Maret 2024`。

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Utc};

const NAMA_BULAN: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// 毫秒时间戳的最少位数（早于 2001-09 的时间戳不会出现在数据中）
const MIN_TIMESTAMP_DIGITS: usize = 10;

/// 格式化一个已解析的日期
pub fn format_naive_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        NAMA_BULAN[date.month0() as usize],
        date.year()
    )
}

/// 格式化数据库中的日期字符串
///
/// 支持 `YYYY-MM-DD`、RFC 3339 时间戳、不带时区的 ISO 时间以及毫秒时间戳。
/// 毫秒时间戳按本地时区取日期，与打印日期一致。
/// 无法解析的输入原样返回。
pub fn format_date_id(input: &str) -> String {
    match parse_date(input.trim()) {
        Some(date) => format_naive_date(date),
        None => input.to_string(),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    if s.len() >= MIN_TIMESTAMP_DIGITS && s.bytes().all(|b| b.is_ascii_digit()) {
        let millis: i64 = s.parse().ok()?;
        return DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|dt| dt.with_timezone(&Local).date_naive());
    }

    None
}
