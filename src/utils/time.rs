//! 时间戳工具
//!
//! 数据库与 API 中的时间统一为毫秒精度的 RFC 3339 UTC 字符串，
//! 例如 `2024-01-15T00:00:00.000Z`。固定宽度保证字符串顺序等于时间顺序。

use chrono::{DateTime, SecondsFormat, Utc};

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_with_millis_and_z_suffix() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
        assert_eq!(format_timestamp(at), "2024-01-15T08:30:00.000Z");
    }
}
