//! 피드 타임스탬프 해석.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// 오프셋이 포함된 형식 (RFC 3339 이외).
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// 오프셋이 없는 형식. UTC로 해석합니다.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
];

/// 타임스탬프 문자열을 UTC 시각으로 해석합니다.
///
/// 지원 형식:
/// - RFC 3339 / 오프셋 포함 ISO-8601 (`2024-01-01T00:00:00+09:00`)
/// - 오프셋 없는 ISO-8601 (`T` 또는 공백 구분, 소수 초 허용), UTC로 간주
/// - 날짜만 (`2024-01-01`), 자정 UTC
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("empty timestamp".to_string());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(format!("unparsable timestamp '{}'", input))
}
