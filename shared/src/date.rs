//! 时间类型模块
//!
//! `Timestamp` 是序列点上的时间戳。后端既会输出带时区的 RFC 3339，
//! 也会输出不带时区的 ISO 8601（按 UTC 处理），两者都在这里归一化。

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// UTC instant with lenient parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// 从毫秒时间戳创建
    pub fn from_millis(ms: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(ms).map(Self)
    }

    /// 解析 RFC 3339、无时区 ISO 8601 或纯日期
    ///
    /// 返回 None 如果解析失败
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(Self(naive.and_utc()));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
    }

    #[inline]
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Axis label, e.g. `Mar 04, 2025`
    pub fn day_label(&self) -> String {
        self.0.format("%b %d, %Y").to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offset_and_naive_forms_to_the_same_instant() {
        let with_offset = Timestamp::parse("2025-03-04T10:30:00+00:00").unwrap();
        let naive = Timestamp::parse("2025-03-04T10:30:00").unwrap();
        let spaced = Timestamp::parse("2025-03-04 10:30").unwrap();
        assert_eq!(with_offset, naive);
        assert_eq!(naive, spaced);
    }

    #[test]
    fn parses_fractional_seconds_and_plain_dates() {
        let ts = Timestamp::parse("2025-03-04T10:30:00.123456").unwrap();
        assert_eq!(ts.as_millis() % 1000, 123);

        let day = Timestamp::parse("2025-03-04").unwrap();
        assert_eq!(day.day_label(), "Mar 04, 2025");
    }

    #[test]
    fn rejects_garbage() {
        assert!(Timestamp::parse("yesterday").is_none());
        let err = serde_json::from_str::<Timestamp>("\"not a date\"");
        assert!(err.is_err());
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        let ts = Timestamp::parse("2025-03-04T12:00:00+02:00").unwrap();
        assert_eq!(ts, Timestamp::parse("2025-03-04T10:00:00Z").unwrap());
    }
}
