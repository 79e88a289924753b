use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn current_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn millis_to_utc(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_else(Utc::now)
}

/// UTC calendar date of an epoch-millisecond timestamp, as `YYYY-MM-DD`.
pub fn utc_date(ms: i64) -> String {
    millis_to_utc(ms).format(DATE_FORMAT).to_string()
}

pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|err| anyhow!(err))
}

pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    match value {
        Some(raw) => {
            if raw.trim().is_empty() {
                None
            } else {
                Some(raw)
            }
        }
        None => None,
    }
}
