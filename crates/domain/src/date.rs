use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Calendar date in the given timezone at the given timestamp
pub fn date_at(timestamp_millis: i64, tz: &Tz) -> NaiveDate {
    let utc = Utc
        .timestamp_millis_opt(timestamp_millis)
        .single()
        .unwrap_or_else(Utc::now);
    utc.with_timezone(tz).date_naive()
}

/// Whole calendar days from `from` until `to`, negative if `to` is in the past
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Human readable lead time, e.g. "today", "in 1 day", "in 5 days"
pub fn describe_days_remaining(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "in 1 day".to_string(),
        n => format!("in {} days", n),
    }
}
