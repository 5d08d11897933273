use chrono::{DateTime, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[must_use]
pub fn format_time_left(seconds: u32) -> String {
    format!("Time left: {seconds}s")
}
