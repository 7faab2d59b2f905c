use crate::error::{validation_error, EngineResult};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Parse time string in HH:MM format
pub fn parse_time(time_str: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hour = parts[0].parse::<u32>().ok()?;
    let minute = parts[1].parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Build a `NaiveTime` from an hour/minute pair
pub fn time_of_day(hour: u32, minute: u32) -> EngineResult<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| validation_error(&format!("Invalid time of day {:02}:{:02}", hour, minute)))
}

/// Parse a calendar date in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|e| validation_error(&format!("Failed to parse date '{}': {}", date_str, e)))
}

/// Parse a local timestamp, with or without seconds
pub fn parse_datetime(value: &str) -> EngineResult<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|e| validation_error(&format!("Failed to parse datetime '{}': {}", value, e)))
}

/// Midnight at the start of the given day
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Midnight at the start of the following day
pub fn end_of_day(date: NaiveDate) -> EngineResult<NaiveDateTime> {
    start_of_day(date)
        .checked_add_signed(Duration::days(1))
        .ok_or_else(|| validation_error(&format!("Day {} has no following day", date)))
}

/// Today's date as seen from the given timezone
pub fn today_in<Tz: TimeZone>(tz: &Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(tz).date_naive()
}

/// Serde format for times rendered as `HH:MM`
pub mod hh_mm {
    use super::{parse_time, time_of_day};
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    /// Accepts `HH:MM` and `H:MM`
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let (hour, minute) = parse_time(raw.trim())
            .ok_or_else(|| de::Error::custom(format!("invalid time '{}', expected HH:MM", raw)))?;
        time_of_day(hour, minute).map_err(de::Error::custom)
    }
}
