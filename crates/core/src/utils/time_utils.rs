use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Converts a UTC instant to the calendar day a log belongs to.
///
/// This is the single place where a timestamp becomes a log date; the
/// time-of-day is not significant for logs.
pub fn log_date_from_utc(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// Today's log date (UTC).
pub fn log_date_today() -> NaiveDate {
    log_date_from_utc(Utc::now())
}

/// Parses a log date from `YYYY-MM-DD`, an RFC 3339 timestamp or a naive
/// `YYYY-MM-DDTHH:MM:SS[.f]` timestamp. Any time component is dropped.
///
/// RFC 3339 inputs are converted to UTC before truncation.
pub fn parse_log_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(log_date_from_utc(instant.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Serde adapter for log dates on request payloads.
///
/// Pair with `#[serde(default = "log_date_today")]` so an omitted date means
/// "today".
pub mod log_date {
    use chrono::NaiveDate;
    use serde::{de::Error as _, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_log_date(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid log date '{}'", raw)))
    }
}
