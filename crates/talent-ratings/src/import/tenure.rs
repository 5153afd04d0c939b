use chrono::{DateTime, NaiveDate};

const DAYS_PER_YEAR: f64 = 365.25;

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub(crate) fn parse_hire_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_utc().date())
}

/// Years between hire and `as_of`, never negative, rounded to hundredths.
pub(crate) fn tenure_years(hire_date: NaiveDate, as_of: NaiveDate) -> f64 {
    let days = (as_of - hire_date).num_days().max(0) as f64;
    (days / DAYS_PER_YEAR * 100.0).round() / 100.0
}
