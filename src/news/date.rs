use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a publication date string in the formats the collectors produce.
pub fn parse_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    // Try RFC3339
    if let Ok(date) = DateTime::parse_from_rfc3339(date_str) {
        return Some(date.with_timezone(&Utc));
    }

    // Try RFC2822 (RSS pubDate)
    if let Ok(date) = DateTime::parse_from_rfc2822(date_str) {
        return Some(date.with_timezone(&Utc));
    }

    // Try ISO 8601 with a numeric offset
    if let Ok(date) = DateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(date.with_timezone(&Utc));
    }

    // Naive formats are taken as UTC
    for format in &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y.%m.%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive.and_utc());
        }
    }

    for format in &["%Y-%m-%d", "%Y.%m.%d"] {
        if let Ok(day) = NaiveDate::parse_from_str(date_str, format) {
            return day.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}
