//! Published-date helpers
//!
//! The `published` field is free text. These helpers only interpret it
//! when it looks like a date and otherwise hand it back unchanged.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a date string in various formats
pub fn parse_published(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // Try RFC 3339 / ISO 8601
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Value for a `<time datetime="...">` attribute
pub fn date_attr(published: &str) -> String {
    parse_published(published)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| published.trim().to_string())
}

/// Format date in full format (like "January 15, 2024")
pub fn display_date(published: &str) -> String {
    parse_published(published)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| published.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_published() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(parse_published("2024-01-15"), expected);
        assert_eq!(parse_published("2024/01/15"), expected);
        assert_eq!(parse_published("2024-01-15 10:30:00"), expected);
        assert_eq!(parse_published("2024-01-15T10:30:00+02:00"), expected);
        assert_eq!(parse_published("January 15, 2024"), expected);
        assert_eq!(parse_published("15 January 2024"), expected);
        assert_eq!(parse_published("someday"), None);
        assert_eq!(parse_published(""), None);
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2024-01-05"), "January 5, 2024");
        assert_eq!(display_date("Spring 2024"), "Spring 2024");
        assert_eq!(display_date(""), "");
    }

    #[test]
    fn test_date_attr() {
        assert_eq!(date_attr("Jan 5, 2024"), "2024-01-05");
        assert_eq!(date_attr(" soon "), "soon");
    }
}
