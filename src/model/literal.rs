//! Literal helpers shared by the detector and the navigator.
//!
//! Source data is semi-structured, so nothing here fails: unparseable input
//! yields `None` and the caller moves on.

use chrono::{DateTime, NaiveDate, Utc};

/// Whether an object string names a resource rather than a literal value.
///
/// A URI has a scheme or namespace prefix before its first `:` that starts
/// with an ASCII letter (`http:`, `urn:`, `reg:`, `motion:`) and contains no
/// whitespace anywhere. Timestamps such as `2024-01-15T10:00:00Z` start with
/// a digit and stay literals.
pub fn is_uri(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((prefix, _)) = s.split_once(':') else {
        return false;
    };
    let mut chars = prefix.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.' | '_'))
}

/// Parse a date literal: RFC 3339 first, then `YYYY-MM-DD` at midnight UTC.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Last segment of a URI after `#` or `/`, or the whole string.
pub fn uri_tail(uri: &str) -> &str {
    if let Some(idx) = uri.rfind('#') {
        return &uri[idx + 1..];
    }
    if let Some(idx) = uri.rfind('/') {
        return &uri[idx + 1..];
    }
    uri
}

/// Local name of a predicate: text after the last `:` (`reg:title` → `title`).
pub fn local_name(predicate: &str) -> &str {
    predicate.rfind(':').map_or(predicate, |idx| &predicate[idx + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_is_uri() {
        assert!(is_uri("http://example.org/meeting/1"));
        assert!(is_uri("reg:Meeting"));
        assert!(is_uri("motion:A"));
        assert!(is_uri("urn:isbn:123"));

        assert!(!is_uri("pending"));
        assert!(!is_uri("Deferred Item"));
        assert!(!is_uri("Note: see annex"));
        assert!(!is_uri("2024-01-15T10:00:00Z"));
        assert!(!is_uri(":orphan"));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        assert_eq!(parse_date("2024-03-15T10:00:00Z"), Some(expected));
        assert_eq!(parse_date("2024-03-15T12:00:00+02:00"), Some(expected));

        let midnight = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        assert_eq!(parse_date("2024-03-15"), Some(midnight));

        assert_eq!(parse_date("March 15th"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_uri_tail() {
        assert_eq!(uri_tail("http://example.org/ns#Article17"), "Article17");
        assert_eq!(uri_tail("http://example.org/provision/art-5"), "art-5");
        assert_eq!(uri_tail("motion:A"), "motion:A");
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("reg:title"), "title");
        assert_eq!(local_name("title"), "title");
    }
}
