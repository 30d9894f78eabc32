//! Lenient calendar-date parsing for user and collaborator input.
//!
//! The extraction collaborator promises `YYYY-MM-DD` but real responses
//! sometimes carry a bare year. A year-only value normalizes to January 1st
//! of that year. Anything else unparsable yields `None` — callers treat it
//! as "date unknown" rather than an error.

use chrono::NaiveDate;

/// Parse `YYYY-MM-DD` or a bare `YYYY` into a calendar date.
///
/// Returns `None` for empty, malformed, or out-of-range input.
#[must_use]
pub fn parse_flexible(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    // Bare year: normalize to January 1st.
    if trimmed.len() == 4
        && trimmed.chars().all(|c| c.is_ascii_digit())
        && let Ok(year) = trimmed.parse::<i32>()
    {
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_iso_date() {
        let d = parse_flexible("1985-04-11").expect("parse");
        assert_eq!(d, NaiveDate::from_ymd_opt(1985, 4, 11).expect("date"));
    }

    #[test]
    fn bare_year_defaults_to_january_first() {
        let d = parse_flexible("1962").expect("parse");
        assert_eq!(d, NaiveDate::from_ymd_opt(1962, 1, 1).expect("date"));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert!(parse_flexible(" 1990-12-31 ").is_some());
    }

    #[test]
    fn garbage_is_none() {
        assert!(parse_flexible("").is_none());
        assert!(parse_flexible("April 11, 1985").is_none());
        assert!(parse_flexible("19851").is_none());
        assert!(parse_flexible("1985-13-40").is_none());
    }
}
