//! Date validator with optional inclusive bounds.
//!
//! Accepts ISO dates (`2024-03-01`), RFC 3339 timestamps, `datetime-local`
//! values (`2024-03-01T12:30`) and the slash forms `2024/03/01` and `03/01/2024`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::foundation::ValidationError;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parses a date in any of the accepted formats.
#[must_use]
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
                .map(|dt| dt.date())
        })
}

crate::validator! {
    /// Validates that a string is a date within `[min, max]`.
    ///
    /// A missing bound leaves that side open.
    #[derive(Copy, PartialEq, Eq, Default)]
    pub DateRange { min: Option<NaiveDate>, max: Option<NaiveDate> } for str;
    rule(self, input) {
        parse_date(input).is_some_and(|date| {
            self.min.is_none_or(|min| date >= min) && self.max.is_none_or(|max| date <= max)
        })
    }
    error(self, input) { ValidationError::new("date", "invalid date") }
    new(min: Option<NaiveDate>, max: Option<NaiveDate>) { Self { min, max } }
    fn date_range(min: Option<NaiveDate>, max: Option<NaiveDate>);
}

impl DateRange {
    /// Builds the range from a field's raw `min`/`max` attribute values.
    ///
    /// An empty or unparseable attribute is treated as no bound.
    #[must_use]
    pub fn from_bounds(min: Option<&str>, max: Option<&str>) -> Self {
        Self::new(min.and_then(parse_date), max.and_then(parse_date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[rstest]
    #[case("2024-03-01", ymd(2024, 3, 1))]
    #[case("2024/03/01", ymd(2024, 3, 1))]
    #[case("03/01/2024", ymd(2024, 3, 1))]
    #[case("2024-03-01T12:30", ymd(2024, 3, 1))]
    #[case("2024-03-01T23:30:00+02:00", ymd(2024, 3, 1))]
    #[case("2024-02-30", None)]
    #[case("yesterday", None)]
    #[case("", None)]
    fn test_parse_date(#[case] input: &str, #[case] expected: Option<NaiveDate>) {
        assert_eq!(parse_date(input), expected);
    }

    #[test]
    fn test_unbounded() {
        let validator = DateRange::default();
        assert!(validator.is_valid("1900-01-01"));
        assert!(!validator.is_valid("not a date"));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let validator = DateRange::from_bounds(Some("2024-01-01"), Some("2024-12-31"));
        assert!(validator.is_valid("2024-01-01"));
        assert!(validator.is_valid("2024-12-31"));
        assert!(!validator.is_valid("2023-12-31"));
        assert!(!validator.is_valid("2025-01-01"));
    }

    #[test]
    fn test_one_sided_and_unparseable_bounds() {
        let only_min = DateRange::from_bounds(Some("2024-06-01"), None);
        assert!(only_min.is_valid("2999-01-01"));
        assert!(!only_min.is_valid("2024-05-31"));

        let junk = DateRange::from_bounds(Some(""), Some("soon"));
        assert_eq!(junk, DateRange::default());
    }
}
