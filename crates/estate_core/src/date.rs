//! Calendar date normalization for user-entered text.
//!
//! # Invariants
//! - Formats are tried in `ACCEPTED_DATE_FORMATS` order; first match wins.
//! - The year is always exactly four digits; chrono's `%Y` alone would
//!   also take `24` or `+2024`.
//! - Results carry no timezone or time-of-day component.
//! - Storage always uses the ISO form produced by `format_date`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Accepted input formats, highest priority first.
pub const ACCEPTED_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Input shape required for each entry of `ACCEPTED_DATE_FORMATS`.
static DATE_SHAPES: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$").expect("valid iso date regex"),
        Regex::new(r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$").expect("valid day-first date regex"),
    ]
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    input: String,
}

impl DateParseError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid date `{}`; use either YYYY-MM-DD or DD/MM/YYYY",
            self.input
        )
    }
}

impl Error for DateParseError {}

/// Parses `text` as ISO `YYYY-MM-DD`, then as `DD/MM/YYYY`.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = text.trim();
    ACCEPTED_DATE_FORMATS
        .iter()
        .zip(DATE_SHAPES.iter())
        .filter(|(_, shape)| shape.is_match(trimmed))
        .find_map(|(format, _)| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| DateParseError {
            input: trimmed.to_string(),
        })
}

/// Renders the canonical storage form of `date`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(STORAGE_DATE_FORMAT).to_string()
}

/// Parses the canonical storage form only.
pub(crate) fn parse_stored_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, STORAGE_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::{format_date, parse_date};
    use chrono::NaiveDate;

    #[test]
    fn iso_and_day_first_forms_agree() {
        let iso = parse_date("2024-03-05").unwrap();
        let day_first = parse_date("05/03/2024").unwrap();
        assert_eq!(iso, day_first);
        assert_eq!(iso, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            parse_date(" 31/01/2024\n").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        );
    }

    #[test]
    fn garbage_and_impossible_dates_are_rejected() {
        for input in [
            "not-a-date",
            "",
            "2024-13-01",
            "31/02/2024",
            "2024/01/31",
            "05/03/24",
            "24-03-05",
            "31/01/202",
        ] {
            let err = parse_date(input).unwrap_err();
            assert_eq!(err.input(), input.trim());
        }
    }

    #[test]
    fn years_must_have_four_digits() {
        for input in ["05/03/24", "24-03-05", "31/01/202", "+2024-03-05", "31/01/20245"] {
            assert!(parse_date(input).is_err(), "{input} should be rejected");
        }
    }

    #[test]
    fn single_digit_day_and_month_are_accepted() {
        assert_eq!(
            parse_date("5/3/2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
        assert_eq!(
            parse_date("2024-3-5").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
    }

    #[test]
    fn month_first_is_not_guessed() {
        assert!(parse_date("01/31/2024").is_err());
    }

    #[test]
    fn storage_form_is_iso() {
        let date = parse_date("09/11/2023").unwrap();
        assert_eq!(format_date(date), "2023-11-09");
    }
}
