//! `DD.MM.YYYY` statement dates.

use crate::error::ExtractError;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A booking date exactly as printed on the statement.
///
/// Only the token shape is checked (two digits, two digits, four digits), so
/// values like `31.02.2024` survive unchanged into the output. Use
/// [`StatementDate::to_naive_date`] when a real calendar date is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatementDate {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

impl StatementDate {
    /// Parses a `DD.MM.YYYY` token. Returns `None` for any other shape.
    pub fn parse(token: &str) -> Option<Self> {
        let bytes = token.as_bytes();
        if bytes.len() != 10 || bytes[2] != b'.' || bytes[5] != b'.' {
            return None;
        }
        let digits = |range: std::ops::Range<usize>| -> Option<u16> {
            let part = &token[range];
            if part.bytes().all(|b| b.is_ascii_digit()) {
                part.parse().ok()
            } else {
                None
            }
        };

        Some(StatementDate {
            day: digits(0..2)? as u8,
            month: digits(3..5)? as u8,
            year: digits(6..10)?,
        })
    }

    /// The calendar date, if the printed day and month exist.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year as i32, self.month as u32, self.day as u32)
    }
}

impl Ord for StatementDate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

impl PartialOrd for StatementDate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for StatementDate {
    type Err = ExtractError;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        StatementDate::parse(s.trim()).ok_or_else(|| ExtractError::InvalidDate(s.to_string()))
    }
}

impl fmt::Display for StatementDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{:04}", self.day, self.month, self.year)
    }
}

impl Serialize for StatementDate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let date = StatementDate::parse("01.03.2024").unwrap();
        assert_eq!((date.day, date.month, date.year), (1, 3, 2024));
        assert_eq!(date.to_string(), "01.03.2024");
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        for token in ["1.03.2024", "01-03-2024", "01.03.24", "01.03.20245", "aa.03.2024"] {
            assert!(StatementDate::parse(token).is_none(), "{}", token);
        }
    }

    #[test]
    fn test_from_str() {
        let date: StatementDate = " 15.01.2024 ".parse().unwrap();
        assert_eq!(date.to_string(), "15.01.2024");

        match "2024-01-15".parse::<StatementDate>() {
            Err(ExtractError::InvalidDate(token)) => assert_eq!(token, "2024-01-15"),
            other => panic!("Expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_no_calendar_validation() {
        let date = StatementDate::parse("31.02.2024").unwrap();
        assert_eq!(date.to_string(), "31.02.2024");
        assert!(date.to_naive_date().is_none());
    }

    #[test]
    fn test_to_naive_date() {
        let date = StatementDate::parse("29.02.2024").unwrap();
        assert_eq!(date.to_naive_date(), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_ordering_is_chronological() {
        let earlier = StatementDate::parse("31.12.2023").unwrap();
        let later = StatementDate::parse("01.01.2024").unwrap();
        assert!(earlier < later);
    }
}
