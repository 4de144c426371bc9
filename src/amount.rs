//! Locale-formatted monetary amounts with exactly 2 decimal places.
//!
//! All knowledge of the numeric grammar (which character groups thousands,
//! which one separates the decimals) lives in [`NumberFormat`]. The line
//! classifier only asks it for a token pattern and a normalized value.

use crate::error::{ExtractError, Result};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Separator characters of a statement's number format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub thousands: char,
    pub decimal: char,
}

impl NumberFormat {
    /// `1.234,56` style, as printed on German statements.
    pub const GERMAN: Self = NumberFormat {
        thousands: '.',
        decimal: ',',
    };

    /// Regex fragment matching one amount token: optional sign, 1-3 leading
    /// digits, thousands groups of exactly 3 digits, and 2 fraction digits.
    pub fn token_pattern(&self) -> String {
        let thousands = regex::escape(&self.thousands.to_string());
        let decimal = regex::escape(&self.decimal.to_string());
        format!(r"[-+]?\d{{1,3}}(?:{thousands}\d{{3}})*{decimal}\d{{2}}")
    }

    /// Converts a locale-formatted token into an exact [`Amount`].
    ///
    /// The decimal separator must appear once, followed by exactly two
    /// digits. The integer part is plain digits or 1-3 digits followed by
    /// thousands groups of exactly three. Anything else, including a value
    /// too large for a decimal, is `MalformedAmount`.
    pub fn normalize(&self, token: &str) -> Result<Amount> {
        let trimmed = token.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (int_part, frac_part) = unsigned
            .split_once(self.decimal)
            .ok_or_else(|| ExtractError::malformed(token, "missing decimal separator"))?;

        if frac_part.len() != 2 || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ExtractError::malformed(
                token,
                "expected exactly two fractional digits",
            ));
        }

        let digits = self.integer_digits(int_part).ok_or_else(|| {
            ExtractError::malformed(token, "integer part must be digits in groups of three")
        })?;

        let plain = format!("{}.{}", digits, frac_part);
        let value =
            Decimal::from_str(&plain).map_err(|e| ExtractError::malformed(token, e.to_string()))?;

        Ok(Amount::new(if negative { -value } else { value }))
    }

    /// Strips thousands separators from the integer part of a token.
    ///
    /// Accepts either plain digits or 1-3 digits followed by groups of
    /// exactly three.
    fn integer_digits(&self, int_part: &str) -> Option<String> {
        let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

        let mut groups = int_part.split(self.thousands);
        let first = groups.next()?;
        if !is_digits(first) {
            return None;
        }

        let mut digits = first.to_string();
        let mut grouped = false;
        for group in groups {
            if group.len() != 3 || !is_digits(group) {
                return None;
            }
            grouped = true;
            digits.push_str(group);
        }
        if grouped && first.len() > 3 {
            return None;
        }
        Some(digits)
    }

    /// Renders an amount in this format, e.g. `-1.234,56`.
    ///
    /// Zero is never printed with a sign.
    pub fn format(&self, amount: &Amount) -> String {
        let value = amount.value();
        let mut magnitude = value.abs();
        magnitude.rescale(Amount::SCALE);

        let plain = magnitude.to_string();
        let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let mut out = String::with_capacity(plain.len() + int_part.len() / 3 + 1);
        if value.is_sign_negative() && !value.is_zero() {
            out.push('-');
        }
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                out.push(self.thousands);
            }
            out.push(ch);
        }
        out.push(self.decimal);
        out.push_str(frac_part);
        out
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::GERMAN
    }
}

/// Normalizes a German-formatted amount token.
pub fn normalize(token: &str) -> Result<Amount> {
    NumberFormat::GERMAN.normalize(token)
}

/// Canonical German representation of an amount.
pub fn format(amount: &Amount) -> String {
    NumberFormat::GERMAN.format(amount)
}

/// A signed monetary value that always carries exactly 2 decimal places.
///
/// `Display` and `Serialize` both produce the canonical German string
/// (`1.234,56`); [`Amount::value`] exposes the exact decimal.
///
/// # Examples
///
/// ```
/// use statement_extractor::Amount;
///
/// let amount: Amount = "-1.234,50".parse().unwrap();
/// assert_eq!(amount.to_string(), "-1.234,50");
/// assert_eq!(amount.value().to_string(), "-1234.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Creates a new `Amount`, normalizing to 2 decimal places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized = value;
        normalized.rescale(Self::SCALE);
        Amount(normalized)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl FromStr for Amount {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        normalize(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self))
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(self))
    }
}
