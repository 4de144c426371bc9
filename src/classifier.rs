//! Per-line classification of statement text.
//!
//! Each line is classified without context: it either opens a booking (date
//! prefix, optionally with its amount on the same line), carries a lone
//! amount, marks the end of the booking section, or is noise.

use crate::amount::{Amount, NumberFormat};
use crate::date::StatementDate;
use crate::error::Result;
use log::debug;
use regex::Regex;

/// Stop markers used when none are configured.
pub const DEFAULT_STOP_MARKERS: [&str; 2] = ["Zinsertrag", "Neuer Saldo"];

/// What a single line of statement text contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Line starts with a `DD.MM.YYYY` token.
    Date {
        date: StatementDate,
        trailing_amount: Option<Amount>,
    },
    /// Line has an amount token but no date prefix.
    Amount(Amount),
    /// Line contains a stop marker; nothing after it belongs to the bookings.
    Stop,
    Noise,
}

/// Classifies lines against a fixed set of stop markers and a number format.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    date_re: Regex,
    amount_re: Regex,
    stop_markers: Vec<String>,
    format: NumberFormat,
}

impl LineClassifier {
    pub fn new<I, S>(stop_markers: I, format: NumberFormat) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let date_re = Regex::new(r"^(\d{2}\.\d{2}\.\d{4})(?:\D|$)")?;

        // The token may not touch other digits or separators, so "1234,56"
        // is rejected instead of yielding "234,56".
        let separators = regex::escape(&format!("{}{}", format.thousands, format.decimal));
        let amount_re = Regex::new(&format!(
            r"(?:^|[^\d{separators}])(?P<amount>{})(?:\D|$)",
            format.token_pattern()
        ))?;

        Ok(LineClassifier {
            date_re,
            amount_re,
            stop_markers: stop_markers
                .into_iter()
                .map(Into::<String>::into)
                .filter(|m| !m.is_empty())
                .collect(),
            format,
        })
    }

    pub fn stop_markers(&self) -> &[String] {
        &self.stop_markers
    }

    /// Classifies one line of text.
    ///
    /// Stop markers win over everything else. An amount token that matches
    /// the pattern but fails normalization turns the whole line into
    /// [`LineClass::Noise`].
    pub fn classify(&self, line: &str) -> LineClass {
        let line = line.trim();

        if self.is_stop_line(line) {
            return LineClass::Stop;
        }

        if let Some(caps) = self.date_re.captures(line) {
            let token = caps.get(1).map_or("", |m| m.as_str());
            let Ok(date) = token.parse::<StatementDate>() else {
                return LineClass::Noise;
            };
            let rest = &line[token.len()..];
            return match self.find_amount(rest) {
                Some(Ok(amount)) => LineClass::Date {
                    date,
                    trailing_amount: Some(amount),
                },
                Some(Err(e)) => {
                    debug!("Ignoring date line '{}': {}", line, e);
                    LineClass::Noise
                }
                None => LineClass::Date {
                    date,
                    trailing_amount: None,
                },
            };
        }

        match self.find_amount(line) {
            Some(Ok(amount)) => LineClass::Amount(amount),
            Some(Err(e)) => {
                debug!("Ignoring amount line '{}': {}", line, e);
                LineClass::Noise
            }
            None => LineClass::Noise,
        }
    }

    fn is_stop_line(&self, line: &str) -> bool {
        self.stop_markers
            .iter()
            .any(|marker| line.contains(marker.as_str()))
    }

    /// First amount token from the left, normalized.
    fn find_amount(&self, text: &str) -> Option<Result<Amount>> {
        let caps = self.amount_re.captures(text)?;
        let token = caps.name("amount")?.as_str();
        Some(self.format.normalize(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> LineClassifier {
        LineClassifier::new(DEFAULT_STOP_MARKERS, NumberFormat::GERMAN).unwrap()
    }

    fn amount(token: &str) -> Amount {
        token.parse().unwrap()
    }

    fn date(token: &str) -> StatementDate {
        StatementDate::parse(token).unwrap()
    }

    #[test]
    fn test_date_line_without_amount() {
        assert_eq!(
            classifier().classify("01.03.2024 Miete"),
            LineClass::Date {
                date: date("01.03.2024"),
                trailing_amount: None
            }
        );
    }

    #[test]
    fn test_date_line_with_trailing_amount() {
        assert_eq!(
            classifier().classify("02.03.2024  120,50"),
            LineClass::Date {
                date: date("02.03.2024"),
                trailing_amount: Some(amount("120,50"))
            }
        );
    }

    #[test]
    fn test_date_only_line() {
        assert_eq!(
            classifier().classify("  05.03.2024  "),
            LineClass::Date {
                date: date("05.03.2024"),
                trailing_amount: None
            }
        );
    }

    #[test]
    fn test_date_must_not_run_into_digits() {
        assert_eq!(classifier().classify("01.03.20245 foo"), LineClass::Noise);
    }

    #[test]
    fn test_date_must_be_prefix() {
        assert_eq!(
            classifier().classify("Buchung 01.03.2024 -5,00"),
            LineClass::Amount(amount("-5,00"))
        );
    }

    #[test]
    fn test_amount_line() {
        assert_eq!(
            classifier().classify("-950,00"),
            LineClass::Amount(amount("-950,00"))
        );
        assert_eq!(
            classifier().classify("Gutschrift 1.234,56 EUR"),
            LineClass::Amount(amount("1.234,56"))
        );
    }

    #[test]
    fn test_first_amount_wins() {
        assert_eq!(
            classifier().classify("12,00 Gebuehr 99,99"),
            LineClass::Amount(amount("12,00"))
        );
        assert_eq!(
            classifier().classify("03.03.2024 Kauf -4,20 Saldo 1.000,00"),
            LineClass::Date {
                date: date("03.03.2024"),
                trailing_amount: Some(amount("-4,20"))
            }
        );
    }

    #[test]
    fn test_unseparated_thousands_are_not_amounts() {
        assert_eq!(classifier().classify("1234,56"), LineClass::Noise);
        assert_eq!(classifier().classify("1,234"), LineClass::Noise);
    }

    #[test]
    fn test_stop_line_takes_precedence() {
        let c = classifier();
        assert_eq!(c.classify("Zinsertrag 0,12"), LineClass::Stop);
        assert_eq!(c.classify("31.03.2024 Neuer Saldo 5.000,00"), LineClass::Stop);
    }

    #[test]
    fn test_stop_markers_are_case_sensitive() {
        assert_eq!(classifier().classify("neuer saldo"), LineClass::Noise);
    }

    #[test]
    fn test_custom_stop_markers() {
        let c = LineClassifier::new(["Endsaldo"], NumberFormat::GERMAN).unwrap();
        assert_eq!(c.classify("Endsaldo 1,00"), LineClass::Stop);
        assert_eq!(c.classify("Zinsertrag 0,12"), LineClass::Amount(amount("0,12")));
    }

    #[test]
    fn test_empty_stop_marker_is_ignored() {
        let c = LineClassifier::new(["", "Ende"], NumberFormat::GERMAN).unwrap();
        assert_eq!(c.stop_markers(), ["Ende".to_string()]);
        assert_eq!(c.classify("Text"), LineClass::Noise);
    }

    #[test]
    fn test_malformed_amount_makes_line_noise() {
        let huge = format!("999{},00", ".999".repeat(13));
        let c = classifier();
        assert_eq!(c.classify(&huge), LineClass::Noise);
        assert_eq!(c.classify(&format!("04.03.2024 {}", huge)), LineClass::Noise);
    }

    #[test]
    fn test_noise() {
        let c = classifier();
        assert_eq!(c.classify(""), LineClass::Noise);
        assert_eq!(c.classify("Kontoauszug Nr. 3"), LineClass::Noise);
        assert_eq!(c.classify("IBAN DE12 3456"), LineClass::Noise);
    }
}
