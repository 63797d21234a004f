//! Conversion between the source (`1.234,56`) and target (`1234.56`) number
//! conventions.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Values that can be rendered in the target decimal convention.
///
/// Text is converted with [`format_number`]; values that are already
/// numeric pass through unchanged.
pub trait ToTargetLocale {
    fn to_target_locale(&self) -> String;
}

impl ToTargetLocale for str {
    fn to_target_locale(&self) -> String {
        format_number(self)
    }
}

impl ToTargetLocale for String {
    fn to_target_locale(&self) -> String {
        format_number(self)
    }
}

impl ToTargetLocale for Decimal {
    fn to_target_locale(&self) -> String {
        self.to_string()
    }
}

/// Convert a source-locale number into the target convention.
///
/// Every `.` is removed, then the first remaining `,` becomes `.`. No
/// rounding and no digit-count validation happen here.
pub fn format_number(value: &str) -> String {
    value.replace('.', "").replacen(',', ".", 1)
}

/// Parse a source-locale amount (e.g. "1.234,56") into a decimal.
pub fn parse_source_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&format_number(s.trim())).ok()
}

/// Render an amount in source-locale form without thousands grouping
/// (e.g. `1234.5` -> "1234,50").
pub fn format_source_amount(amount: Decimal) -> String {
    format!("{:.2}", amount).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number("1.234,56"), "1234.56");
        assert_eq!(format_number("12.345.678,90"), "12345678.90");
        assert_eq!(format_number("9,99"), "9.99");
        assert_eq!(format_number("150"), "150");
    }

    #[test]
    fn test_format_number_replaces_only_first_comma() {
        assert_eq!(format_number("1,234,56"), "1.234,56");
    }

    #[test]
    fn test_format_number_stable_without_separators() {
        for value in ["1234", "0", "100"] {
            assert_eq!(format_number(&format_number(value)), format_number(value));
        }
    }

    #[test]
    fn test_numeric_passthrough() {
        let amount = Decimal::from_str("1234.56").unwrap();
        assert_eq!(amount.to_target_locale(), "1234.56");
        assert_eq!("1.234,56".to_target_locale(), "1234.56");
    }

    #[test]
    fn test_parse_source_amount() {
        assert_eq!(
            parse_source_amount("1.234,56"),
            Some(Decimal::from_str("1234.56").unwrap())
        );
        assert_eq!(parse_source_amount("abc"), None);
    }

    #[test]
    fn test_format_source_amount() {
        assert_eq!(format_source_amount(Decimal::new(12345, 2)), "123,45");
        assert_eq!(format_source_amount(Decimal::new(123456, 2)), "1234,56");
        assert_eq!(format_source_amount(Decimal::new(5, 0)), "5,00");
    }
}
