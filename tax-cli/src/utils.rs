use rust_decimal::Decimal;
use tax_core::calculations::common::{round_half_up, round_to_whole};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes
/// thousands separators (comma, space, underscore).
fn normalize_decimal_input(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '_'))
        .collect()
}

/// Parses a string into a [`Decimal`].
///
/// Handles thousands separators (e.g. `"1,234.56"`, `"52 000 000"`).
/// Empty or whitespace-only input is treated as 0, which the calculators
/// then reject where a positive value is required.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}

fn with_sign(
    negative: bool,
    text: String,
) -> String {
    if negative { format!("-{text}") } else { text }
}

/// Rounds to whole tenge and groups thousands with spaces: `29 722`.
pub fn format_number(value: Decimal) -> String {
    let rounded = round_to_whole(value);
    let digits = rounded.abs().trunc().to_string();
    with_sign(
        rounded.is_sign_negative() && !rounded.is_zero(),
        group_thousands(&digits),
    )
}

/// Grouped like [`format_number`] but keeps up to two decimals: `1 800`,
/// `3.5`. Used for vehicle metrics.
pub fn format_quantity(value: Decimal) -> String {
    let rounded = round_half_up(value).normalize();
    let text = rounded.abs().to_string();
    let grouped = match text.split_once('.') {
        Some((whole, fraction)) => format!("{}.{fraction}", group_thousands(whole)),
        None => group_thousands(&text),
    };
    with_sign(rounded.is_sign_negative() && !rounded.is_zero(), grouped)
}

/// [`format_number`] followed by the tenge sign.
pub fn format_tenge(value: Decimal) -> String {
    format!("{} ₸", format_number(value))
}

/// Up to two decimals, without trailing zeros: `0.75`, `35`, `2.5`. Used
/// for areas, rates and multipliers.
pub fn format_decimal(value: Decimal) -> String {
    round_half_up(value).normalize().to_string()
}

/// A fractional rate as a percentage: `0.0005` becomes `0.05%`.
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// 1 hectare is 100 sotok. `None` when the result does not fit a `Decimal`.
pub fn hectares_to_sotok(hectares: Decimal) -> Option<Decimal> {
    hectares.checked_mul(Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_decimal_accepts_thousands_separators() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("52 000 001").unwrap(), dec!(52000001));
        assert_eq!(parse_decimal("1_800").unwrap(), dec!(1800));
    }

    #[test]
    fn parse_decimal_trim_whitespace() {
        assert_eq!(parse_decimal("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        assert!(parse_decimal("abc").is_err());
        assert!(parse_decimal("12ha").is_err());
    }

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(dec!(29722)), "29 722");
        assert_eq!(format_number(dec!(52000000)), "52 000 000");
        assert_eq!(format_number(dec!(999)), "999");
        assert_eq!(format_number(dec!(1000)), "1 000");
        assert_eq!(format_number(Decimal::ZERO), "0");
    }

    #[test]
    fn format_number_rounds_half_up() {
        assert_eq!(format_number(dec!(14860.5)), "14 861");
        assert_eq!(format_number(dec!(412.49)), "412");
        assert_eq!(format_number(dec!(0.0005)), "0");
    }

    #[test]
    fn format_number_keeps_sign() {
        assert_eq!(format_number(dec!(-1234567)), "-1 234 567");
        assert_eq!(format_number(dec!(-0.2)), "0");
    }

    #[test]
    fn format_quantity_keeps_fraction() {
        assert_eq!(format_quantity(dec!(1800)), "1 800");
        assert_eq!(format_quantity(dec!(3.5)), "3.5");
        assert_eq!(format_quantity(dec!(12500.25)), "12 500.25");
        assert_eq!(format_quantity(dec!(45.000)), "45");
    }

    #[test]
    fn format_tenge_appends_sign() {
        assert_eq!(format_tenge(dec!(8400)), "8 400 ₸");
    }

    #[test]
    fn format_decimal_trims_to_two_decimals() {
        assert_eq!(format_decimal(dec!(0.75)), "0.75");
        assert_eq!(format_decimal(dec!(35.000)), "35");
        assert_eq!(format_decimal(dec!(2.345)), "2.35");
    }

    #[test]
    fn format_percent_scales_rate() {
        assert_eq!(format_percent(dec!(0.0005)), "0.05%");
        assert_eq!(format_percent(dec!(0.001)), "0.1%");
        assert_eq!(format_percent(Decimal::ZERO), "0%");
    }

    #[test]
    fn hectares_convert_to_sotok() {
        assert_eq!(hectares_to_sotok(dec!(0.25)), Some(dec!(25)));
    }

    #[test]
    fn huge_hectares_have_no_sotok() {
        assert_eq!(hectares_to_sotok(Decimal::MAX), None);
    }
}
