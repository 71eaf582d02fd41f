use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Rendered in place of NaN / infinite values.
pub const NOT_AVAILABLE: &str = "n/a";

fn round_to(d: Decimal, dp: u32) -> Decimal {
    let mut r = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    r.rescale(dp);
    r
}

fn rounded(value: f64, dp: u32) -> Option<Decimal> {
    Decimal::from_f64(value).map(|d| round_to(d, dp))
}

/// "1234567.89" -> "1,234,567.89"; the sign is handled by the caller.
fn group_thousands(abs: Decimal) -> String {
    let s = abs.to_string();
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}

fn signed(d: Decimal, body: String) -> String {
    if d.is_sign_negative() && !d.is_zero() {
        format!("-{body}")
    } else {
        body
    }
}

/// Whole-dollar USD: `-$1,234`.
pub fn format_currency(value: f64) -> String {
    match rounded(value, 0) {
        Some(d) => signed(d, format!("${}", group_thousands(d.abs()))),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn percent_of(pct: Decimal) -> String {
    let d = round_to(pct, 2);
    signed(d, format!("{}%", group_thousands(d.abs())))
}

/// A value already in percent, two decimals: `17.14%`.
pub fn format_percent(value: f64) -> String {
    match Decimal::from_f64(value) {
        Some(d) => percent_of(d),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// A ratio shown as a percentage: 0.5389 -> `53.89%`.
pub fn format_ratio_as_percent(value: f64) -> String {
    match Decimal::from_f64(value).and_then(|d| d.checked_mul(dec!(100))) {
        Some(pct) => percent_of(pct),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Two decimals: `2.82`.
pub fn format_ratio(value: f64) -> String {
    match rounded(value, 2) {
        Some(d) => d.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Two decimals with a trailing x: `2.92x`.
pub fn format_multiple(value: f64) -> String {
    match rounded(value, 2) {
        Some(d) => format!("{d}x"),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(1_750_000.0), "$1,750,000");
        assert_eq!(format_currency(999.5), "$1,000");
        assert_eq!(format_currency(-2_016_148.26), "-$2,016,148");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(-0.4), "$0");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(17.142857), "17.14%");
        assert_eq!(format_percent(6.5), "6.50%");
        assert_eq!(format_percent(1234.5), "1,234.50%");
        assert_eq!(format_percent(-3.456), "-3.46%");
    }

    #[test]
    fn test_ratio_as_percent() {
        assert_eq!(format_ratio_as_percent(0.5389169712196514), "53.89%");
    }

    #[test]
    fn test_ratio_and_multiple() {
        assert_eq!(format_ratio(2.8210037064183417), "2.82");
        assert_eq!(format_ratio(1.0), "1.00");
        assert_eq!(format_multiple(2.916530185908433), "2.92x");
    }

    #[test]
    fn test_non_finite_is_not_available() {
        assert_eq!(format_currency(f64::NAN), NOT_AVAILABLE);
        assert_eq!(format_percent(f64::INFINITY), NOT_AVAILABLE);
        assert_eq!(format_ratio_as_percent(f64::NEG_INFINITY), NOT_AVAILABLE);
        assert_eq!(format_multiple(f64::NAN), NOT_AVAILABLE);
    }
}
