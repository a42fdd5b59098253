//! Currency text handling.
//!
//! Amounts arrive as display strings (`"$1,200,000,000"`, `"USD 4.5M"`).
//! Parsing keeps only ASCII digits, `.` and `-`, so it assumes `.` as the
//! decimal separator and ignores magnitude suffixes.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

use crate::types::Money;

/// Parse a currency string. Returns zero when nothing numeric survives.
pub fn parse_amount(raw: &str) -> Money {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| leading_number(&cleaned))
        .unwrap_or(Decimal::ZERO)
}

/// Longest parseable prefix, mirroring lenient float parsing of strings such
/// as `"1.5.2"` or `"100-200"`.
fn leading_number(cleaned: &str) -> Result<Decimal, rust_decimal::Error> {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in cleaned.char_indices() {
        match c {
            '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            d if d.is_ascii_digit() => {}
            _ => break,
        }
        end = i + c.len_utf8();
    }
    Decimal::from_str(cleaned[..end].trim_end_matches('.'))
}

/// Compact display form: `$1.23B`, `$4.50M`, `$12.00K`, `$950.00`.
pub fn format_amount(amount: Money) -> String {
    let (scaled, suffix) = if amount >= dec!(1_000_000_000) {
        (amount / dec!(1_000_000_000), "B")
    } else if amount >= dec!(1_000_000) {
        (amount / dec!(1_000_000), "M")
    } else if amount >= dec!(1_000) {
        (amount / dec!(1_000), "K")
    } else {
        (amount, "")
    };
    format!("${:.2}{}", scaled.round_dp(2), suffix)
}
