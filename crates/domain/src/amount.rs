//! Decimal-string parsing and display formatting for user-entered amounts.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Maximum fraction digits shown for asset amounts.
const MAX_DISPLAY_DP: u32 = 6;
/// Minimum fraction digits shown for asset amounts.
const MIN_DISPLAY_DP: u32 = 2;

/// Parses a user-entered amount, accepting only finite values strictly
/// greater than zero.
///
/// Returns `None` for empty, unparseable or non-positive input, which
/// callers treat as "no amount entered" rather than an error.
#[must_use]
pub fn parse_positive_amount(text: &str) -> Option<Decimal> {
    let parsed = Decimal::from_str(text.trim()).ok()?;
    (parsed > Decimal::ZERO).then_some(parsed)
}

/// Formats an asset amount with between 2 and 6 fraction digits.
#[must_use]
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp(MAX_DISPLAY_DP).normalize();
    if rounded.scale() < MIN_DISPLAY_DP {
        format!("{rounded:.2}")
    } else {
        rounded.to_string()
    }
}

/// Formats a USD value with two fraction digits, a currency sign and
/// thousands separators.
#[must_use]
pub fn format_usd(value: Decimal) -> String {
    let text = format!("{:.2}", value.round_dp(2));
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));
    format!("{sign}${}.{frac_part}", group_thousands(int_part))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
