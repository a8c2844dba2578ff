//! Linear ratio projection for liquidity-deposit pre-fill.
//!
//! This is deliberately not the constant-product curve: it assumes
//! negligible price impact and exists only to suggest the second deposit
//! amount while the user types the first. Submitted swap amounts come
//! exclusively from the remote quote service.

use rust_decimal::Decimal;

/// Projects the counterpart deposit amount preserving the pool's current
/// reserve ratio: `input_amount * reserve_other / reserve_self`.
///
/// Returns `None` when `reserve_self` is not strictly positive or
/// `input_amount` is non-positive, so the caller leaves the counterpart
/// field unchanged instead of producing a division by zero or a negative
/// suggestion.
#[must_use]
pub fn estimate_counterpart(
    reserve_self: Decimal,
    reserve_other: Decimal,
    input_amount: Decimal,
) -> Option<Decimal> {
    if reserve_self <= Decimal::ZERO || input_amount <= Decimal::ZERO {
        return None;
    }
    Some(input_amount * reserve_other / reserve_self)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_preserves_reserve_ratio() {
        let cases = [
            (dec!(1000), dec!(2000), dec!(100)),
            (dec!(3), dec!(7), dec!(1.5)),
            (dec!(0.0001), dec!(9999), dec!(0.5)),
        ];
        for (reserve_self, reserve_other, input) in cases {
            let out = estimate_counterpart(reserve_self, reserve_other, input).unwrap();
            let lhs = (out * reserve_self).round_dp(10);
            let rhs = (input * reserve_other).round_dp(10);
            assert_eq!(lhs, rhs, "ratio broken for input {input}");
        }
    }

    #[test]
    fn test_reference_projection() {
        assert_eq!(
            estimate_counterpart(dec!(1000), dec!(2000), dec!(100)),
            Some(dec!(200))
        );
    }

    #[test]
    fn test_empty_reserve_produces_no_update() {
        assert_eq!(estimate_counterpart(dec!(0), dec!(2000), dec!(100)), None);
        assert_eq!(estimate_counterpart(dec!(-1), dec!(2000), dec!(100)), None);
    }

    #[test]
    fn test_non_positive_input_produces_no_update() {
        assert_eq!(estimate_counterpart(dec!(1000), dec!(2000), dec!(0)), None);
        assert_eq!(estimate_counterpart(dec!(1000), dec!(2000), dec!(-5)), None);
    }
}
