//! Monetary helpers. Every money figure in the output goes through
//! [`round_money`] so seller-level and product-level rounding never diverge.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept in output figures.
pub const MONEY_DP: u32 = 2;

/// Round to 2 decimal places, half away from zero. Never returns negative zero.
pub fn round_money(value: Decimal) -> Decimal {
    let rounded = value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// `value * pct / 100`. Exact for `pct` within `0..=100`, saturating beyond.
pub fn percent_of(value: Decimal, pct: Decimal) -> Decimal {
    value.saturating_mul(pct / Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn midpoint_rounds_away_from_zero() {
        assert_eq!(round_money(dec!(2.345)), dec!(2.35));
        assert_eq!(round_money(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round_money(dec!(0.125)), dec!(0.13));
    }

    #[test]
    fn below_midpoint_rounds_down() {
        assert_eq!(round_money(dec!(2.344)), dec!(2.34));
        assert_eq!(round_money(dec!(19.9949)), dec!(19.99));
    }

    #[test]
    fn short_values_unchanged() {
        assert_eq!(round_money(dec!(40)), dec!(40));
        assert_eq!(round_money(dec!(3.1)), dec!(3.1));
    }

    #[test]
    fn negative_zero_is_normalized() {
        let tiny_loss = percent_of(dec!(-0.80), Decimal::ZERO);
        assert!(round_money(tiny_loss).is_sign_positive());
        assert!(round_money(dec!(-0.004)).is_sign_positive());
    }

    #[test]
    fn percent_of_profit() {
        assert_eq!(percent_of(dec!(20), dec!(15)), dec!(3));
        assert_eq!(percent_of(dec!(123.45), dec!(10)), dec!(12.345));
        assert_eq!(percent_of(dec!(500), dec!(0)), dec!(0));
    }

    #[test]
    fn percent_of_extreme_profit() {
        assert_eq!(percent_of(Decimal::MAX, dec!(100)), Decimal::MAX);
        assert_eq!(percent_of(Decimal::MAX, dec!(250)), Decimal::MAX);
        assert_eq!(percent_of(Decimal::MIN, dec!(250)), Decimal::MIN);
    }
}
