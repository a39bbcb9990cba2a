//! Pluggable revenue and bonus calculations.
//!
//! Both strategies must be pure: the engine calls them once per line item
//! (revenue) or once per seller (bonus) and does not guard against panics.
//! Any `Fn` with the matching signature is a strategy.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::model::{LineItem, Product, SellerAccumulator};
use crate::money::percent_of;

// ---------------------------------------------------------------------------
// Revenue
// ---------------------------------------------------------------------------

/// Revenue contributed by one line item.
///
/// Must be non-negative for `discount` in `0..=100` and non-negative prices.
pub trait RevenueStrategy {
    fn revenue(&self, item: &LineItem, product: &Product) -> Decimal;
}

impl<F> RevenueStrategy for F
where
    F: Fn(&LineItem, &Product) -> Decimal,
{
    fn revenue(&self, item: &LineItem, product: &Product) -> Decimal {
        self(item, product)
    }
}

/// `sale_price * quantity * (1 - discount / 100)`.
pub fn discounted_revenue(item: &LineItem, product: &Product) -> Decimal {
    let remaining = Decimal::ONE - item.discount / Decimal::ONE_HUNDRED;
    gross_revenue(item, product).saturating_mul(remaining)
}

/// `sale_price * quantity`, discounts ignored.
///
/// Saturates at the `Decimal` bounds. The aggregator rejects line items whose
/// `sale_price * quantity` does not fit before any strategy sees them.
pub fn gross_revenue(item: &LineItem, _product: &Product) -> Decimal {
    item.sale_price.saturating_mul(Decimal::from(item.quantity))
}

pub const DEFAULT_REVENUE: fn(&LineItem, &Product) -> Decimal = discounted_revenue;

// ---------------------------------------------------------------------------
// Bonus
// ---------------------------------------------------------------------------

/// Bonus for the seller at 0-based `rank` out of `total`.
///
/// Returns the bonus *amount* (same unit as profit), not a rate.
pub trait BonusStrategy {
    fn bonus(&self, rank: usize, total: usize, seller: &SellerAccumulator) -> Decimal;
}

impl<F> BonusStrategy for F
where
    F: Fn(usize, usize, &SellerAccumulator) -> Decimal,
{
    fn bonus(&self, rank: usize, total: usize, seller: &SellerAccumulator) -> Decimal {
        self(rank, total, seller)
    }
}

/// Rank-tiered bonus rates, in percent of profit.
///
/// Evaluated in order: first place, then places two and three, then last
/// place, then everyone else. With three sellers the third is both "podium"
/// and "last" and gets the podium rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RankTiers {
    pub first: Decimal,
    pub podium: Decimal,
    pub last: Decimal,
    pub base: Decimal,
}

impl Default for RankTiers {
    fn default() -> Self {
        Self {
            first: Decimal::from(15),
            podium: Decimal::from(10),
            last: Decimal::ZERO,
            base: Decimal::from(5),
        }
    }
}

impl RankTiers {
    pub fn rate_for(&self, rank: usize, total: usize) -> Decimal {
        if rank == 0 {
            self.first
        } else if rank <= 2 {
            self.podium
        } else if rank + 1 == total {
            self.last
        } else {
            self.base
        }
    }
}

impl BonusStrategy for RankTiers {
    fn bonus(&self, rank: usize, total: usize, seller: &SellerAccumulator) -> Decimal {
        percent_of(seller.profit, self.rate_for(rank, total))
    }
}

/// Default tiers: 15% / 10% / 0% (last) / 5%.
pub fn bonus_by_profit(rank: usize, total: usize, seller: &SellerAccumulator) -> Decimal {
    RankTiers::default().bonus(rank, total, seller)
}

pub const DEFAULT_BONUS: fn(usize, usize, &SellerAccumulator) -> Decimal = bonus_by_profit;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Seller;
    use rust_decimal_macros::dec;

    fn item(discount: Decimal, sale_price: Decimal, quantity: u64) -> LineItem {
        LineItem {
            sku: "P1".into(),
            discount,
            sale_price,
            quantity,
        }
    }

    fn product() -> Product {
        Product {
            sku: "P1".into(),
            name: "Widget".into(),
            purchase_price: dec!(10),
        }
    }

    fn seller_with_profit(profit: Decimal) -> SellerAccumulator {
        let mut acc = SellerAccumulator::new(&Seller {
            id: "s".into(),
            first_name: "A".into(),
            last_name: "B".into(),
        });
        acc.profit = profit;
        acc
    }

    #[test]
    fn discounted_revenue_applies_percent() {
        assert_eq!(discounted_revenue(&item(dec!(0), dec!(20), 2), &product()), dec!(40));
        assert_eq!(discounted_revenue(&item(dec!(25), dec!(20), 2), &product()), dec!(30));
        assert_eq!(discounted_revenue(&item(dec!(100), dec!(20), 2), &product()), dec!(0));
        assert_eq!(discounted_revenue(&item(dec!(7.5), dec!(99.99), 3), &product()), dec!(277.47225));
    }

    #[test]
    fn gross_revenue_ignores_discount() {
        assert_eq!(gross_revenue(&item(dec!(50), dec!(20), 2), &product()), dec!(40));
    }

    #[test]
    fn oversized_line_saturates_instead_of_panicking() {
        let huge = item(dec!(0), dec!(10000000000), u64::MAX);
        assert_eq!(gross_revenue(&huge, &product()), Decimal::MAX);
        assert_eq!(discounted_revenue(&huge, &product()), Decimal::MAX);
        assert_eq!(discounted_revenue(&item(dec!(100), Decimal::MAX, 1), &product()), Decimal::ZERO);
    }

    #[test]
    fn closures_are_strategies() {
        let flat = |_item: &LineItem, _product: &Product| dec!(1);
        assert_eq!(flat.revenue(&item(dec!(0), dec!(20), 2), &product()), dec!(1));

        let fixed = |_rank: usize, _total: usize, _seller: &SellerAccumulator| dec!(100);
        assert_eq!(fixed.bonus(0, 1, &seller_with_profit(dec!(5))), dec!(100));
    }

    #[test]
    fn default_constants_match_named_functions() {
        let it = item(dec!(10), dec!(50), 4);
        assert_eq!(DEFAULT_REVENUE.revenue(&it, &product()), discounted_revenue(&it, &product()));
        let s = seller_with_profit(dec!(200));
        assert_eq!(DEFAULT_BONUS.bonus(0, 5, &s), dec!(30));
    }

    #[test]
    fn tier_rates_for_five_sellers() {
        let tiers = RankTiers::default();
        let rates: Vec<Decimal> = (0..5).map(|r| tiers.rate_for(r, 5)).collect();
        assert_eq!(rates, vec![dec!(15), dec!(10), dec!(10), dec!(5), dec!(0)]);
    }

    #[test]
    fn third_of_three_gets_podium_rate() {
        let tiers = RankTiers::default();
        assert_eq!(tiers.rate_for(0, 3), dec!(15));
        assert_eq!(tiers.rate_for(1, 3), dec!(10));
        assert_eq!(tiers.rate_for(2, 3), dec!(10));
    }

    #[test]
    fn small_totals() {
        let tiers = RankTiers::default();
        assert_eq!(tiers.rate_for(0, 1), dec!(15));
        assert_eq!(tiers.rate_for(0, 2), dec!(15));
        assert_eq!(tiers.rate_for(1, 2), dec!(10));
        // Fourth of four is last
        assert_eq!(tiers.rate_for(3, 4), dec!(0));
    }

    #[test]
    fn bonus_is_amount_of_profit() {
        let s = seller_with_profit(dec!(100));
        assert_eq!(bonus_by_profit(0, 3, &s), dec!(15));
        assert_eq!(bonus_by_profit(3, 10, &s), dec!(5));
        assert_eq!(bonus_by_profit(9, 10, &s), dec!(0));
        assert_eq!(bonus_by_profit(0, 1, &seller_with_profit(Decimal::ZERO)), dec!(0));
    }
}
