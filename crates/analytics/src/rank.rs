use log::debug;

use crate::model::{Aggregation, RankedSellerResult, SellerAccumulator, TopProduct};
use crate::money::round_money;
use crate::strategy::BonusStrategy;

/// Per-seller top products kept when nothing else is configured.
pub const DEFAULT_TOP_PRODUCTS: usize = 10;

/// Order sellers by profit, assign bonuses, and cut each product list to
/// `top_n` entries.
///
/// Sorting compares unrounded profit and is stable, so equal profits keep
/// seller input order. Bonuses are computed from unrounded figures; rounding
/// happens last.
pub fn rank_sellers(
    aggregation: Aggregation,
    bonus: &dyn BonusStrategy,
    top_n: usize,
) -> Vec<RankedSellerResult> {
    let mut sellers: Vec<SellerAccumulator> = aggregation.sellers.into_values().collect();
    sellers.sort_by(|a, b| b.profit.cmp(&a.profit));

    let total = sellers.len();
    debug!("ranking {total} sellers, top {top_n} products each");

    sellers
        .into_iter()
        .enumerate()
        .map(|(rank, acc)| {
            let seller_bonus = bonus.bonus(rank, total, &acc);
            RankedSellerResult {
                top_products: top_products(&acc, top_n),
                seller_id: acc.seller_id,
                name: acc.name,
                revenue: round_money(acc.revenue),
                profit: round_money(acc.profit),
                sales_count: acc.sales_count,
                bonus: round_money(seller_bonus),
            }
        })
        .collect()
}

/// Highest-revenue products first; ties keep first-sale order.
fn top_products(acc: &SellerAccumulator, top_n: usize) -> Vec<TopProduct> {
    let mut tallies: Vec<_> = acc.products_sold.iter().collect();
    tallies.sort_by(|(_, a), (_, b)| b.revenue.cmp(&a.revenue));
    tallies
        .into_iter()
        .take(top_n)
        .map(|(sku, tally)| TopProduct {
            product_id: sku.clone(),
            name: tally.name.clone(),
            quantity: tally.quantity,
            revenue: round_money(tally.revenue),
        })
        .collect()
}
