use rust_decimal::Decimal;

use crate::error::SalesError;
use crate::model::{RankedSellerResult, ReportSummary};

/// Totals over ranked results. Sums the already-rounded seller figures, so
/// the summary always agrees with the table a reader sees.
pub fn compute_summary(
    sellers: &[RankedSellerResult],
    skipped_records: usize,
    skipped_items: usize,
) -> Result<ReportSummary, SalesError> {
    let mut total_revenue = Decimal::ZERO;
    let mut total_profit = Decimal::ZERO;
    let mut total_bonus = Decimal::ZERO;
    let mut total_sales_count: u64 = 0;

    for s in sellers {
        let overflow = || {
            SalesError::InvalidInput(format!("report totals overflow at seller '{}'", s.seller_id))
        };
        total_revenue = total_revenue.checked_add(s.revenue).ok_or_else(overflow)?;
        total_profit = total_profit.checked_add(s.profit).ok_or_else(overflow)?;
        total_bonus = total_bonus.checked_add(s.bonus).ok_or_else(overflow)?;
        total_sales_count = total_sales_count.checked_add(s.sales_count).ok_or_else(overflow)?;
    }

    Ok(ReportSummary {
        sellers: sellers.len(),
        total_revenue,
        total_profit,
        total_bonus,
        total_sales_count,
        skipped_records,
        skipped_items,
        top_seller: sellers.first().map(|s| s.seller_id.clone()),
    })
}
