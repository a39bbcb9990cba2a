use indexmap::IndexMap;
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::config::{SalesCountMode, UnknownPolicy};
use crate::error::SalesError;
use crate::index::Index;
use crate::model::{Aggregation, PurchaseRecord, SellerAccumulator};
use crate::strategy::RevenueStrategy;

/// How the aggregation pass treats unknown references and what it counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregatePolicy {
    pub on_unknown: UnknownPolicy,
    pub sales_count: SalesCountMode,
}

/// One pass over all purchase records, accumulating per-seller totals.
///
/// Every known seller gets an accumulator (in seller input order) even if
/// they have no records. Records and items are visited in input order.
///
/// Money and count totals use checked arithmetic. A line item whose
/// `sale_price * quantity` or `purchase_price * quantity` does not fit, or
/// that would overflow a running total, fails the whole pass with
/// [`SalesError::InvalidInput`].
pub fn aggregate_sales(
    records: &[PurchaseRecord],
    index: &Index<'_>,
    revenue: &dyn RevenueStrategy,
    policy: AggregatePolicy,
) -> Result<Aggregation, SalesError> {
    let mut sellers: IndexMap<String, SellerAccumulator> = index
        .sellers
        .values()
        .map(|s| (s.id.clone(), SellerAccumulator::new(s)))
        .collect();
    let mut skipped_records = 0;
    let mut skipped_items = 0;

    for (record_idx, record) in records.iter().enumerate() {
        let Some(acc) = sellers.get_mut(record.seller_id.as_str()) else {
            match policy.on_unknown {
                UnknownPolicy::Fail => {
                    return Err(SalesError::UnknownSeller {
                        record: record_idx,
                        seller_id: record.seller_id.clone(),
                    })
                }
                UnknownPolicy::Skip => {
                    warn!(
                        "skipping purchase_records[{record_idx}] (receipt '{}'): unknown seller '{}'",
                        record.receipt_id, record.seller_id
                    );
                    skipped_records += 1;
                    continue;
                }
            }
        };

        let mut resolved_any = false;
        for (item_idx, item) in record.items.iter().enumerate() {
            let Some(product) = index.product(&item.sku) else {
                match policy.on_unknown {
                    UnknownPolicy::Fail => {
                        return Err(SalesError::UnknownProduct {
                            record: record_idx,
                            sku: item.sku.clone(),
                        })
                    }
                    UnknownPolicy::Skip => {
                        warn!(
                            "skipping item in purchase_records[{record_idx}] (receipt '{}'): unknown product '{}'",
                            record.receipt_id, item.sku
                        );
                        skipped_items += 1;
                        continue;
                    }
                }
            };

            let overflow = || amount_overflow(record_idx, item_idx);
            let quantity = Decimal::from(item.quantity);
            if item.sale_price.checked_mul(quantity).is_none() {
                return Err(overflow());
            }
            let cost = product.purchase_price.checked_mul(quantity).ok_or_else(overflow)?;
            let item_revenue = revenue.revenue(item, product);
            let profit = item_revenue.checked_sub(cost).ok_or_else(overflow)?;
            acc.record_sale(product, item.quantity, item_revenue, profit).ok_or_else(overflow)?;

            if policy.sales_count == SalesCountMode::Units {
                acc.sales_count = acc.sales_count.checked_add(item.quantity).ok_or_else(overflow)?;
            }
            resolved_any = true;
        }

        // A receipt whose items were all skipped is not a sale.
        if policy.sales_count == SalesCountMode::Receipts && resolved_any {
            acc.sales_count += 1;
        }
    }

    debug!(
        "aggregated {} records into {} sellers ({} records, {} items skipped)",
        records.len(),
        sellers.len(),
        skipped_records,
        skipped_items
    );

    Ok(Aggregation {
        sellers,
        skipped_records,
        skipped_items,
    })
}

fn amount_overflow(record: usize, item: usize) -> SalesError {
    SalesError::InvalidInput(format!(
        "purchase_records[{record}].items[{item}]: amount overflow"
    ))
}
