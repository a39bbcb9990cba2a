use rust_decimal::Decimal;

use crate::error::SalesError;
use crate::model::SalesData;

/// Shape and range checks on a loaded dataset. Returns the first violation.
///
/// Referential integrity (unknown sellers/SKUs, duplicate keys) is left to
/// the indexer and aggregator, which know the configured policy.
pub fn validate_input(data: &SalesData) -> Result<(), SalesError> {
    if data.sellers.is_empty() {
        return Err(invalid("sellers must not be empty"));
    }
    if data.products.is_empty() {
        return Err(invalid("products must not be empty"));
    }
    if data.purchase_records.is_empty() {
        return Err(invalid("purchase_records must not be empty"));
    }

    for (i, s) in data.sellers.iter().enumerate() {
        if s.id.trim().is_empty() {
            return Err(invalid(format!("sellers[{i}]: id must not be empty")));
        }
    }

    for (i, p) in data.products.iter().enumerate() {
        if p.sku.trim().is_empty() {
            return Err(invalid(format!("products[{i}]: sku must not be empty")));
        }
        if p.purchase_price < Decimal::ZERO {
            return Err(invalid(format!(
                "products[{i}] ('{}'): purchase_price must be >= 0, got {}",
                p.sku, p.purchase_price
            )));
        }
    }

    for (i, r) in data.purchase_records.iter().enumerate() {
        for (j, item) in r.items.iter().enumerate() {
            let at = format!("purchase_records[{i}].items[{j}]");
            if item.discount < Decimal::ZERO || item.discount > Decimal::ONE_HUNDRED {
                return Err(invalid(format!(
                    "{at}: discount must be within 0..=100, got {}",
                    item.discount
                )));
            }
            if item.sale_price < Decimal::ZERO {
                return Err(invalid(format!(
                    "{at}: sale_price must be >= 0, got {}",
                    item.sale_price
                )));
            }
            if item.quantity == 0 {
                return Err(invalid(format!("{at}: quantity must be > 0")));
            }
            if item.sale_price.checked_mul(Decimal::from(item.quantity)).is_none() {
                return Err(invalid(format!(
                    "{at}: sale_price * quantity is too large, got {} * {}",
                    item.sale_price, item.quantity
                )));
            }
        }
    }

    Ok(())
}

fn invalid(msg: impl Into<String>) -> SalesError {
    SalesError::InvalidInput(msg.into())
}
