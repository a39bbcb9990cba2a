use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{SalesCountMode, UnknownPolicy};
use crate::error::SalesError;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Catalog entry. `sku` is the unique key.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub sku: String,
    pub name: String,
    pub purchase_price: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Seller {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Seller {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One receipt. Items keep their input order.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseRecord {
    #[serde(default)]
    pub receipt_id: String,
    pub seller_id: String,
    #[serde(default)]
    pub total_amount: Decimal,
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineItem {
    pub sku: String,
    /// Percent, 0..=100.
    pub discount: Decimal,
    pub sale_price: Decimal,
    pub quantity: u64,
}

/// The complete dataset for one analysis run.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesData {
    pub sellers: Vec<Seller>,
    pub products: Vec<Product>,
    pub purchase_records: Vec<PurchaseRecord>,
}

impl SalesData {
    pub fn from_json(input: &str) -> Result<Self, SalesError> {
        serde_json::from_str(input).map_err(|e| SalesError::DataParse(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Running per-product totals for one seller.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductTally {
    pub name: String,
    pub quantity: u64,
    pub revenue: Decimal,
}

/// Mutable running totals for one seller. Lives only for one analysis run.
#[derive(Debug, Clone)]
pub struct SellerAccumulator {
    pub seller_id: String,
    pub name: String,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub sales_count: u64,
    /// SKU -> tally, in first-sale order.
    pub products_sold: IndexMap<String, ProductTally>,
}

impl SellerAccumulator {
    pub fn new(seller: &Seller) -> Self {
        Self {
            seller_id: seller.id.clone(),
            name: seller.display_name(),
            revenue: Decimal::ZERO,
            profit: Decimal::ZERO,
            sales_count: 0,
            products_sold: IndexMap::new(),
        }
    }

    /// Add one resolved line item to the running totals.
    ///
    /// Returns `None` if any running total would overflow. The accumulator
    /// is left untouched in that case.
    pub fn record_sale(
        &mut self,
        product: &Product,
        quantity: u64,
        revenue: Decimal,
        profit: Decimal,
    ) -> Option<()> {
        let total_revenue = self.revenue.checked_add(revenue)?;
        let total_profit = self.profit.checked_add(profit)?;
        let (sold, sold_revenue) = match self.products_sold.get(&product.sku) {
            Some(t) => (t.quantity.checked_add(quantity)?, t.revenue.checked_add(revenue)?),
            None => (quantity, revenue),
        };

        self.revenue = total_revenue;
        self.profit = total_profit;
        let tally = self
            .products_sold
            .entry(product.sku.clone())
            .or_insert_with(|| ProductTally {
                name: product.name.clone(),
                quantity: 0,
                revenue: Decimal::ZERO,
            });
        tally.quantity = sold;
        tally.revenue = sold_revenue;
        Some(())
    }
}

/// Output of the aggregation pass, keyed by seller id in seller input order.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub sellers: IndexMap<String, SellerAccumulator>,
    pub skipped_records: usize,
    pub skipped_items: usize,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProduct {
    pub product_id: String,
    pub name: String,
    pub quantity: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

/// Final, rounded figures for one seller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSellerResult {
    pub seller_id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
    pub sales_count: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub bonus: Decimal,
    pub top_products: Vec<TopProduct>,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    pub meta: ReportMeta,
    pub summary: ReportSummary,
    pub sellers: Vec<RankedSellerResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub revenue_strategy: String,
    pub sales_count: SalesCountMode,
    pub on_unknown: UnknownPolicy,
    pub top_products: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub sellers: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_profit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_bonus: Decimal,
    pub total_sales_count: u64,
    pub skipped_records: usize,
    pub skipped_items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_seller: Option<String>,
}
