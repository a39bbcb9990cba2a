use log::{debug, info};

use crate::aggregate::{aggregate_sales, AggregatePolicy};
use crate::config::SalesConfig;
use crate::error::SalesError;
use crate::index::build_index;
use crate::model::{RankedSellerResult, ReportMeta, SalesData, SalesReport};
use crate::rank::{rank_sellers, DEFAULT_TOP_PRODUCTS};
use crate::strategy::{BonusStrategy, RevenueStrategy, DEFAULT_BONUS, DEFAULT_REVENUE};
use crate::summary::compute_summary;
use crate::validate::validate_input;

/// Knobs for [`analyze`]. Strategies left as `None` use the built-in defaults.
pub struct AnalyzeOptions<'a> {
    pub revenue: Option<&'a dyn RevenueStrategy>,
    pub bonus: Option<&'a dyn BonusStrategy>,
    pub top_products: usize,
    pub policy: AggregatePolicy,
}

impl Default for AnalyzeOptions<'_> {
    fn default() -> Self {
        Self {
            revenue: None,
            bonus: None,
            top_products: DEFAULT_TOP_PRODUCTS,
            policy: AggregatePolicy::default(),
        }
    }
}

/// Index, aggregate and rank. Does not run [`validate_input`].
pub fn analyze(
    data: &SalesData,
    options: &AnalyzeOptions<'_>,
) -> Result<Vec<RankedSellerResult>, SalesError> {
    Ok(analyze_with_skips(data, options)?.0)
}

fn analyze_with_skips(
    data: &SalesData,
    options: &AnalyzeOptions<'_>,
) -> Result<(Vec<RankedSellerResult>, usize, usize), SalesError> {
    if options.top_products == 0 {
        return Err(SalesError::InvalidOptions(
            "top_products must be at least 1".into(),
        ));
    }

    let revenue: &dyn RevenueStrategy = match options.revenue {
        Some(s) => s,
        None => &DEFAULT_REVENUE,
    };
    let bonus: &dyn BonusStrategy = match options.bonus {
        Some(s) => s,
        None => &DEFAULT_BONUS,
    };

    let index = build_index(&data.products, &data.sellers)?;
    debug!(
        "indexed {} products, {} sellers",
        index.products.len(),
        index.sellers.len()
    );

    let aggregation = aggregate_sales(&data.purchase_records, &index, revenue, options.policy)?;
    let (skipped_records, skipped_items) = (aggregation.skipped_records, aggregation.skipped_items);

    Ok((
        rank_sellers(aggregation, bonus, options.top_products),
        skipped_records,
        skipped_items,
    ))
}

/// Full run per config: validate, analyze, summarize.
pub fn run(config: &SalesConfig, data: &SalesData) -> Result<SalesReport, SalesError> {
    config.validate()?;
    validate_input(data)?;

    let revenue = config.revenue.strategy();
    let options = AnalyzeOptions {
        revenue: Some(&revenue),
        bonus: Some(&config.bonus),
        top_products: config.top_products,
        policy: config.policy(),
    };
    let (sellers, skipped_records, skipped_items) = analyze_with_skips(data, &options)?;
    let summary = compute_summary(&sellers, skipped_records, skipped_items)?;

    info!(
        "'{}': {} sellers, revenue {}, profit {}, bonus {}",
        config.name, summary.sellers, summary.total_revenue, summary.total_profit, summary.total_bonus
    );

    Ok(SalesReport {
        meta: ReportMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            revenue_strategy: config.revenue.to_string(),
            sales_count: config.sales_count,
            on_unknown: config.on_unknown,
            top_products: config.top_products,
        },
        summary,
        sellers,
    })
}
