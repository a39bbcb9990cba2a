use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregatePolicy;
use crate::error::SalesError;
use crate::model::{LineItem, Product};
use crate::rank::DEFAULT_TOP_PRODUCTS;
use crate::strategy::{discounted_revenue, gross_revenue, RankTiers};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Run configuration. Every field is optional; an empty file is a valid
/// config that reproduces the built-in defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SalesConfig {
    pub name: String,
    /// N for the per-seller top products list.
    pub top_products: usize,
    pub sales_count: SalesCountMode,
    pub on_unknown: UnknownPolicy,
    pub revenue: RevenueModel,
    pub bonus: RankTiers,
}

impl Default for SalesConfig {
    fn default() -> Self {
        Self {
            name: "sales analysis".into(),
            top_products: DEFAULT_TOP_PRODUCTS,
            sales_count: SalesCountMode::default(),
            on_unknown: UnknownPolicy::default(),
            revenue: RevenueModel::default(),
            bonus: RankTiers::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Knobs
// ---------------------------------------------------------------------------

/// What `sales_count` counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesCountMode {
    /// Sum of line item quantities.
    #[default]
    Units,
    /// One per purchase record attributed to the seller with at least one
    /// resolved line item.
    Receipts,
}

impl std::fmt::Display for SalesCountMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Units => write!(f, "units"),
            Self::Receipts => write!(f, "receipts"),
        }
    }
}

/// What to do with a record or item that references an unknown key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownPolicy {
    #[default]
    Fail,
    Skip,
}

impl std::fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fail => write!(f, "fail"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Built-in revenue strategies selectable from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueModel {
    #[default]
    Discounted,
    Gross,
}

impl RevenueModel {
    pub fn strategy(&self) -> fn(&LineItem, &Product) -> Decimal {
        match self {
            Self::Discounted => discounted_revenue,
            Self::Gross => gross_revenue,
        }
    }
}

impl std::fmt::Display for RevenueModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discounted => write!(f, "discounted"),
            Self::Gross => write!(f, "gross"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl SalesConfig {
    pub fn from_toml(input: &str) -> Result<Self, SalesError> {
        let config: SalesConfig =
            toml::from_str(input).map_err(|e| SalesError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SalesError> {
        if self.top_products == 0 {
            return Err(SalesError::InvalidOptions(
                "top_products must be at least 1".into(),
            ));
        }

        let tiers = [
            ("first", self.bonus.first),
            ("podium", self.bonus.podium),
            ("last", self.bonus.last),
            ("base", self.bonus.base),
        ];
        for (tier, rate) in tiers {
            if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
                return Err(SalesError::InvalidOptions(format!(
                    "bonus.{tier} must be within 0..=100, got {rate}"
                )));
            }
        }

        Ok(())
    }

    pub fn policy(&self) -> AggregatePolicy {
        AggregatePolicy {
            on_unknown: self.on_unknown,
            sales_count: self.sales_count,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const FULL: &str = r#"
name = "Q3 seller review"
top_products = 5
sales_count = "receipts"
on_unknown = "skip"
revenue = "gross"

[bonus]
first = 20
podium = 12.5
last = 1
base = 4
"#;

    #[test]
    fn parse_full_config() {
        let config = SalesConfig::from_toml(FULL).unwrap();
        assert_eq!(config.name, "Q3 seller review");
        assert_eq!(config.top_products, 5);
        assert_eq!(config.sales_count, SalesCountMode::Receipts);
        assert_eq!(config.on_unknown, UnknownPolicy::Skip);
        assert_eq!(config.revenue, RevenueModel::Gross);
        assert_eq!(config.bonus.first, dec!(20));
        assert_eq!(config.bonus.podium, dec!(12.5));
        assert_eq!(config.bonus.last, dec!(1));
        assert_eq!(config.bonus.base, dec!(4));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = SalesConfig::from_toml("").unwrap();
        assert_eq!(config.top_products, 10);
        assert_eq!(config.sales_count, SalesCountMode::Units);
        assert_eq!(config.on_unknown, UnknownPolicy::Fail);
        assert_eq!(config.revenue, RevenueModel::Discounted);
        assert_eq!(config.bonus, RankTiers::default());
    }

    #[test]
    fn partial_bonus_table_keeps_other_defaults() {
        let config = SalesConfig::from_toml("[bonus]\nfirst = 25\n").unwrap();
        assert_eq!(config.bonus.first, dec!(25));
        assert_eq!(config.bonus.podium, dec!(10));
        assert_eq!(config.bonus.last, dec!(0));
        assert_eq!(config.bonus.base, dec!(5));
    }

    #[test]
    fn reject_unknown_revenue_model() {
        let err = SalesConfig::from_toml(r#"revenue = "net""#).unwrap_err();
        assert!(matches!(err, SalesError::ConfigParse(_)));
    }

    #[test]
    fn reject_unknown_sales_count_mode() {
        let err = SalesConfig::from_toml(r#"sales_count = "orders""#);
        assert!(err.is_err(), "typo in sales_count should fail deserialization");
    }

    #[test]
    fn reject_zero_top_products() {
        let err = SalesConfig::from_toml("top_products = 0").unwrap_err();
        assert!(matches!(err, SalesError::InvalidOptions(_)));
        assert!(err.to_string().contains("top_products"));
    }

    #[test]
    fn reject_rate_out_of_range() {
        let err = SalesConfig::from_toml("[bonus]\nbase = 150\n").unwrap_err();
        assert!(err.to_string().contains("bonus.base"));

        let err = SalesConfig::from_toml("[bonus]\nlast = -1\n").unwrap_err();
        assert!(err.to_string().contains("bonus.last"));
    }

    #[test]
    fn policy_mirrors_config() {
        let config = SalesConfig::from_toml(FULL).unwrap();
        let policy = config.policy();
        assert_eq!(policy.on_unknown, UnknownPolicy::Skip);
        assert_eq!(policy.sales_count, SalesCountMode::Receipts);
    }

    #[test]
    fn revenue_model_selects_strategy() {
        let item = LineItem {
            sku: "P1".into(),
            discount: dec!(50),
            sale_price: dec!(10),
            quantity: 2,
        };
        let product = Product {
            sku: "P1".into(),
            name: "Widget".into(),
            purchase_price: dec!(1),
        };
        assert_eq!((RevenueModel::Discounted.strategy())(&item, &product), dec!(10));
        assert_eq!((RevenueModel::Gross.strategy())(&item, &product), dec!(20));
    }

    #[test]
    fn display_matches_config_spelling() {
        assert_eq!(SalesCountMode::Receipts.to_string(), "receipts");
        assert_eq!(UnknownPolicy::Skip.to_string(), "skip");
        assert_eq!(RevenueModel::Gross.to_string(), "gross");
    }
}
