//! `salesboard-analytics`: seller performance analytics engine.
//!
//! Pure engine crate: receives pre-loaded sales data, returns ranked seller
//! results with bonuses and top products. No CLI or IO dependencies.

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod model;
pub mod money;
pub mod rank;
pub mod strategy;
pub mod summary;
pub mod validate;

pub use config::SalesConfig;
pub use engine::{analyze, run, AnalyzeOptions};
pub use error::SalesError;
pub use model::{RankedSellerResult, SalesData, SalesReport, TopProduct};
pub use strategy::{BonusStrategy, RankTiers, RevenueStrategy};
