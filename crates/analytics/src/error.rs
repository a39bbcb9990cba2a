use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SalesError {
    /// Malformed or missing top-level collections, out-of-range fields.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Bad analysis options (zero top-N, bonus rate out of range, ...).
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    /// A purchase record references a seller that is not in `sellers`.
    #[error("purchase_records[{record}]: unknown seller '{seller_id}'")]
    UnknownSeller { record: usize, seller_id: String },
    /// A line item references a SKU that is not in `products`.
    #[error("purchase_records[{record}]: unknown product '{sku}'")]
    UnknownProduct { record: usize, sku: String },
    /// Two products share a SKU or two sellers share an id.
    #[error("duplicate {kind} '{key}'")]
    DuplicateKey { kind: KeyKind, key: String },
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// JSON parse / deserialization error in the sales data document.
    #[error("data parse error: {0}")]
    DataParse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    ProductSku,
    SellerId,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProductSku => write!(f, "product sku"),
            Self::SellerId => write!(f, "seller id"),
        }
    }
}
