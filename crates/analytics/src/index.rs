use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{KeyKind, SalesError};
use crate::model::{Product, Seller};

/// Key lookups built once per run. Borrowed from the input data.
#[derive(Debug)]
pub struct Index<'a> {
    pub products: HashMap<&'a str, &'a Product>,
    /// Seller input order is kept; ranking ties depend on it.
    pub sellers: IndexMap<&'a str, &'a Seller>,
}

impl<'a> Index<'a> {
    pub fn product(&self, sku: &str) -> Option<&'a Product> {
        self.products.get(sku).copied()
    }
}

/// Build SKU and seller-id lookups. Any repeated key is an error.
pub fn build_index<'a>(
    products: &'a [Product],
    sellers: &'a [Seller],
) -> Result<Index<'a>, SalesError> {
    let mut product_map = HashMap::with_capacity(products.len());
    for p in products {
        if product_map.insert(p.sku.as_str(), p).is_some() {
            return Err(SalesError::DuplicateKey {
                kind: KeyKind::ProductSku,
                key: p.sku.clone(),
            });
        }
    }

    let mut seller_map = IndexMap::with_capacity(sellers.len());
    for s in sellers {
        if seller_map.insert(s.id.as_str(), s).is_some() {
            return Err(SalesError::DuplicateKey {
                kind: KeyKind::SellerId,
                key: s.id.clone(),
            });
        }
    }

    Ok(Index {
        products: product_map,
        sellers: seller_map,
    })
}
