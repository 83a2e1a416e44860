use std::fmt;

use serde::{Deserialize, Serialize};

/// A single catalog record, carried verbatim from the catalog document.
/// Identity is `id`; everything else is display data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub image: String,
}

/// Errors that can occur while loading the catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// No catalog URL configured.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The catalog host returned an error response.
    Api { status: u16, message: String },
    /// The document did not parse as a product list.
    Parse(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Config(msg) => write!(f, "config error: {msg}"),
            CatalogError::Network(msg) => write!(f, "network error: {msg}"),
            CatalogError::Api { status, message } => {
                write!(f, "catalog error (HTTP {status}): {message}")
            }
            CatalogError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Retains only products whose `category` field equals `category`, order
/// preserved. `None` or an empty string keeps the full catalog.
pub fn filter_by_category(products: &[Product], category: Option<&str>) -> Vec<Product> {
    match category {
        Some(c) if !c.is_empty() => products
            .iter()
            .filter(|p| p.category == c)
            .cloned()
            .collect(),
        _ => products.to_vec(),
    }
}

/// Distinct categories in catalog order (first occurrence wins).
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for product in products {
        if !categories.iter().any(|c| c == &product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}
