pub mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::{CatalogError, Product, distinct_categories, filter_by_category};
