//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::Product;
use crate::completion::{
    CompletionError, CompletionProvider, CompletionRequest,
};
use crate::core::state::App;

/// A no-op provider for tests that don't need real API calls.
pub struct NoopProvider;

#[async_trait]
impl CompletionProvider for NoopProvider {
    fn name(&self) -> &str {
        "noop"
    }

    async fn complete(
        &self,
        _request: CompletionRequest<'_>,
    ) -> Result<String, CompletionError> {
        Ok(String::new())
    }
}

/// A provider that always replies with a fixed string.
pub struct CannedProvider {
    pub reply: String,
}

#[async_trait]
impl CompletionProvider for CannedProvider {
    fn name(&self) -> &str {
        "canned"
    }

    async fn complete(
        &self,
        _request: CompletionRequest<'_>,
    ) -> Result<String, CompletionError> {
        Ok(self.reply.clone())
    }
}

/// A provider that always fails with a malformed-response error.
pub struct FailingProvider;

#[async_trait]
impl CompletionProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(
        &self,
        _request: CompletionRequest<'_>,
    ) -> Result<String, CompletionError> {
        Err(CompletionError::Malformed(
            "response contained no choices".to_string(),
        ))
    }
}

/// Creates a test App with a NoopProvider.
pub fn test_app() -> App {
    App::new(Arc::new(NoopProvider), "test-model".to_string())
}

/// A single product with the given id and category.
pub fn sample_product(id: u32, category: &str) -> Product {
    Product {
        id,
        name: format!("Product {id}"),
        brand: "Brand".to_string(),
        category: category.to_string(),
        description: format!("Description of product {id}."),
        image: format!("https://example.com/{id}.png"),
    }
}

/// A small catalog spanning three categories.
pub fn sample_catalog() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Rose Cleanser".to_string(),
            brand: "Glow Labs".to_string(),
            category: "skincare".to_string(),
            description: "Gentle foaming cleanser with rose water.".to_string(),
            image: "https://example.com/rose-cleanser.png".to_string(),
        },
        Product {
            id: 2,
            name: "Velvet Lipstick".to_string(),
            brand: "Maison Rouge".to_string(),
            category: "makeup".to_string(),
            description: "Matte finish, long wear.".to_string(),
            image: "https://example.com/velvet-lipstick.png".to_string(),
        },
        Product {
            id: 3,
            name: "Silk Shampoo".to_string(),
            brand: "Glow Labs".to_string(),
            category: "haircare".to_string(),
            description: "Sulfate-free daily shampoo.".to_string(),
            image: "https://example.com/silk-shampoo.png".to_string(),
        },
        Product {
            id: 4,
            name: "Dew Moisturizer".to_string(),
            brand: "Pure Theory".to_string(),
            category: "skincare".to_string(),
            description: "Lightweight gel moisturizer with hyaluronic acid.".to_string(),
            image: "https://example.com/dew-moisturizer.png".to_string(),
        },
    ]
}
