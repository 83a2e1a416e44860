//! Catalog fetching. The catalog is a static JSON array of products served
//! over HTTP; one GET per load, parsed in full.

use log::{debug, info, warn};

use super::types::{CatalogError, Product};

pub struct CatalogClient {
    url: String,
    client: reqwest::Client,
}

impl CatalogClient {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    /// Fetches and parses the full catalog document.
    pub async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        info!("Fetching catalog from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        debug!("Catalog response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Catalog fetch failed: {} - {}", status, message);
            return Err(CatalogError::Api { status, message });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        let products: Vec<Product> =
            serde_json::from_str(&body).map_err(|e| CatalogError::Parse(e.to_string()))?;

        info!("Catalog loaded: {} products", products.len());
        Ok(products)
    }
}
