use chrono::{DateTime, Utc};
use thiserror::Error;

use super::product::{Product, Site};
use crate::config::EngineConfig;
use crate::selection::imputation::impute_ratings;
use crate::types::identifiers::StoreVersion;
use crate::types::results::ImputationReport;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("{site} is unavailable: {reason}")]
    Unavailable { site: Site, reason: String },
    #[error("{site} returned a page that could not be parsed: {reason}")]
    Malformed { site: Site, reason: String },
}

/// A source of listings, one per marketplace.
///
/// Implementations normalize every field before returning
/// (see [`crate::listing::normalize`]).
pub trait Collector {
    fn site(&self) -> Site;

    fn collect(&self, query: &str, max_results: usize) -> Result<Vec<Product>, CollectError>;
}

/// The listings gathered for one query session.
///
/// Append-only: records are never removed or reordered, so a record's
/// position is its collection order.
#[derive(Debug, Clone)]
pub struct ListingStore {
    products: Vec<Product>,
    collected_at: DateTime<Utc>, // informational only
}

impl Default for ListingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingStore {
    pub fn new() -> Self {
        Self::from_products(Vec::new())
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            products,
            collected_at: Utc::now(),
        }
    }

    /// Runs every collector in order and merges what they return.
    ///
    /// A failing source is logged and skipped; the remaining sources still
    /// contribute.
    pub fn gather(collectors: &[&dyn Collector], query: &str, max_results: usize) -> Self {
        tracing::info!(query = %query, sources = collectors.len(), "Collecting listings");

        let mut store = Self::new();
        for collector in collectors {
            let site = collector.site();
            match collector.collect(query, max_results) {
                Ok(products) => {
                    tracing::info!(site = %site, count = products.len(), "Listings collected");
                    store.extend(products);
                }
                Err(err) => {
                    tracing::warn!(site = %site, error = %err, "Skipping source");
                }
            }
        }

        tracing::info!(query = %query, total = store.len(), "Collection finished");
        store
    }

    pub fn push(&mut self, product: Product) {
        self.products.push(product);
    }

    pub fn extend(&mut self, products: impl IntoIterator<Item = Product>) {
        self.products.extend(products);
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn collected_at(&self) -> DateTime<Utc> {
        self.collected_at
    }

    pub fn version(&self) -> StoreVersion {
        StoreVersion::from_products(&self.products)
    }

    /// Fills unknown ratings in place using `config.default_rating` as the
    /// fallback mean. See [`impute_ratings`].
    pub fn impute_ratings(&mut self, config: &EngineConfig) -> ImputationReport {
        impute_ratings(&mut self.products, config.default_rating)
    }
}

impl AsRef<[Product]> for ListingStore {
    fn as_ref(&self) -> &[Product] {
        &self.products
    }
}
