use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::listing::Product;

/// Content hash of a listing batch.
///
/// Two stores holding the same records in the same order share a version,
/// so a selection result can be traced back to the snapshot it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreVersion(String);

impl StoreVersion {
    pub fn from_products(products: &[Product]) -> Self {
        let mut hasher = Sha256::new();

        for product in products {
            // One record per line, fields separated by the ASCII unit separator.
            let line = format!(
                "{}\u{1f}{}\u{1f}{}\u{1f}{}\u{1f}{}\u{1f}{}\n",
                product.site,
                product.name,
                optional(product.price),
                optional(product.discount_percent),
                optional(product.rating.map(|r| r.value())),
                product.link,
            );
            hasher.update(line.as_bytes());
        }

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        StoreVersion(format!("sha256:{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn optional<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
