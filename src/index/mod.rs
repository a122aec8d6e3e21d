pub mod avl;

use serde::{Deserialize, Serialize};

pub use avl::{InsertOutcome, PriceIndex};

/// What the price index does with a product whose price is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep every product; a node holds all products at its price in
    /// insertion order.
    #[default]
    Bucket,
    /// Keep only the first product seen at each price.
    KeepFirst,
}
