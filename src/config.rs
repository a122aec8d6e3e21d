use serde::{Deserialize, Serialize};

use crate::index::DuplicatePolicy;

// Serializable, comparable, explicit defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Rating imputed when no listing carries a known rating.
    pub default_rating: f64,
    pub duplicate_policy: DuplicatePolicy,
    /// Largest `items * (budget + 1) * (max_items + 1)` the exact budget
    /// optimizer will allocate before switching to the greedy fallback.
    pub max_exact_cells: usize,
}

impl EngineConfig {
    pub fn v0() -> Self {
        Self {
            default_rating: 4.0,
            duplicate_policy: DuplicatePolicy::Bucket,
            max_exact_cells: 20_000_000,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::v0()
    }
}
