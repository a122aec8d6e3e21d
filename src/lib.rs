//! Deterministic ranking and selection engine for marketplace listings.
//!
//! `listing-core` takes the listings a collector gathered for one search and
//! ranks or selects them: rating imputation, a rating/price desirability
//! score, heap-based top-K orderings, a balanced price-range index, and a
//! budget-constrained multi-item optimizer. All operations are synchronous
//! and deterministic; identical inputs always produce identical outputs.
//!
//! Scores are returned alongside borrowed products and never written back,
//! so any number of selections can read the same [`listing::ListingStore`].

pub mod config;
pub mod index;
pub mod listing;
pub mod selection;
pub mod types;

pub use config::EngineConfig;
pub use listing::{ListingStore, Product, Rating, Site};
pub use selection::ListingSelector;
