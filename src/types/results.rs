use serde::{Deserialize, Serialize};

use crate::listing::Product;

/// Direction for the price-ordered top-K.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceOrder {
    Ascending,
    Descending,
}

/// A validated, inclusive price range.
///
/// Construction rejects negative, non-finite and inverted bounds, so an
/// existing `PriceRange` is always queryable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Result<Self, SelectionError> {
        for bound in [min, max] {
            if !bound.is_finite() {
                return Err(SelectionError::NonFinitePrice(bound));
            }
            if bound < 0.0 {
                return Err(SelectionError::NegativePrice(bound));
            }
        }
        if min > max {
            return Err(SelectionError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Integer prices covered by the range: `ceil(min)..=floor(max)`.
    ///
    /// `None` when no integer lies inside, e.g. `[10.2, 10.8]`.
    pub fn integer_bounds(&self) -> Option<(u64, u64)> {
        // Float-to-int `as` casts saturate, which is the intent for huge bounds.
        let lower = self.min.ceil() as u64;
        let upper = self.max.floor() as u64;
        (lower <= upper).then_some((lower, upper))
    }

    pub fn contains(&self, price: u64) -> bool {
        let price = price as f64;
        self.min <= price && price <= self.max
    }
}

/// A product paired with the score computed for this call.
///
/// Scores are never written back onto the product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredListing<'a> {
    pub product: &'a Product,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImputationReport {
    pub imputed_count: usize,
    /// Unrounded mean of the known ratings, or the default when none were known.
    pub mean_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeRecommendation<'a> {
    pub range: PriceRange,
    /// Products the index returned for the range, before the `k` cap.
    pub candidates: usize,
    pub listings: Vec<ScoredListing<'a>>,
}

/// How a budget selection was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMethod {
    /// Exact dynamic program; the selection is optimal.
    Exact,
    /// Score-per-price greedy used when the DP table would be too large.
    Greedy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSelection<'a> {
    /// In collection order.
    pub selected: Vec<ScoredListing<'a>>,
    pub total_score: f64,
    pub total_cost: u64,
    pub method: SelectionMethod,
}

impl<'a> BudgetSelection<'a> {
    pub fn empty() -> Self {
        Self {
            selected: Vec::new(),
            total_score: 0.0,
            total_cost: 0,
            method: SelectionMethod::Exact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error("Invalid price bound: {0} is negative")]
    NegativePrice(f64),

    #[error("Invalid price bound: {0} is not finite")]
    NonFinitePrice(f64),

    #[error("Invalid price range: minimum {min} exceeds maximum {max}")]
    InvertedRange { min: f64, max: f64 },

    #[error("Invalid budget: {0}")]
    InvalidBudget(i64),

    #[error("Invalid max items: {0}")]
    InvalidMaxItems(i64),
}
