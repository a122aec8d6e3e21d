use std::cmp::Ordering;

use crate::listing::Product;
use crate::types::results::ScoredListing;

/// Smallest price the score formula divides by. `log10(1)` is zero, so
/// prices of 0 and 1 are scored as if they were 2.
pub const MIN_SCORED_PRICE: u64 = 2;

pub trait Scorer {
    /// `None` when the product lacks the fields the score needs.
    fn score(&self, product: &Product) -> Option<f64>;
}

/// v0: `rating² / log10(max(price, 2))`
///
/// The price is floored at 2 rather than 1: `log10(1)` is zero, so a floor
/// of 1 would divide by zero for prices 0 and 1. Those prices score the same
/// as a price of 2.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingPriceScorer;

impl Scorer for RatingPriceScorer {
    fn score(&self, product: &Product) -> Option<f64> {
        let price = product.price?;
        let rating = product.rating?.value();

        let denominator = (price.max(MIN_SCORED_PRICE) as f64).log10();
        let score = rating * rating / denominator;
        debug_assert!(score.is_finite() && score >= 0.0, "score {score} for price {price}");
        Some(score)
    }
}

/// Scores one product with [`RatingPriceScorer`]: `rating² / log10(max(price, 2))`.
///
/// Prices below [`MIN_SCORED_PRICE`] are raised to it, since `log10(1)` is
/// zero. `None` when the price or rating is unknown.
pub fn score(product: &Product) -> Option<f64> {
    RatingPriceScorer.score(product)
}

/// Scores every product that can be scored, keeping collection order.
pub fn score_all<'a, S: Scorer + ?Sized>(
    scorer: &'a S,
    products: &'a [Product],
) -> impl Iterator<Item = ScoredListing<'a>> + 'a {
    products.iter().filter_map(move |product| {
        scorer
            .score(product)
            .map(|score| ScoredListing { product, score })
    })
}

/// Total order over scores for heap keys. Scores are always finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct OrderedScore(pub f64);

impl Eq for OrderedScore {}

impl PartialOrd for OrderedScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
