pub mod budgeting;
pub mod imputation;
pub mod ranking;
pub mod top_k;

use std::cmp::Ordering;

use crate::config::EngineConfig;
use crate::index::PriceIndex;
use crate::listing::Product;
use crate::types::results::{
	BudgetSelection, ImputationReport, PriceOrder, PriceRange, RangeRecommendation, ScoredListing,
	SelectionError,
};
pub use budgeting::optimize;
pub use imputation::impute_ratings;
pub use ranking::{score, score_all, RatingPriceScorer, Scorer, MIN_SCORED_PRICE};
pub use top_k::{top_k_by_discount, top_k_by_price, top_k_by_rating, top_k_by_score};

/// Validates caller input and runs the selection paths over one batch of
/// listings. Only [`ListingSelector::impute_ratings`] mutates the products.
pub struct ListingSelector<S> {
	scorer: S,
	config: EngineConfig,
}

impl Default for ListingSelector<RatingPriceScorer> {
	fn default() -> Self {
		Self {
			scorer: RatingPriceScorer,
			config: EngineConfig::v0(),
		}
	}
}

impl<S> ListingSelector<S>
where
	S: Scorer,
{
	pub fn new(scorer: S, config: EngineConfig) -> Self {
		Self { scorer, config }
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	pub fn scorer(&self) -> &S {
		&self.scorer
	}

	/// Fills unknown ratings, falling back to the configured
	/// `default_rating` when no product has a known one.
	pub fn impute_ratings(&self, products: &mut [Product]) -> ImputationReport {
		impute_ratings(products, self.config.default_rating)
	}

	pub fn top_k_by_price<'a>(&self, products: &'a [Product], k: usize, order: PriceOrder) -> Vec<&'a Product> {
		top_k_by_price(products, k, order)
	}

	pub fn top_k_by_rating<'a>(&self, products: &'a [Product], k: usize) -> Vec<&'a Product> {
		top_k_by_rating(products, k)
	}

	pub fn top_k_by_discount<'a>(&self, products: &'a [Product], k: usize) -> Vec<&'a Product> {
		top_k_by_discount(products, k)
	}

	pub fn top_k_by_score<'a>(&self, products: &'a [Product], k: usize) -> Vec<ScoredListing<'a>> {
		top_k_by_score(products, k, &self.scorer)
	}

	/// Indexes the products by price, takes those inside `[min_price, max_price]`
	/// and returns the `k` best by score.
	///
	/// Equal scores keep ascending price order, so the cheaper product ranks
	/// first; products at the same price keep collection order.
	pub fn range_recommend<'a>(
		&self,
		products: &'a [Product],
		min_price: f64,
		max_price: f64,
		k: usize,
	) -> Result<RangeRecommendation<'a>, SelectionError> {
		// 0. Validation before any indexing
		let range = PriceRange::new(min_price, max_price)?;

		// 1. Index and query
		let in_range = match range.integer_bounds() {
			Some((lower, upper)) => {
				PriceIndex::from_products(products, self.config.duplicate_policy).range(lower, upper)
			}
			None => Vec::new(),
		};
		debug_assert!(in_range.iter().all(|p| p.price.is_some_and(|price| range.contains(price))));

		// 2. Scoring Phase
		let mut listings: Vec<ScoredListing<'a>> = in_range
			.iter()
			.filter_map(|&product| {
				self.scorer
					.score(product)
					.map(|score| ScoredListing { product, score })
			})
			.collect();

		// 3. Ordering Phase
		// Stable sort by score desc; ties keep ascending price, then collection order
		listings.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
		listings.truncate(k);

		tracing::debug!(
			min_price = range.min(),
			max_price = range.max(),
			candidates = in_range.len(),
			returned = listings.len(),
			"Range recommendation"
		);

		Ok(RangeRecommendation {
			range,
			candidates: in_range.len(),
			listings,
		})
	}

	/// Rejects a non-positive `budget` or `max_items`, then runs the budget
	/// optimizer.
	pub fn budget_select<'a>(
		&self,
		products: &'a [Product],
		budget: i64,
		max_items: i64,
	) -> Result<BudgetSelection<'a>, SelectionError> {
		let budget = u64::try_from(budget)
			.ok()
			.filter(|&b| b >= 1)
			.ok_or(SelectionError::InvalidBudget(budget))?;
		let max_items = usize::try_from(max_items)
			.ok()
			.filter(|&m| m >= 1)
			.ok_or(SelectionError::InvalidMaxItems(max_items))?;

		Ok(optimize(
			products,
			budget,
			max_items,
			&self.scorer,
			self.config.max_exact_cells,
		))
	}
}
