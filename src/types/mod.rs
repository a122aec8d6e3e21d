pub mod identifiers;
pub mod results;

pub use identifiers::StoreVersion;
pub use results::{
    BudgetSelection, ImputationReport, PriceOrder, PriceRange, RangeRecommendation,
    ScoredListing, SelectionError, SelectionMethod,
};
