pub mod normalize;
pub mod product;
pub mod store;

pub use normalize::{parse_discount, parse_price, parse_rating, RawListing};
pub use product::{Product, Rating, RatingError, Site};
pub use store::{CollectError, Collector, ListingStore};
