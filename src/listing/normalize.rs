//! Conversion of raw collector text into typed listing fields.
//!
//! Collectors scrape free-form strings such as `"₹1,299"`, `"45% off"` or
//! `"4.3 out of 5 stars"`. Anything that cannot be read becomes `None`;
//! nothing here fails.

use serde::{Deserialize, Serialize};

use super::product::{Product, Rating, Site};

/// Marker collectors emit for a field they could not find.
pub const MISSING: &str = "N/A";

/// A listing exactly as a collector scraped it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListing {
    pub name: String,
    pub price: String,
    pub discount: String,
    pub rating: String,
    pub link: String,
    pub site: String,
}

fn digits(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw == MISSING {
        return None;
    }
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

/// Reads a price by keeping only its digits: `"₹1,299"` is `1299`.
pub fn parse_price(raw: &str) -> Option<u64> {
    digits(raw)?.parse().ok()
}

/// Reads a discount percentage: `"45% off"` is `45`. Values above 100 are
/// rejected.
pub fn parse_discount(raw: &str) -> Option<u32> {
    let percent: u32 = digits(raw)?.parse().ok()?;
    (percent <= 100).then_some(percent)
}

/// Reads a rating from the first whitespace-separated token.
pub fn parse_rating(raw: &str) -> Option<Rating> {
    let raw = raw.trim();
    if raw == MISSING {
        return None;
    }
    let token = raw.split_whitespace().next()?;
    let value: f64 = token.parse().ok()?;
    Rating::new(value).ok()
}

impl From<RawListing> for Product {
    fn from(raw: RawListing) -> Self {
        let price = parse_price(&raw.price);
        let discount_percent = parse_discount(&raw.discount);
        let rating = parse_rating(&raw.rating);

        Product {
            name: raw.name.trim().to_string(),
            price,
            discount_percent,
            rating,
            link: raw.link,
            site: Site::from_name(&raw.site),
        }
    }
}

impl Product {
    pub fn from_raw(raw: RawListing) -> Self {
        raw.into()
    }
}
