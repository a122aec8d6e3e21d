use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marketplace a listing was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Site {
    Amazon,
    Myntra,
    Snapdeal,
    ShopClues,
    Flipkart,
    #[default]
    Unknown,
}

impl Site {
    pub const ALL: [Site; 5] = [
        Site::Amazon,
        Site::Myntra,
        Site::Snapdeal,
        Site::ShopClues,
        Site::Flipkart,
    ];

    /// Case-insensitive lookup by display name. Unrecognized names map to
    /// `Site::Unknown`.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|site| site.as_str().eq_ignore_ascii_case(name))
            .unwrap_or(Site::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Amazon => "Amazon",
            Site::Myntra => "Myntra",
            Site::Snapdeal => "Snapdeal",
            Site::ShopClues => "ShopClues",
            Site::Flipkart => "Flipkart",
            Site::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatingError {
    #[error("Rating {0} is outside [0, 5]")]
    OutOfRange(f64),
    #[error("Rating must be a finite number")]
    NotFinite,
}

/// A star rating in `[0, 5]`.
///
/// Always finite, which is what makes the total order below sound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    pub const ZERO: Rating = Rating(0.0);
    pub const MAX: f64 = 5.0;

    pub fn new(value: f64) -> Result<Self, RatingError> {
        if !value.is_finite() {
            return Err(RatingError::NotFinite);
        }
        if !(0.0..=Self::MAX).contains(&value) {
            return Err(RatingError::OutOfRange(value));
        }
        // Adding zero folds -0.0 into +0.0 so equality agrees with `Ord`.
        Ok(Rating(value + 0.0))
    }

    /// Clamps into `[0, 5]`; NaN becomes zero.
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Rating::ZERO
        } else {
            Rating(value.clamp(0.0, Self::MAX) + 0.0)
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Eq for Rating {}

impl PartialOrd for Rating {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rating {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl TryFrom<f64> for Rating {
    type Error = RatingError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// One marketplace listing.
///
/// `None` in `price`, `discount_percent` or `rating` means the collector
/// could not read that field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: Option<u64>,
    pub discount_percent: Option<u32>,
    pub rating: Option<Rating>,
    pub link: String,
    pub site: Site,
}

impl Product {
    pub fn new(name: impl Into<String>, site: Site) -> Self {
        Self {
            name: name.into(),
            price: None,
            discount_percent: None,
            rating: None,
            link: String::new(),
            site,
        }
    }

    pub fn with_price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_discount(mut self, percent: u32) -> Self {
        self.discount_percent = Some(percent);
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }
}
