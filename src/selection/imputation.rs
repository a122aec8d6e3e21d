use crate::listing::{Product, Rating};
use crate::types::results::ImputationReport;

/// Replaces every unknown rating with the mean of the known ones, rounded to
/// one decimal place. With no known rating the mean is `default_rating`.
///
/// Running it twice imputes nothing the second time.
pub fn impute_ratings(products: &mut [Product], default_rating: f64) -> ImputationReport {
    let (sum, known) = products
        .iter()
        .filter_map(|p| p.rating)
        .fold((0.0, 0usize), |(sum, n), r| (sum + r.value(), n + 1));

    let mean_rating = if known == 0 {
        default_rating
    } else {
        sum / known as f64
    };
    let imputed = Rating::saturating((mean_rating * 10.0).round() / 10.0);

    let mut imputed_count = 0;
    for product in products.iter_mut().filter(|p| p.rating.is_none()) {
        product.rating = Some(imputed);
        imputed_count += 1;
    }

    tracing::info!(
        imputed = imputed_count,
        known = known,
        mean = mean_rating,
        "Imputed missing ratings"
    );

    ImputationReport {
        imputed_count,
        mean_rating,
    }
}
