use listing_core::listing::{Product, Rating, Site};
use listing_core::selection::{
    top_k_by_discount, top_k_by_price, top_k_by_rating, top_k_by_score, RatingPriceScorer, Scorer,
};
use listing_core::types::PriceOrder;

fn make_product(name: &str, price: Option<u64>, discount: Option<u32>, rating: Option<f64>) -> Product {
    Product {
        name: name.to_string(),
        price,
        discount_percent: discount,
        rating: rating.map(|r| Rating::new(r).unwrap()),
        link: format!("https://example.test/{name}"),
        site: Site::Flipkart,
    }
}

fn catalog() -> Vec<Product> {
    vec![
        make_product("a", Some(500), Some(10), Some(4.1)),
        make_product("b", Some(150), Some(40), Some(3.9)),
        make_product("c", None, Some(90), Some(5.0)),
        make_product("d", Some(900), None, Some(4.8)),
        make_product("e", Some(150), Some(40), None),
        make_product("f", Some(75), Some(25), Some(4.8)),
    ]
}

fn names(products: &[&Product]) -> Vec<String> {
    products.iter().map(|p| p.name.clone()).collect()
}

#[test]
fn price_ascending_breaks_ties_by_collection_order() {
    let products = catalog();

    let top = top_k_by_price(&products, 10, PriceOrder::Ascending);

    // "c" has no price; "b" precedes "e" at the same price.
    assert_eq!(names(&top), vec!["f", "b", "e", "a", "d"]);
}

#[test]
fn price_descending_breaks_ties_by_collection_order() {
    let products = catalog();

    let top = top_k_by_price(&products, 10, PriceOrder::Descending);

    assert_eq!(names(&top), vec!["d", "a", "b", "e", "f"]);
}

#[test]
fn rating_descending_ranks_unknown_as_zero() {
    let products = catalog();

    let top = top_k_by_rating(&products, 10);

    // "c" (5.0) is excluded for lacking a price; "e" has no rating and sinks.
    assert_eq!(names(&top), vec!["d", "f", "a", "b", "e"]);
}

#[test]
fn discount_descending_ranks_unknown_as_zero() {
    let products = catalog();

    let top = top_k_by_discount(&products, 10);

    assert_eq!(names(&top), vec!["b", "e", "f", "a", "d"]);
}

#[test]
fn result_is_capped_at_k() {
    let products = catalog();

    for k in 0..8 {
        let eligible = products.iter().filter(|p| p.price.is_some()).count();
        assert_eq!(top_k_by_price(&products, k, PriceOrder::Ascending).len(), k.min(eligible));
        assert_eq!(top_k_by_rating(&products, k).len(), k.min(eligible));
        assert_eq!(top_k_by_discount(&products, k).len(), k.min(eligible));
    }
}

#[test]
fn adjacent_results_respect_ordering_key() {
    let products: Vec<Product> = (0..50u64)
        .map(|i| {
            let price = (i * 7919) % 613 + 1;
            let discount = ((i * 31) % 70) as u32;
            let rating = ((i * 13) % 51) as f64 / 10.0;
            make_product(&format!("p{i}"), Some(price), Some(discount), Some(rating))
        })
        .collect();

    let asc = top_k_by_price(&products, 20, PriceOrder::Ascending);
    assert!(asc.windows(2).all(|w| w[0].price <= w[1].price));

    let desc = top_k_by_price(&products, 20, PriceOrder::Descending);
    assert!(desc.windows(2).all(|w| w[0].price >= w[1].price));

    let by_rating = top_k_by_rating(&products, 20);
    assert!(by_rating.windows(2).all(|w| w[0].rating >= w[1].rating));

    let by_discount = top_k_by_discount(&products, 20);
    assert!(by_discount
        .windows(2)
        .all(|w| w[0].discount_percent >= w[1].discount_percent));
}

#[test]
fn score_ranking_returns_scores_without_touching_products() {
    let products = catalog();
    let before = products.clone();

    let top = top_k_by_score(&products, 3, &RatingPriceScorer);

    assert_eq!(top.len(), 3);
    assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
    for listing in &top {
        let expected = RatingPriceScorer.score(listing.product).unwrap();
        assert!((listing.score - expected).abs() < 1e-12);
    }
    // "f" is cheap and well rated.
    assert_eq!(top[0].product.name, "f");
    // Neither the unpriced "c" nor the unrated "e" can be scored.
    assert!(top.iter().all(|l| l.product.name != "c" && l.product.name != "e"));
    assert_eq!(products, before);
}

#[test]
fn empty_input_yields_empty_results() {
    let products: Vec<Product> = Vec::new();

    assert!(top_k_by_price(&products, 10, PriceOrder::Ascending).is_empty());
    assert!(top_k_by_price(&products, 10, PriceOrder::Descending).is_empty());
    assert!(top_k_by_rating(&products, 10).is_empty());
    assert!(top_k_by_discount(&products, 10).is_empty());
    assert!(top_k_by_score(&products, 10, &RatingPriceScorer).is_empty());
}
