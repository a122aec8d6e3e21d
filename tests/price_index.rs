use listing_core::index::{DuplicatePolicy, InsertOutcome, PriceIndex};
use listing_core::listing::{Product, Site};

fn make_product(name: &str, price: u64) -> Product {
    Product::new(name, Site::Amazon).with_price(price)
}

fn prices(products: &[&Product]) -> Vec<u64> {
    products.iter().map(|p| p.price.unwrap()).collect()
}

fn names(products: &[&Product]) -> Vec<String> {
    products.iter().map(|p| p.name.clone()).collect()
}

/// Deterministic pseudo-random prices (64-bit LCG).
fn scrambled_prices(count: usize, modulus: u64) -> Vec<u64> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    (0..count)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) % modulus
        })
        .collect()
}

#[test]
fn range_query_returns_ascending_prices_in_bounds() {
    let products: Vec<Product> = [50, 120, 80, 200, 150]
        .iter()
        .map(|&p| make_product(&format!("item-{p}"), p))
        .collect();

    let index = PriceIndex::from_products(&products, DuplicatePolicy::KeepFirst);

    assert_eq!(prices(&index.range(80, 150)), vec![80, 120, 150]);
    assert_eq!(prices(&index.range(0, 1000)), vec![50, 80, 120, 150, 200]);
    assert!(index.range(201, 500).is_empty());
    assert!(index.range(51, 79).is_empty());
    assert!(index.validate());
}

#[test]
fn empty_index_yields_nothing() {
    let index = PriceIndex::new(DuplicatePolicy::Bucket);

    assert!(index.is_empty());
    assert_eq!(index.height(), 0);
    assert!(index.range(0, u64::MAX).is_empty());
    assert!(index.validate());
}

#[test]
fn ascending_inserts_stay_balanced() {
    let products: Vec<Product> = (1..=1024).map(|p| make_product("seq", p)).collect();

    let index = PriceIndex::from_products(&products, DuplicatePolicy::Bucket);

    assert!(index.validate());
    assert_eq!(index.distinct_prices(), 1024);
    // A perfectly balanced tree of 1024 nodes has height 11.
    assert_eq!(index.height(), 11);
}

#[test]
fn descending_inserts_stay_balanced() {
    let products: Vec<Product> = (1..=1000).rev().map(|p| make_product("seq", p)).collect();

    let index = PriceIndex::from_products(&products, DuplicatePolicy::Bucket);

    assert!(index.validate());
    // AVL height bound: h < 1.4405 * log2(n + 2)
    let bound = 1.4405 * ((1000.0_f64 + 2.0).log2());
    assert!(f64::from(index.height()) < bound);
}

#[test]
fn balance_holds_after_every_insert() {
    let products: Vec<Product> = scrambled_prices(400, 10_000)
        .into_iter()
        .map(|p| make_product("rnd", p))
        .collect();

    let mut index = PriceIndex::new(DuplicatePolicy::Bucket);
    for product in &products {
        index.insert(product);
        assert!(index.validate(), "invariants broken after inserting {:?}", product.price);
    }
    assert_eq!(index.len(), products.len());
}

#[test]
fn zig_zag_inserts_trigger_double_rotations() {
    // [30, 10, 20] is the left-right case, [10, 30, 20] the right-left case.
    // Without a double rotation either would leave a chain of height 3.
    for order in [[30, 10, 20], [10, 30, 20]] {
        let products: Vec<Product> = order.iter().map(|&p| make_product("zz", p)).collect();

        let mut index = PriceIndex::new(DuplicatePolicy::KeepFirst);
        for product in &products {
            assert_eq!(index.insert(product), InsertOutcome::Inserted);
            assert!(index.validate());
        }

        assert_eq!(index.height(), 2, "order {order:?}");
        assert_eq!(prices(&index.range(0, 100)), vec![10, 20, 30]);
    }
}

#[test]
fn range_matches_linear_scan() {
    let products: Vec<Product> = scrambled_prices(300, 500)
        .into_iter()
        .enumerate()
        .map(|(i, p)| make_product(&format!("p{i}"), p))
        .collect();

    let index = PriceIndex::from_products(&products, DuplicatePolicy::Bucket);

    for (min, max) in [(0, 0), (0, 499), (100, 250), (250, 100), (499, 499), (37, 38)] {
        let mut expected: Vec<&Product> = products
            .iter()
            .filter(|p| (min..=max).contains(&p.price.unwrap()))
            .collect();
        // Stable: equal prices keep collection order.
        expected.sort_by_key(|p| p.price);

        let actual = index.range(min, max);
        assert_eq!(names(&actual), names(&expected), "range [{min}, {max}]");
    }
}

#[test]
fn duplicate_prices_are_bucketed_in_insertion_order() {
    let products = vec![
        make_product("first", 100),
        make_product("other", 90),
        make_product("second", 100),
        make_product("third", 100),
    ];

    let mut index = PriceIndex::new(DuplicatePolicy::Bucket);
    let outcomes: Vec<InsertOutcome> = products.iter().map(|p| index.insert(p)).collect();

    assert_eq!(
        outcomes,
        vec![
            InsertOutcome::Inserted,
            InsertOutcome::Inserted,
            InsertOutcome::Bucketed,
            InsertOutcome::Bucketed,
        ]
    );
    assert_eq!(index.len(), 4);
    assert_eq!(index.distinct_prices(), 2);

    let names: Vec<&str> = index.range(100, 100).iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[test]
fn keep_first_policy_drops_later_duplicates() {
    let products = vec![make_product("first", 100), make_product("second", 100)];

    let mut index = PriceIndex::new(DuplicatePolicy::KeepFirst);
    assert_eq!(index.insert(&products[0]), InsertOutcome::Inserted);
    assert_eq!(index.insert(&products[1]), InsertOutcome::Dropped);

    let found = index.range(0, 1000);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "first");
    assert!(index.validate());
}

#[test]
fn unpriced_products_are_not_indexed() {
    let unpriced = Product::new("mystery", Site::Myntra);

    let mut index = PriceIndex::new(DuplicatePolicy::Bucket);
    assert_eq!(index.insert(&unpriced), InsertOutcome::Unpriced);
    assert!(index.is_empty());
}
