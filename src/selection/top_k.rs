//! Heap-based top-K extraction under a single ordering criterion.
//!
//! Every variant requires a known price. Entries are keyed by
//! `(key, collection index)`, so an earlier-collected product wins ties.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::ranking::{OrderedScore, Scorer};
use crate::listing::{Product, Rating};
use crate::types::results::{PriceOrder, ScoredListing};

struct HeapEntry<K> {
    key: K,
    index: usize,
}

impl<K: Ord> PartialEq for HeapEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord> Eq for HeapEntry<K> {}

impl<K: Ord> PartialOrd for HeapEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for HeapEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Pops the `k` smallest `(key, index)` entries. Products for which `key`
/// returns `None` are not eligible.
fn smallest_k<K, F>(products: &[Product], k: usize, key: F) -> Vec<(usize, K)>
where
    K: Ord,
    F: Fn(&Product) -> Option<K>,
{
    if k == 0 {
        return Vec::new();
    }

    // `BinaryHeap` is a max-heap; `Reverse` turns it into the min-heap we pop from.
    let mut heap: BinaryHeap<Reverse<HeapEntry<K>>> = products
        .iter()
        .enumerate()
        .filter_map(|(index, product)| key(product).map(|key| Reverse(HeapEntry { key, index })))
        .collect();

    let mut extracted = Vec::with_capacity(k.min(heap.len()));
    while extracted.len() < k {
        let Some(Reverse(entry)) = heap.pop() else {
            break;
        };
        extracted.push((entry.index, entry.key));
    }
    extracted
}

fn top_k_by<'a, K, F>(products: &'a [Product], k: usize, key: F) -> Vec<&'a Product>
where
    K: Ord,
    F: Fn(&Product) -> Option<K>,
{
    smallest_k(products, k, key)
        .into_iter()
        .map(|(index, _)| &products[index])
        .collect()
}

pub fn top_k_by_price(products: &[Product], k: usize, order: PriceOrder) -> Vec<&Product> {
    match order {
        PriceOrder::Ascending => top_k_by(products, k, |p| p.price),
        PriceOrder::Descending => top_k_by(products, k, |p| p.price.map(Reverse)),
    }
}

/// Highest rating first. An unknown rating ranks as 0.
pub fn top_k_by_rating(products: &[Product], k: usize) -> Vec<&Product> {
    top_k_by(products, k, |p| {
        p.price.map(|_| Reverse(p.rating.unwrap_or(Rating::ZERO)))
    })
}

/// Highest discount first. An unknown discount ranks as 0%.
pub fn top_k_by_discount(products: &[Product], k: usize) -> Vec<&Product> {
    top_k_by(products, k, |p| {
        p.price.map(|_| Reverse(p.discount_percent.unwrap_or(0)))
    })
}

/// Highest score first. Products the scorer cannot score are skipped.
pub fn top_k_by_score<'a, S: Scorer + ?Sized>(
    products: &'a [Product],
    k: usize,
    scorer: &S,
) -> Vec<ScoredListing<'a>> {
    smallest_k(products, k, |p| {
        p.price?;
        scorer.score(p).map(|score| Reverse(OrderedScore(score)))
    })
    .into_iter()
    .map(|(index, Reverse(OrderedScore(score)))| ScoredListing {
        product: &products[index],
        score,
    })
    .collect()
}
