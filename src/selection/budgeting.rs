use super::ranking::Scorer;
use crate::listing::Product;
use crate::types::results::{BudgetSelection, ScoredListing, SelectionMethod};

struct Candidate<'a> {
    product: &'a Product,
    price: u64,
    score: f64,
}

/// Picks at most `max_items` products, each at most once, with total price
/// within `budget`, maximizing total score.
///
/// Products without a known price or rating are not candidates. The exact
/// dynamic program runs in `O(n * budget * max_items)`; when that table would
/// exceed `max_exact_cells` a score-per-price greedy is used instead and the
/// result is marked [`SelectionMethod::Greedy`].
///
/// Callers validate `budget` and `max_items`; zero for either selects nothing.
pub fn optimize<'a, S: Scorer + ?Sized>(
    products: &'a [Product],
    budget: u64,
    max_items: usize,
    scorer: &S,
    max_exact_cells: usize,
) -> BudgetSelection<'a> {
    let candidates: Vec<Candidate<'a>> = products
        .iter()
        .filter_map(|product| {
            let price = product.price?;
            let score = scorer.score(product)?;
            Some(Candidate { product, price, score })
        })
        .collect();

    if candidates.is_empty() || budget == 0 || max_items == 0 {
        return BudgetSelection::empty();
    }

    // More slots than candidates never changes the optimum.
    let max_items = max_items.min(candidates.len());

    let cells = usize::try_from(budget).ok().and_then(|budget| {
        candidates
            .len()
            .checked_mul(budget.checked_add(1)?)?
            .checked_mul(max_items + 1)
            .map(|cells| (budget, cells))
    });

    let selection = match cells {
        Some((budget, cells)) if cells <= max_exact_cells => {
            exact(&candidates, budget, max_items)
        }
        _ => {
            tracing::warn!(
                candidates = candidates.len(),
                budget = budget,
                max_items = max_items,
                max_exact_cells = max_exact_cells,
                "Budget table too large, using greedy selection"
            );
            greedy(&candidates, budget, max_items)
        }
    };

    tracing::debug!(
        selected = selection.selected.len(),
        total_cost = selection.total_cost,
        total_score = selection.total_score,
        method = ?selection.method,
        "Budget selection finished"
    );
    selection
}

fn exact<'a>(candidates: &[Candidate<'a>], budget: usize, max_items: usize) -> BudgetSelection<'a> {
    let depth = max_items + 1;
    let layer = (budget + 1) * depth;
    let cell = |w: usize, k: usize| w * depth + k;

    // best[i][w][k] only reads row i - 1, so two rows suffice for the values.
    // The choice table keeps every row for reconstruction.
    let mut previous = vec![0.0_f64; layer];
    let mut current = vec![0.0_f64; layer];
    let mut taken = vec![false; candidates.len() * layer];

    for (i, candidate) in candidates.iter().enumerate() {
        let row = &mut taken[i * layer..(i + 1) * layer];
        let price = usize::try_from(candidate.price).ok();

        for w in 0..=budget {
            for k in 0..depth {
                let mut best = previous[cell(w, k)];
                if let Some(price) = price.filter(|&p| p <= w && k >= 1) {
                    let with_item = previous[cell(w - price, k - 1)] + candidate.score;
                    if with_item > best {
                        best = with_item;
                        row[cell(w, k)] = true;
                    }
                }
                current[cell(w, k)] = best;
            }
        }

        std::mem::swap(&mut previous, &mut current);
    }

    let optimum = previous[cell(budget, max_items)];

    let (mut w, mut k) = (budget, max_items);
    let mut chosen = Vec::new();
    for i in (0..candidates.len()).rev() {
        if w == 0 || k == 0 {
            break;
        }
        if taken[i * layer + cell(w, k)] {
            chosen.push(i);
            // A taken cell implies the price fit within `w`.
            w -= candidates[i].price as usize;
            k -= 1;
        }
    }
    chosen.reverse();

    let selection = collect(candidates, &chosen, SelectionMethod::Exact);
    debug_assert!(
        (selection.total_score - optimum).abs() <= 1e-9 * optimum.max(1.0),
        "reconstructed score {} differs from table optimum {optimum}",
        selection.total_score
    );
    selection
}

fn greedy<'a>(candidates: &[Candidate<'a>], budget: u64, max_items: usize) -> BudgetSelection<'a> {
    let density = |c: &Candidate<'_>| c.score / c.price.max(1) as f64;

    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        density(&candidates[b])
            .total_cmp(&density(&candidates[a]))
            .then_with(|| a.cmp(&b))
    });

    let mut chosen = Vec::new();
    let mut spent = 0u64;
    for i in order {
        if chosen.len() == max_items {
            break;
        }
        let price = candidates[i].price;
        if spent.checked_add(price).is_some_and(|total| total <= budget) {
            spent += price;
            chosen.push(i);
        }
    }
    chosen.sort_unstable();

    collect(candidates, &chosen, SelectionMethod::Greedy)
}

fn collect<'a>(candidates: &[Candidate<'a>], chosen: &[usize], method: SelectionMethod) -> BudgetSelection<'a> {
    let selected: Vec<ScoredListing<'a>> = chosen
        .iter()
        .map(|&i| ScoredListing {
            product: candidates[i].product,
            score: candidates[i].score,
        })
        .collect();

    let total_score: f64 = selected.iter().map(|s| s.score).sum();
    let total_cost: u64 = chosen.iter().map(|&i| candidates[i].price).sum();

    BudgetSelection {
        selected,
        total_score,
        total_cost,
        method,
    }
}
