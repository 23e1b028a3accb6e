use std::collections::BTreeSet;

/// Choose the rejection option minimizing `(Σ cost, size, elements)`
/// lexicographically.
///
/// The element comparison exists solely for determinism: two options with
/// equal total cost and equal size are ordered by their sorted contents, so
/// the selection never depends on enumeration order. Costs accumulate in
/// `u128`, out of reach of any realistic overflow. Empty input yields the
/// empty set.
pub fn compute_optimal_rejection<D, F>(options: &BTreeSet<BTreeSet<D>>, mut cost: F) -> BTreeSet<D>
where
    D: Ord + Clone,
    F: FnMut(&D) -> u64,
{
    options
        .iter()
        .map(|option| {
            let total: u128 = option.iter().map(|deploy| u128::from(cost(deploy))).sum();
            (total, option.len(), option)
        })
        .min()
        .map(|(_, _, option)| option.clone())
        .unwrap_or_default()
}
