use std::collections::{BTreeMap, BTreeSet};

/// Build a relation map from a binary predicate.
///
/// The key is `s ∈ source` and the value is `{t ∈ target : relation(t, s),
/// t ≠ s}`. In undirected mode every discovered edge is also merged into the
/// map under `t`, so the result is symmetric regardless of how the predicate
/// behaves on swapped arguments. Keys with no related items are omitted.
///
/// Costs `O(|target| · |source|)` predicate evaluations.
pub fn compute_relation_map<D, P>(
    directed: bool,
    target: &BTreeSet<D>,
    source: &BTreeSet<D>,
    mut relation: P,
) -> BTreeMap<D, BTreeSet<D>>
where
    D: Ord + Clone,
    P: FnMut(&D, &D) -> bool,
{
    let mut map: BTreeMap<D, BTreeSet<D>> = BTreeMap::new();
    for s in source {
        for t in target {
            if t == s || !relation(t, s) {
                continue;
            }
            map.entry(s.clone()).or_default().insert(t.clone());
            if !directed {
                map.entry(t.clone()).or_default().insert(s.clone());
            }
        }
    }
    map
}
