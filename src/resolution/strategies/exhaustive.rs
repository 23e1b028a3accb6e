use std::collections::{BTreeMap, BTreeSet};

use crate::resolution::strategy::RejectionStrategy;

/// Exact enumeration of every rejection option.
///
/// Explores the full search tree of acceptance choices, so the returned set
/// is exactly the complements of the maximal independent sets of the
/// conflict graph over its keys. Exponential in the number of keys; intended
/// for conflict graphs up to roughly 20 vertices.
#[derive(Debug, Default)]
pub struct ExhaustiveSearch;

impl<D: Ord + Clone> RejectionStrategy<D> for ExhaustiveSearch {
    fn rejection_options(
        &self,
        conflicts_map: &BTreeMap<D, BTreeSet<D>>,
    ) -> BTreeSet<BTreeSet<D>> {
        compute_rejection_options(conflicts_map)
    }

    fn name(&self) -> &str {
        "exhaustive"
    }
}

/// Enumerate all rejection options of a conflict graph.
///
/// Breadth-first over states `(candidate, rejected, accepted)`: accepting a
/// candidate rejects its whole conflict set, and the next candidates are the
/// keys not yet decided either way. A state with no candidates left emits its
/// rejected set. Layers are deduplicated so diamonds in the choice order do
/// not multiply the work.
///
/// Value sets may carry non-key deploys (dependency-closed conflict
/// partners); those are emitted as part of the option untouched.
pub fn compute_rejection_options<D>(
    conflicts_map: &BTreeMap<D, BTreeSet<D>>,
) -> BTreeSet<BTreeSet<D>>
where
    D: Ord + Clone,
{
    let keys: BTreeSet<D> = conflicts_map.keys().cloned().collect();
    let mut options: BTreeSet<BTreeSet<D>> = BTreeSet::new();

    let mut frontier: BTreeSet<(D, BTreeSet<D>, BTreeSet<D>)> = keys
        .iter()
        .map(|key| (key.clone(), BTreeSet::new(), BTreeSet::new()))
        .collect();

    while !frontier.is_empty() {
        let mut next_frontier = BTreeSet::new();
        for (candidate, mut rejected, mut accepted) in frontier {
            if let Some(partners) = conflicts_map.get(&candidate) {
                rejected.extend(partners.iter().cloned());
            }
            accepted.insert(candidate);

            let candidates: Vec<&D> = keys
                .iter()
                .filter(|&key| !rejected.contains(key) && !accepted.contains(key))
                .collect();

            if candidates.is_empty() {
                options.insert(rejected);
            } else {
                for next in candidates {
                    next_frontier.insert((next.clone(), rejected.clone(), accepted.clone()));
                }
            }
        }
        frontier = next_frontier;
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn symmetric(edges: &[(&str, &str)]) -> BTreeMap<String, BTreeSet<String>> {
        let mut map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (a, b) in edges {
            map.entry(a.to_string()).or_default().insert(b.to_string());
            map.entry(b.to_string()).or_default().insert(a.to_string());
        }
        map
    }

    #[test]
    fn empty_graph_has_no_options() {
        let options = compute_rejection_options::<String>(&BTreeMap::new());
        assert!(options.is_empty());
    }

    #[test]
    fn single_pair_yields_both_sides() {
        let options = compute_rejection_options(&symmetric(&[("a", "b")]));
        let expected: BTreeSet<BTreeSet<String>> =
            [set(&["a"]), set(&["b"])].into_iter().collect();
        assert_eq!(options, expected);
    }

    #[test]
    fn triangle_rejects_every_pair() {
        let options =
            compute_rejection_options(&symmetric(&[("a", "b"), ("b", "c"), ("a", "c")]));
        let expected: BTreeSet<BTreeSet<String>> =
            [set(&["a", "b"]), set(&["a", "c"]), set(&["b", "c"])]
                .into_iter()
                .collect();
        assert_eq!(options, expected);
    }

    #[test]
    fn path_graph_has_maximal_independent_complements() {
        // a - b - c: independent sets {a, c} and {b}
        let options = compute_rejection_options(&symmetric(&[("a", "b"), ("b", "c")]));
        let expected: BTreeSet<BTreeSet<String>> =
            [set(&["b"]), set(&["a", "c"])].into_iter().collect();
        assert_eq!(options, expected);
    }

    #[test]
    fn non_key_partners_are_emitted_with_the_option() {
        // dependency-closed edge: rejecting a drags d1, d2 along
        let mut map = symmetric(&[("a", "b")]);
        map.get_mut("b").unwrap().extend(set(&["d1", "d2"]));

        let options = compute_rejection_options(&map);
        let expected: BTreeSet<BTreeSet<String>> =
            [set(&["b"]), set(&["a", "d1", "d2"])].into_iter().collect();
        assert_eq!(options, expected);
    }

    #[test]
    fn every_option_leaves_the_rest_conflict_free() {
        let map = symmetric(&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")]);
        let options = compute_rejection_options(&map);
        assert!(!options.is_empty());

        for option in &options {
            let kept: Vec<&String> = map.keys().filter(|k| !option.contains(*k)).collect();
            for x in &kept {
                for y in &kept {
                    if x != y {
                        assert!(!map[*x].contains(*y), "{x} and {y} both kept");
                    }
                }
            }
        }
    }
}
