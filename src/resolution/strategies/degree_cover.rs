use std::collections::{BTreeMap, BTreeSet};

use crate::resolution::strategy::RejectionStrategy;

/// Greedy vertex-cover heuristic for large conflict graphs.
///
/// Repeatedly rejects the highest-degree vertex (ties broken towards the
/// smaller deploy) until no conflict edge remains among the keys, producing a
/// single rejection option. Linear-ish instead of exponential, but carries no
/// optimality guarantee: the chosen option is conflict-free, nothing more.
#[derive(Debug, Default)]
pub struct DegreeCover;

impl<D: Ord + Clone> RejectionStrategy<D> for DegreeCover {
    fn rejection_options(
        &self,
        conflicts_map: &BTreeMap<D, BTreeSet<D>>,
    ) -> BTreeSet<BTreeSet<D>> {
        if conflicts_map.is_empty() {
            return BTreeSet::new();
        }

        // edges restricted to the key set; non-key partners carry no choice
        let keys: BTreeSet<D> = conflicts_map.keys().cloned().collect();
        let mut edges: BTreeMap<D, BTreeSet<D>> = conflicts_map
            .iter()
            .filter_map(|(key, partners)| {
                let restricted: BTreeSet<D> =
                    partners.intersection(&keys).cloned().collect();
                (!restricted.is_empty()).then(|| (key.clone(), restricted))
            })
            .collect();

        let mut rejected: BTreeSet<D> = BTreeSet::new();
        while let Some(victim) = edges
            .iter()
            .max_by_key(|&(vertex, partners)| (partners.len(), std::cmp::Reverse(vertex)))
            .map(|(vertex, _)| vertex.clone())
        {
            edges.remove(&victim);
            let mut emptied = Vec::new();
            for (vertex, partners) in &mut edges {
                partners.remove(&victim);
                if partners.is_empty() {
                    emptied.push(vertex.clone());
                }
            }
            for vertex in emptied {
                edges.remove(&vertex);
            }
            rejected.insert(victim);
        }

        // rejecting a key drags its dependency-closed non-key partners along
        let dragged: BTreeSet<D> = rejected
            .iter()
            .filter_map(|victim| conflicts_map.get(victim))
            .flat_map(|partners| partners.iter().filter(|p| !keys.contains(*p)).cloned())
            .collect();

        let mut option = rejected;
        option.extend(dragged);
        BTreeSet::from([option])
    }

    fn name(&self) -> &str {
        "degree-cover"
    }
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
        let options =
            RejectionStrategy::<String>::rejection_options(&DegreeCover, &BTreeMap::new());
        assert!(options.is_empty());
    }

    #[test]
    fn star_graph_rejects_the_hub() {
        let map = symmetric(&[("hub", "a"), ("hub", "b"), ("hub", "c")]);
        let options = DegreeCover.rejection_options(&map);

        assert_eq!(options.len(), 1);
        assert_eq!(*options.iter().next().unwrap(), set(&["hub"]));
    }

    #[test]
    fn option_leaves_keys_conflict_free() {
        let map = symmetric(&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a"), ("a", "c")]);
        let options = DegreeCover.rejection_options(&map);
        let option = options.iter().next().unwrap();

        let kept: Vec<&String> = map.keys().filter(|k| !option.contains(*k)).collect();
        for x in &kept {
            for y in &kept {
                if x != y {
                    assert!(!map[*x].contains(*y));
                }
            }
        }
    }

    #[test]
    fn degree_ties_pick_the_smaller_deploy() {
        let map = symmetric(&[("a", "b")]);
        let options = DegreeCover.rejection_options(&map);
        assert_eq!(*options.iter().next().unwrap(), set(&["a"]));
    }
}
