use std::collections::{BTreeMap, BTreeSet};

use crate::relation::index::compute_relation_map;

/// Group a deploy set into dependency branches.
///
/// Builds the directed dependency map over `target × target`, then folds
/// every root that itself depends on another live root into that root's
/// bucket. Deploys related to nothing get an empty bucket of their own. The
/// result maps each branch root to all of its transitive dependents.
pub fn compute_branches<D, P>(target: &BTreeSet<D>, depends: P) -> BTreeMap<D, BTreeSet<D>>
where
    D: Ord + Clone,
    P: FnMut(&D, &D) -> bool,
{
    let dependency_map = compute_relation_map(true, target, target, depends);

    let mut branches = dependency_map.clone();
    for root in dependency_map.keys() {
        if !branches.contains_key(root) {
            continue;
        }
        // the bucket currently holding `root` is its parent branch
        let parent = branches
            .iter()
            .find(|(other, dependents)| *other != root && dependents.contains(root))
            .map(|(other, _)| other.clone());
        if let Some(parent) = parent {
            let moved = branches.remove(root).unwrap_or_default();
            branches.entry(parent).or_default().extend(moved);
        }
    }

    for item in target {
        let placed =
            branches.contains_key(item) || branches.values().any(|bucket| bucket.contains(item));
        if !placed {
            branches.insert(item.clone(), BTreeSet::new());
        }
    }
    branches
}

/// Disjoint dependency branches, biggest first.
///
/// Buckets of `{root} ∪ dependents` are ordered by `(−size, root)` and fed to
/// [`partition_scope`], so the largest branch survives intact and later
/// branches lose any overlap with it.
pub fn compute_greedy_non_intersecting_branches<D, P>(
    target: &BTreeSet<D>,
    depends: P,
) -> Vec<BTreeSet<D>>
where
    D: Ord + Clone,
    P: FnMut(&D, &D) -> bool,
{
    let mut buckets: Vec<(D, BTreeSet<D>)> = compute_branches(target, depends)
        .into_iter()
        .map(|(root, mut dependents)| {
            dependents.insert(root.clone());
            (root, dependents)
        })
        .collect();
    buckets.sort_by(|(root_a, set_a), (root_b, set_b)| {
        set_b
            .len()
            .cmp(&set_a.len())
            .then_with(|| root_a.cmp(root_b))
    });
    partition_scope(buckets.into_iter().map(|(_, bucket)| bucket).collect())
}

/// Walk the bucket list keeping the first occurrence of every element: each
/// bucket keeps what earlier buckets have not claimed, and buckets consumed
/// entirely are dropped.
pub fn partition_scope<D>(buckets: Vec<BTreeSet<D>>) -> Vec<BTreeSet<D>>
where
    D: Ord + Clone,
{
    let mut partitions: Vec<BTreeSet<D>> = Vec::new();
    let mut claimed: BTreeSet<D> = BTreeSet::new();
    for bucket in buckets {
        let remaining: BTreeSet<D> = bucket.difference(&claimed).cloned().collect();
        if remaining.is_empty() {
            continue;
        }
        claimed.extend(remaining.iter().cloned());
        partitions.push(remaining);
    }
    partitions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn depends_in<'a>(edges: &'a [(&'a str, &'a str)]) -> impl FnMut(&String, &String) -> bool + 'a {
        move |a, b| edges.contains(&(a.as_str(), b.as_str()))
    }

    #[test]
    fn chain_collapses_into_single_branch() {
        // d3 depends on d2 depends on d1
        let target = set(&["d1", "d2", "d3"]);
        let branches = compute_branches(&target, depends_in(&[("d2", "d1"), ("d3", "d2")]));

        assert_eq!(branches.len(), 1);
        assert_eq!(branches["d1"], set(&["d2", "d3"]));
    }

    #[test]
    fn unrelated_deploys_get_singleton_buckets() {
        let target = set(&["a", "b"]);
        let branches = compute_branches(&target, |_, _| false);

        assert_eq!(branches.len(), 2);
        assert!(branches["a"].is_empty());
        assert!(branches["b"].is_empty());
    }

    #[test]
    fn independent_branches_stay_separate() {
        let target = set(&["a", "a1", "b", "b1"]);
        let branches = compute_branches(&target, depends_in(&[("a1", "a"), ("b1", "b")]));

        assert_eq!(branches.len(), 2);
        assert_eq!(branches["a"], set(&["a1"]));
        assert_eq!(branches["b"], set(&["b1"]));
    }

    #[test]
    fn shared_dependent_lands_in_one_live_bucket() {
        // c depends on both a and b; c1 depends on c
        let target = set(&["a", "b", "c", "c1"]);
        let branches = compute_branches(
            &target,
            depends_in(&[("c", "a"), ("c", "b"), ("c1", "c")]),
        );

        // c sits in both a's and b's buckets, but its dependents moved once
        assert!(branches["a"].contains("c"));
        assert!(branches["b"].contains("c"));
        assert!(branches["a"].contains("c1") ^ branches["b"].contains("c1"));
        assert!(!branches.contains_key("c"));
    }

    #[test]
    fn greedy_branches_are_disjoint_and_biggest_first() {
        // branch 1: a <- a1, a2; branch 2: b <- b1; singleton: s
        let target = set(&["a", "a1", "a2", "b", "b1", "s"]);
        let branches = compute_greedy_non_intersecting_branches(
            &target,
            depends_in(&[("a1", "a"), ("a2", "a"), ("b1", "b")]),
        );

        assert_eq!(branches[0], set(&["a", "a1", "a2"]));
        assert_eq!(branches[1], set(&["b", "b1"]));
        assert_eq!(branches[2], set(&["s"]));

        let mut seen: BTreeSet<String> = BTreeSet::new();
        for branch in &branches {
            for item in branch {
                assert!(seen.insert(item.clone()), "{item} appeared twice");
            }
        }
        assert_eq!(seen, target);
    }

    #[test]
    fn greedy_branches_cover_every_target_exactly_once() {
        // overlapping buckets: c depends on a and b
        let target = set(&["a", "b", "c"]);
        let branches = compute_greedy_non_intersecting_branches(
            &target,
            depends_in(&[("c", "a"), ("c", "b")]),
        );

        let union: BTreeSet<String> = branches.iter().flatten().cloned().collect();
        let total: usize = branches.iter().map(|b| b.len()).sum();
        assert_eq!(union, target);
        assert_eq!(total, target.len());
    }

    #[test]
    fn partition_scope_keeps_first_claim_and_drops_empties() {
        let buckets = vec![set(&["a", "b"]), set(&["b", "c"]), set(&["a", "b"])];
        let partitions = partition_scope(buckets);

        assert_eq!(partitions, vec![set(&["a", "b"]), set(&["c"])]);
    }
}
