use std::collections::{BTreeMap, BTreeSet};

use crate::relation::error::{RelationError, Result};

/// Close a seed set under a directed dependency map.
///
/// Returns `of` unioned with its transitive image under `dependency_map`:
/// the frontier is repeatedly replaced with the union of its mapped values
/// until nothing new appears. The seed set itself is included.
///
/// The subgraph reachable from the seed is checked for cycles first; a cycle
/// would make the dependency relation meaningless, so it is surfaced as
/// [`RelationError::DependencyCycle`] instead of being silently absorbed.
pub fn with_dependencies<D>(
    of: &BTreeSet<D>,
    dependency_map: &BTreeMap<D, BTreeSet<D>>,
) -> Result<BTreeSet<D>>
where
    D: Ord + Clone,
{
    let mut visited: BTreeSet<&D> = BTreeSet::new();
    let mut stack: BTreeSet<&D> = BTreeSet::new();
    for seed in of {
        if !visited.contains(seed) && has_cycle(seed, dependency_map, &mut visited, &mut stack) {
            return Err(RelationError::DependencyCycle);
        }
    }

    let mut all = of.clone();
    let mut frontier = of.clone();
    while !frontier.is_empty() {
        let mut next = BTreeSet::new();
        for item in &frontier {
            if let Some(dependents) = dependency_map.get(item) {
                for dependent in dependents {
                    if all.insert(dependent.clone()) {
                        next.insert(dependent.clone());
                    }
                }
            }
        }
        frontier = next;
    }
    Ok(all)
}

fn has_cycle<'a, D: Ord>(
    node: &'a D,
    dependency_map: &'a BTreeMap<D, BTreeSet<D>>,
    visited: &mut BTreeSet<&'a D>,
    stack: &mut BTreeSet<&'a D>,
) -> bool {
    visited.insert(node);
    stack.insert(node);

    if let Some(neighbors) = dependency_map.get(node) {
        for neighbor in neighbors {
            if !visited.contains(neighbor) {
                if has_cycle(neighbor, dependency_map, visited, stack) {
                    return true;
                }
            } else if stack.contains(neighbor) {
                return true;
            }
        }
    }

    stack.remove(node);
    false
}
