use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::relation::closure::with_dependencies;
use crate::relation::error::Result as RelationResult;
use crate::relation::index::compute_relation_map;
use crate::resolution::catalog::DeployCatalog;
use crate::resolution::error::Result;
use crate::resolution::mergeable::{add_mergeable_overflow_rejections, ChannelBalance, ChannelDelta};
use crate::resolution::optimal::compute_optimal_rejection;
use crate::resolution::strategy::RejectionStrategy;
use crate::scope::selectors::conflict_scope;
use crate::scope::view::DagView;

/// Verdict of a resolver invocation: a partition of the conflict set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(serialize = "D: Serialize", deserialize = "D: Deserialize<'de> + Ord"))]
pub struct ResolveOutcome<D: Ord> {
    pub accepted: BTreeSet<D>,
    pub rejected: BTreeSet<D>,
}

/// Deploys that cannot stand together with the finalized state.
///
/// `conflicts_map` is keyed by finalized-accepted deploys and lists their
/// conflict partners in the unfinalized scope; `dependency_map` is keyed by
/// finalized-rejected deploys and lists the scope deploys depending on them.
/// Both groups must be rejected no matter what the conflict graph says.
pub fn incompatible_with_final<D>(
    accepted_finally: &BTreeSet<D>,
    rejected_finally: &BTreeSet<D>,
    conflicts_map: &BTreeMap<D, BTreeSet<D>>,
    dependency_map: &BTreeMap<D, BTreeSet<D>>,
) -> BTreeSet<D>
where
    D: Ord + Clone,
{
    let mut incompatible = BTreeSet::new();
    for accepted in accepted_finally {
        if let Some(partners) = conflicts_map.get(accepted) {
            incompatible.extend(partners.iter().cloned());
        }
    }
    for rejected in rejected_finally {
        if let Some(dependents) = dependency_map.get(rejected) {
            incompatible.extend(dependents.iter().cloned());
        }
    }
    incompatible
}

/// Resolve a conflict set against its relation maps.
///
/// Steps: drop the enforced rejections, dependency-close the conflict map's
/// value sets, enumerate rejection options with `strategy`, augment them with
/// channel-arithmetic rejections, stabilize each option (rejected deploys
/// drag their dependents and dropped deploys re-run the channel fold, to a
/// fixpoint), then pick the option minimizing `(Σ cost, size, elements)` and
/// partition.
#[allow(clippy::too_many_arguments)]
pub fn resolve_conflict_set<D, CH, F>(
    conflict_set: &BTreeSet<D>,
    conflicts_map: &BTreeMap<D, BTreeSet<D>>,
    dependency_map: &BTreeMap<D, BTreeSet<D>>,
    enforce_rejected: &BTreeSet<D>,
    cost: F,
    init_mergeable_values: &BTreeMap<CH, ChannelBalance>,
    mergeable_diffs: &BTreeMap<D, BTreeMap<CH, ChannelDelta>>,
    strategy: &dyn RejectionStrategy<D>,
) -> Result<ResolveOutcome<D>>
where
    D: Ord + Clone,
    CH: Ord + Clone,
    F: FnMut(&D) -> u64,
{
    let compatible: BTreeSet<D> = conflict_set.difference(enforce_rejected).cloned().collect();

    // conflict edges pick up the transitive dependents of their partners;
    // partners already enforced out of the scope carry no choice and drop
    let mut full_conflicts_map: BTreeMap<D, BTreeSet<D>> = BTreeMap::new();
    for (key, partners) in conflicts_map {
        if !compatible.contains(key) {
            continue;
        }
        let closed = with_dependencies(partners, dependency_map)?;
        let restricted: BTreeSet<D> = closed.intersection(&compatible).cloned().collect();
        if !restricted.is_empty() {
            full_conflicts_map.insert(key.clone(), restricted);
        }
    }

    let enumerated = strategy.rejection_options(&full_conflicts_map);
    let augmented = add_mergeable_overflow_rejections(
        &compatible,
        &enumerated,
        init_mergeable_values,
        mergeable_diffs,
    );

    let mut stable_options: BTreeSet<BTreeSet<D>> = BTreeSet::new();
    for option in augmented {
        stable_options.insert(stabilize_option(
            option,
            &compatible,
            dependency_map,
            init_mergeable_values,
            mergeable_diffs,
        )?);
    }

    let optimal = compute_optimal_rejection(&stable_options, cost);

    let accepted: BTreeSet<D> = compatible.difference(&optimal).cloned().collect();
    let rejected: BTreeSet<D> = optimal.union(enforce_rejected).cloned().collect();
    Ok(ResolveOutcome { accepted, rejected })
}

/// Iterate an option to a fixpoint of the two rejection triggers.
///
/// Dependency closure may drag new deploys into the rejection; removing a
/// deploy changes the balances the channel fold sees, which may force further
/// rejections. The rejection set only ever grows, so the loop terminates.
fn stabilize_option<D, CH>(
    option: BTreeSet<D>,
    compatible: &BTreeSet<D>,
    dependency_map: &BTreeMap<D, BTreeSet<D>>,
    init_mergeable_values: &BTreeMap<CH, ChannelBalance>,
    mergeable_diffs: &BTreeMap<D, BTreeMap<CH, ChannelDelta>>,
) -> RelationResult<BTreeSet<D>>
where
    D: Ord + Clone,
    CH: Ord + Clone,
{
    let mut current = option;
    loop {
        let closed: BTreeSet<D> = with_dependencies(&current, dependency_map)?
            .intersection(compatible)
            .cloned()
            .collect();
        let refolded = add_mergeable_overflow_rejections(
            compatible,
            &BTreeSet::from([closed.clone()]),
            init_mergeable_values,
            mergeable_diffs,
        );
        let next = refolded.into_iter().next().unwrap_or(closed);
        if next == current {
            return Ok(next);
        }
        current = next;
    }
}

/// Resolve the unfinalized region of the DAG.
///
/// Computes the conflict scope from the tips and the finalization fringe,
/// collects the deploys those blocks carry, derives the conflict and
/// dependency maps from the catalog's predicates, forces out everything
/// incompatible with finalized acceptance/rejection, and hands the rest to
/// [`resolve_conflict_set`]. The returned partition covers the whole conflict
/// set.
#[allow(clippy::too_many_arguments)]
pub fn resolve_dag<B, D, CH, V, C>(
    view: &V,
    catalog: &C,
    latest_messages: &BTreeSet<B>,
    latest_fringe: &BTreeSet<B>,
    accepted_finally: &BTreeSet<D>,
    rejected_finally: &BTreeSet<D>,
    init_mergeable_values: &BTreeMap<CH, ChannelBalance>,
    strategy: &dyn RejectionStrategy<D>,
) -> Result<ResolveOutcome<D>>
where
    B: Ord + Clone,
    D: Ord + Clone,
    CH: Ord + Clone,
    V: DagView<B, D>,
    C: DeployCatalog<D, CH>,
{
    let scope = conflict_scope(latest_messages, latest_fringe, |block| view.seen(block));

    let mut conflict_set: BTreeSet<D> = BTreeSet::new();
    for block in &scope {
        conflict_set.extend(view.deploys(block));
    }

    let conflicts_map = compute_relation_map(false, &conflict_set, &conflict_set, |a, b| {
        catalog.conflicts(a, b)
    });
    let dependency_map = compute_relation_map(true, &conflict_set, &conflict_set, |a, b| {
        catalog.depends(a, b)
    });

    let final_conflicts = compute_relation_map(true, &conflict_set, accepted_finally, |a, b| {
        catalog.conflicts(a, b)
    });
    let final_dependents = compute_relation_map(true, &conflict_set, rejected_finally, |a, b| {
        catalog.depends(a, b)
    });

    let incompatible = incompatible_with_final(
        accepted_finally,
        rejected_finally,
        &final_conflicts,
        &final_dependents,
    );
    let enforce_rejected = with_dependencies(&incompatible, &dependency_map)?;

    let mergeable_diffs: BTreeMap<D, BTreeMap<CH, ChannelDelta>> = conflict_set
        .iter()
        .filter_map(|deploy| {
            let channel_diffs = catalog.channel_diffs(deploy);
            (!channel_diffs.is_empty()).then(|| (deploy.clone(), channel_diffs))
        })
        .collect();

    resolve_conflict_set(
        &conflict_set,
        &conflicts_map,
        &dependency_map,
        &enforce_rejected,
        |deploy| catalog.cost(deploy),
        init_mergeable_values,
        &mergeable_diffs,
        strategy,
    )
}
