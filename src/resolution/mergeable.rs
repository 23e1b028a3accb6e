use std::collections::{BTreeMap, BTreeSet};

/// Signed balance delta a deploy applies to a mergeable channel.
pub type ChannelDelta = i64;
/// Running balance of a mergeable channel.
pub type ChannelBalance = i64;

/// Augment each rejection option with the deploys forced out by channel
/// arithmetic.
///
/// For every option `R`, the candidate merge set `conflict_set − R` is folded
/// onto the initial balances in ascending order of total absolute impact
/// (`Σ|Δ|` over the deploy's channels; deploys with no diff entry sort first,
/// ties fall back to deploy order). A deploy whose diffs would overflow i64
/// or drive any balance negative is rejected; its staged writes are rolled
/// back and the fold continues with the previous balances.
///
/// When the enumerator produced no options at all (empty conflict graph),
/// the fold still runs once over the whole conflict set and its result is
/// the sole option returned.
pub fn add_mergeable_overflow_rejections<D, CH>(
    conflict_set: &BTreeSet<D>,
    options: &BTreeSet<BTreeSet<D>>,
    init_values: &BTreeMap<CH, ChannelBalance>,
    diffs: &BTreeMap<D, BTreeMap<CH, ChannelDelta>>,
) -> BTreeSet<BTreeSet<D>>
where
    D: Ord + Clone,
    CH: Ord + Clone,
{
    if options.is_empty() {
        let rejections = fold_overflow_rejections(conflict_set, &BTreeSet::new(), init_values, diffs);
        return BTreeSet::from([rejections]);
    }

    options
        .iter()
        .map(|rejected| {
            let mut augmented = rejected.clone();
            augmented.extend(fold_overflow_rejections(
                conflict_set,
                rejected,
                init_values,
                diffs,
            ));
            augmented
        })
        .collect()
}

/// Total absolute impact of a deploy across its channels; deploys without a
/// diff entry sort below every real sum.
fn total_impact<D, CH>(deploy: &D, diffs: &BTreeMap<D, BTreeMap<CH, ChannelDelta>>) -> i128
where
    D: Ord,
    CH: Ord,
{
    match diffs.get(deploy) {
        None => i128::from(i64::MIN),
        Some(channel_diffs) => channel_diffs
            .values()
            .map(|delta| i128::from(*delta).abs())
            .sum(),
    }
}

fn fold_overflow_rejections<D, CH>(
    conflict_set: &BTreeSet<D>,
    rejected: &BTreeSet<D>,
    init_values: &BTreeMap<CH, ChannelBalance>,
    diffs: &BTreeMap<D, BTreeMap<CH, ChannelDelta>>,
) -> BTreeSet<D>
where
    D: Ord + Clone,
    CH: Ord + Clone,
{
    let mut candidates: Vec<&D> = conflict_set.difference(rejected).collect();
    candidates.sort_by_key(|&deploy| (total_impact(deploy, diffs), deploy));

    let mut balances = init_values.clone();
    let mut overflown = BTreeSet::new();
    'deploys: for deploy in candidates {
        let Some(channel_diffs) = diffs.get(deploy) else {
            continue;
        };
        let mut staged = Vec::with_capacity(channel_diffs.len());
        for (channel, delta) in channel_diffs {
            let current = balances.get(channel).copied().unwrap_or(0);
            match current.checked_add(*delta) {
                Some(updated) if updated >= 0 => staged.push((channel.clone(), updated)),
                _ => {
                    overflown.insert(deploy.clone());
                    continue 'deploys;
                }
            }
        }
        for (channel, updated) in staged {
            balances.insert(channel, updated);
        }
    }
    overflown
}
