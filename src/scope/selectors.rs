use std::collections::BTreeSet;

use crate::scope::error::{Result, ScopeError};

/// Compute the conflict scope: every block reachable from the tips that is
/// neither part of the finalization fringe nor reachable from it.
///
/// `(latest ∪ ⋃seen(latest)) − fringe − ⋃seen(fringe)`, with `seen` returning
/// proper ancestors only.
pub fn conflict_scope<B, F>(latest: &BTreeSet<B>, fringe: &BTreeSet<B>, mut seen: F) -> BTreeSet<B>
where
    B: Ord + Clone,
    F: FnMut(&B) -> BTreeSet<B>,
{
    let mut scope: BTreeSet<B> = latest.clone();
    for tip in latest {
        scope.extend(seen(tip));
    }
    for boundary in fringe {
        for ancestor in seen(boundary) {
            scope.remove(&ancestor);
        }
        scope.remove(boundary);
    }
    scope
}

/// Compute the final scope: the ring of newly finalized blocks between two
/// fringes, with the outer fringe itself included.
///
/// `(⋃seen(latest_fringe) − ⋃seen(lowest_fringe)) ∪ latest_fringe`.
pub fn final_scope<B, F>(
    latest_fringe: &BTreeSet<B>,
    lowest_fringe: &BTreeSet<B>,
    mut seen: F,
) -> BTreeSet<B>
where
    B: Ord + Clone,
    F: FnMut(&B) -> BTreeSet<B>,
{
    let mut ring = BTreeSet::new();
    for boundary in latest_fringe {
        ring.extend(seen(boundary));
    }
    for boundary in lowest_fringe {
        for ancestor in seen(boundary) {
            ring.remove(&ancestor);
        }
    }
    ring.extend(latest_fringe.iter().cloned());
    ring
}

/// Pick the fringe whose minimal block by `(height, id)` is globally minimal.
///
/// A single fringe is returned as-is. A fringe without blocks has no minimal
/// block and can never win. Calling with no fringes at all is a programmer
/// error surfaced as [`ScopeError::EmptyFringeSet`].
pub fn lowest_fringe<'a, B, F>(
    fringes: &'a BTreeSet<BTreeSet<B>>,
    height: F,
) -> Result<&'a BTreeSet<B>>
where
    B: Ord,
    F: Fn(&B) -> i64,
{
    if fringes.len() == 1 {
        return Ok(fringes.iter().next().expect("len checked above"));
    }
    fringes
        .iter()
        .filter_map(|fringe| {
            fringe
                .iter()
                .min_by_key(|&block| (height(block), block))
                .map(|min_block| (min_block, fringe))
        })
        .min_by_key(|&(min_block, _)| (height(min_block), min_block))
        .map(|(_, fringe)| fringe)
        .ok_or(ScopeError::EmptyFringeSet)
}
