use std::collections::{BTreeMap, BTreeSet};

/// An enumeration strategy over the conflict graph.
///
/// Input is a conflicts map whose value sets already incorporate transitive
/// dependency closure: an edge means "keeping both endpoints forces a
/// contradiction, directly or via dependencies". Each returned option is a
/// set of deploys whose removal leaves the remaining keys conflict-free.
///
/// Every strategy must return the empty set of options for an empty key set
/// and at least one option otherwise. Optimality guarantees are documented
/// per implementation.
pub trait RejectionStrategy<D: Ord>: Send + Sync {
    /// Enumerate candidate rejection sets for the given conflict graph.
    fn rejection_options(
        &self,
        conflicts_map: &BTreeMap<D, BTreeSet<D>>,
    ) -> BTreeSet<BTreeSet<D>>;

    /// Return a descriptive name of the strategy (e.g. "exhaustive").
    fn name(&self) -> &str;
}
