use std::collections::BTreeSet;

/// Read-only view of the block DAG consulted during resolution.
///
/// The surrounding node owns the DAG; the resolver only needs ancestor
/// reachability, the per-block deploy index and block heights. `seen` returns
/// the *proper* ancestors of a block: the block itself is excluded, and both
/// scope selectors are written against that convention.
pub trait DagView<B, D> {
    /// Ancestor blocks reachable through parent edges, excluding `block`.
    fn seen(&self, block: &B) -> BTreeSet<B>;

    /// Deploys carried by `block`.
    fn deploys(&self, block: &B) -> BTreeSet<D>;

    /// Height of `block` in the DAG.
    fn height(&self, block: &B) -> i64;
}
