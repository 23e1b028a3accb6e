use std::collections::BTreeMap;

/// Per-deploy metadata supplied by the surrounding node.
///
/// The predicates come from whatever executed the deploys (channel access
/// logs, read/write sets); the resolver only ever observes their boolean
/// answers. `conflicts` is expected to be symmetric in intent; the relation
/// builder enforces symmetry on the constructed map either way.
pub trait DeployCatalog<D, CH> {
    /// True when the two deploys cannot both be accepted.
    fn conflicts(&self, a: &D, b: &D) -> bool;

    /// True when `a` depends on `b`, i.e. rejecting `b` forces rejecting `a`.
    fn depends(&self, a: &D, b: &D) -> bool;

    /// Execution cost charged to the deploy.
    fn cost(&self, deploy: &D) -> u64;

    /// Per-channel balance deltas contributed by the deploy. Deploys without
    /// mergeable effects return an empty map.
    fn channel_diffs(&self, deploy: &D) -> BTreeMap<CH, i64>;
}
