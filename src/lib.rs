//! Deterministic merge resolver for block-DAG consensus.
//!
//! Given the latest messages (tips) of a block DAG, a finalized fringe
//! boundary, the deploys each unfinalized block carries and the
//! `conflicts`/`depends` relations between them, the resolver partitions the
//! unfinalized deploys into an **accepted** set and a **rejected** set such
//! that the accepted set is conflict-free, closed under dependencies,
//! compatible with finalized acceptance/rejection, and folds onto the shared
//! mergeable channel balances without i64 overflow or negative intermediates.
//!
//! The resolver is a pure, synchronous computation: identical inputs produce
//! bit-for-bit identical outputs. All collections are B-tree based so
//! iteration follows the caller-supplied total order of the identifiers.

pub mod relation;
pub mod resolution;
pub mod scope;

pub use relation::closure::with_dependencies;
pub use relation::index::compute_relation_map;
pub use resolution::catalog::DeployCatalog;
pub use resolution::error::ResolveError;
pub use resolution::resolver::{resolve_conflict_set, resolve_dag, ResolveOutcome};
pub use resolution::strategies::degree_cover::DegreeCover;
pub use resolution::strategies::exhaustive::ExhaustiveSearch;
pub use resolution::strategy::RejectionStrategy;
pub use scope::view::DagView;
