pub mod branches;
pub mod closure;
pub mod error;
pub mod index;

pub use branches::{compute_branches, compute_greedy_non_intersecting_branches, partition_scope};
pub use closure::with_dependencies;
pub use error::{RelationError, Result};
pub use index::compute_relation_map;
