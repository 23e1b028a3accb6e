pub mod catalog;
pub mod error;
pub mod mergeable;
pub mod optimal;
pub mod resolver;
pub mod strategies;
pub mod strategy;

pub use catalog::DeployCatalog;
pub use error::{ResolveError, Result};
pub use mergeable::add_mergeable_overflow_rejections;
pub use optimal::compute_optimal_rejection;
pub use resolver::{incompatible_with_final, resolve_conflict_set, resolve_dag, ResolveOutcome};
pub use strategy::RejectionStrategy;
