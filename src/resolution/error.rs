use thiserror::Error;

use crate::relation::error::RelationError;
use crate::scope::error::ScopeError;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
    #[error("relation error: {0}")]
    Relation(#[from] RelationError),

    #[error("scope error: {0}")]
    Scope(#[from] ScopeError),
}

pub type Result<T> = std::result::Result<T, ResolveError>;
