use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RelationError {
    #[error("cycle detected in dependency graph")]
    DependencyCycle,
}

pub type Result<T> = std::result::Result<T, RelationError>;
