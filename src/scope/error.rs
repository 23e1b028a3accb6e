use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScopeError {
    #[error("lowest fringe requested over an empty fringe set")]
    EmptyFringeSet,
}

pub type Result<T> = std::result::Result<T, ScopeError>;
