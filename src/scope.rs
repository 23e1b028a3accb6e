pub mod error;
pub mod selectors;
pub mod view;

pub use error::{Result, ScopeError};
pub use selectors::{conflict_scope, final_scope, lowest_fringe};
pub use view::DagView;
