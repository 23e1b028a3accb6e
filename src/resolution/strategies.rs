pub mod degree_cover;
pub mod exhaustive;

pub use degree_cover::DegreeCover;
pub use exhaustive::{compute_rejection_options, ExhaustiveSearch};
