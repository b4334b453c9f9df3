//! Similarity index collaborators

pub mod flat;
pub mod range;

pub use flat::FlatIndex;
pub use range::{RangeSearch, RangeSearchResult};
