//! Duplicate detection pipeline stages

pub mod detect;
pub mod group;
pub mod lookup;
pub mod pairs;

pub use detect::{detect_duplicates, Detection};
pub use group::{build_adjacency, collect_groups, Adjacency};
pub use lookup::build_lookup;
pub use pairs::{aggregate_pairs, AggregateStats, PairAggregator, PairOrdering};
