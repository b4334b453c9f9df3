//! Core domain types

pub mod duplicate;
pub mod embedding;
pub mod lookup;
pub mod media;

pub use duplicate::{ClipPair, ClipRef, DuplicatePairRecord};
pub use embedding::EmbeddingBatch;
pub use lookup::{Lookup, LookupRecord};
pub use media::{Clip, EntryMetadata, MediaEntry, MediaType, Quality};

/// Identifier under which an embedding is stored in the similarity index
pub type VectorId = i64;

/// Identifier of a media file in the metadata database
pub type FileId = i64;

/// Vector ids transitively linked by the within-radius relation
pub type Component = Vec<VectorId>;
