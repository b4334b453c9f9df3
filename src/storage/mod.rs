//! On-disk inputs and outputs

pub mod database;
pub mod duplicates;
pub mod embeddings;
pub mod flags;

pub use database::{load_database, parse_database};
pub use duplicates::{read_records, write_records};
pub use embeddings::{load_batch, save_batch, BatchFile, StoredVector};
pub use flags::{duplicate_flags_from_records, update_duplicate_flags};
