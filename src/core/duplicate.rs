//! Duplicate-pair records written to the output file

use serde::{Deserialize, Serialize};

use super::{FileId, LookupRecord, MediaType};

/// One side of a clip pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRef {
	pub file_id: FileId,
	pub file_name: String,
	pub media_type: MediaType,
	pub clip_idx: Option<i64>,
	pub start_s: Option<f64>,
	pub end_s: Option<f64>,
}

impl From<&LookupRecord> for ClipRef {
	fn from(record: &LookupRecord) -> Self {
		Self {
			file_id: record.file_id,
			file_name: record.file_name.clone(),
			media_type: record.media_type,
			clip_idx: record.clip_idx,
			start_s: record.start_s,
			end_s: record.end_s,
		}
	}
}

/// Two clips (or images) found within radius of each other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipPair {
	pub original: ClipRef,
	pub duplicate: ClipRef,
}

/// All merged evidence that two files are near-duplicates.
///
/// "Original" and "duplicate" are labels from discovery order (or id order
/// under canonical ordering), not a statement about provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicatePairRecord {
	pub original_file_id: FileId,
	pub original_file_name: String,
	pub original_duration: f64,
	pub duplicate_file_id: FileId,
	pub duplicate_file_name: String,
	pub duplicate_duration: f64,
	pub clips: Vec<ClipPair>,
}

impl DuplicatePairRecord {
	pub fn key(&self) -> (FileId, FileId) {
		(self.original_file_id, self.duplicate_file_id)
	}
}
