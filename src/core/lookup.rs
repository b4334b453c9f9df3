//! Vector id to media metadata lookup table

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{FileId, MediaType, VectorId};

/// Descriptive metadata for one indexed vector (an image or a video clip)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupRecord {
	pub vector_id: VectorId,
	pub file_id: FileId,
	pub file_name: String,
	/// `None` for images
	pub clip_idx: Option<i64>,
	pub media_type: MediaType,
	pub prefix: String,
	/// Seconds, always 0.0 for images
	pub duration: f64,
	pub variance: f64,
	pub start_s: Option<f64>,
	pub end_s: Option<f64>,
}

/// Read-only table built once per run
#[derive(Debug, Default, Clone)]
pub struct Lookup {
	records: HashMap<VectorId, LookupRecord>,
	// per file: duration of the first record seen, and live record count
	files: HashMap<FileId, (f64, usize)>,
}

impl Lookup {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a record; a repeated vector id replaces the earlier record.
	///
	/// A file left without records by the replacement is forgotten.
	pub fn insert(&mut self, record: LookupRecord) {
		self.files
			.entry(record.file_id)
			.or_insert((record.duration, 0))
			.1 += 1;

		if let Some(replaced) = self.records.insert(record.vector_id, record) {
			if let Some(file) = self.files.get_mut(&replaced.file_id) {
				file.1 -= 1;
				if file.1 == 0 {
					self.files.remove(&replaced.file_id);
				}
			}
		}
	}

	pub fn get(&self, vector_id: VectorId) -> Option<&LookupRecord> {
		self.records.get(&vector_id)
	}

	pub fn contains(&self, vector_id: VectorId) -> bool {
		self.records.contains_key(&vector_id)
	}

	/// Duration of a file, 0.0 when the file has no records
	pub fn duration_of(&self, file_id: FileId) -> f64 {
		self.files.get(&file_id).map_or(0.0, |file| file.0)
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Number of distinct files with at least one indexed vector
	pub fn file_count(&self) -> usize {
		self.files.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(vector_id: VectorId, file_id: FileId, duration: f64) -> LookupRecord {
		LookupRecord {
			vector_id,
			file_id,
			file_name: format!("file_{}.mp4", file_id),
			clip_idx: Some(vector_id),
			media_type: MediaType::Video,
			prefix: String::new(),
			duration,
			variance: 0.0,
			start_s: Some(0.0),
			end_s: Some(1.0),
		}
	}

	#[test]
	fn test_duration_uses_first_record_per_file() {
		let mut lookup = Lookup::new();
		lookup.insert(record(1, 7, 12.5));
		lookup.insert(record(2, 7, 99.0));

		assert_eq!(lookup.duration_of(7), 12.5);
		assert_eq!(lookup.duration_of(8), 0.0);
		assert_eq!(lookup.file_count(), 1);
	}

	#[test]
	fn test_repeated_vector_id_keeps_last() {
		let mut lookup = Lookup::new();
		lookup.insert(record(1, 7, 1.0));
		lookup.insert(record(1, 9, 2.0));

		assert_eq!(lookup.len(), 1);
		assert_eq!(lookup.get(1).map(|r| r.file_id), Some(9));
	}

	#[test]
	fn test_replaced_file_loses_its_duration() {
		let mut lookup = Lookup::new();
		lookup.insert(record(1, 7, 1.0));
		lookup.insert(record(2, 7, 1.0));
		lookup.insert(record(1, 9, 2.0));

		// file 7 still owns vector 2
		assert_eq!(lookup.duration_of(7), 1.0);
		assert_eq!(lookup.duration_of(9), 2.0);
		assert_eq!(lookup.file_count(), 2);

		lookup.insert(record(2, 9, 3.0));
		assert_eq!(lookup.duration_of(7), 0.0);
		assert_eq!(lookup.duration_of(9), 2.0);
		assert_eq!(lookup.file_count(), 1);
	}
}
