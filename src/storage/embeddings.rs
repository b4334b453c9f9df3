//! Embedding batch file format and I/O

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::{BATCH_JSON_EXT, BATCH_VERSION};
use crate::core::{EmbeddingBatch, VectorId};
use crate::ui;

#[derive(Debug, Serialize, Deserialize)]
pub struct StoredVector {
	pub vector_id: VectorId,
	pub embedding: Vec<f32>,
}

/// On-disk batch: MessagePack by default, JSON for `.json` files
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchFile {
	pub version: u32,
	#[serde(default)]
	pub created: Option<DateTime<Utc>>,
	pub dim: usize,
	pub vectors: Vec<StoredVector>,
}

impl BatchFile {
	pub fn from_batch(batch: &EmbeddingBatch) -> Self {
		let vectors = batch
			.ids()
			.iter()
			.enumerate()
			.map(|(row, &vector_id)| StoredVector {
				vector_id,
				embedding: batch.row(row).to_vec(),
			})
			.collect();

		Self {
			version: BATCH_VERSION,
			created: Some(Utc::now()),
			dim: batch.dim(),
			vectors,
		}
	}

	pub fn into_batch(self) -> Result<EmbeddingBatch> {
		if let Some(bad) = self.vectors.iter().find(|v| v.embedding.len() != self.dim) {
			bail!(
				"Vector {} has dimension {}, header says {}",
				bad.vector_id,
				bad.embedding.len(),
				self.dim
			);
		}

		EmbeddingBatch::from_rows(
			self.vectors
				.into_iter()
				.map(|v| (v.vector_id, v.embedding))
				.collect(),
		)
	}
}

fn is_json(path: &Path) -> bool {
	path.extension()
		.and_then(|e| e.to_str())
		.is_some_and(|e| e.eq_ignore_ascii_case(BATCH_JSON_EXT))
}

/// Load an embedding batch from disk
pub fn load_batch(path: &Path) -> Result<EmbeddingBatch> {
	let bytes = fs::read(path)
		.with_context(|| format!("Failed to read embedding batch {}", path.display()))?;

	let file: BatchFile = if is_json(path) {
		serde_json::from_slice(&bytes).context("Failed to deserialize embedding batch")?
	} else {
		rmp_serde::from_slice(&bytes).context("Failed to deserialize embedding batch")?
	};

	if file.version != BATCH_VERSION {
		ui::warn(&format!(
			"Embedding batch version {} (expected {})",
			file.version, BATCH_VERSION
		));
	}
	if let Some(created) = file.created {
		ui::debug(&format!("Embedding batch created {}", created.to_rfc3339()));
	}

	file.into_batch()
}

/// Save an embedding batch to disk
pub fn save_batch(batch: &EmbeddingBatch, path: &Path) -> Result<()> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).context("Failed to create batch directory")?;
	}

	let file = BatchFile::from_batch(batch);
	let bytes = if is_json(path) {
		serde_json::to_vec(&file).context("Failed to serialize embedding batch")?
	} else {
		rmp_serde::to_vec(&file).context("Failed to serialize embedding batch")?
	};
	fs::write(path, bytes).context("Failed to write embedding batch")?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_msgpack_and_json_files() {
		let dir = tempfile::tempdir().unwrap();
		let batch =
			EmbeddingBatch::from_rows(vec![(5, vec![0.5, 0.25]), (9, vec![1.0, 0.0])]).unwrap();

		for name in ["batch.msgpack", "batch.json"] {
			let path = dir.path().join(name);
			save_batch(&batch, &path).unwrap();
			let loaded = load_batch(&path).unwrap();

			assert_eq!(loaded.ids(), &[5, 9]);
			assert_eq!(loaded.dim(), 2);
			assert_eq!(loaded.row(0).to_vec(), vec![0.5, 0.25]);
		}
	}

	#[test]
	fn test_header_dimension_is_enforced() {
		let file = BatchFile {
			version: BATCH_VERSION,
			created: None,
			dim: 3,
			vectors: vec![StoredVector {
				vector_id: 1,
				embedding: vec![1.0, 0.0],
			}],
		};
		assert!(file.into_batch().is_err());
	}
}
