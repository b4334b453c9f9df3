//! Exhaustive inner-product index

use std::cmp::Ordering;

use anyhow::{bail, Result};
use rayon::prelude::*;

use super::{RangeSearch, RangeSearchResult};
use crate::core::{EmbeddingBatch, VectorId};

/// Linear-scan index over normalized vectors.
///
/// Distances are inner products (cosine similarity for unit vectors), so a
/// neighbor is "within radius" when its similarity is at least `radius`.
#[derive(Debug, Clone)]
pub struct FlatIndex {
	stored: EmbeddingBatch,
}

impl FlatIndex {
	pub fn new(stored: EmbeddingBatch) -> Self {
		Self { stored }
	}

	pub fn len(&self) -> usize {
		self.stored.len()
	}

	pub fn is_empty(&self) -> bool {
		self.stored.is_empty()
	}

	fn search_row(&self, batch: &EmbeddingBatch, row: usize, radius: f32) -> Vec<(VectorId, f32)> {
		let query_id = batch.ids()[row];
		let scores = self.stored.vectors().dot(&batch.row(row));

		let mut hits: Vec<(VectorId, f32)> = self
			.stored
			.ids()
			.iter()
			.zip(scores.iter())
			.filter(|(_, score)| **score >= radius)
			.map(|(&id, &score)| (id, score))
			.collect();

		// best match first; on a tie the query's own id wins, so a stored query leads its row
		hits.sort_by(|a, b| {
			b.1.partial_cmp(&a.1)
				.unwrap_or(Ordering::Equal)
				.then_with(|| (a.0 != query_id).cmp(&(b.0 != query_id)))
		});
		hits
	}
}

impl RangeSearch for FlatIndex {
	fn range_search(&self, batch: &EmbeddingBatch, radius: f32) -> Result<RangeSearchResult> {
		if self.is_empty() || batch.is_empty() {
			return Ok(RangeSearchResult::from_rows(vec![Vec::new(); batch.len()]));
		}

		if batch.dim() != self.stored.dim() {
			bail!(
				"Query dimension {} does not match index dimension {}",
				batch.dim(),
				self.stored.dim()
			);
		}

		let rows: Vec<Vec<(VectorId, f32)>> = (0..batch.len())
			.into_par_iter()
			.map(|row| self.search_row(batch, row, radius))
			.collect();

		Ok(RangeSearchResult::from_rows(rows))
	}
}
