//! Range-search provider interface

use anyhow::{bail, Result};

use crate::core::{EmbeddingBatch, VectorId};

/// Neighbors within radius for every query row, in compressed-row form.
///
/// Row `i` owns `labels[lims[i]..lims[i + 1]]` and the matching `distances`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeSearchResult {
	pub lims: Vec<usize>,
	pub labels: Vec<VectorId>,
	pub distances: Vec<f32>,
}

impl RangeSearchResult {
	/// Assemble from per-row (label, distance) lists
	pub fn from_rows(rows: Vec<Vec<(VectorId, f32)>>) -> Self {
		let total = rows.iter().map(Vec::len).sum::<usize>();
		let mut result = Self {
			lims: Vec::with_capacity(rows.len() + 1),
			labels: Vec::with_capacity(total),
			distances: Vec::with_capacity(total),
		};

		result.lims.push(0);
		for row in rows {
			for (label, distance) in row {
				result.labels.push(label);
				result.distances.push(distance);
			}
			result.lims.push(result.labels.len());
		}

		result
	}

	pub fn rows(&self) -> usize {
		self.lims.len().saturating_sub(1)
	}

	pub fn row(&self, index: usize) -> &[VectorId] {
		&self.labels[self.lims[index]..self.lims[index + 1]]
	}

	/// Check the result is well formed for a batch of `queries` rows
	pub fn validate(&self, queries: usize) -> Result<()> {
		if self.lims.len() != queries + 1 {
			bail!(
				"Range search returned {} row offsets for {} queries",
				self.lims.len(),
				queries + 1
			);
		}
		if self.lims[0] != 0 {
			bail!("Range search offsets must start at 0, got {}", self.lims[0]);
		}
		if let Some(pos) = self.lims.windows(2).position(|w| w[0] > w[1]) {
			bail!("Range search offsets decrease at row {}", pos);
		}
		let last = self.lims[queries];
		if last != self.labels.len() {
			bail!(
				"Range search offsets end at {} but {} labels were returned",
				last,
				self.labels.len()
			);
		}
		if self.distances.len() != self.labels.len() {
			bail!(
				"Range search returned {} distances for {} labels",
				self.distances.len(),
				self.labels.len()
			);
		}
		Ok(())
	}
}

/// A similarity index able to answer radius queries for a whole batch
pub trait RangeSearch {
	fn range_search(&self, batch: &EmbeddingBatch, radius: f32) -> Result<RangeSearchResult>;
}

impl<T: RangeSearch + ?Sized> RangeSearch for &T {
	fn range_search(&self, batch: &EmbeddingBatch, radius: f32) -> Result<RangeSearchResult> {
		(**self).range_search(batch, radius)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_from_rows_builds_offsets() {
		let result = RangeSearchResult::from_rows(vec![
			vec![(1, 1.0), (2, 0.9)],
			vec![],
			vec![(3, 1.0)],
		]);

		assert_eq!(result.lims, vec![0, 2, 2, 3]);
		assert_eq!(result.rows(), 3);
		assert_eq!(result.row(0), &[1, 2]);
		assert!(result.row(1).is_empty());
		assert!(result.validate(3).is_ok());
	}

	#[test]
	fn test_validate_rejects_bad_shapes() {
		let result = RangeSearchResult::from_rows(vec![vec![(1, 1.0)]]);
		assert!(result.validate(2).is_err());

		let mut truncated = result.clone();
		truncated.labels.clear();
		assert!(truncated.validate(1).is_err());

		let mut short_distances = result.clone();
		short_distances.distances.clear();
		assert!(short_distances.validate(1).is_err());

		let decreasing = RangeSearchResult {
			lims: vec![0, 2, 1],
			labels: vec![1, 2],
			distances: vec![1.0, 1.0],
		};
		assert!(decreasing.validate(2).is_err());
	}
}
