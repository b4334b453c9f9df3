//! Embedding batches: one row per indexed vector

use anyhow::{bail, Result};
use ndarray::{Array2, ArrayView1, ArrayView2};

use super::VectorId;

/// N×D matrix of embeddings with the vector id of each row
#[derive(Debug, Clone)]
pub struct EmbeddingBatch {
	ids: Vec<VectorId>,
	vectors: Array2<f32>,
}

impl EmbeddingBatch {
	pub fn new(ids: Vec<VectorId>, vectors: Array2<f32>) -> Result<Self> {
		if ids.len() != vectors.nrows() {
			bail!(
				"Embedding batch has {} ids but {} rows",
				ids.len(),
				vectors.nrows()
			);
		}
		Ok(Self { ids, vectors })
	}

	/// Build from (id, vector) rows; every vector must share one dimension
	pub fn from_rows(rows: Vec<(VectorId, Vec<f32>)>) -> Result<Self> {
		let dim = rows.first().map(|(_, v)| v.len()).unwrap_or(0);
		let mut ids = Vec::with_capacity(rows.len());
		let mut flat = Vec::with_capacity(rows.len() * dim);

		for (id, vector) in rows {
			if vector.len() != dim {
				bail!(
					"Vector {} has dimension {}, expected {}",
					id,
					vector.len(),
					dim
				);
			}
			ids.push(id);
			flat.extend(vector);
		}

		let vectors = Array2::from_shape_vec((ids.len(), dim), flat)?;
		Self::new(ids, vectors)
	}

	/// L2-normalize every row in place (zero rows are left as is)
	pub fn normalize(&mut self) {
		for mut row in self.vectors.rows_mut() {
			let norm = row.iter().map(|x| x * x).sum::<f32>().sqrt();
			if norm > 0.0 {
				row.mapv_inplace(|x| x / norm);
			}
		}
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	pub fn dim(&self) -> usize {
		self.vectors.ncols()
	}

	pub fn ids(&self) -> &[VectorId] {
		&self.ids
	}

	pub fn vectors(&self) -> ArrayView2<'_, f32> {
		self.vectors.view()
	}

	pub fn row(&self, index: usize) -> ArrayView1<'_, f32> {
		self.vectors.row(index)
	}
}
