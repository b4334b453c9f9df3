//! Duplicate grouper: range-search output to connected components

use std::collections::{BTreeSet, HashMap, HashSet};

use anyhow::{Context, Result};

use crate::config::NO_MATCH_ID;
use crate::core::{Component, EmbeddingBatch, VectorId};
use crate::index::{RangeSearch, RangeSearchResult};
use crate::ui;

/// Undirected within-radius graph keyed by vector id
#[derive(Debug, Default, Clone)]
pub struct Adjacency {
	// nodes in first-seen order so traversal is reproducible
	order: Vec<VectorId>,
	neighbors: HashMap<VectorId, BTreeSet<VectorId>>,
}

impl Adjacency {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add an undirected edge; self-loops and sentinel ids are ignored
	pub fn add_edge(&mut self, a: VectorId, b: VectorId) {
		if a == b || a == NO_MATCH_ID || b == NO_MATCH_ID {
			return;
		}
		self.link(a, b);
		self.link(b, a);
	}

	fn link(&mut self, from: VectorId, to: VectorId) {
		let order = &mut self.order;
		self.neighbors
			.entry(from)
			.or_insert_with(|| {
				order.push(from);
				BTreeSet::new()
			})
			.insert(to);
	}

	pub fn node_count(&self) -> usize {
		self.order.len()
	}

	pub fn edge_count(&self) -> usize {
		self.neighbors.values().map(BTreeSet::len).sum::<usize>() / 2
	}

	pub fn neighbors(&self, id: VectorId) -> Option<&BTreeSet<VectorId>> {
		self.neighbors.get(&id)
	}

	/// Connected components by iterative depth-first search
	pub fn components(&self) -> Vec<Component> {
		let mut visited: HashSet<VectorId> = HashSet::with_capacity(self.order.len());
		let mut groups = Vec::new();

		for &node in &self.order {
			if visited.contains(&node) {
				continue;
			}

			let mut stack = vec![node];
			let mut component = Vec::new();

			while let Some(current) = stack.pop() {
				if !visited.insert(current) {
					continue;
				}
				component.push(current);

				if let Some(next) = self.neighbors.get(&current) {
					stack.extend(next.iter().filter(|id| !visited.contains(*id)));
				}
			}

			groups.push(component);
		}

		groups
	}
}

/// Build the graph from a range-search result.
///
/// The first label of each row is that row's own id; every other label in
/// the row is linked to it. `result` must already be validated.
pub fn build_adjacency(result: &RangeSearchResult) -> Adjacency {
	let mut adjacency = Adjacency::new();

	for row in 0..result.rows() {
		let labels = result.row(row);
		let Some((&query_id, rest)) = labels.split_first() else {
			continue;
		};
		if query_id == NO_MATCH_ID {
			continue;
		}

		for &neighbor in rest {
			adjacency.add_edge(query_id, neighbor);
		}
	}

	adjacency
}

/// Group a batch into connected components of near-duplicate vectors
pub fn collect_groups<P: RangeSearch>(
	provider: &P,
	batch: &EmbeddingBatch,
	radius: f32,
) -> Result<Vec<Component>> {
	ui::debug(&format!(
		"Range search: {} vectors ({}D), radius {}",
		batch.len(),
		batch.dim(),
		radius
	));

	let result = provider
		.range_search(batch, radius)
		.context("Range search failed")?;
	result
		.validate(batch.len())
		.context("Range search returned a malformed result")?;

	let adjacency = build_adjacency(&result);
	ui::debug(&format!(
		"Neighbor graph: {} nodes, {} edges",
		adjacency.node_count(),
		adjacency.edge_count()
	));

	Ok(adjacency.components())
}

#[cfg(test)]
mod tests {
	use super::*;
	use anyhow::bail;

	struct FixedSearch(RangeSearchResult);

	impl RangeSearch for FixedSearch {
		fn range_search(&self, _batch: &EmbeddingBatch, _radius: f32) -> Result<RangeSearchResult> {
			Ok(self.0.clone())
		}
	}

	struct FailingSearch;

	impl RangeSearch for FailingSearch {
		fn range_search(&self, _batch: &EmbeddingBatch, _radius: f32) -> Result<RangeSearchResult> {
			bail!("index not trained")
		}
	}

	fn rows(rows: &[&[VectorId]]) -> RangeSearchResult {
		RangeSearchResult::from_rows(
			rows.iter()
				.map(|row| row.iter().map(|&id| (id, 1.0)).collect())
				.collect(),
		)
	}

	fn batch_of(n: usize) -> EmbeddingBatch {
		EmbeddingBatch::from_rows((0..n as VectorId).map(|i| (i, vec![1.0])).collect()).unwrap()
	}

	fn as_sets(groups: Vec<Component>) -> BTreeSet<BTreeSet<VectorId>> {
		groups.into_iter().map(|g| g.into_iter().collect()).collect()
	}

	#[test]
	fn test_edges_form_one_component() {
		let result = rows(&[&[10, 20], &[11, 20], &[20, 10, 11]]);
		let groups = build_adjacency(&result).components();

		assert_eq!(groups.len(), 1);
		assert_eq!(as_sets(groups), BTreeSet::from([BTreeSet::from([10, 11, 20])]));
	}

	#[test]
	fn test_isolated_ids_are_excluded() {
		let result = rows(&[&[1], &[2, 3], &[3, 2], &[4]]);
		let groups = build_adjacency(&result).components();

		assert_eq!(as_sets(groups), BTreeSet::from([BTreeSet::from([2, 3])]));
	}

	#[test]
	fn test_self_and_sentinel_labels_are_skipped() {
		let result = rows(&[&[1, 1, -1, 2], &[-1, 5, 6], &[7, -1]]);
		let adjacency = build_adjacency(&result);

		assert_eq!(adjacency.edge_count(), 1);
		assert!(adjacency.neighbors(-1).is_none());
		assert!(adjacency.neighbors(5).is_none());
		assert!(adjacency.neighbors(7).is_none());
		assert_eq!(as_sets(adjacency.components()), BTreeSet::from([BTreeSet::from([1, 2])]));
	}

	#[test]
	fn test_components_partition_edge_ids() {
		let result = rows(&[
			&[1, 2],
			&[2, 3],
			&[4, 5],
			&[6, 7, 8],
			&[8, 9],
			&[10],
			&[3, 1],
			&[11, 5],
		]);
		let adjacency = build_adjacency(&result);
		let groups = adjacency.components();

		let mut seen = HashSet::new();
		for group in &groups {
			for id in group {
				assert!(seen.insert(*id), "id {} appears in two components", id);
			}
		}

		let edge_ids: HashSet<VectorId> = (1..=9).chain([11]).collect();
		assert_eq!(seen, edge_ids);
		assert_eq!(
			as_sets(groups),
			BTreeSet::from([
				BTreeSet::from([1, 2, 3]),
				BTreeSet::from([4, 5, 11]),
				BTreeSet::from([6, 7, 8, 9]),
			])
		);
	}

	#[test]
	fn test_grouping_is_deterministic() {
		let search = FixedSearch(rows(&[&[1, 2], &[3, 4], &[2, 3], &[5, 6]]));
		let batch = batch_of(4);

		let first = collect_groups(&search, &batch, 0.9).unwrap();
		let second = collect_groups(&search, &batch, 0.9).unwrap();
		assert_eq!(first, second);
		assert_eq!(first.len(), 2);
	}

	#[test]
	fn test_provider_failure_is_fatal() {
		let err = collect_groups(&FailingSearch, &batch_of(1), 0.9).unwrap_err();
		assert!(format!("{:#}", err).contains("index not trained"));
	}

	#[test]
	fn test_shape_mismatch_is_fatal() {
		let search = FixedSearch(rows(&[&[1, 2]]));
		assert!(collect_groups(&search, &batch_of(3), 0.9).is_err());
	}
}
