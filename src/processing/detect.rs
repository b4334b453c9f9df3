//! End-to-end duplicate detection for one batch

use anyhow::Result;

use super::{collect_groups, AggregateStats, PairAggregator, PairOrdering};
use crate::core::{DuplicatePairRecord, EmbeddingBatch, Lookup};
use crate::index::RangeSearch;
use crate::ui;

/// What one detection run found
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
	pub records: Vec<DuplicatePairRecord>,
	pub components: usize,
	pub grouped_vectors: usize,
	pub stats: AggregateStats,
}

/// Group the batch with `provider` and collapse the groups into file pairs
pub fn detect_duplicates<P: RangeSearch>(
	provider: &P,
	batch: &EmbeddingBatch,
	lookup: &Lookup,
	radius: f32,
	ordering: PairOrdering,
) -> Result<Detection> {
	let groups = collect_groups(provider, batch, radius)?;
	let grouped_vectors: usize = groups.iter().map(Vec::len).sum();
	ui::debug(&format!(
		"{} components covering {} vectors",
		groups.len(),
		grouped_vectors
	));

	let mut aggregator = PairAggregator::new(lookup, ordering);
	for group in &groups {
		if !aggregator.add_component(group) {
			ui::debug(&format!("Dropped component of {} vectors (single file)", group.len()));
		}
	}

	let stats = aggregator.stats();
	let records = aggregator.finish();

	Ok(Detection {
		records,
		components: groups.len(),
		grouped_vectors,
		stats,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::{Clip, MediaEntry};
	use crate::index::FlatIndex;
	use crate::processing::build_lookup;

	#[test]
	fn test_detects_reencoded_video() {
		let entries = vec![
			MediaEntry {
				file_id: Some(1),
				file_name: Some("holiday.mp4".into()),
				media_type: Some("video".into()),
				duration: Some(30.0),
				clips: vec![
					Clip { clip_idx: Some(0), start_s: Some(0.0), end_s: Some(10.0), vector_id: Some(10) },
					Clip { clip_idx: Some(1), start_s: Some(10.0), end_s: Some(20.0), vector_id: Some(11) },
				],
				..Default::default()
			},
			MediaEntry {
				file_id: Some(2),
				file_name: Some("holiday_720p.mp4".into()),
				media_type: Some("video".into()),
				duration: Some(29.5),
				clips: vec![Clip { clip_idx: Some(0), start_s: Some(0.0), end_s: Some(10.0), vector_id: Some(20) }],
				..Default::default()
			},
			MediaEntry {
				file_id: Some(3),
				file_name: Some("cat.jpg".into()),
				media_type: Some("image".into()),
				vector_id: Some(30),
				..Default::default()
			},
		];
		let lookup = build_lookup(&entries).unwrap();

		let mut batch = EmbeddingBatch::from_rows(vec![
			(10, vec![1.0, 0.0, 0.0]),
			(11, vec![0.0, 1.0, 0.0]),
			(20, vec![0.98, 0.0, 0.1]),
			(30, vec![0.0, 0.0, 1.0]),
		])
		.unwrap();
		batch.normalize();
		let index = FlatIndex::new(batch.clone());

		let detection =
			detect_duplicates(&index, &batch, &lookup, 0.95, PairOrdering::Discovery).unwrap();

		assert_eq!(detection.components, 1);
		assert_eq!(detection.grouped_vectors, 2);
		assert_eq!(detection.records.len(), 1);

		let record = &detection.records[0];
		assert_eq!(record.key(), (1, 2));
		assert_eq!(record.original_duration, 30.0);
		assert_eq!(record.duplicate_duration, 29.5);
		assert_eq!(record.clips.len(), 1);
		assert_eq!(record.clips[0].original.clip_idx, Some(0));
	}
}
