//! Pair aggregator: components to cross-file duplicate-pair records

use std::collections::HashMap;

use crate::core::{
	ClipPair, ClipRef, Component, DuplicatePairRecord, FileId, Lookup, LookupRecord, VectorId,
};

type PairKey = (FileId, FileId);

/// How the two files of a pair are labeled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PairOrdering {
	/// The file met first while walking a component is the original
	#[default]
	Discovery,
	/// The lower file id is the original
	Canonical,
}

/// Counters reported after aggregation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
	pub components: usize,
	pub cross_file_components: usize,
	pub clip_pairs: usize,
}

/// Accumulates clip-pair evidence per file pair across all components.
///
/// Pairs are kept in first-discovered order.
pub struct PairAggregator<'a> {
	lookup: &'a Lookup,
	ordering: PairOrdering,
	index: HashMap<PairKey, usize>,
	pairs: Vec<(PairKey, Vec<ClipPair>)>,
	stats: AggregateStats,
}

impl<'a> PairAggregator<'a> {
	pub fn new(lookup: &'a Lookup, ordering: PairOrdering) -> Self {
		Self {
			lookup,
			ordering,
			index: HashMap::new(),
			pairs: Vec::new(),
			stats: AggregateStats::default(),
		}
	}

	/// Add one component's evidence; returns false when it links no two files
	pub fn add_component(&mut self, component: &[VectorId]) -> bool {
		self.stats.components += 1;

		let lookup = self.lookup;
		let entries: Vec<&LookupRecord> = component
			.iter()
			.filter_map(|&id| lookup.get(id))
			.collect();
		if entries.len() < 2 {
			return false;
		}

		let by_file = partition_by_file(&entries);
		if by_file.len() < 2 {
			return false;
		}

		self.stats.cross_file_components += 1;

		for i in 0..by_file.len() {
			for j in (i + 1)..by_file.len() {
				let (mut original, mut duplicate) = (&by_file[i], &by_file[j]);
				if self.ordering == PairOrdering::Canonical && original.0 > duplicate.0 {
					std::mem::swap(&mut original, &mut duplicate);
				}

				let key = (original.0, duplicate.0);
				let clips = self.clips_for(key);
				for a in &original.1 {
					for b in &duplicate.1 {
						clips.push(ClipPair {
							original: ClipRef::from(*a),
							duplicate: ClipRef::from(*b),
						});
					}
				}
				self.stats.clip_pairs += original.1.len() * duplicate.1.len();
			}
		}

		true
	}

	fn clips_for(&mut self, key: PairKey) -> &mut Vec<ClipPair> {
		let slot = match self.index.get(&key) {
			Some(&slot) => slot,
			None => {
				self.pairs.push((key, Vec::new()));
				self.index.insert(key, self.pairs.len() - 1);
				self.pairs.len() - 1
			}
		};
		&mut self.pairs[slot].1
	}

	pub fn stats(&self) -> AggregateStats {
		self.stats
	}

	/// Finalize into records, in first-discovered order
	pub fn finish(self) -> Vec<DuplicatePairRecord> {
		let lookup = self.lookup;

		self.pairs
			.into_iter()
			.filter_map(|((original_id, duplicate_id), clips)| {
				let first = clips.first()?;
				Some(DuplicatePairRecord {
					original_file_id: original_id,
					original_file_name: first.original.file_name.clone(),
					original_duration: lookup.duration_of(original_id),
					duplicate_file_id: duplicate_id,
					duplicate_file_name: first.duplicate.file_name.clone(),
					duplicate_duration: lookup.duration_of(duplicate_id),
					clips,
				})
			})
			.collect()
	}
}

/// Group entries by file id, files in first-seen order
fn partition_by_file<'r>(entries: &[&'r LookupRecord]) -> Vec<(FileId, Vec<&'r LookupRecord>)> {
	let mut slots: HashMap<FileId, usize> = HashMap::new();
	let mut files: Vec<(FileId, Vec<&'r LookupRecord>)> = Vec::new();

	for &entry in entries {
		let slot = *slots.entry(entry.file_id).or_insert_with(|| {
			files.push((entry.file_id, Vec::new()));
			files.len() - 1
		});
		files[slot].1.push(entry);
	}

	files
}

/// Collapse components into duplicate-pair records
pub fn aggregate_pairs(
	components: &[Component],
	lookup: &Lookup,
	ordering: PairOrdering,
) -> Vec<DuplicatePairRecord> {
	let mut aggregator = PairAggregator::new(lookup, ordering);
	for component in components {
		aggregator.add_component(component);
	}
	aggregator.finish()
}
