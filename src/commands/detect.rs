//! Detect command - find near-duplicate files in an embedding batch

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use colored::*;

use crate::index::FlatIndex;
use crate::processing::{build_lookup, detect_duplicates, PairOrdering};
use crate::storage;
use crate::ui;

pub fn run(
	database: &Path,
	embeddings: &Path,
	radius: f32,
	output: &Path,
	ordering: PairOrdering,
	mark: Option<&Path>,
) -> Result<()> {
	let start = Instant::now();

	ui::info(&format!("Loading metadata from {}", ui::path_link(database, 40)));
	let entries = storage::load_database(database)?;
	let lookup = build_lookup(&entries)?;
	ui::success(&format!(
		"{} entries, {} indexed vectors across {} files",
		entries.len(),
		lookup.len(),
		lookup.file_count()
	));

	ui::info(&format!("Loading embeddings from {}", ui::path_link(embeddings, 40)));
	let mut batch = storage::load_batch(embeddings)?;
	if batch.is_empty() {
		ui::warn("Embedding batch is empty, nothing to compare");
	}
	batch.normalize();

	let unknown = batch.ids().iter().filter(|id| !lookup.contains(**id)).count();
	if unknown > 0 {
		ui::debug(&format!("{} vectors have no metadata and will be ignored", unknown));
	}

	let index = FlatIndex::new(batch.clone());
	let detection = detect_duplicates(&index, &batch, &lookup, radius, ordering)?;

	if let Err(e) = storage::write_records(&detection.records, output) {
		ui::error(&format!("Could not write {}: {}", output.display(), e));
		return Err(e);
	}
	ui::success(&format!(
		"Wrote {} duplicate pairs to {}",
		detection.records.len(),
		ui::path_link(output, 60)
	));

	if let Some(descriptions) = mark {
		let flags = storage::duplicate_flags_from_records(&detection.records);
		let updated = storage::update_duplicate_flags(descriptions, &flags)?;
		ui::success(&format!(
			"Marked {} files as duplicates in {} ({} entries)",
			flags.len(),
			ui::path_link(descriptions, 60),
			updated.len()
		));
	}

	ui::header("Summary");
	ui::stat("Vectors", batch.len());
	ui::stat("Radius", radius);
	ui::stat("Components", detection.components);
	ui::stat("Cross-file", detection.stats.cross_file_components);
	ui::stat("Pairs", detection.records.len());
	ui::stat("Clip pairs", detection.stats.clip_pairs);
	eprintln!(
		"\n{}",
		format!("Completed in {:.2}s", start.elapsed().as_secs_f32()).dimmed()
	);

	Ok(())
}
