//! Duplicate-pair output: one JSON record per line

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::DuplicatePairRecord;

/// Write records in order, replacing any existing file
pub fn write_records(records: &[DuplicatePairRecord], path: &Path) -> Result<()> {
	let file = File::create(path)
		.with_context(|| format!("Failed to create output file {}", path.display()))?;
	let mut writer = BufWriter::new(file);

	for record in records {
		serde_json::to_writer(&mut writer, record).context("Failed to serialize duplicate record")?;
		writer.write_all(b"\n").context("Failed to write duplicate record")?;
	}

	writer.flush().context("Failed to flush output file")?;
	Ok(())
}

/// Read records back from a duplicates file (blank lines are skipped)
pub fn read_records(path: &Path) -> Result<Vec<DuplicatePairRecord>> {
	let content = fs::read_to_string(path)
		.with_context(|| format!("Failed to read duplicates file {}", path.display()))?;

	content
		.lines()
		.enumerate()
		.filter(|(_, line)| !line.trim().is_empty())
		.map(|(n, line)| {
			serde_json::from_str(line)
				.with_context(|| format!("Invalid duplicate record on line {}", n + 1))
		})
		.collect()
}
