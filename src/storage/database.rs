//! Media metadata database loading (JSON array or JSON lines)

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::MediaEntry;

/// Load every entry from a metadata database file
pub fn load_database(path: &Path) -> Result<Vec<MediaEntry>> {
	let content = fs::read_to_string(path)
		.with_context(|| format!("Failed to read metadata database {}", path.display()))?;
	parse_database(&content)
		.with_context(|| format!("Failed to parse metadata database {}", path.display()))
}

/// Parse a database document; a leading `[` means one JSON array, anything
/// else is read as one entry per line
pub fn parse_database(content: &str) -> Result<Vec<MediaEntry>> {
	if content.trim_start().starts_with('[') {
		return serde_json::from_str(content).context("Invalid JSON array");
	}

	content
		.lines()
		.enumerate()
		.filter(|(_, line)| !line.trim().is_empty())
		.map(|(n, line)| {
			serde_json::from_str(line).with_context(|| format!("Invalid entry on line {}", n + 1))
		})
		.collect()
}
