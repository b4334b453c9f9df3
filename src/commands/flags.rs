//! Flags command - set duplicate flags in a descriptions file

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::Result;
use serde_json::Value;

use crate::core::FileId;
use crate::storage;
use crate::ui;

pub fn run(entries: &Path, updates: &[(FileId, bool)], from_pairs: Option<&Path>) -> Result<()> {
	let mut flags: HashMap<FileId, bool> = HashMap::new();

	if let Some(pairs) = from_pairs {
		let records = storage::read_records(pairs)?;
		ui::debug(&format!("{} duplicate pairs in {}", records.len(), pairs.display()));
		flags.extend(storage::duplicate_flags_from_records(&records));
	}
	// explicit assignments win over detected pairs
	flags.extend(updates.iter().copied());

	if flags.is_empty() {
		ui::warn("No flag updates given (use --set or --from-pairs)");
		return Ok(());
	}

	ui::info(&format!("Updating {}", ui::path_link(entries, 60)));
	let updated = storage::update_duplicate_flags(entries, &flags)?;

	let matched = matched_entries(&updated, &flags);
	// matched ids are a subset of the flag keys
	let unknown = flags.len() - matched_ids(&updated, &flags).len();

	ui::success(&format!("Updated {} of {} entries", matched, updated.len()));
	if unknown > 0 {
		ui::debug(&format!("{} file ids had no matching entry", unknown));
	}

	Ok(())
}

fn entry_file_id(entry: &Value) -> Option<FileId> {
	entry.get("file_id").and_then(Value::as_i64)
}

fn matched_entries(entries: &[Value], flags: &HashMap<FileId, bool>) -> usize {
	entries
		.iter()
		.filter_map(entry_file_id)
		.filter(|id| flags.contains_key(id))
		.count()
}

/// Distinct file ids that matched at least one entry
fn matched_ids(entries: &[Value], flags: &HashMap<FileId, bool>) -> HashSet<FileId> {
	entries
		.iter()
		.filter_map(entry_file_id)
		.filter(|id| flags.contains_key(id))
		.collect()
}
