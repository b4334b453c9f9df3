//! Duplicate flag updates for a descriptions JSONL file

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::{DuplicatePairRecord, FileId};

/// Set `duplicate` on every entry whose `file_id` is in `updates`.
///
/// Every line is parsed before the file is touched, so a malformed line
/// leaves it as it was. The whole file is then rewritten in place; there is
/// no temp-file swap, so a crash mid-write can truncate it.
pub fn update_duplicate_flags(path: &Path, updates: &HashMap<FileId, bool>) -> Result<Vec<Value>> {
	let content = fs::read_to_string(path)
		.with_context(|| format!("Failed to read entries file {}", path.display()))?;

	let mut entries = content
		.lines()
		.enumerate()
		.filter(|(_, line)| !line.trim().is_empty())
		.map(|(n, line)| {
			serde_json::from_str::<Value>(line)
				.with_context(|| format!("Invalid entry on line {} of {}", n + 1, path.display()))
		})
		.collect::<Result<Vec<Value>>>()?;

	for entry in &mut entries {
		let Some(flag) = entry
			.get("file_id")
			.and_then(Value::as_i64)
			.and_then(|id| updates.get(&id))
		else {
			continue;
		};
		if let Some(object) = entry.as_object_mut() {
			object.insert("duplicate".to_string(), Value::Bool(*flag));
		}
	}

	let file = File::create(path)
		.with_context(|| format!("Failed to rewrite entries file {}", path.display()))?;
	let mut writer = BufWriter::new(file);
	for entry in &entries {
		serde_json::to_writer(&mut writer, entry).context("Failed to serialize entry")?;
		writer.write_all(b"\n").context("Failed to write entry")?;
	}
	writer.flush().context("Failed to flush entries file")?;

	Ok(entries)
}

/// Mark the duplicate side of every detected pair
pub fn duplicate_flags_from_records(records: &[DuplicatePairRecord]) -> HashMap<FileId, bool> {
	records
		.iter()
		.map(|record| (record.duplicate_file_id, true))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn write(dir: &Path, content: &str) -> std::path::PathBuf {
		let path = dir.join("descriptions.jsonl");
		fs::write(&path, content).unwrap();
		path
	}

	#[test]
	fn test_sets_flag_and_persists() {
		let dir = tempfile::tempdir().unwrap();
		let path = write(dir.path(), "{\"file_id\":1,\"duplicate\":false}\n");

		let updated = update_duplicate_flags(&path, &HashMap::from([(1, true)])).unwrap();
		assert_eq!(updated, vec![json!({"file_id": 1, "duplicate": true})]);

		let persisted = fs::read_to_string(&path).unwrap();
		assert_eq!(persisted, "{\"file_id\":1,\"duplicate\":true}\n");
	}

	#[test]
	fn test_untouched_entries_pass_through() {
		let dir = tempfile::tempdir().unwrap();
		let path = write(
			dir.path(),
			"{\"file_id\":1,\"caption\":\"plage à Nice\",\"duplicate\":false}\n\n{\"file_id\":2,\"tags\":[\"a\"]}\n",
		);

		let updated =
			update_duplicate_flags(&path, &HashMap::from([(2, true), (99, false)])).unwrap();
		assert_eq!(updated.len(), 2);
		assert_eq!(updated[0]["duplicate"], json!(false));
		assert_eq!(updated[1]["duplicate"], json!(true));
		assert_eq!(updated[1]["tags"], json!(["a"]));

		let persisted = fs::read_to_string(&path).unwrap();
		assert!(persisted.starts_with("{\"file_id\":1,\"caption\":\"plage à Nice\",\"duplicate\":false}\n"));
	}

	#[test]
	fn test_parse_failure_leaves_file_intact() {
		let dir = tempfile::tempdir().unwrap();
		let original = "{\"file_id\":1,\"duplicate\":false}\n{broken\n";
		let path = write(dir.path(), original);

		let err = update_duplicate_flags(&path, &HashMap::from([(1, true)])).unwrap_err();
		assert!(err.to_string().contains("line 2"));
		assert_eq!(fs::read_to_string(&path).unwrap(), original);
	}

	#[test]
	fn test_flags_from_records() {
		let record = DuplicatePairRecord {
			original_file_id: 1,
			original_file_name: "a".into(),
			original_duration: 0.0,
			duplicate_file_id: 2,
			duplicate_file_name: "b".into(),
			duplicate_duration: 0.0,
			clips: Vec::new(),
		};
		assert_eq!(duplicate_flags_from_records(&[record]), HashMap::from([(2, true)]));
	}
}
