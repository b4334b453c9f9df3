//! Lookup builder: metadata database entries to vector id records

use anyhow::{anyhow, Result};

use crate::core::{FileId, Lookup, LookupRecord, MediaEntry, MediaType};

/// Build the vector id lookup table.
///
/// Entries and clips without a vector id are not indexed yet and are skipped.
/// An indexed entry without `file_id` or `file_name` aborts the build.
pub fn build_lookup(entries: &[MediaEntry]) -> Result<Lookup> {
	let mut lookup = Lookup::new();

	for (position, entry) in entries.iter().enumerate() {
		match entry.kind() {
			Some(MediaType::Video) => {
				for clip in &entry.clips {
					let Some(vector_id) = clip.vector_id else {
						continue;
					};
					let (file_id, file_name) = identity(entry, position)?;

					lookup.insert(LookupRecord {
						vector_id,
						file_id,
						file_name,
						clip_idx: clip.clip_idx,
						media_type: MediaType::Video,
						prefix: entry.prefix.clone().unwrap_or_default(),
						duration: entry.duration.unwrap_or(0.0),
						variance: entry.video_variance(),
						start_s: clip.start_s,
						end_s: clip.end_s,
					});
				}
			}
			Some(MediaType::Image) => {
				let Some(vector_id) = entry.vector_id else {
					continue;
				};
				let (file_id, file_name) = identity(entry, position)?;

				lookup.insert(LookupRecord {
					vector_id,
					file_id,
					file_name,
					clip_idx: None,
					media_type: MediaType::Image,
					prefix: entry.prefix.clone().unwrap_or_default(),
					duration: 0.0,
					variance: entry.image_variance(),
					start_s: None,
					end_s: None,
				});
			}
			None => continue,
		}
	}

	Ok(lookup)
}

fn identity(entry: &MediaEntry, position: usize) -> Result<(FileId, String)> {
	let file_id = entry
		.file_id
		.ok_or_else(|| missing_field("file_id", position))?;
	let file_name = entry
		.file_name
		.clone()
		.ok_or_else(|| missing_field("file_name", position))?;
	Ok((file_id, file_name))
}

fn missing_field(field: &str, position: usize) -> anyhow::Error {
	anyhow!("Metadata entry #{} is missing required field '{}'", position, field)
}
