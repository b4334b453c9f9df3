//! Media metadata records as stored in the metadata database

use serde::{Deserialize, Serialize};

use super::{FileId, VectorId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
	Image,
	Video,
}

impl MediaType {
	/// Parse the database's media type tag
	pub fn parse(tag: &str) -> Option<Self> {
		match tag {
			"image" => Some(MediaType::Image),
			"video" => Some(MediaType::Video),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			MediaType::Image => "image",
			MediaType::Video => "video",
		}
	}
}

impl std::fmt::Display for MediaType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Quality block attached to an entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quality {
	#[serde(default)]
	pub variance: Option<f64>,
}

/// Nested metadata block (images keep their quality score here)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryMetadata {
	#[serde(default)]
	pub quality: Option<Quality>,
}

/// A time-bounded, independently embedded segment of a video
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clip {
	#[serde(default)]
	pub clip_idx: Option<i64>,
	#[serde(default)]
	pub start_s: Option<f64>,
	#[serde(default)]
	pub end_s: Option<f64>,
	#[serde(default, alias = "faiss_id")]
	pub vector_id: Option<VectorId>,
}

/// One file in the metadata database.
///
/// Identifying fields stay optional here: an entry that is never indexed
/// may omit them, and the lookup builder decides when their absence is fatal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaEntry {
	#[serde(default)]
	pub file_id: Option<FileId>,
	#[serde(default)]
	pub file_name: Option<String>,
	#[serde(default)]
	pub media_type: Option<String>,
	#[serde(default)]
	pub prefix: Option<String>,
	#[serde(default)]
	pub duration: Option<f64>,
	#[serde(default, alias = "faiss_id")]
	pub vector_id: Option<VectorId>,
	#[serde(default)]
	pub quality: Option<Quality>,
	#[serde(default)]
	pub metadata: Option<EntryMetadata>,
	#[serde(default)]
	pub clips: Vec<Clip>,
}

impl MediaEntry {
	pub fn kind(&self) -> Option<MediaType> {
		self.media_type.as_deref().and_then(MediaType::parse)
	}

	/// Video quality score (`quality.variance`)
	pub fn video_variance(&self) -> f64 {
		self.quality
			.as_ref()
			.and_then(|q| q.variance)
			.unwrap_or(0.0)
	}

	/// Image quality score (`metadata.quality.variance`)
	pub fn image_variance(&self) -> f64 {
		self.metadata
			.as_ref()
			.and_then(|m| m.quality.as_ref())
			.and_then(|q| q.variance)
			.unwrap_or(0.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_media_type_tags() {
		assert_eq!(MediaType::parse("image"), Some(MediaType::Image));
		assert_eq!(MediaType::parse("video"), Some(MediaType::Video));
		assert_eq!(MediaType::parse("audio"), None);
		assert_eq!(serde_json::to_string(&MediaType::Video).unwrap(), "\"video\"");
	}

	#[test]
	fn test_entry_tolerates_missing_fields() {
		let entry: MediaEntry = serde_json::from_str(r#"{"media_type": "video"}"#).unwrap();
		assert_eq!(entry.kind(), Some(MediaType::Video));
		assert!(entry.file_id.is_none());
		assert!(entry.clips.is_empty());
		assert_eq!(entry.video_variance(), 0.0);
	}

	#[test]
	fn test_vector_id_alias() {
		let clip: Clip = serde_json::from_str(r#"{"clip_idx": 2, "faiss_id": 41}"#).unwrap();
		assert_eq!(clip.vector_id, Some(41));
		assert_eq!(clip.clip_idx, Some(2));
	}

	#[test]
	fn test_variance_locations() {
		let entry: MediaEntry = serde_json::from_str(
			r#"{"quality": {"variance": 1.5}, "metadata": {"quality": {"variance": 7.25}}}"#,
		)
		.unwrap();
		assert_eq!(entry.video_variance(), 1.5);
		assert_eq!(entry.image_variance(), 7.25);
	}
}
