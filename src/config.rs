//! Application configuration and constants

use std::sync::OnceLock;

static CUSTOM_RADIUS: OnceLock<f32> = OnceLock::new();

// === Search ===
pub const DEFAULT_RADIUS: f32 = 0.95;
pub const RADIUS_ENV: &str = "DUPESCOUT_RADIUS";

/// Padding label reported by range-search providers for empty slots
pub const NO_MATCH_ID: i64 = -1;

// === Storage ===
pub const DUPLICATES_FILE: &str = "duplicates.jsonl";
pub const BATCH_VERSION: u32 = 1;
pub const BATCH_JSON_EXT: &str = "json";

pub fn set_radius(radius: f32) {
	let _ = CUSTOM_RADIUS.set(radius);
}

/// Radius for range search (explicit override, DUPESCOUT_RADIUS, or default)
pub fn radius() -> f32 {
	if let Some(custom) = CUSTOM_RADIUS.get() {
		crate::ui::debug(&format!("Using radius override: {}", custom));
		return *custom;
	}

	if let Ok(env_value) = std::env::var(RADIUS_ENV) {
		match parse_env_radius(&env_value) {
			Some(value) => {
				crate::ui::debug(&format!("Using {}: {}", RADIUS_ENV, value));
				return value;
			}
			None => {
				crate::ui::warn(&format!(
					"Ignoring {}={:?} (not a finite number)",
					RADIUS_ENV, env_value
				));
			}
		}
	}

	DEFAULT_RADIUS
}

fn parse_env_radius(value: &str) -> Option<f32> {
	value
		.trim()
		.parse::<f32>()
		.ok()
		.filter(|radius| radius.is_finite())
}
