use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::DUPLICATES_FILE;

fn parse_radius(s: &str) -> Result<f32, String> {
	let val: f32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if val.is_finite() {
		Ok(val)
	} else {
		Err(format!("radius must be finite, got {}", val))
	}
}

fn parse_flag(s: &str) -> Result<(i64, bool), String> {
	let (id, value) = s
		.split_once('=')
		.ok_or_else(|| format!("expected FILE_ID=true|false, got '{}'", s))?;
	let id: i64 = id
		.trim()
		.parse()
		.map_err(|_| format!("'{}' is not a valid file id", id.trim()))?;
	let value = match value.trim().to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" => true,
		"false" | "0" | "no" => false,
		other => return Err(format!("'{}' is not true or false", other)),
	};
	Ok((id, value))
}

fn styles() -> Styles {
	let blue = Some(Color::Ansi(AnsiColor::Blue));
	Styles::styled()
		.header(Style::new().bold().fg_color(blue))
		.usage(Style::new().bold().fg_color(blue))
		.literal(Style::new().fg_color(blue))
		.placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
		.valid(Style::new().fg_color(blue))
		.invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))))
}

#[derive(Parser, Debug)]
#[command(
	name = "dupescout",
	author,
	version,
	about = "Near-duplicate detection for indexed images and video clips",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {bin} {detect}  {detect_args}   {detect_desc}
  {bin} {detect}  {mark_args}     {mark_desc}
  {bin} {flags}   {flags_args}   {flags_desc}
  {bin} {help}    {help_args}                                   {help_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "dupescout".bright_blue(),
		detect = "detect".yellow(),
		detect_args = "-d media.jsonl -e vectors.msgpack",
		detect_desc = "Write duplicates.jsonl".dimmed(),
		mark_args = "-d media.jsonl -e vectors.msgpack --mark descriptions.jsonl",
		mark_desc = "Also flag duplicates".dimmed(),
		flags = "flags".yellow(),
		flags_args = "-f descriptions.jsonl --set 12=true,40=false",
		flags_desc = "Set flags by hand".dimmed(),
		help = "help".yellow(),
		help_args = "detect",
		help_desc = "Show help for detect".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Group near-duplicate vectors and write duplicate file pairs
	Detect {
		/// Metadata database (JSON array or JSON lines)
		#[arg(short = 'd', long = "database", value_name = "PATH")]
		database: PathBuf,

		/// Embedding batch (MessagePack, or JSON with a .json extension)
		#[arg(short = 'e', long = "embeddings", value_name = "PATH")]
		embeddings: PathBuf,

		/// Minimum similarity for two vectors to count as duplicates
		/// (default: $DUPESCOUT_RADIUS or 0.95)
		#[arg(short = 'r', long = "radius", value_parser = parse_radius, allow_hyphen_values = true)]
		radius: Option<f32>,

		/// Output file for duplicate pairs (overwritten)
		#[arg(short = 'o', long = "output", default_value = DUPLICATES_FILE)]
		output: PathBuf,

		/// Label the lower file id as the original instead of discovery order
		#[arg(long = "canonical")]
		canonical: bool,

		/// Descriptions file whose duplicate flags should be set afterwards
		#[arg(short = 'm', long = "mark", value_name = "PATH")]
		mark: Option<PathBuf>,
	},

	/// Set the duplicate flag of entries in a descriptions file
	Flags {
		/// Descriptions file (JSON lines with file_id)
		#[arg(short = 'f', long = "file", value_name = "PATH")]
		entries: PathBuf,

		/// Assignments like 12=true (comma-separated)
		#[arg(short = 's', long = "set", value_delimiter = ',', value_parser = parse_flag)]
		set: Vec<(i64, bool)>,

		/// Mark every duplicate-side file of a duplicates file
		#[arg(long = "from-pairs", value_name = "PATH")]
		from_pairs: Option<PathBuf>,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}
