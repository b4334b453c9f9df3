//! dupescout - near-duplicate media detection
//!
//! Groups embedding range-search results into connected components and
//! writes one record per pair of near-duplicate files.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::Colorize;

use dupescout::cli::{Cli, Command};
use dupescout::processing::PairOrdering;
use dupescout::{commands, config, ui};

fn main() -> Result<()> {
	let cli = Cli::parse();

	ui::Log::set_verbose(cli.verbose);

	match cli.command {
		Command::Detect {
			database,
			embeddings,
			radius,
			output,
			canonical,
			mark,
		} => {
			print_header();
			if let Some(radius) = radius {
				config::set_radius(radius);
			}
			let ordering = if canonical {
				PairOrdering::Canonical
			} else {
				PairOrdering::Discovery
			};
			commands::detect::run(
				&database,
				&embeddings,
				config::radius(),
				&output,
				ordering,
				mark.as_deref(),
			)
		}
		Command::Flags {
			entries,
			set,
			from_pairs,
		} => {
			print_header();
			commands::flags::run(&entries, &set, from_pairs.as_deref())
		}
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			if let Some(sub) = subcommand {
				if let Some(sub_cmd) = cmd.find_subcommand_mut(&sub) {
					sub_cmd.print_help()?;
				} else {
					ui::error(&format!("Unknown subcommand: {}", sub));
					cmd.print_help()?;
				}
			} else {
				cmd.print_help()?;
			}
			Ok(())
		}
	}
}

fn print_header() {
	eprintln!();
	eprintln!(
		"{}",
		format!("─── dupescout v{} ───", env!("CARGO_PKG_VERSION"))
			.bright_blue()
			.bold()
	);
}
