use std::{fs, path::PathBuf};

use clap::{ArgAction, Parser, ValueHint};
use miette::{IntoDiagnostic, Result};
use tracing::debug;

const OPTSET_FILTERING: &str = "Filtering options";
const OPTSET_DEBUGGING: &str = "Debugging options";

/// List files from directories and explicit paths.
#[derive(Debug, Clone, Parser)]
#[command(
	name = "filelist",
	author,
	version,
	about,
	long_about = None,
	after_help = "Use @argfile as first argument to load arguments from the file `argfile` (one argument per line) which will be inserted in place of the @argfile (further arguments on the CLI will override or add onto those in the file).",
)]
pub struct Args {
	/// Add a specific file to the listing
	///
	/// The file is emitted as given, before any directory content, and the
	/// filtering options do not apply to it. The path must exist.
	///
	/// This option can be specified multiple times to add multiple files.
	#[arg(
		short,
		long = "file",
		help_heading = OPTSET_FILTERING,
		value_parser = existing_file,
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub files: Vec<PathBuf>,

	/// Add a directory whose files should be listed
	///
	/// The directory is walked recursively, in a stable order, and every file
	/// found is checked against the filtering options before being emitted.
	///
	/// When neither '--file' nor '--directory' is given, the current
	/// directory is listed.
	///
	/// This option can be specified multiple times to list multiple
	/// directories.
	#[arg(
		short,
		long = "directory",
		help_heading = OPTSET_FILTERING,
		value_parser = existing_dir,
		value_hint = ValueHint::DirPath,
		value_name = "PATH",
	)]
	pub directories: Vec<PathBuf>,

	/// Glob pattern that listed files must match
	///
	/// Patterns can use the '**', '*' and '?' wildcards: '*' matches any run
	/// of characters except the path separator, '**' also crosses directory
	/// levels, and '?' matches exactly one non-separator character. The
	/// pattern is applied to the whole emitted path, so use '**/*.p' to
	/// match files at any depth.
	///
	/// When combined with '--include-regex', a file must match both to be
	/// listed.
	#[arg(
		short = 'i',
		long = "include",
		help_heading = OPTSET_FILTERING,
		value_name = "PATTERN",
	)]
	pub include: Option<String>,

	/// Glob pattern that excludes files from the listing
	///
	/// Uses the same pattern format as '--include'. Exclusion wins: a file
	/// matching both the include and exclude options is not listed. When
	/// combined with '--exclude-regex', a file is only excluded if it
	/// matches both.
	#[arg(
		short = 'e',
		long = "exclude",
		help_heading = OPTSET_FILTERING,
		value_name = "PATTERN",
	)]
	pub exclude: Option<String>,

	/// Regular expression that listed files must match
	///
	/// The expression is applied to the whole emitted path. When combined
	/// with '--include', a file must match both to be listed.
	#[arg(
		short = 'I',
		long = "include-regex",
		help_heading = OPTSET_FILTERING,
		value_name = "REGEX",
	)]
	pub include_regex: Option<String>,

	/// Regular expression that excludes files from the listing
	///
	/// The expression is applied to the whole emitted path. Exclusion wins
	/// over inclusion; see '--exclude' for how the two exclude options
	/// combine.
	#[arg(
		short = 'E',
		long = "exclude-regex",
		help_heading = OPTSET_FILTERING,
		value_name = "REGEX",
	)]
	pub exclude_regex: Option<String>,

	/// Match patterns case-insensitively
	///
	/// Applies to the glob and regex options alike. The default is
	/// case-sensitive matching on every platform.
	#[arg(
		long,
		help_heading = OPTSET_FILTERING,
	)]
	pub case_insensitive: bool,

	/// Set diagnostic log level
	///
	/// This enables diagnostic logging, which is useful for investigating
	/// filtering issues. Use multiple times to increase verbosity.
	///
	/// You may want to use with '--log-file' to avoid polluting the listing.
	#[arg(
		short,
		long,
		help_heading = OPTSET_DEBUGGING,
		action = ArgAction::Count,
	)]
	pub verbose: u8,

	/// Write diagnostic logs to a file
	///
	/// The logs are written in JSON. If a log level was not already set with
	/// '--verbose', this implies the lowest verbosity.
	#[arg(
		long,
		help_heading = OPTSET_DEBUGGING,
		value_hint = ValueHint::AnyPath,
		value_name = "PATH",
	)]
	pub log_file: Option<PathBuf>,
}

pub fn get_args() -> Result<Args> {
	let raw = argfile::expand_args(argfile::parse_fromfile, argfile::PREFIX).into_diagnostic()?;
	let args = Args::parse_from(raw);
	debug!(?args, "got arguments");
	Ok(args)
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
	match fs::metadata(value) {
		Ok(meta) if meta.is_file() => Ok(PathBuf::from(value)),
		Ok(_) => Err(format!("'{value}' is not a file")),
		Err(err) => Err(format!("cannot access '{value}': {err}")),
	}
}

fn existing_dir(value: &str) -> Result<PathBuf, String> {
	match fs::metadata(value) {
		Ok(meta) if meta.is_dir() => Ok(PathBuf::from(value)),
		Ok(_) => Err(format!("'{value}' is not a directory")),
		Err(err) => Err(format!("cannot access '{value}': {err}")),
	}
}

#[cfg(test)]
mod tests {
	use super::Args;
	use clap::CommandFactory;

	#[test]
	fn verify_cli() {
		Args::command().debug_assert();
	}
}
