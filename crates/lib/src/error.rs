//! Error types for filter compilation and listing.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors which can occur when compiling a filter or producing a listing.
///
/// Pattern errors ([`Glob`](Error::Glob), [`Regex`](Error::Regex)) are raised
/// when a [`FilterSpec`](crate::FilterSpec) is compiled, before any
/// enumeration starts. The filesystem variants are raised mid-listing and
/// terminate the sequence; paths already yielded are not retracted.
#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum Error {
	/// Error received when parsing a glob pattern fails.
	#[error("cannot parse glob pattern '{pattern}': {err}")]
	#[diagnostic(code(filelist::filter::glob))]
	Glob {
		/// The pattern which failed to parse.
		pattern: String,

		/// The underlying error.
		#[source]
		err: globset::Error,
	},

	/// Error received when parsing a regex pattern fails.
	#[error("cannot parse regex pattern '{pattern}': {err}")]
	#[diagnostic(code(filelist::filter::regex))]
	Regex {
		/// The pattern which failed to parse.
		pattern: String,

		/// The underlying error.
		#[source]
		err: Box<regex::Error>,
	},

	/// Error received when the current directory cannot be resolved.
	///
	/// Only raised when no files and no directories were given, as the
	/// current directory is then used as the default listing root.
	#[error("cannot resolve current directory: {err}")]
	#[diagnostic(code(filelist::list::current_dir))]
	CurrentDir {
		/// The underlying error.
		#[source]
		err: std::io::Error,
	},

	/// Error received when a listed path exists but is not a directory.
	#[error("not a directory: {path}")]
	#[diagnostic(code(filelist::list::not_a_directory))]
	NotADirectory {
		/// The offending path.
		path: PathBuf,
	},

	/// Error received when a directory is missing or cannot be read.
	#[error("cannot read '{path}': {err}")]
	#[diagnostic(code(filelist::list::walk))]
	Walk {
		/// The offending path.
		path: PathBuf,

		/// The underlying error.
		#[source]
		err: std::io::Error,
	},

	/// Error received when the listing was interrupted by its caller.
	#[error("listing interrupted")]
	#[diagnostic(code(filelist::list::interrupted))]
	Interrupted,
}
