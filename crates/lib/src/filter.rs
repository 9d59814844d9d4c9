//! The include/exclude glob-and-regex filter applied to discovered files.

use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};
use regex::{Regex, RegexBuilder};
use tracing::{debug, trace};

use crate::error::Error;

/// An uncompiled filter: four optional patterns and a case switch.
///
/// The glob patterns support `*` (any run of characters except the path
/// separator), `**` (crosses separators) and `?` (one non-separator
/// character). The regex patterns use the [`regex`] crate syntax.
///
/// Patterns are evaluated against candidate paths as they will be emitted,
/// i.e. the directory argument joined with the discovered relative location.
/// A glob like `*.p` therefore only matches a separator-free path; use
/// `**/*.p` to match files at any depth.
///
/// Matching is case-sensitive on every platform unless `case_insensitive` is
/// set, in which case both globs and regexes match case-insensitively.
#[derive(Clone, Debug, Default)]
pub struct FilterSpec {
	/// Glob a path must match to be included.
	pub include_glob: Option<String>,

	/// Glob contributing to the exclude criteria.
	pub exclude_glob: Option<String>,

	/// Regex a path must match to be included.
	pub include_regex: Option<String>,

	/// Regex contributing to the exclude criteria.
	pub exclude_regex: Option<String>,

	/// Match all patterns case-insensitively.
	pub case_insensitive: bool,
}

impl FilterSpec {
	/// Whether no pattern is set at all (such a filter passes everything).
	pub fn is_empty(&self) -> bool {
		self.include_glob.is_none()
			&& self.exclude_glob.is_none()
			&& self.include_regex.is_none()
			&& self.exclude_regex.is_none()
	}

	/// Compile the spec into a [`PathFilter`].
	///
	/// All patterns are parsed here, eagerly; a malformed pattern surfaces as
	/// [`Error::Glob`] or [`Error::Regex`] before any path is ever checked.
	pub fn compile(&self) -> Result<PathFilter, Error> {
		let compiled = PathFilter {
			include_glob: self
				.include_glob
				.as_deref()
				.map(|p| glob_matcher(p, self.case_insensitive))
				.transpose()?,
			exclude_glob: self
				.exclude_glob
				.as_deref()
				.map(|p| glob_matcher(p, self.case_insensitive))
				.transpose()?,
			include_regex: self
				.include_regex
				.as_deref()
				.map(|p| regex_matcher(p, self.case_insensitive))
				.transpose()?,
			exclude_regex: self
				.exclude_regex
				.as_deref()
				.map(|p| regex_matcher(p, self.case_insensitive))
				.transpose()?,
		};

		debug!(
			include_glob=?self.include_glob,
			exclude_glob=?self.exclude_glob,
			include_regex=?self.include_regex,
			exclude_regex=?self.exclude_regex,
			case_insensitive=%self.case_insensitive,
		"path filter compiled");

		Ok(compiled)
	}
}

fn glob_matcher(pattern: &str, case_insensitive: bool) -> Result<GlobMatcher, Error> {
	GlobBuilder::new(pattern)
		.literal_separator(true)
		.case_insensitive(case_insensitive)
		.build()
		.map(|glob| glob.compile_matcher())
		.map_err(|err| Error::Glob {
			pattern: pattern.into(),
			err,
		})
}

fn regex_matcher(pattern: &str, case_insensitive: bool) -> Result<Regex, Error> {
	RegexBuilder::new(pattern)
		.case_insensitive(case_insensitive)
		.build()
		.map_err(|err| Error::Regex {
			pattern: pattern.into(),
			err: Box::new(err),
		})
}

/// A compiled filter, immutable for the duration of one listing.
#[derive(Debug)]
pub struct PathFilter {
	include_glob: Option<GlobMatcher>,
	exclude_glob: Option<GlobMatcher>,
	include_regex: Option<Regex>,
	exclude_regex: Option<Regex>,
}

impl PathFilter {
	/// Check a candidate path against the filter.
	///
	/// A path passes when it matches every include pattern that is present
	/// (or none is present), and does not satisfy the exclude criteria. The
	/// exclude criteria are satisfied when the path matches every exclude
	/// pattern that is present; a path matching both sides is excluded.
	pub fn check(&self, path: &Path) -> bool {
		let text = path.to_string_lossy();

		if let Some(glob) = &self.include_glob {
			if !glob.is_match(path) {
				trace!(?path, "rejected by include glob");
				return false;
			}
		}

		if let Some(regex) = &self.include_regex {
			if !regex.is_match(&text) {
				trace!(?path, "rejected by include regex");
				return false;
			}
		}

		let mut excluded = self.exclude_glob.is_some() || self.exclude_regex.is_some();
		if let Some(glob) = &self.exclude_glob {
			excluded = excluded && glob.is_match(path);
		}
		if let Some(regex) = &self.exclude_regex {
			excluded = excluded && regex.is_match(&text);
		}

		if excluded {
			trace!(?path, "rejected by exclude criteria");
		}

		!excluded
	}
}
