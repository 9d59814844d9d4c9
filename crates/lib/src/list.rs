//! The lister itself: explicit files first, then filtered directory walks.

use std::{
	env, fs,
	path::{Path, PathBuf},
	slice,
};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::{
	error::Error,
	filter::{FilterSpec, PathFilter},
	interrupt::Interrupt,
};

/// A configured listing request.
///
/// Construction compiles (and thereby validates) the filter; iteration does
/// the filesystem work. The same `Lister` can be iterated multiple times, and
/// over an unchanged tree every run produces the identical sequence.
#[derive(Debug)]
pub struct Lister {
	files: Vec<PathBuf>,
	dirs: Vec<PathBuf>,
	filter: PathFilter,
	interrupt: Interrupt,
}

impl Lister {
	/// Create a lister from explicit files, directories, and a filter spec.
	///
	/// Explicit files are emitted verbatim and unfiltered; the lister does
	/// not check that they exist, that is the caller's responsibility. Each
	/// directory is walked recursively and its files are checked against the
	/// filter. When both lists are empty, the current working directory is
	/// used as the single directory.
	///
	/// Fails with a pattern error if the spec does not compile, or with
	/// [`Error::CurrentDir`] if the default root is needed but unresolvable.
	/// No filesystem enumeration happens here.
	pub fn new(files: Vec<PathBuf>, mut dirs: Vec<PathBuf>, filter: &FilterSpec) -> Result<Self, Error> {
		let filter = filter.compile()?;

		if files.is_empty() && dirs.is_empty() {
			let cwd = env::current_dir().map_err(|err| Error::CurrentDir { err })?;
			debug!(path=?cwd, "no files or directories given, listing the current directory");
			dirs.push(cwd);
		}

		Ok(Self {
			files,
			dirs,
			filter,
			interrupt: Interrupt::default(),
		})
	}

	/// Attach an interrupt flag to the listing.
	#[must_use]
	pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
		self.interrupt = interrupt;
		self
	}

	/// Start a lazy iteration over the listing.
	pub fn iter(&self) -> ListIter<'_> {
		ListIter {
			files: self.files.iter(),
			dirs: self.dirs.iter(),
			walker: None,
			filter: &self.filter,
			interrupt: &self.interrupt,
			done: false,
		}
	}
}

impl<'a> IntoIterator for &'a Lister {
	type Item = Result<PathBuf, Error>;
	type IntoIter = ListIter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Pull-based iterator over a [`Lister`].
///
/// Yields `Ok(path)` per emitted file. Any `Err` is terminal: the iterator
/// fuses and returns `None` from then on, but paths already yielded stand.
pub struct ListIter<'a> {
	files: slice::Iter<'a, PathBuf>,
	dirs: slice::Iter<'a, PathBuf>,
	walker: Option<walkdir::IntoIter>,
	filter: &'a PathFilter,
	interrupt: &'a Interrupt,
	done: bool,
}

impl ListIter<'_> {
	fn fail(&mut self, err: Error) -> Option<Result<PathBuf, Error>> {
		self.done = true;
		Some(Err(err))
	}

	// Entered with no live walker; errors if the directory is missing,
	// unreadable, or not a directory at all.
	fn start_dir(&mut self, dir: &Path) -> Result<(), Error> {
		match fs::metadata(dir) {
			Ok(meta) if meta.is_dir() => {
				debug!(path=?dir, "walking directory");
				self.walker = Some(WalkDir::new(dir).sort_by_file_name().into_iter());
				Ok(())
			}
			Ok(_) => Err(Error::NotADirectory { path: dir.into() }),
			Err(err) => Err(Error::Walk {
				path: dir.into(),
				err,
			}),
		}
	}
}

impl Iterator for ListIter<'_> {
	type Item = Result<PathBuf, Error>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		if self.interrupt.is_raised() {
			debug!("listing interrupted");
			return self.fail(Error::Interrupted);
		}

		if let Some(file) = self.files.next() {
			trace!(path=?file, "emitting explicit file");
			return Some(Ok(file.clone()));
		}

		loop {
			if self.interrupt.is_raised() {
				debug!("listing interrupted");
				return self.fail(Error::Interrupted);
			}

			let Some(walker) = self.walker.as_mut() else {
				let dir = self.dirs.next()?;
				if let Err(err) = self.start_dir(dir.as_path()) {
					return self.fail(err);
				}
				continue;
			};

			match walker.next() {
				Some(Ok(entry)) => {
					if !entry.file_type().is_file() {
						continue;
					}

					let path = entry.into_path();
					if self.filter.check(&path) {
						trace!(?path, "emitting discovered file");
						return Some(Ok(path));
					}
				}
				Some(Err(err)) => {
					let path = err.path().map_or_else(PathBuf::new, Path::to_path_buf);
					return self.fail(Error::Walk {
						path,
						err: err.into(),
					});
				}
				None => self.walker = None,
			}
		}
	}
}
