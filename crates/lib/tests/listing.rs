use std::{
	fs::{self, File},
	path::{Path, PathBuf},
};

use filelist::{Error, FilterSpec, Interrupt, Lister};
use tempfile::TempDir;

fn touch(path: impl AsRef<Path>) {
	tracing_subscriber::fmt::try_init().ok();

	let path = path.as_ref();
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).unwrap();
	}
	File::create(path).unwrap();
}

/// A tree mirroring the shape used throughout: a project directory with two
/// top-level sources and one nested source.
fn project_tree() -> (TempDir, PathBuf) {
	let tmp = TempDir::new().unwrap();
	let proj = tmp.path().join("proj");
	touch(proj.join("a.p"));
	touch(proj.join("b.cls"));
	touch(proj.join("sub/c.p"));
	(tmp, proj)
}

fn collect(lister: &Lister) -> Vec<Result<PathBuf, Error>> {
	lister.iter().collect()
}

fn paths(lister: &Lister) -> Vec<PathBuf> {
	collect(lister)
		.into_iter()
		.map(|entry| entry.unwrap())
		.collect()
}

#[test]
fn walks_depth_first_in_file_name_order() {
	let (_tmp, proj) = project_tree();

	let lister = Lister::new(Vec::new(), vec![proj.clone()], &FilterSpec::default()).unwrap();
	assert_eq!(
		paths(&lister),
		vec![proj.join("a.p"), proj.join("b.cls"), proj.join("sub/c.p")],
	);
}

#[test]
fn repeated_runs_yield_identical_sequences() {
	let (_tmp, proj) = project_tree();

	let spec = FilterSpec {
		include_glob: Some("**/*.p".into()),
		..Default::default()
	};
	let lister = Lister::new(Vec::new(), vec![proj], &spec).unwrap();
	assert_eq!(paths(&lister), paths(&lister));
}

#[test]
fn include_regex_worked_example() {
	let (_tmp, proj) = project_tree();

	let spec = FilterSpec {
		include_regex: Some(r".*\.p$".into()),
		..Default::default()
	};
	let lister = Lister::new(Vec::new(), vec![proj.clone()], &spec).unwrap();
	assert_eq!(paths(&lister), vec![proj.join("a.p"), proj.join("sub/c.p")]);
}

#[test]
fn include_glob_emits_only_matching_files() {
	let tmp = TempDir::new().unwrap();
	touch(tmp.path().join("notes.txt"));
	touch(tmp.path().join("notes.md"));
	touch(tmp.path().join("deep/more.txt"));

	let spec = FilterSpec {
		include_glob: Some("**/*.txt".into()),
		..Default::default()
	};
	let lister = Lister::new(Vec::new(), vec![tmp.path().into()], &spec).unwrap();
	let listed = paths(&lister);

	assert!(!listed.is_empty());
	assert!(listed
		.iter()
		.all(|path| path.extension().is_some_and(|ext| ext == "txt")));
}

#[test]
fn explicit_files_bypass_the_filter_and_come_first() {
	let (_tmp, proj) = project_tree();

	let spec = FilterSpec {
		include_glob: Some("**/*.p".into()),
		..Default::default()
	};
	let lister = Lister::new(vec![proj.join("b.cls")], vec![proj.clone()], &spec).unwrap();
	assert_eq!(
		paths(&lister),
		vec![proj.join("b.cls"), proj.join("a.p"), proj.join("sub/c.p")],
	);
}

#[test]
fn explicit_file_also_discovered_is_emitted_twice() {
	let (_tmp, proj) = project_tree();

	let lister = Lister::new(
		vec![proj.join("sub/c.p")],
		vec![proj.clone()],
		&FilterSpec::default(),
	)
	.unwrap();
	let listed = paths(&lister);

	assert_eq!(
		listed
			.iter()
			.filter(|path| **path == proj.join("sub/c.p"))
			.count(),
		2,
	);
}

#[test]
fn missing_directory_aborts_after_explicit_files() {
	let tmp = TempDir::new().unwrap();
	let gone = tmp.path().join("gone");

	let lister = Lister::new(
		vec![PathBuf::from("given.p")],
		vec![gone.clone()],
		&FilterSpec::default(),
	)
	.unwrap();
	let mut iter = lister.iter();

	assert_eq!(iter.next().unwrap().unwrap(), PathBuf::from("given.p"));
	assert!(matches!(
		iter.next(),
		Some(Err(Error::Walk { path, .. })) if path == gone,
	));
	assert!(iter.next().is_none(), "iterator fuses after an error");
}

#[test]
fn file_given_as_directory_is_an_error() {
	let (_tmp, proj) = project_tree();
	let file = proj.join("a.p");

	let lister = Lister::new(Vec::new(), vec![file.clone()], &FilterSpec::default()).unwrap();
	assert!(matches!(
		lister.iter().next(),
		Some(Err(Error::NotADirectory { path })) if path == file,
	));
}

#[test]
fn bad_pattern_fails_before_any_enumeration() {
	let gone = PathBuf::from("/definitely/not/here");

	let spec = FilterSpec {
		include_glob: Some("a{".into()),
		..Default::default()
	};
	assert!(matches!(
		Lister::new(Vec::new(), vec![gone], &spec),
		Err(Error::Glob { .. }),
	));
}

#[test]
fn interrupt_ends_the_listing() {
	let (_tmp, proj) = project_tree();

	let interrupt = Interrupt::new();
	let lister = Lister::new(Vec::new(), vec![proj], &FilterSpec::default())
		.unwrap()
		.with_interrupt(interrupt.clone());
	let mut iter = lister.iter();

	assert!(iter.next().unwrap().is_ok());
	interrupt.raise();
	assert!(matches!(iter.next(), Some(Err(Error::Interrupted))));
	assert!(iter.next().is_none());
}

#[test]
fn no_inputs_defaults_to_the_current_directory() {
	let tmp = TempDir::new().unwrap();
	touch(tmp.path().join("here.txt"));

	// Only this test touches the process cwd.
	std::env::set_current_dir(tmp.path()).unwrap();

	let lister = Lister::new(Vec::new(), Vec::new(), &FilterSpec::default()).unwrap();
	let listed = paths(&lister);

	assert_eq!(listed.len(), 1);
	assert!(listed[0].ends_with("here.txt"));
}
