#![deny(rust_2018_idioms)]

use std::{
	env::var,
	fs::File,
	io::{self, Write},
	sync::Mutex,
};

use filelist::{FilterSpec, Interrupt, Lister};
use miette::{IntoDiagnostic, Result};
use tracing::{debug, warn};

mod args;

fn main() -> Result<()> {
	let mut log_on = false;

	if var("RUST_LOG").is_ok() {
		match tracing_subscriber::fmt::try_init() {
			Ok(()) => {
				warn!(RUST_LOG=%var("RUST_LOG").unwrap(), "logging configured from RUST_LOG");
				log_on = true;
			}
			Err(e) => eprintln!("Failed to initialise logging with RUST_LOG, falling back\n{e}"),
		}
	}

	let args = args::get_args()?;

	if log_on {
		warn!("ignoring logging options from args");
	} else {
		init_logging(&args)?;
	}

	debug!(version=%env!("CARGO_PKG_VERSION"), "constructing lister from CLI");

	let spec = FilterSpec {
		include_glob: args.include.clone(),
		exclude_glob: args.exclude.clone(),
		include_regex: args.include_regex.clone(),
		exclude_regex: args.exclude_regex.clone(),
		case_insensitive: args.case_insensitive,
	};

	let interrupt = Interrupt::new();
	{
		let interrupt = interrupt.clone();
		ctrlc::set_handler(move || interrupt.raise()).into_diagnostic()?;
	}

	let lister = Lister::new(args.files.clone(), args.directories.clone(), &spec)?
		.with_interrupt(interrupt);

	let stdout = io::stdout();
	let mut out = io::BufWriter::new(stdout.lock());
	for entry in &lister {
		match entry {
			Ok(path) => writeln!(out, "{}", path.display()).into_diagnostic()?,
			Err(err) => {
				// Paths already written stand; flush them before bailing.
				out.flush().into_diagnostic()?;
				return Err(err.into());
			}
		}
	}
	out.flush().into_diagnostic()?;

	Ok(())
}

fn init_logging(args: &args::Args) -> Result<()> {
	// --log-file without --verbose still logs, at the lowest verbosity
	let verbosity = args.verbose.max(u8::from(args.log_file.is_some()));
	if verbosity == 0 {
		return Ok(());
	}

	let log_file = args
		.log_file
		.as_deref()
		.map(File::create)
		.transpose()
		.into_diagnostic()?;

	let mut builder = tracing_subscriber::fmt().with_env_filter(match verbosity {
		1 => "filelist=debug",
		2 => "filelist=trace",
		_ => "trace",
	});

	if verbosity > 2 {
		use tracing_subscriber::fmt::format::FmtSpan;
		builder = builder.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);
	}

	match if let Some(writer) = log_file {
		builder.json().with_writer(Mutex::new(writer)).try_init()
	} else {
		builder.with_writer(io::stderr).try_init()
	} {
		Ok(()) => debug!("logging initialised"),
		Err(e) => eprintln!("Failed to initialise logging, continuing with none\n{e}"),
	}

	Ok(())
}
