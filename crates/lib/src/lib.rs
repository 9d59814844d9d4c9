//! Filtered, deterministic file listings from explicit files and directory trees.
//!
//! The entry point is [`Lister`]: give it explicit file paths, directories to
//! walk, and a [`FilterSpec`], then pull paths out of it one at a time.
//! Explicit files are emitted first, verbatim and unfiltered; each directory
//! is then walked recursively in a stable order, and every discovered file is
//! checked against the compiled filter before being emitted.
//!
//! Listing is lazy: nothing touches the filesystem until the iterator is
//! pulled, and nothing runs between pulls. A listing can be abandoned early
//! by dropping the iterator, or aborted cooperatively (from a signal handler,
//! say) through its [`Interrupt`] token.
//!
//! ```no_run
//! use filelist::{FilterSpec, Lister};
//!
//! # fn main() -> Result<(), filelist::Error> {
//! let spec = FilterSpec {
//!     include_glob: Some("**/*.p".into()),
//!     ..Default::default()
//! };
//!
//! let lister = Lister::new(Vec::new(), vec!["proj".into()], &spec)?;
//! for path in &lister {
//!     println!("{}", path?.display());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(clippy::unwrap_used, missing_docs)]
#![deny(rust_2018_idioms)]

pub mod error;
pub mod filter;
pub mod interrupt;
pub mod list;

pub use error::Error;
pub use filter::{FilterSpec, PathFilter};
pub use interrupt::Interrupt;
pub use list::{ListIter, Lister};
