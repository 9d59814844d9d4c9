//! Cooperative interruption of an in-flight listing.

use std::sync::{
	atomic::{AtomicBool, Ordering},
	Arc,
};

/// A cloneable flag used to abort a listing from another thread.
///
/// Hand a clone to a [`Lister`](crate::Lister) and keep one for yourself
/// (e.g. inside a Ctrl-C handler). The listing checks the flag before every
/// filesystem access; once raised, the iterator yields
/// [`Error::Interrupted`](crate::Error::Interrupted) and then fuses. Raising
/// is idempotent and the flag cannot be lowered.
#[derive(Clone, Debug, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
	/// Create a new, unraised interrupt flag.
	pub fn new() -> Self {
		Self::default()
	}

	/// Raise the flag.
	pub fn raise(&self) {
		self.0.store(true, Ordering::SeqCst);
	}

	/// Whether the flag has been raised.
	pub fn is_raised(&self) -> bool {
		self.0.load(Ordering::SeqCst)
	}
}

#[cfg(test)]
mod tests {
	use super::Interrupt;

	#[test]
	fn raising_is_visible_to_clones() {
		let interrupt = Interrupt::new();
		let clone = interrupt.clone();
		assert!(!clone.is_raised());

		interrupt.raise();
		assert!(clone.is_raised());
	}
}
