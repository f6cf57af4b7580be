//! Process-wide ownership of the display.
//!
//! Only one [`DisplayLease`] can be outstanding at a time. Dropping it frees the slot.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};

static DISPLAY_LEASED: AtomicBool = AtomicBool::new(false);

#[derive(Debug)]
pub struct DisplayLease {
	_private: (),
}

impl DisplayLease {
	pub fn acquire() -> Result<Self> {
		DISPLAY_LEASED
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.map(|_| Self { _private: () })
			.map_err(|_| Error::AlreadyRunning)
	}
}

impl Drop for DisplayLease {
	fn drop(&mut self) {
		DISPLAY_LEASED.store(false, Ordering::Release);
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use std::sync::{Mutex, MutexGuard};

	static SERIAL: Mutex<()> = Mutex::new(());

	/// Tests touching the lease share process state and must not overlap.
	pub(crate) fn serial() -> MutexGuard<'static, ()> {
		SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
	}

	#[test]
	fn second_lease_is_refused_until_first_is_dropped() {
		let _serial = serial();
		let first = DisplayLease::acquire().unwrap();
		assert!(matches!(DisplayLease::acquire(), Err(Error::AlreadyRunning)));
		drop(first);
		assert!(DisplayLease::acquire().is_ok());
	}
}
