//! Thread-local last-error slot.
//!
//! The slot mirrors `errno` and the Win32 last-error value: it holds one code
//! per thread, is overwritten by every failing call and is never cleared by a
//! successful one.

use std::cell::Cell;

use crate::error::{DirError, ErrorCode};

thread_local! {
    static LAST_ERROR: Cell<Option<ErrorCode>> = const { Cell::new(None) };
}

/// Returns the code recorded by the most recent failing call on this thread.
#[must_use]
pub fn last_error() -> Option<ErrorCode> {
    LAST_ERROR.with(Cell::get)
}

/// Overwrites the slot, as `SetLastError` does.
pub fn set_last_error(code: ErrorCode) {
    LAST_ERROR.with(|slot| slot.set(Some(code)));
}

/// Empties the slot.
pub fn clear_last_error() {
    LAST_ERROR.with(|slot| slot.set(None));
}

/// Records `error` in the slot and hands it back.
pub(crate) fn record(error: DirError) -> DirError {
    set_last_error(error.code());
    error
}
