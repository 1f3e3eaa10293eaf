//! `opendir`/`readdir`/`closedir` in their POSIX shape.
//!
//! Absent arguments are accepted and answered with
//! [`ErrorCode::BadArguments`] in the last-error slot, as the C functions do
//! for null pointers. A `None` from [`readdir`] is therefore ambiguous on its
//! own: end of directory leaves the slot untouched, an absent handle sets it.

use platform::FindFiles;

use crate::dir::Dir;
use crate::error::{DirError, ErrorCode};
use crate::last_error::{self, set_last_error};
use crate::name::DirEntry;

/// Opens `path` with the native search, or returns `None` and sets the last error.
#[must_use]
pub fn opendir(path: Option<&str>) -> Option<Dir> {
    let Some(path) = path else {
        set_last_error(ErrorCode::BadArguments);
        return None;
    };
    Dir::open(path).ok()
}

/// Opens `path` with `finder`, or returns `None` and sets the last error.
#[must_use]
pub fn opendir_with<F: FindFiles>(finder: &F, path: Option<&str>) -> Option<Dir<F>> {
    let Some(path) = path else {
        set_last_error(ErrorCode::BadArguments);
        return None;
    };
    Dir::open_with(finder, path).ok()
}

/// Fetches the next entry of `dir`.
///
/// Returns `None` at end of directory, or when `dir` is absent (which also
/// sets [`ErrorCode::BadArguments`]).
pub fn readdir<F: FindFiles>(dir: Option<&mut Dir<F>>) -> Option<&DirEntry> {
    let Some(dir) = dir else {
        set_last_error(ErrorCode::BadArguments);
        return None;
    };
    dir.read()
}

/// Closes `dir`.
///
/// # Errors
///
/// Returns [`DirError::BadArguments`] when `dir` is absent and
/// [`DirError::Release`] when the native search fails to close. Both are
/// recorded in the last-error slot.
pub fn closedir<F: FindFiles>(dir: Option<Dir<F>>) -> Result<(), DirError> {
    match dir {
        Some(dir) => dir.close(),
        None => Err(last_error::record(DirError::bad_arguments(
            "directory handle is absent",
        ))),
    }
}
