#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `dirent` provides the classic `opendir`/`readdir`/`closedir` cursor on top
//! of the find-first/find-next/find-close search primitive, as exposed by the
//! [`platform`] crate. Callers open a directory by path, fetch entries one at a
//! time and close the handle; entry names are reported as UTF-8 in a
//! fixed-capacity, NUL-terminated record.
//!
//! # Design
//!
//! - [`Dir`] is the typed handle. It is generic over [`platform::FindFiles`]
//!   so tests can drive it with a scripted backend; [`Dir::open`] uses the
//!   platform's native one.
//! - [`posix`] keeps the POSIX calling shape (optional arguments, `None` on
//!   failure plus a thread-local last error).
//! - The `ffi` module, behind the default `ffi` feature, exports the same
//!   operations with a C ABI.
//!
//! # Invariants
//!
//! - The first native lookup happens while opening.
//! - The native search is released as soon as enumeration is exhausted and
//!   exactly once overall.
//! - Entry names never exceed `NAME_CAPACITY - 1` bytes, are valid UTF-8 and
//!   are always followed by a NUL.
//!
//! # Errors
//!
//! Fallible operations return [`DirError`]; every failure also records an
//! [`ErrorCode`] readable through [`last_error`]. Reaching the end of a
//! directory is not an error and leaves the slot unchanged.
//!
//! # Examples
//!
//! ```
//! use dirent::posix::{closedir, opendir, readdir};
//!
//! let temp = tempfile::tempdir()?;
//! std::fs::write(temp.path().join("b.bin"), b"")?;
//!
//! let mut dir = opendir(temp.path().to_str()).expect("open");
//! let mut count = 0;
//! while readdir(Some(&mut dir)).is_some() {
//!     count += 1;
//! }
//! closedir(Some(dir))?;
//! assert!(count >= 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod dir;
mod entries;
mod error;
mod last_error;
mod name;
pub mod posix;

#[cfg(feature = "ffi")]
#[allow(unsafe_code)]
pub mod ffi;

pub use dir::{Dir, DirState};
pub use entries::{Entry, IntoEntries};
pub use error::{
    DirError, ERROR_BAD_ARGUMENTS, ERROR_DIRECTORY, ERROR_FILE_NOT_FOUND, ERROR_GEN_FAILURE,
    ERROR_NOT_ENOUGH_MEMORY, ErrorCode,
};
pub use last_error::{clear_last_error, last_error, set_last_error};
pub use name::{DirEntry, NAME_CAPACITY};
pub use platform::{EntryKind, NativeFinder};

#[cfg(test)]
mod tests;
