#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(windows), forbid(unsafe_code))]

//! # Overview
//!
//! `platform` isolates the native directory-search primitives used by the
//! `dirent` iterator. Every backend is expressed through the same
//! find-first/find-next/find-close shape, so the cursor adaptation that sits on
//! top of it is written once.
//!
//! # Design
//!
//! - [`FindFiles`] begins a search and returns its first match together with
//!   the in-progress [`NativeSearch`].
//! - [`NativeSearch`] yields the next match, signals exhaustion with `None`, and
//!   releases the native resource when closed or dropped.
//! - [`NativeFinder`] selects the backend for the current target: Win32
//!   `FindFirstFileW` on Windows, a `rustix` directory stream on Unix.
//!
//! # Invariants
//!
//! - A [`NativeSearch`] owns exactly one native resource, released exactly once
//!   by either [`NativeSearch::close`] or `Drop`.
//! - Names are reported in the platform's own encoding ([`NativeName`]);
//!   transcoding to UTF-8 is left to the caller.
//! - No backend filters, sorts or caches entries. `.` and `..` are reported
//!   whenever the operating system reports them.
//!
//! # Examples
//!
//! ```
//! use platform::{FindFiles, NativeFinder, NativeSearch, PathKind};
//!
//! # fn demo() -> std::io::Result<()> {
//! let temp = tempfile::tempdir()?;
//! std::fs::write(temp.path().join("file.txt"), b"data")?;
//! let path = temp.path().to_str().expect("utf-8 temp path");
//!
//! let finder = NativeFinder::default();
//! assert_eq!(finder.path_kind(path)?, PathKind::Directory);
//!
//! let (mut search, first) = finder.find_first(path)?;
//! let mut count = 1;
//! while search.find_next()?.is_some() {
//!     count += 1;
//! }
//! search.close()?;
//! assert!(count >= 1);
//! # let _ = first;
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod search;

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

pub use search::{EntryKind, FindFiles, NativeEntry, NativeName, NativeSearch, PathKind};

#[cfg(unix)]
pub use unix::{DirStreamFinder, DirStreamSearch};
#[cfg(windows)]
pub use windows::{FindFirstFinder, FindFirstSearch};

/// Backend selected for the current target.
#[cfg(unix)]
pub type NativeFinder = DirStreamFinder;

/// Backend selected for the current target.
#[cfg(windows)]
pub type NativeFinder = FindFirstFinder;
