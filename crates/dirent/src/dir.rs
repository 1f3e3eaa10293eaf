//! Directory handle built on the one-entry lookahead of find-first searches.
//!
//! # Design
//!
//! The native primitive returns the first match as part of starting the
//! search, so [`Dir::open_with`] performs that first lookup eagerly and keeps
//! the match as a pending entry. Each [`Dir::read`] publishes the pending entry
//! into the handle's [`DirEntry`] record and then advances the native search
//! by one step. When the advance reports no further match the native resource
//! is released immediately, before the caller sees the last entry.
//!
//! # Invariants
//!
//! - A live handle holds exactly one native search and one pending entry.
//! - An exhausted handle holds no native resource and never calls the native
//!   layer again.
//! - Every native search is released exactly once, by exhaustion, by
//!   [`Dir::close`] or by `Drop`, whichever comes first.
//!
//! # Errors
//!
//! Failures while opening or closing are returned as [`DirError`] and
//! recorded in the thread's [`last_error`](crate::last_error) slot. A failure
//! while advancing is not surfaced: the entry already fetched is still
//! returned, the search is released and the handle reads as exhausted.

use std::fmt;
use std::io;
use std::mem;

use logging::{trace_dir, trace_search, warn_dir};
use platform::{FindFiles, NativeEntry, NativeFinder, NativeSearch, PathKind};

use crate::entries::IntoEntries;
use crate::error::DirError;
use crate::last_error;
use crate::name::DirEntry;

/// Lifecycle of a handle as seen by callers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DirState {
    /// A native search is held together with one pending entry.
    Live,
    /// Enumeration finished; no native resource is held.
    Exhausted,
}

enum SearchState<S> {
    Live { search: S, pending: NativeEntry },
    Exhausted,
}

enum Step {
    Advanced,
    Finished,
    Failed(io::Error),
}

/// An open directory.
///
/// # Examples
///
/// ```
/// use dirent::Dir;
///
/// let temp = tempfile::tempdir()?;
/// std::fs::write(temp.path().join("a.txt"), b"")?;
///
/// let path = temp.path().to_str().expect("utf-8 temp path");
/// let mut dir = Dir::open(path)?;
/// let mut names = Vec::new();
/// while let Some(entry) = dir.read() {
///     names.push(entry.name().to_owned());
/// }
/// dir.close()?;
/// assert!(names.iter().any(|name| name == "a.txt"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Dir<F: FindFiles = NativeFinder> {
    path: String,
    state: SearchState<F::Search>,
    entry: DirEntry,
}

impl Dir<NativeFinder> {
    /// Opens `path` with the platform's native search.
    ///
    /// # Errors
    ///
    /// See [`Dir::open_with`].
    pub fn open(path: &str) -> Result<Self, DirError> {
        Self::open_with(&NativeFinder::default(), path)
    }
}

impl<F: FindFiles> Dir<F> {
    /// Opens `path` using `finder` and fetches the first entry.
    ///
    /// # Errors
    ///
    /// - [`DirError::OutOfMemory`] when the entry record cannot be allocated.
    /// - [`DirError::BadArguments`] when the path cannot be encoded natively.
    /// - [`DirError::NotFound`] when the path does not exist.
    /// - [`DirError::NotADirectory`] when the path is not a directory.
    /// - [`DirError::Enumeration`] when the search cannot begin or has no
    ///   first match.
    ///
    /// Each failure is also recorded in the last-error slot.
    pub fn open_with(finder: &F, path: &str) -> Result<Self, DirError> {
        Self::begin(finder, path).map_err(last_error::record)
    }

    fn begin(finder: &F, path: &str) -> Result<Self, DirError> {
        let entry = DirEntry::try_new().map_err(|source| DirError::OutOfMemory { source })?;

        match finder.path_kind(path) {
            Ok(PathKind::Directory) => {}
            Ok(PathKind::NotDirectory) => return Err(DirError::not_a_directory(path)),
            Err(source) => return Err(DirError::lookup(path, source)),
        }

        let (search, pending) = finder
            .find_first(path)
            .map_err(|source| DirError::enumeration(path, source))?;
        trace_dir!(path = %path, "opened directory search");

        Ok(Self {
            path: path.to_owned(),
            state: SearchState::Live { search, pending },
            entry,
        })
    }

    /// Returns the path this handle was opened with.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns whether a native search is still held.
    #[must_use]
    pub const fn state(&self) -> DirState {
        match self.state {
            SearchState::Live { .. } => DirState::Live,
            SearchState::Exhausted => DirState::Exhausted,
        }
    }

    /// Fetches the next entry, or `None` once the directory is exhausted.
    ///
    /// The returned record is overwritten by the next call. End of directory
    /// leaves the last-error slot untouched.
    pub fn read(&mut self) -> Option<&DirEntry> {
        let step = match &mut self.state {
            SearchState::Exhausted => return None,
            SearchState::Live { search, pending } => {
                self.entry.fill(pending);
                trace_search!(
                    path = %self.path,
                    name = self.entry.name(),
                    truncated = self.entry.is_truncated(),
                    "fetched entry"
                );
                match search.find_next() {
                    Ok(Some(next)) => {
                        *pending = next;
                        Step::Advanced
                    }
                    Ok(None) => Step::Finished,
                    Err(error) => Step::Failed(error),
                }
            }
        };

        match step {
            Step::Advanced => {}
            Step::Finished => self.release_exhausted(None),
            Step::Failed(error) => self.release_exhausted(Some(error)),
        }
        Some(&self.entry)
    }

    fn release_exhausted(&mut self, advance_error: Option<io::Error>) {
        let SearchState::Live { search, .. } = mem::replace(&mut self.state, SearchState::Exhausted)
        else {
            return;
        };
        if let Some(error) = advance_error {
            warn_dir!(path = %self.path, error = %error, "advancing search failed; ending enumeration");
        }
        if let Err(error) = search.close() {
            warn_dir!(path = %self.path, error = %error, "releasing exhausted search failed");
        }
        trace_dir!(path = %self.path, "directory search exhausted");
    }

    /// Releases the native search, if still held, and then the handle.
    ///
    /// # Errors
    ///
    /// Returns [`DirError::Release`] when the native search fails to close.
    /// The handle is consumed either way.
    pub fn close(mut self) -> Result<(), DirError> {
        let path = mem::take(&mut self.path);
        let released = match mem::replace(&mut self.state, SearchState::Exhausted) {
            SearchState::Live { search, .. } => search.close(),
            SearchState::Exhausted => Ok(()),
        };
        drop(self);

        match released {
            Ok(()) => {
                trace_dir!(path = %path, "closed directory");
                Ok(())
            }
            Err(source) => Err(last_error::record(DirError::release(path, source))),
        }
    }

    /// Converts the handle into an iterator of owned entries.
    #[must_use]
    pub fn into_entries(self) -> IntoEntries<F> {
        IntoEntries::new(self)
    }
}

impl<F: FindFiles> Drop for Dir<F> {
    fn drop(&mut self) {
        if let SearchState::Live { search, .. } = mem::replace(&mut self.state, SearchState::Exhausted)
        {
            if let Err(error) = search.close() {
                warn_dir!(path = %self.path, error = %error, "releasing dropped search failed");
            }
        }
    }
}

impl<F: FindFiles> fmt::Debug for Dir<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dir")
            .field("path", &self.path)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
