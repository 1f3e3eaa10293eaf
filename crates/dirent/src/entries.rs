use std::iter::FusedIterator;

use platform::{EntryKind, FindFiles, NativeFinder};

use crate::dir::Dir;
use crate::error::DirError;

/// Owned copy of one directory entry.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Entry {
    name: String,
    kind: EntryKind,
    truncated: bool,
}

impl Entry {
    pub(crate) const fn new(name: String, kind: EntryKind, truncated: bool) -> Self {
        Self {
            name,
            kind,
            truncated,
        }
    }

    /// Returns the UTF-8 entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Consumes the entry and returns its name.
    #[must_use]
    pub fn into_name(self) -> String {
        self.name
    }

    /// Returns the kind reported by the native search.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Reports whether the name was cut to fit the fixed buffer.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// Iterator over owned entries, created by [`Dir::into_entries`].
///
/// Dropping the iterator releases the search like dropping the [`Dir`];
/// [`close`](Self::close) surfaces a failed release instead.
#[derive(Debug)]
pub struct IntoEntries<F: FindFiles = NativeFinder> {
    dir: Dir<F>,
}

impl<F: FindFiles> IntoEntries<F> {
    pub(crate) fn new(dir: Dir<F>) -> Self {
        Self { dir }
    }

    /// Returns the underlying handle.
    #[must_use]
    pub fn into_inner(self) -> Dir<F> {
        self.dir
    }

    /// Closes the underlying handle.
    ///
    /// # Errors
    ///
    /// Returns [`DirError::Release`] when the native search fails to close.
    pub fn close(self) -> Result<(), DirError> {
        self.dir.close()
    }
}

impl<F: FindFiles> Iterator for IntoEntries<F> {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        self.dir.read().map(crate::DirEntry::to_entry)
    }
}

impl<F: FindFiles> FusedIterator for IntoEntries<F> {}
