use std::io;

/// Entry classification reported by the native primitive.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory, including `.` and `..`.
    Directory,
    /// Symbolic link or symlink-type reparse point.
    Symlink,
    /// Device, FIFO, socket or any other special file.
    Other,
    /// The primitive did not report a type.
    #[default]
    Unknown,
}

impl EntryKind {
    /// Reports whether the primitive classified the entry at all.
    ///
    /// Directory streams on some filesystems report every entry as
    /// [`Unknown`](Self::Unknown); callers needing the kind then have to stat
    /// the entry themselves.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns a short lowercase label used in listings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "dir",
            Self::Symlink => "link",
            Self::Other => "other",
            Self::Unknown => "unknown",
        }
    }
}

/// Entry name in the platform's native encoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NativeName {
    /// UTF-16 code units as reported by Win32. May contain unpaired surrogates.
    Wide(Vec<u16>),
    /// Raw bytes as reported by a Unix directory stream. May be invalid UTF-8.
    Bytes(Vec<u8>),
}

impl NativeName {
    /// Builds a wide name from a fixed-size buffer, stopping at the first NUL.
    #[must_use]
    pub fn from_wide_nul(units: &[u16]) -> Self {
        let len = units.iter().position(|&unit| unit == 0).unwrap_or(units.len());
        Self::Wide(units[..len].to_vec())
    }

    /// Number of native code units in the name.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Wide(units) => units.len(),
            Self::Bytes(bytes) => bytes.len(),
        }
    }

    /// Reports whether the name has no code units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One match produced by a native search.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NativeEntry {
    name: NativeName,
    kind: EntryKind,
}

impl NativeEntry {
    /// Creates an entry from its native name and kind.
    #[must_use]
    pub const fn new(name: NativeName, kind: EntryKind) -> Self {
        Self { name, kind }
    }

    /// Returns the native name.
    #[must_use]
    pub const fn name(&self) -> &NativeName {
        &self.name
    }

    /// Returns the kind reported alongside the name.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }
}

/// Result of probing a path before a search begins.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathKind {
    /// The path names an existing directory.
    Directory,
    /// The path exists but is not a directory.
    NotDirectory,
}

/// Begins native directory searches.
///
/// Paths arrive as UTF-8; each backend converts them to its native path
/// encoding. A path the native encoding cannot represent (for example one
/// containing NUL) fails with [`io::ErrorKind::InvalidInput`]. A missing path
/// fails with [`io::ErrorKind::NotFound`].
pub trait FindFiles {
    /// In-progress search returned by [`find_first`](Self::find_first).
    type Search: NativeSearch;

    /// Reports whether `path` names a directory.
    fn path_kind(&self, path: &str) -> io::Result<PathKind>;

    /// Starts enumerating `path` and returns the first match.
    ///
    /// A search that produces no match at all is an error: no native resource
    /// is held when this returns `Err`.
    fn find_first(&self, path: &str) -> io::Result<(Self::Search, NativeEntry)>;
}

/// A native search resource positioned after its most recent match.
pub trait NativeSearch {
    /// Advances to the next match. `Ok(None)` signals exhaustion.
    fn find_next(&mut self) -> io::Result<Option<NativeEntry>>;

    /// Releases the native resource, reporting a failed release.
    fn close(self) -> io::Result<()>;
}
