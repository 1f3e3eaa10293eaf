use std::collections::TryReserveError;
use std::fmt;
use std::io;

use thiserror::Error;

/// Win32 `ERROR_FILE_NOT_FOUND`.
pub const ERROR_FILE_NOT_FOUND: i32 = 2;
/// Win32 `ERROR_NOT_ENOUGH_MEMORY`.
pub const ERROR_NOT_ENOUGH_MEMORY: i32 = 8;
/// Win32 `ERROR_GEN_FAILURE`, used when the native layer supplied no code.
pub const ERROR_GEN_FAILURE: i32 = 31;
/// Win32 `ERROR_BAD_ARGUMENTS`.
pub const ERROR_BAD_ARGUMENTS: i32 = 160;
/// Win32 `ERROR_DIRECTORY` ("the directory name is invalid").
pub const ERROR_DIRECTORY: i32 = 267;

/// Value stored in the last-error slot.
///
/// Numeric values follow the Win32 error numbering so C callers of the `ffi`
/// surface see the codes they would get from the native API.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorCode {
    /// An absent path or handle, or a path the native encoding cannot carry.
    BadArguments,
    /// The handle's storage could not be allocated.
    OutOfMemory,
    /// The path does not exist.
    NotFound,
    /// The path exists but is not a directory.
    NotADirectory,
    /// The native search failed; carries the OS error code when one exists.
    Enumeration(Option<i32>),
}

impl ErrorCode {
    /// Returns the numeric code exposed through the C ABI.
    #[must_use]
    pub const fn raw(self) -> i32 {
        match self {
            Self::BadArguments => ERROR_BAD_ARGUMENTS,
            Self::OutOfMemory => ERROR_NOT_ENOUGH_MEMORY,
            Self::NotFound => ERROR_FILE_NOT_FOUND,
            Self::NotADirectory => ERROR_DIRECTORY,
            Self::Enumeration(Some(code)) => code,
            Self::Enumeration(None) => ERROR_GEN_FAILURE,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadArguments => f.write_str("bad arguments"),
            Self::OutOfMemory => f.write_str("out of memory"),
            Self::NotFound => f.write_str("not found"),
            Self::NotADirectory => f.write_str("not a directory"),
            Self::Enumeration(Some(code)) => write!(f, "enumeration failed (os error {code})"),
            Self::Enumeration(None) => f.write_str("enumeration failed"),
        }
    }
}

/// Error returned when opening, reading or closing a directory fails.
#[derive(Debug, Error)]
pub enum DirError {
    /// A required argument was absent or unrepresentable.
    #[error("invalid argument: {reason}")]
    BadArguments {
        /// Which argument was rejected.
        reason: &'static str,
    },
    /// Allocating the entry buffer failed.
    #[error("failed to allocate directory handle storage: {source}")]
    OutOfMemory {
        /// Allocation failure reported by the allocator.
        #[source]
        source: TryReserveError,
    },
    /// The path does not exist.
    #[error("failed to open directory '{path}': {source}")]
    NotFound {
        /// Path that was looked up.
        path: String,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
    /// The path names something other than a directory.
    #[error("failed to open directory '{path}': not a directory")]
    NotADirectory {
        /// Path that was looked up.
        path: String,
    },
    /// Probing the path or beginning the native search failed.
    #[error("failed to enumerate '{path}': {source}")]
    Enumeration {
        /// Directory being enumerated.
        path: String,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
    /// Releasing the native search failed during close.
    #[error("failed to release search for '{path}': {source}")]
    Release {
        /// Directory whose search was being released.
        path: String,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
}

impl DirError {
    pub(crate) const fn bad_arguments(reason: &'static str) -> Self {
        Self::BadArguments { reason }
    }

    /// Classifies a failed path lookup.
    pub(crate) fn lookup(path: &str, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::InvalidInput => Self::bad_arguments("path cannot be encoded natively"),
            io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_owned(),
                source,
            },
            _ => Self::enumeration(path, source),
        }
    }

    pub(crate) fn not_a_directory(path: &str) -> Self {
        Self::NotADirectory {
            path: path.to_owned(),
        }
    }

    pub(crate) fn enumeration(path: &str, source: io::Error) -> Self {
        Self::Enumeration {
            path: path.to_owned(),
            source,
        }
    }

    pub(crate) fn release(path: String, source: io::Error) -> Self {
        Self::Release { path, source }
    }

    /// Returns the code recorded in the last-error slot for this failure.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::BadArguments { .. } => ErrorCode::BadArguments,
            Self::OutOfMemory { .. } => ErrorCode::OutOfMemory,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::NotADirectory { .. } => ErrorCode::NotADirectory,
            Self::Enumeration { source, .. } | Self::Release { source, .. } => {
                ErrorCode::Enumeration(source.raw_os_error())
            }
        }
    }

    /// Returns the directory path tied to the failure, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::BadArguments { .. } | Self::OutOfMemory { .. } => None,
            Self::NotFound { path, .. }
            | Self::NotADirectory { path }
            | Self::Enumeration { path, .. }
            | Self::Release { path, .. } => Some(path),
        }
    }
}
