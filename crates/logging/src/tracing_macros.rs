//! crates/logging/src/tracing_macros.rs
//! Convenience macros for dirent-specific tracing.
//!
//! These macros provide ergonomic wrappers around standard tracing macros
//! with the targets defined in [`crate::config`]. Crates using them must
//! depend on `tracing` directly.

/// Emit a directory handle lifecycle trace.
///
/// # Example
/// ```ignore
/// trace_dir!(path = %path, "opened directory");
/// ```
#[macro_export]
macro_rules! trace_dir {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "dirent::dir", $($arg)*);
    };
}

/// Emit a warning about a directory handle that did not stop the caller.
///
/// # Example
/// ```ignore
/// warn_dir!(error = %err, "releasing search failed");
/// ```
#[macro_export]
macro_rules! warn_dir {
    ($($arg:tt)*) => {
        ::tracing::warn!(target: "dirent::dir", $($arg)*);
    };
}

/// Emit a native search step trace.
///
/// # Example
/// ```ignore
/// trace_search!(units = name.len(), "advanced native search");
/// ```
#[macro_export]
macro_rules! trace_search {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "dirent::search", $($arg)*);
    };
}
