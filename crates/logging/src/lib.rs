#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` centralises the diagnostics conventions of the dirent workspace.
//! Library crates emit [`tracing`] events through the target-specific macros
//! exported here and never install a subscriber themselves; binaries call
//! [`init_tracing`] once with a [`LogConfig`] derived from their command line.
//!
//! # Design
//!
//! - [`trace_dir!`] records handle lifecycle events (open, exhaustion, close)
//!   under the [`DIR_TARGET`] target.
//! - [`trace_search!`] records individual native search steps under the
//!   [`SEARCH_TARGET`] target. These are emitted at `TRACE` level because
//!   they fire once per directory entry.
//! - [`LogConfig`] maps a `-v` count to a level and accepts an optional
//!   filter directive. The [`LOG_ENV`] environment variable overrides both.
//!
//! # Examples
//!
//! ```
//! use logging::LogConfig;
//!
//! let config = LogConfig::from_verbose_level(2);
//! assert_eq!(config.directive(), "warn,dirent=debug,dirls=debug");
//! ```

mod config;
mod tracing_bridge;
mod tracing_macros;

pub use config::{DIR_TARGET, LOG_ENV, LogConfig, SEARCH_TARGET};
pub use tracing_bridge::{init_tracing, init_tracing_with_writer};
