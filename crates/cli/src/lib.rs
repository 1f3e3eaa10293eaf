#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-end of `dirls`, a small lister
//! built on the [`dirent`] cursor. Each operand is opened, enumerated in native
//! order (or sorted with `--sort`) and printed one name per line.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for standard
//! output and error so tests can drive it without spawning a process. A
//! [`clap`](https://docs.rs/clap/) command definition parses the options;
//! `--help` and `--version` are handled here rather than by clap so their
//! output goes to the supplied writer. Verbosity flags configure the
//! [`logging`] subscriber.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes.
//! - A directory that cannot be listed is reported on stderr and the remaining
//!   operands are still listed.
//!
//! # Errors
//!
//! Diagnostics are written as `dirls: <message>`. Usage errors exit with `2`,
//! a failure to list any operand exits with `1`.
//!
//! # Examples
//!
//! ```
//! let temp = tempfile::tempdir().unwrap();
//! std::fs::write(temp.path().join("a.txt"), b"").unwrap();
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(["dirls", "--sort", temp.path().to_str().unwrap()], &mut stdout, &mut stderr);
//!
//! assert_eq!(status, 0);
//! assert_eq!(String::from_utf8(stdout).unwrap(), ".\n..\na.txt\n");
//! assert!(stderr.is_empty());
//! ```

mod arguments;
mod listing;

use std::ffi::OsString;
use std::fmt::Display;
use std::io::Write;
use std::process::ExitCode;

use logging::LogConfig;

pub use arguments::PROGRAM_NAME;
use arguments::{help_text, parse_args};
use listing::{ListOptions, collect_entries, render_section};

/// Exit status when at least one operand could not be listed.
pub const PARTIAL_FAILURE_EXIT: i32 = 1;

/// Exit status for command-line usage errors.
pub const USAGE_EXIT: i32 = 2;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Tracing target for events emitted by the front-end.
const CLI_TARGET: &str = "dirls";

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Returns the process exit code: `0` on success, [`PARTIAL_FAILURE_EXIT`]
/// when an operand failed and [`USAGE_EXIT`] when the arguments are invalid.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let parsed = match parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => {
            let _ = write!(stderr, "{PROGRAM_NAME}: {error}");
            return USAGE_EXIT;
        }
    };

    if parsed.show_help {
        return status_of_write(stdout.write_all(help_text().as_bytes()), stderr);
    }
    if parsed.show_version {
        return status_of_write(
            writeln!(stdout, "{PROGRAM_NAME} {}", env!("CARGO_PKG_VERSION")),
            stderr,
        );
    }

    if let Err(error) = logging::init_tracing(&LogConfig::from_verbose_level(parsed.verbosity)) {
        tracing::debug!(target: CLI_TARGET, %error, "tracing subscriber already installed");
    }

    let options = ListOptions {
        long: parsed.long,
        sort: parsed.sort,
    };
    let multiple = parsed.directories.len() > 1;
    let mut status = 0;
    let mut wrote_section = false;

    for directory in &parsed.directories {
        let Some(path) = directory.to_str() else {
            report(
                stderr,
                format_args!("'{}': path is not valid UTF-8", directory.to_string_lossy()),
            );
            status = PARTIAL_FAILURE_EXIT;
            continue;
        };

        let entries = match collect_entries(path, options) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::debug!(target: CLI_TARGET, path, code = %error.code(), "listing failed");
                report(stderr, error);
                status = PARTIAL_FAILURE_EXIT;
                continue;
            }
        };
        tracing::info!(target: CLI_TARGET, path, entries = entries.len(), "listed directory");

        // Sections are separated by a blank line; failed operands print none.
        if wrote_section && stdout.write_all(b"\n").is_err() {
            return PARTIAL_FAILURE_EXIT;
        }
        if let Err(error) = render_section(stdout, path, &entries, multiple, options) {
            report(stderr, format_args!("failed to write listing: {error}"));
            return PARTIAL_FAILURE_EXIT;
        }
        wrote_section = true;
    }

    status
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}

fn report<Err: Write>(stderr: &mut Err, message: impl Display) {
    let _ = writeln!(stderr, "{PROGRAM_NAME}: {message}");
}

fn status_of_write<Err: Write>(result: std::io::Result<()>, stderr: &mut Err) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            report(stderr, format_args!("failed to write output: {error}"));
            PARTIAL_FAILURE_EXIT
        }
    }
}
