//! crates/cli/src/listing.rs
//! Collects and renders the entries of one directory.

use std::io::{self, Write};

use dirent::{Dir, DirError, Entry};

/// Rendering switches taken from the command line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct ListOptions {
    pub(crate) long: bool,
    pub(crate) sort: bool,
}

/// Reads every entry of `path`, releasing the handle before returning.
pub(crate) fn collect_entries(path: &str, options: ListOptions) -> Result<Vec<Entry>, DirError> {
    let mut entries = Dir::open(path)?.into_entries();
    let mut collected: Vec<Entry> = entries.by_ref().collect();
    entries.close()?;

    if options.sort {
        collected.sort_by(|left, right| left.name().cmp(right.name()));
    }
    Ok(collected)
}

/// Writes one directory section, with a `path:` header when `header` is set.
pub(crate) fn render_section<W: Write + ?Sized>(
    out: &mut W,
    path: &str,
    entries: &[Entry],
    header: bool,
    options: ListOptions,
) -> io::Result<()> {
    if header {
        writeln!(out, "{path}:")?;
    }
    for entry in entries {
        if options.long {
            write!(out, "{:<7} ", entry.kind().label())?;
        }
        out.write_all(entry.name().as_bytes())?;
        if options.long && entry.is_truncated() {
            out.write_all(b" [truncated]")?;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}
