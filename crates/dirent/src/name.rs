//! Fixed-capacity entry record.
//!
//! Every handle owns one [`DirEntry`] whose name buffer holds
//! [`NAME_CAPACITY`] bytes. Each fetch overwrites it in place: the native name
//! is transcoded to UTF-8, cut at a character boundary so that at most
//! `NAME_CAPACITY - 1` bytes are used, and followed by NUL padding.

use std::collections::TryReserveError;
use std::str;

use encoding_rs::{CoderResult, UTF_8};
use platform::{EntryKind, NativeEntry, NativeName};

use crate::entries::Entry;

/// Size in bytes of the entry name buffer, including the terminating NUL.
pub const NAME_CAPACITY: usize = 260;

/// The entry most recently produced by [`Dir::read`](crate::Dir::read).
///
/// The record is overwritten by the next fetch on the same handle; copy the
/// name out (or use [`Dir::into_entries`](crate::Dir::into_entries)) to keep it.
#[derive(Debug)]
pub struct DirEntry {
    buffer: Box<[u8]>,
    len: usize,
    kind: EntryKind,
    truncated: bool,
}

impl DirEntry {
    /// Allocates a zeroed record, reporting allocation failure instead of aborting.
    pub(crate) fn try_new() -> Result<Self, TryReserveError> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(NAME_CAPACITY)?;
        buffer.resize(NAME_CAPACITY, 0);
        Ok(Self {
            buffer: buffer.into_boxed_slice(),
            len: 0,
            kind: EntryKind::Unknown,
            truncated: false,
        })
    }

    /// Overwrites the record with `native`.
    pub(crate) fn fill(&mut self, native: &NativeEntry) {
        self.buffer.fill(0);
        let room = &mut self.buffer[..NAME_CAPACITY - 1];
        let (len, truncated) = match native.name() {
            NativeName::Wide(units) => transcode_wide(units, room),
            NativeName::Bytes(bytes) => transcode_bytes(bytes, room),
        };
        self.len = len;
        self.kind = native.kind();
        self.truncated = truncated;
    }

    /// Returns the UTF-8 entry name without the terminating NUL.
    #[must_use]
    pub fn name(&self) -> &str {
        str::from_utf8(self.name_bytes()).unwrap_or_default()
    }

    /// Returns the name bytes without the terminating NUL.
    #[must_use]
    pub fn name_bytes(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    /// Returns the name bytes including the terminating NUL.
    #[must_use]
    pub fn name_bytes_with_nul(&self) -> &[u8] {
        &self.buffer[..=self.len]
    }

    /// Returns the full fixed-size buffer, NUL-padded after the name.
    #[must_use]
    pub fn raw_name(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns the kind reported by the native search.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Reports whether the name was cut to fit the buffer.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Copies the record into an owned [`Entry`].
    #[must_use]
    pub fn to_entry(&self) -> Entry {
        Entry::new(self.name().to_owned(), self.kind, self.truncated)
    }
}

/// UTF-16 to UTF-8; unpaired surrogates become U+FFFD.
fn transcode_wide(units: &[u16], dst: &mut [u8]) -> (usize, bool) {
    let (read, written) = encoding_rs::mem::convert_utf16_to_utf8_partial(units, dst);
    (written, read < units.len())
}

/// Bytes to UTF-8; invalid sequences become U+FFFD.
fn transcode_bytes(bytes: &[u8], dst: &mut [u8]) -> (usize, bool) {
    let mut decoder = UTF_8.new_decoder_without_bom_handling();
    let (result, _read, written, _replaced) = decoder.decode_to_utf8(bytes, dst, true);
    (written, result == CoderResult::OutputFull)
}
