//! crates/platform/src/windows.rs
//! Win32 `FindFirstFileW`/`FindNextFileW` backend.

use std::io;
use std::mem::{ManuallyDrop, MaybeUninit};

use windows_sys::Win32::Foundation::{ERROR_NO_MORE_FILES, HANDLE, INVALID_HANDLE_VALUE};
use windows_sys::Win32::Storage::FileSystem::{
    FILE_ATTRIBUTE_DIRECTORY, FILE_ATTRIBUTE_REPARSE_POINT, FindClose, FindFirstFileW,
    FindNextFileW, GetFileAttributesW, INVALID_FILE_ATTRIBUTES, WIN32_FIND_DATAW,
};

use crate::search::{EntryKind, FindFiles, NativeEntry, NativeName, NativeSearch, PathKind};

const IO_REPARSE_TAG_SYMLINK: u32 = 0xA000_000C;
const BACKSLASH: u16 = b'\\' as u16;
const SLASH: u16 = b'/' as u16;
const STAR: u16 = b'*' as u16;

/// Win32 backend; searches `<path>\*`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FindFirstFinder;

impl FindFiles for FindFirstFinder {
    type Search = FindFirstSearch;

    fn path_kind(&self, path: &str) -> io::Result<PathKind> {
        let wide = to_wide(path, false)?;
        // SAFETY: `wide` is NUL-terminated and outlives the call.
        let attrs = unsafe { GetFileAttributesW(wide.as_ptr()) };
        if attrs == INVALID_FILE_ATTRIBUTES {
            Err(io::Error::last_os_error())
        } else if attrs & FILE_ATTRIBUTE_DIRECTORY != 0 {
            Ok(PathKind::Directory)
        } else {
            Ok(PathKind::NotDirectory)
        }
    }

    fn find_first(&self, path: &str) -> io::Result<(FindFirstSearch, NativeEntry)> {
        let pattern = to_wide(path, true)?;
        let mut data = MaybeUninit::<WIN32_FIND_DATAW>::zeroed();
        // SAFETY: `pattern` is NUL-terminated; `data` is valid for writes.
        let handle = unsafe { FindFirstFileW(pattern.as_ptr(), data.as_mut_ptr()) };
        if handle == INVALID_HANDLE_VALUE {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: FindFirstFileW succeeded and filled `data`.
        let first = entry_from(unsafe { data.assume_init_ref() });
        Ok((FindFirstSearch { handle }, first))
    }
}

/// Open Win32 search handle; released by `close` or drop.
pub struct FindFirstSearch {
    handle: HANDLE,
}

// SAFETY: search handles are not tied to the thread that created them.
unsafe impl Send for FindFirstSearch {}

impl NativeSearch for FindFirstSearch {
    fn find_next(&mut self) -> io::Result<Option<NativeEntry>> {
        let mut data = MaybeUninit::<WIN32_FIND_DATAW>::zeroed();
        // SAFETY: `handle` is a live search handle owned by `self`.
        if unsafe { FindNextFileW(self.handle, data.as_mut_ptr()) } != 0 {
            // SAFETY: FindNextFileW succeeded and filled `data`.
            return Ok(Some(entry_from(unsafe { data.assume_init_ref() })));
        }
        let error = io::Error::last_os_error();
        if error.raw_os_error() == Some(ERROR_NO_MORE_FILES as i32) {
            Ok(None)
        } else {
            Err(error)
        }
    }

    fn close(self) -> io::Result<()> {
        let this = ManuallyDrop::new(self);
        close_handle(this.handle)
    }
}

impl Drop for FindFirstSearch {
    fn drop(&mut self) {
        let _ = close_handle(self.handle);
    }
}

fn close_handle(handle: HANDLE) -> io::Result<()> {
    // SAFETY: callers pass a handle obtained from FindFirstFileW exactly once.
    if unsafe { FindClose(handle) } != 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

fn entry_from(data: &WIN32_FIND_DATAW) -> NativeEntry {
    let attrs = data.dwFileAttributes;
    let kind = if attrs & FILE_ATTRIBUTE_REPARSE_POINT != 0
        && data.dwReserved0 == IO_REPARSE_TAG_SYMLINK
    {
        EntryKind::Symlink
    } else if attrs & FILE_ATTRIBUTE_DIRECTORY != 0 {
        EntryKind::Directory
    } else {
        EntryKind::File
    };
    NativeEntry::new(NativeName::from_wide_nul(&data.cFileName), kind)
}

/// Converts a UTF-8 path to a NUL-terminated UTF-16 string, optionally with
/// the `\*` search pattern appended.
fn to_wide(path: &str, pattern: bool) -> io::Result<Vec<u16>> {
    if path.contains('\0') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path contains an interior NUL",
        ));
    }
    let mut wide = vec![0u16; path.len() + 3];
    let written = encoding_rs::mem::convert_str_to_utf16(path, &mut wide);
    wide.truncate(written);
    if pattern {
        if !matches!(wide.last(), Some(&BACKSLASH | &SLASH)) {
            wide.push(BACKSLASH);
        }
        wide.push(STAR);
    }
    wide.push(0);
    Ok(wide)
}
