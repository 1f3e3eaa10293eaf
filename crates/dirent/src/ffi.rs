//! C ABI over [`Dir`].
//!
//! Handles are heap allocations owned by the caller between
//! [`dirent_opendir`] and [`dirent_closedir`]. Each handle embeds the
//! [`RawDirent`] that [`dirent_readdir`] returns, so the returned pointer stays
//! valid until the next read or close on the same handle. Failures leave their
//! Win32-numbered code in the slot read by [`dirent_last_error`].

use std::ffi::{CStr, c_char, c_int};
use std::ptr::{self, null_mut};

use platform::EntryKind;

use crate::dir::Dir;
use crate::error::ErrorCode;
use crate::last_error::{last_error, set_last_error};
use crate::name::{DirEntry, NAME_CAPACITY};

/// `d_type` for an entry whose kind was not reported.
pub const DT_UNKNOWN: u8 = 0;
/// `d_type` for a directory.
pub const DT_DIR: u8 = 4;
/// `d_type` for a regular file.
pub const DT_REG: u8 = 8;
/// `d_type` for a symbolic link.
pub const DT_LNK: u8 = 10;

/// Entry record handed to C callers.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct RawDirent {
    /// One of the `DT_*` constants.
    pub d_type: u8,
    /// UTF-8 name, NUL-terminated and NUL-padded.
    pub d_name: [c_char; NAME_CAPACITY],
}

impl RawDirent {
    const EMPTY: Self = Self {
        d_type: DT_UNKNOWN,
        d_name: [0; NAME_CAPACITY],
    };

    fn fill(&mut self, entry: &DirEntry) {
        self.d_type = match entry.kind() {
            EntryKind::Directory => DT_DIR,
            EntryKind::File => DT_REG,
            EntryKind::Symlink => DT_LNK,
            EntryKind::Other | EntryKind::Unknown => DT_UNKNOWN,
        };
        for (slot, &byte) in self.d_name.iter_mut().zip(entry.raw_name()) {
            *slot = c_char::from_ne_bytes([byte]);
        }
    }
}

/// Opaque handle returned by [`dirent_opendir`].
pub struct RawDir {
    dir: Dir,
    storage: RawDirent,
}

/// Opens the directory named by the NUL-terminated UTF-8 string `path`.
///
/// Returns null on failure. A null or non-UTF-8 `path` fails with
/// `ERROR_BAD_ARGUMENTS`.
///
/// # Safety
///
/// `path` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dirent_opendir(path: *const c_char) -> *mut RawDir {
    if path.is_null() {
        set_last_error(ErrorCode::BadArguments);
        return null_mut();
    }
    // SAFETY: `path` is non-null and NUL-terminated per the caller contract.
    let path = unsafe { CStr::from_ptr(path) };
    let Ok(path) = path.to_str() else {
        set_last_error(ErrorCode::BadArguments);
        return null_mut();
    };

    match Dir::open(path) {
        Ok(dir) => Box::into_raw(Box::new(RawDir {
            dir,
            storage: RawDirent::EMPTY,
        })),
        Err(_) => null_mut(),
    }
}

/// Fetches the next entry, or returns null at end of directory.
///
/// A null `dir` also returns null and sets `ERROR_BAD_ARGUMENTS`; end of
/// directory leaves the last error untouched.
///
/// # Safety
///
/// `dir` must be null or a handle returned by [`dirent_opendir`] that has not
/// been passed to [`dirent_closedir`], and must not be used concurrently.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dirent_readdir(dir: *mut RawDir) -> *const RawDirent {
    // SAFETY: a non-null `dir` is a live, exclusively used handle per the caller contract.
    let Some(handle) = (unsafe { dir.as_mut() }) else {
        set_last_error(ErrorCode::BadArguments);
        return ptr::null();
    };
    match handle.dir.read() {
        Some(entry) => {
            handle.storage.fill(entry);
            &raw const handle.storage
        }
        None => ptr::null(),
    }
}

/// Closes `dir`, returning 0 on success and -1 on failure.
///
/// The handle is freed even when releasing the native search fails.
///
/// # Safety
///
/// `dir` must be null or a handle returned by [`dirent_opendir`] that has not
/// already been closed. The handle must not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dirent_closedir(dir: *mut RawDir) -> c_int {
    if dir.is_null() {
        set_last_error(ErrorCode::BadArguments);
        return -1;
    }
    // SAFETY: `dir` came from `Box::into_raw` in `dirent_opendir` and is closed once.
    let RawDir { dir, .. } = *unsafe { Box::from_raw(dir) };
    match dir.close() {
        Ok(()) => 0,
        Err(_) => -1,
    }
}

/// Returns the calling thread's last error code, or 0 when none was recorded.
#[unsafe(no_mangle)]
pub extern "C" fn dirent_last_error() -> c_int {
    last_error().map_or(0, ErrorCode::raw)
}
