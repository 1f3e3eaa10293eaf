//! crates/platform/src/unix.rs
//! Directory-stream backend presented through the find-first/find-next shape.

use std::io;

use rustix::fs::{Dir, FileType, Mode, OFlags};

use crate::search::{EntryKind, FindFiles, NativeEntry, NativeName, NativeSearch, PathKind};

/// Unix backend built on `open(O_DIRECTORY)` and a `getdents` stream.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirStreamFinder;

impl FindFiles for DirStreamFinder {
    type Search = DirStreamSearch;

    fn path_kind(&self, path: &str) -> io::Result<PathKind> {
        let stat = rustix::fs::stat(path)?;
        if FileType::from_raw_mode(stat.st_mode as _) == FileType::Directory {
            Ok(PathKind::Directory)
        } else {
            Ok(PathKind::NotDirectory)
        }
    }

    fn find_first(&self, path: &str) -> io::Result<(DirStreamSearch, NativeEntry)> {
        let fd = rustix::fs::open(
            path,
            OFlags::RDONLY | OFlags::DIRECTORY | OFlags::CLOEXEC,
            Mode::empty(),
        )?;
        let mut search = DirStreamSearch { dir: Dir::new(fd)? };
        match search.find_next()? {
            Some(first) => Ok((search, first)),
            // Dropping `search` closes the descriptor.
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "directory stream reported no entries",
            )),
        }
    }
}

/// Open directory stream; the descriptor is closed on `close` or drop.
pub struct DirStreamSearch {
    dir: Dir,
}

impl NativeSearch for DirStreamSearch {
    fn find_next(&mut self) -> io::Result<Option<NativeEntry>> {
        match self.dir.read() {
            None => Ok(None),
            Some(Ok(entry)) => Ok(Some(NativeEntry::new(
                NativeName::Bytes(entry.file_name().to_bytes().to_vec()),
                kind_of(entry.file_type()),
            ))),
            Some(Err(errno)) => Err(errno.into()),
        }
    }

    fn close(self) -> io::Result<()> {
        drop(self.dir);
        Ok(())
    }
}

const fn kind_of(file_type: FileType) -> EntryKind {
    match file_type {
        FileType::RegularFile => EntryKind::File,
        FileType::Directory => EntryKind::Directory,
        FileType::Symlink => EntryKind::Symlink,
        FileType::Unknown => EntryKind::Unknown,
        _ => EntryKind::Other,
    }
}
