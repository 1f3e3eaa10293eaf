use super::*;
use platform::{FindFiles, NativeEntry, NativeName, NativeSearch, PathKind};
use std::cell::Cell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

#[derive(Clone, Debug)]
enum Step {
    Entry(NativeEntry),
    Fail(io::ErrorKind),
}

#[derive(Debug, Default)]
struct Calls {
    lookups: Cell<usize>,
    begins: Cell<usize>,
    advances: Cell<usize>,
    releases: Cell<usize>,
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

/// Backend that replays a fixed script of native results.
#[derive(Debug)]
struct ScriptedFinder {
    path_kind: Result<PathKind, io::ErrorKind>,
    begin_error: Option<i32>,
    script: Vec<Step>,
    release_error: Option<i32>,
    calls: Rc<Calls>,
}

impl ScriptedFinder {
    fn directory(names: &[&str]) -> Self {
        Self {
            path_kind: Ok(PathKind::Directory),
            begin_error: None,
            script: names.iter().map(|name| Step::Entry(wide(name))).collect(),
            release_error: None,
            calls: Rc::default(),
        }
    }

    fn with_path_kind(mut self, path_kind: Result<PathKind, io::ErrorKind>) -> Self {
        self.path_kind = path_kind;
        self
    }

    fn with_step(mut self, step: Step) -> Self {
        self.script.push(step);
        self
    }

    fn failing_release(mut self, code: i32) -> Self {
        self.release_error = Some(code);
        self
    }

    fn failing_begin(mut self, code: i32) -> Self {
        self.begin_error = Some(code);
        self
    }
}

struct ScriptedSearch {
    remaining: VecDeque<Step>,
    release_error: Option<i32>,
    calls: Rc<Calls>,
}

impl FindFiles for ScriptedFinder {
    type Search = ScriptedSearch;

    fn path_kind(&self, _path: &str) -> io::Result<PathKind> {
        bump(&self.calls.lookups);
        self.path_kind.map_err(io::Error::from)
    }

    fn find_first(&self, _path: &str) -> io::Result<(ScriptedSearch, NativeEntry)> {
        bump(&self.calls.begins);
        if let Some(code) = self.begin_error {
            return Err(io::Error::from_raw_os_error(code));
        }
        let mut remaining: VecDeque<Step> = self.script.iter().cloned().collect();
        match remaining.pop_front() {
            Some(Step::Entry(first)) => Ok((
                ScriptedSearch {
                    remaining,
                    release_error: self.release_error,
                    calls: Rc::clone(&self.calls),
                },
                first,
            )),
            Some(Step::Fail(kind)) => Err(io::Error::from(kind)),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no matching files")),
        }
    }
}

impl NativeSearch for ScriptedSearch {
    fn find_next(&mut self) -> io::Result<Option<NativeEntry>> {
        bump(&self.calls.advances);
        match self.remaining.pop_front() {
            Some(Step::Entry(entry)) => Ok(Some(entry)),
            Some(Step::Fail(kind)) => Err(io::Error::from(kind)),
            None => Ok(None),
        }
    }

    fn close(self) -> io::Result<()> {
        bump(&self.calls.releases);
        match self.release_error {
            Some(code) => Err(io::Error::from_raw_os_error(code)),
            None => Ok(()),
        }
    }
}

fn wide(name: &str) -> NativeEntry {
    NativeEntry::new(NativeName::Wide(name.encode_utf16().collect()), EntryKind::File)
}

fn read_name<F: FindFiles>(dir: &mut Dir<F>) -> Option<String> {
    dir.read().map(|entry| entry.name().to_owned())
}

#[test]
fn two_entry_directory_is_listed_in_native_order() {
    let finder = ScriptedFinder::directory(&["a.txt", "b.bin"]);
    let calls = Rc::clone(&finder.calls);

    let mut dir = Dir::open_with(&finder, "d").expect("open");
    assert_eq!(calls.begins.get(), 1);
    assert_eq!(read_name(&mut dir).as_deref(), Some("a.txt"));
    assert_eq!(read_name(&mut dir).as_deref(), Some("b.bin"));
    assert_eq!(read_name(&mut dir), None);
    dir.close().expect("close");

    assert_eq!(calls.lookups.get(), 1);
    assert_eq!(calls.releases.get(), 1);
}

#[test]
fn first_lookup_happens_while_opening() {
    let finder = ScriptedFinder::directory(&["only"]);
    let calls = Rc::clone(&finder.calls);

    let dir = Dir::open_with(&finder, "d").expect("open");
    assert_eq!(calls.begins.get(), 1);
    assert_eq!(calls.advances.get(), 0);
    assert_eq!(dir.state(), DirState::Live);
    dir.close().expect("close");
    assert_eq!(calls.releases.get(), 1);
}

#[test]
fn search_is_released_when_last_entry_is_fetched() {
    let finder = ScriptedFinder::directory(&["a.txt", "b.bin"]);
    let calls = Rc::clone(&finder.calls);

    let mut dir = Dir::open_with(&finder, "d").expect("open");
    read_name(&mut dir).expect("first");
    assert_eq!(calls.releases.get(), 0);
    read_name(&mut dir).expect("second");
    assert_eq!(calls.releases.get(), 1);
    assert_eq!(dir.state(), DirState::Exhausted);
    dir.close().expect("close");
    assert_eq!(calls.releases.get(), 1);
}

#[test]
fn exhausted_handle_never_calls_the_native_layer() {
    let finder = ScriptedFinder::directory(&["x"]);
    let calls = Rc::clone(&finder.calls);

    let mut dir = Dir::open_with(&finder, "d").expect("open");
    read_name(&mut dir).expect("entry");
    let advances = calls.advances.get();

    set_last_error(ErrorCode::OutOfMemory);
    for _ in 0..3 {
        assert!(dir.read().is_none());
    }
    assert_eq!(calls.advances.get(), advances);
    assert_eq!(last_error(), Some(ErrorCode::OutOfMemory));
}

#[test]
fn entry_count_matches_native_matches() {
    let names: Vec<String> = (0..17).map(|index| format!("f{index:02}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let finder = ScriptedFinder::directory(&refs);

    let listed: Vec<String> = Dir::open_with(&finder, "d")
        .expect("open")
        .into_entries()
        .map(Entry::into_name)
        .collect();
    assert_eq!(listed, names);
}

#[test]
fn dropping_a_live_handle_releases_once() {
    let finder = ScriptedFinder::directory(&["a", "b", "c"]);
    let calls = Rc::clone(&finder.calls);
    {
        let mut dir = Dir::open_with(&finder, "d").expect("open");
        read_name(&mut dir).expect("entry");
    }
    assert_eq!(calls.releases.get(), 1);
}

#[test]
fn dropping_an_exhausted_handle_does_not_release_again() {
    let finder = ScriptedFinder::directory(&["a"]);
    let calls = Rc::clone(&finder.calls);
    {
        let mut dir = Dir::open_with(&finder, "d").expect("open");
        read_name(&mut dir).expect("entry");
    }
    assert_eq!(calls.releases.get(), 1);
}

#[test]
fn missing_path_reports_not_found_without_beginning() {
    let finder =
        ScriptedFinder::directory(&["a"]).with_path_kind(Err(io::ErrorKind::NotFound));
    let calls = Rc::clone(&finder.calls);
    clear_last_error();

    let error = Dir::open_with(&finder, "nope").expect_err("missing");
    assert!(matches!(error, DirError::NotFound { .. }));
    assert_eq!(error.path(), Some("nope"));
    assert_eq!(last_error(), Some(ErrorCode::NotFound));
    assert_eq!(calls.begins.get(), 0);
}

#[test]
fn file_path_reports_not_a_directory() {
    let finder = ScriptedFinder::directory(&["a"]).with_path_kind(Ok(PathKind::NotDirectory));
    let calls = Rc::clone(&finder.calls);

    let error = Dir::open_with(&finder, "file.txt").expect_err("not a dir");
    assert!(matches!(error, DirError::NotADirectory { .. }));
    assert_eq!(last_error(), Some(ErrorCode::NotADirectory));
    assert_eq!(last_error().map(ErrorCode::raw), Some(ERROR_DIRECTORY));
    assert_eq!(calls.begins.get(), 0);
}

#[test]
fn unencodable_path_is_a_bad_argument() {
    let finder =
        ScriptedFinder::directory(&["a"]).with_path_kind(Err(io::ErrorKind::InvalidInput));

    let error = Dir::open_with(&finder, "a\0b").expect_err("bad path");
    assert_eq!(error.code(), ErrorCode::BadArguments);
    assert_eq!(last_error(), Some(ErrorCode::BadArguments));
}

#[test]
fn begin_failure_keeps_os_code_and_holds_nothing() {
    let finder =
        ScriptedFinder::directory(&["a"]).failing_begin(5);
    let calls = Rc::clone(&finder.calls);

    let error = Dir::open_with(&finder, "d").expect_err("begin fails");
    assert!(matches!(error, DirError::Enumeration { .. }));
    assert_eq!(last_error(), Some(ErrorCode::Enumeration(Some(5))));
    assert_eq!(calls.releases.get(), 0);
}

#[test]
fn search_without_matches_fails_to_open() {
    let finder = ScriptedFinder::directory(&[]);

    let error = Dir::open_with(&finder, "d").expect_err("no first match");
    assert!(matches!(error, DirError::Enumeration { .. }));
    assert_eq!(last_error(), Some(ErrorCode::Enumeration(None)));
}

#[test]
fn advance_failure_ends_enumeration_after_the_fetched_entry() {
    let finder = ScriptedFinder::directory(&["a", "b"])
        .with_step(Step::Fail(io::ErrorKind::PermissionDenied))
        .with_step(Step::Entry(wide("never")));
    let calls = Rc::clone(&finder.calls);
    clear_last_error();

    let mut dir = Dir::open_with(&finder, "d").expect("open");
    assert_eq!(read_name(&mut dir).as_deref(), Some("a"));
    assert_eq!(read_name(&mut dir).as_deref(), Some("b"));
    assert_eq!(calls.releases.get(), 1);
    assert_eq!(read_name(&mut dir), None);
    assert_eq!(last_error(), None);
    dir.close().expect("close");
    assert_eq!(calls.releases.get(), 1);
}

#[test]
fn release_failure_is_reported_by_close() {
    let finder = ScriptedFinder::directory(&["a", "b"]).failing_release(6);
    let calls = Rc::clone(&finder.calls);

    let dir = Dir::open_with(&finder, "d").expect("open");
    let error = dir.close().expect_err("release fails");
    assert!(matches!(error, DirError::Release { .. }));
    assert_eq!(error.path(), Some("d"));
    assert_eq!(last_error(), Some(ErrorCode::Enumeration(Some(6))));
    assert_eq!(calls.releases.get(), 1);
}

#[test]
fn release_failure_on_exhaustion_is_not_surfaced() {
    let finder = ScriptedFinder::directory(&["a"]).failing_release(6);
    clear_last_error();

    let mut dir = Dir::open_with(&finder, "d").expect("open");
    assert_eq!(read_name(&mut dir).as_deref(), Some("a"));
    assert!(dir.read().is_none());
    assert_eq!(last_error(), None);
    dir.close().expect("already released");
}

#[test]
fn names_are_transcoded_from_native_encoding() {
    let finder = ScriptedFinder::directory(&["caf\u{e9}.txt"])
        .with_step(Step::Entry(NativeEntry::new(
            NativeName::Wide(vec![u16::from(b'a'), 0xDC00]),
            EntryKind::Other,
        )))
        .with_step(Step::Entry(NativeEntry::new(
            NativeName::Bytes(b"sub".to_vec()),
            EntryKind::Directory,
        )));

    let entries: Vec<Entry> = Dir::open_with(&finder, "d")
        .expect("open")
        .into_entries()
        .collect();
    assert_eq!(entries[0].name(), "caf\u{e9}.txt");
    assert_eq!(entries[1].name(), "a\u{fffd}");
    assert_eq!(entries[1].kind(), EntryKind::Other);
    assert_eq!(entries[2].name(), "sub");
    assert_eq!(entries[2].kind(), EntryKind::Directory);
}

#[test]
fn overlong_name_is_truncated_and_terminated() {
    let long = "n".repeat(400);
    let finder = ScriptedFinder::directory(&[long.as_str()]);

    let mut dir = Dir::open_with(&finder, "d").expect("open");
    let entry = dir.read().expect("entry");
    assert!(entry.is_truncated());
    assert!(entry.name_bytes().len() <= NAME_CAPACITY - 1);
    assert!(long.starts_with(entry.name()));
    assert_eq!(entry.name_bytes_with_nul().last(), Some(&0));
}

#[test]
fn into_entries_close_reports_release() {
    let finder = ScriptedFinder::directory(&["a", "b"]);
    let calls = Rc::clone(&finder.calls);

    let mut entries = Dir::open_with(&finder, "d").expect("open").into_entries();
    assert_eq!(entries.next().map(Entry::into_name).as_deref(), Some("a"));
    entries.close().expect("close");
    assert_eq!(calls.releases.get(), 1);
}

#[test]
fn debug_output_names_path_and_state() {
    let finder = ScriptedFinder::directory(&["a"]);
    let dir = Dir::open_with(&finder, "some/dir").expect("open");
    let rendered = format!("{dir:?}");
    assert!(rendered.contains("some/dir"), "{rendered}");
    assert!(rendered.contains("Live"), "{rendered}");
}

mod posix_facade {
    use super::*;
    use crate::posix::{closedir, opendir, opendir_with, readdir};

    #[test]
    fn absent_path_is_rejected_before_the_native_layer() {
        let finder = ScriptedFinder::directory(&["a"]);
        let calls = Rc::clone(&finder.calls);
        clear_last_error();

        assert!(opendir_with(&finder, None).is_none());
        assert_eq!(last_error(), Some(ErrorCode::BadArguments));
        assert_eq!(calls.lookups.get(), 0);

        clear_last_error();
        assert!(opendir(None).is_none());
        assert_eq!(last_error(), Some(ErrorCode::BadArguments));
    }

    #[test]
    fn absent_handle_differs_from_end_of_directory() {
        let finder = ScriptedFinder::directory(&["a"]);
        let mut dir = opendir_with(&finder, Some("d")).expect("open");

        clear_last_error();
        assert!(readdir(Some(&mut dir)).is_some());
        assert!(readdir(Some(&mut dir)).is_none());
        assert_eq!(last_error(), None);

        assert!(readdir::<ScriptedFinder>(None).is_none());
        assert_eq!(last_error(), Some(ErrorCode::BadArguments));
        closedir(Some(dir)).expect("close");
    }

    #[test]
    fn closing_nothing_is_a_bad_argument() {
        clear_last_error();
        let error = closedir::<ScriptedFinder>(None).expect_err("absent handle");
        assert_eq!(error.code(), ErrorCode::BadArguments);
        assert_eq!(last_error(), Some(ErrorCode::BadArguments));
    }

    #[test]
    fn open_failure_returns_none_with_code() {
        let finder =
            ScriptedFinder::directory(&["a"]).with_path_kind(Err(io::ErrorKind::NotFound));
        assert!(opendir_with(&finder, Some("gone")).is_none());
        assert_eq!(last_error().map(ErrorCode::raw), Some(ERROR_FILE_NOT_FOUND));
    }
}
