//! Directory listing logic for sift.
//!
//! Provides the [Entry] snapshot of a single directory child, the sorted and filtered [Listing]
//! built from a whole directory, and [populate], the function that builds it.
//!
//! A listing is always built completely before it is handed out, so callers can swap it in with a
//! single assignment and never expose a half-read directory to the renderer.

use crate::core::error::BrowseError;

use regex::{Regex, RegexBuilder};

use std::borrow::Cow;
use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::fs::{self, Metadata};
use std::path::Path;
use std::time::SystemTime;

/// Type of a directory entry, derived from the mode bits of a non-following stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Regular,
    Directory,
    Symlink,
    Socket,
    Fifo,
    Executable,
    Other,
}

impl EntryKind {
    /// Owner execute bit (S_IXUSR). Marks a regular file as [EntryKind::Executable].
    #[cfg(unix)]
    const EXEC_FLAG: u32 = 0o100;

    pub fn from_metadata(md: &Metadata) -> Self {
        let ft = md.file_type();
        if ft.is_dir() {
            EntryKind::Directory
        } else if ft.is_symlink() {
            EntryKind::Symlink
        } else if ft.is_file() {
            if Self::is_executable(md) {
                EntryKind::Executable
            } else {
                EntryKind::Regular
            }
        } else {
            Self::special(&ft).unwrap_or(EntryKind::Other)
        }
    }

    /// Regular files, executable or not. Only these carry a meaningful size.
    #[inline]
    pub fn is_regular_like(self) -> bool {
        matches!(self, EntryKind::Regular | EntryKind::Executable)
    }

    #[cfg(unix)]
    fn is_executable(md: &Metadata) -> bool {
        use std::os::unix::fs::PermissionsExt;
        md.permissions().mode() & Self::EXEC_FLAG != 0
    }

    #[cfg(not(unix))]
    fn is_executable(_md: &Metadata) -> bool {
        false
    }

    #[cfg(unix)]
    fn special(ft: &fs::FileType) -> Option<Self> {
        use std::os::unix::fs::FileTypeExt;
        if ft.is_socket() {
            Some(EntryKind::Socket)
        } else if ft.is_fifo() {
            Some(EntryKind::Fifo)
        } else {
            None
        }
    }

    #[cfg(not(unix))]
    fn special(_ft: &fs::FileType) -> Option<Self> {
        None
    }
}

/// Snapshot of one directory child.
///
/// Created in bulk by [populate] and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Entry {
    name: Box<OsStr>,
    kind: EntryKind,
    modified: SystemTime,
    size: u64,
}

impl Entry {
    pub fn new(name: OsString, kind: EntryKind, modified: SystemTime, size: u64) -> Self {
        Entry {
            name: name.into_boxed_os_str(),
            kind,
            modified,
            size,
        }
    }

    fn from_metadata(name: OsString, md: &Metadata) -> Self {
        Entry::new(
            name,
            EntryKind::from_metadata(md),
            md.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            md.len(),
        )
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[inline]
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Active sort key of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Byte-wise name order, ascending.
    #[default]
    Name,
    /// Newest modification time first. Equal times fall back to name order.
    ModifiedDesc,
}

impl SortOrder {
    pub fn from_flag(by_time: bool) -> Self {
        if by_time {
            SortOrder::ModifiedDesc
        } else {
            SortOrder::Name
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Name => SortOrder::ModifiedDesc,
            SortOrder::ModifiedDesc => SortOrder::Name,
        }
    }

    #[inline]
    pub fn is_by_time(self) -> bool {
        self == SortOrder::ModifiedDesc
    }

    fn compare(self, a: &Entry, b: &Entry) -> Ordering {
        let by_name = || a.name.as_encoded_bytes().cmp(b.name.as_encoded_bytes());
        match self {
            SortOrder::Name => by_name(),
            SortOrder::ModifiedDesc => b.modified.cmp(&a.modified).then_with(by_name),
        }
    }
}

/// A fully built, filtered and sorted directory listing.
#[derive(Debug, Default)]
pub struct Listing {
    entries: Vec<Entry>,
    total_size: u64,
}

impl Listing {
    /// Sorts the given entries and sums up the sizes of the regular files among them.
    pub fn from_entries(mut entries: Vec<Entry>, order: SortOrder) -> Self {
        entries.sort_by(|a, b| order.compare(a, b));
        let total_size = entries
            .iter()
            .filter(|e| e.kind.is_regular_like())
            .map(|e| e.size)
            .sum();
        Listing {
            entries,
            total_size,
        }
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Entry> {
        self.entries.get(idx)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Index of the entry whose full path, as a child of `dir`, equals `target`.
    pub fn position_of(&self, dir: &Path, target: &Path) -> Option<usize> {
        self.entries.iter().position(|e| dir.join(e.name()) == target)
    }
}

/// Compiles a filter pattern the way listings apply it: case-insensitive, matched anywhere
/// inside the raw entry name.
pub fn compile_filter(pattern: &str) -> Result<Regex, BrowseError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| BrowseError::InvalidFilter {
            pattern: pattern.to_string(),
            source,
        })
}

/// Checks that a directory can be opened for reading.
pub fn can_open_dir(path: &Path) -> Result<(), BrowseError> {
    fs::read_dir(path)
        .map(|_| ())
        .map_err(|e| BrowseError::unreadable(path, e))
}

/// What the "go in" action finds behind a path once symlinks are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Directory,
    File,
    Unsupported,
}

pub fn resolve_target(path: &Path) -> Result<Target, BrowseError> {
    let md = fs::metadata(path).map_err(|e| BrowseError::unreadable(path, e))?;
    Ok(if md.is_dir() {
        Target::Directory
    } else if md.is_file() {
        Target::File
    } else {
        Target::Unsupported
    })
}

/// Reads `path`, keeps the children whose name matches `filter` and returns them sorted by
/// `order`.
///
/// # Errors
/// * [BrowseError::DirectoryUnreadable] if the directory cannot be opened or read.
/// * [BrowseError::EntryStatUnavailable] if a matching child cannot be stat'ed. Callers treat
///   this one as fatal.
pub fn populate(path: &Path, filter: &Regex, order: SortOrder) -> Result<Listing, BrowseError> {
    let mut entries = Vec::with_capacity(256);

    // read_dir never yields `.` or `..`
    for dent in fs::read_dir(path).map_err(|e| BrowseError::unreadable(path, e))? {
        let dent = dent.map_err(|e| BrowseError::unreadable(path, e))?;
        let name = dent.file_name();

        if !filter.is_match(&name.to_string_lossy()) {
            continue;
        }

        let full = dent.path();
        let md = match fs::symlink_metadata(&full) {
            Ok(md) => md,
            Err(source) => {
                return Err(BrowseError::EntryStatUnavailable { path: full, source });
            }
        };
        entries.push(Entry::from_metadata(name, &md));
    }

    Ok(Listing::from_entries(entries, order))
}
