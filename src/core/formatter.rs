//! Formatting helpers for listing rows and the status line.
//!
//! - [entry_glyph]: one-character type suffix of an entry
//! - [format_entry_size]: human-readable size, only for regular files
//! - [format_mtime]: local modification time
//! - [sanitize_to_exact_width]: clamp a name to a column without wrapping

use crate::core::fm::{Entry, EntryKind};

use chrono::{DateTime, Local};
use humansize::{BINARY, format_size};
use unicode_width::UnicodeWidthChar;

use std::time::SystemTime;

/// Type glyph appended after an entry name. Regular files and unknown kinds have none.
pub fn entry_glyph(kind: EntryKind) -> Option<char> {
    match kind {
        EntryKind::Directory => Some('/'),
        EntryKind::Symlink => Some('@'),
        EntryKind::Socket => Some('='),
        EntryKind::Fifo => Some('|'),
        EntryKind::Executable => Some('*'),
        EntryKind::Regular | EntryKind::Other => None,
    }
}

/// Size column of an entry, empty for everything but regular and executable files.
pub fn format_entry_size(entry: &Entry) -> String {
    if entry.kind().is_regular_like() {
        format_size(entry.size(), BINARY)
    } else {
        String::new()
    }
}

pub fn format_total_size(total: u64) -> String {
    format_size(total, BINARY)
}

pub fn format_mtime(modified: SystemTime) -> String {
    let dt: DateTime<Local> = DateTime::from(modified);
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// Cleans `line` and fits it into exactly `width` columns.
///
/// Control characters are dropped, tabs expand to the next multiple of 4, wide characters that
/// would straddle the edge are cut, and short results are padded with spaces.
pub fn sanitize_to_exact_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;

    for ch in line.chars() {
        if ch == '\t' {
            let spaces = 4 - (used % 4);
            if used + spaces > width {
                break;
            }
            out.extend(std::iter::repeat_n(' ', spaces));
            used += spaces;
            continue;
        }

        if ch.is_control() {
            continue;
        }

        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }

    if used < width {
        out.extend(std::iter::repeat_n(' ', width - used));
    }
    out
}
