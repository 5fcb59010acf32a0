//! The general configuration settings for sift.
//!
//! [General] is deserialized from the `[general]` table of sift.toml and converted into
//! [InternalGeneral], which the rest of the application reads.

use serde::Deserialize;

pub(crate) const DEFAULT_USER_FILTER: &str = "^[^.]";
pub(crate) const DEFAULT_ROOT_FILTER: &str = ".";
pub(crate) const DEFAULT_IDLE_CMD: &str = "rain";
pub(crate) const DEFAULT_SELECTION_MARKER: &str = "> ";

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    filter: String,
    root_filter: String,
    sort_by_time: bool,
    idle_timeout: u32,
    idle_cmd: String,
    selection_marker: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            filter: DEFAULT_USER_FILTER.into(),
            root_filter: DEFAULT_ROOT_FILTER.into(),
            sort_by_time: false,
            idle_timeout: 0,
            idle_cmd: DEFAULT_IDLE_CMD.into(),
            selection_marker: DEFAULT_SELECTION_MARKER.into(),
        }
    }
}

#[derive(Debug)]
pub struct InternalGeneral {
    filter: String,
    root_filter: String,
    sort_by_time: bool,
    idle_timeout: u32,
    idle_cmd: String,
    selection_marker: String,
}

/// Blank filters fall back to the built-in ones, since an empty default would make "reset the
/// filter" a no-op.
impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        let or_default = |value: String, default: &str| {
            if value.trim().is_empty() {
                default.to_string()
            } else {
                value
            }
        };
        Self {
            filter: or_default(g.filter, DEFAULT_USER_FILTER),
            root_filter: or_default(g.root_filter, DEFAULT_ROOT_FILTER),
            sort_by_time: g.sort_by_time,
            idle_timeout: g.idle_timeout,
            idle_cmd: g.idle_cmd.trim().to_string(),
            selection_marker: g.selection_marker,
        }
    }
}

impl InternalGeneral {
    /// Filter applied on startup and on every reset: the root filter for uid 0, the user filter
    /// otherwise.
    #[inline]
    pub fn default_filter(&self, is_root: bool) -> &str {
        if is_root {
            &self.root_filter
        } else {
            &self.filter
        }
    }

    #[inline]
    pub fn sort_by_time(&self) -> bool {
        self.sort_by_time
    }

    /// Idle ticks before the idle command runs. Zero disables it.
    #[inline]
    pub fn idle_timeout(&self) -> u32 {
        self.idle_timeout
    }

    #[inline]
    pub fn idle_cmd(&self) -> &str {
        &self.idle_cmd
    }

    #[inline]
    pub fn selection_marker(&self) -> &str {
        &self.selection_marker
    }
}
