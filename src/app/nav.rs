//! Navigation state and file list logic for sift.
//!
//! Manages the current directory, the listing, selection, filter and sort order.
//!
//! Every transition goes through one re-population: the new path and filter are committed
//! together with the new listing, and only once that listing has been fully built. On failure
//! nothing changes and the error is returned to the caller.

use crate::core::error::BrowseError;
use crate::core::fm::{
    Entry, Listing, SortOrder, Target, can_open_dir, compile_filter, populate, resolve_target,
};
use crate::utils::{normalize, resolve_path};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Pattern of the dotfile toggle: matches every name.
const SHOW_ALL: &str = ".";

/// Outcome of [NavState::go_in].
#[derive(Debug, Clone, PartialEq)]
pub enum GoIn {
    /// The selection was a directory and is now the current one.
    Entered,
    /// The selection is a regular file (after following links) to be opened.
    Open(PathBuf),
    /// Neither a directory nor a regular file.
    Unsupported,
    /// Nothing is selected.
    Nothing,
}

/// Holds the navigation, selection and listing state of the browser.
#[derive(Debug)]
pub struct NavState {
    current_dir: PathBuf,
    listing: Listing,
    selected: usize,
    filter: String,
    default_filter: String,
    pending_restore: Option<PathBuf>,
    order: SortOrder,
    remembered: HashMap<PathBuf, PathBuf>,
}

impl NavState {
    /// Builds the state for `path` with the default filter applied.
    ///
    /// # Errors
    /// Fails the same way [populate] does, which is what the caller reports before exiting.
    pub fn new(path: PathBuf, default_filter: &str, order: SortOrder) -> Result<Self, BrowseError> {
        let listing = populate(&path, &compile_filter(default_filter)?, order)?;
        Ok(Self {
            current_dir: path,
            listing,
            selected: 0,
            filter: default_filter.to_string(),
            default_filter: default_filter.to_string(),
            pending_restore: None,
            order,
            remembered: HashMap::new(),
        })
    }

    // Getters / Accessors

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        self.listing.entries()
    }

    #[inline]
    pub fn selected_idx(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[inline]
    pub fn default_filter(&self) -> &str {
        &self.default_filter
    }

    #[inline]
    pub fn sort_order(&self) -> SortOrder {
        self.order
    }

    #[inline]
    pub fn total_size(&self) -> u64 {
        self.listing.total_size()
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.listing.get(self.selected)
    }

    pub fn selected_path(&self) -> Option<PathBuf> {
        self.selected_entry()
            .map(|e| self.current_dir.join(e.name()))
    }

    // Selection movement, clamped at both ends

    /// Returns `true` if the selection moved.
    pub fn move_down(&mut self) -> bool {
        if self.selected + 1 < self.listing.len() {
            self.selected += 1;
            true
        } else {
            false
        }
    }

    /// Returns `true` if the selection moved.
    pub fn move_up(&mut self) -> bool {
        if self.selected > 0 {
            self.selected -= 1;
            true
        } else {
            false
        }
    }

    /// Moves down by half of `rows`, the height of the list body.
    pub fn page_down(&mut self, rows: usize) {
        let last = self.listing.len().saturating_sub(1);
        self.selected = (self.selected + rows / 2).min(last);
    }

    pub fn page_up(&mut self, rows: usize) {
        self.selected = self.selected.saturating_sub(rows / 2);
    }

    pub fn go_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.selected = self.listing.len().saturating_sub(1);
    }

    // Transitions

    /// Acts on the selected entry, following symlinks: directories are entered, regular files are
    /// handed back to be opened.
    pub fn go_in(&mut self) -> Result<GoIn, BrowseError> {
        let Some(path) = self.selected_path() else {
            return Ok(GoIn::Nothing);
        };

        match resolve_target(&path)? {
            Target::Directory => {
                self.jump_to(path)?;
                Ok(GoIn::Entered)
            }
            Target::File => Ok(GoIn::Open(path)),
            Target::Unsupported => Ok(GoIn::Unsupported),
        }
    }

    /// Moves to the parent directory and selects the directory just left. No-op at the root.
    pub fn go_parent(&mut self) -> Result<(), BrowseError> {
        let Some(parent) = self.current_dir.parent().map(Path::to_path_buf) else {
            return Ok(());
        };
        can_open_dir(&parent)?;

        self.remember_selection();
        self.pending_restore = Some(self.current_dir.clone());
        self.reload(parent, self.default_filter.clone())
    }

    /// Changes to a typed directory, relative to the current one. Empty input changes nothing.
    pub fn change_dir(&mut self, input: &str, home: Option<&Path>) -> Result<(), BrowseError> {
        if input.trim().is_empty() {
            return Ok(());
        }
        let target = resolve_path(&self.current_dir, input, home);
        self.jump_to(target)
    }

    /// Changes to the home directory, normalized like a typed path. Without one nothing happens.
    pub fn go_home(&mut self, home: Option<&Path>) -> Result<(), BrowseError> {
        match home {
            Some(home) => self.jump_to(normalize(&self.current_dir.join(home))),
            None => Ok(()),
        }
    }

    /// Replaces the filter and keeps the selected entry selected if it still matches. An empty
    /// pattern resets to the default filter.
    pub fn apply_filter(&mut self, pattern: &str) -> Result<(), BrowseError> {
        let filter = if pattern.is_empty() {
            self.default_filter.clone()
        } else {
            pattern.to_string()
        };
        self.pending_restore = self.selected_path();
        self.reload(self.current_dir.clone(), filter)
    }

    /// Switches between the default filter and showing everything.
    pub fn toggle_dotfiles(&mut self) -> Result<(), BrowseError> {
        let filter = if self.filter != self.default_filter {
            self.default_filter.clone()
        } else {
            SHOW_ALL.to_string()
        };
        self.reload(self.current_dir.clone(), filter)
    }

    /// Flips between name and time order. The flip is undone if the directory cannot be re-read.
    pub fn toggle_sort(&mut self) -> Result<(), BrowseError> {
        self.order = self.order.toggled();
        self.pending_restore = self.selected_path();
        let result = self.reload(self.current_dir.clone(), self.filter.clone());
        if result.is_err() {
            self.order = self.order.toggled();
        }
        result
    }

    /// Re-reads the current directory, keeping the selection on the same entry if present.
    pub fn refresh(&mut self) -> Result<(), BrowseError> {
        self.pending_restore = self.selected_path();
        self.reload(self.current_dir.clone(), self.filter.clone())
    }

    // Internals

    /// Enters `dir` with the default filter, restoring the child last selected there.
    fn jump_to(&mut self, dir: PathBuf) -> Result<(), BrowseError> {
        can_open_dir(&dir)?;

        self.remember_selection();
        self.pending_restore = self.remembered.get(&dir).cloned();
        self.reload(dir, self.default_filter.clone())
    }

    fn remember_selection(&mut self) {
        if let Some(path) = self.selected_path() {
            self.remembered.insert(self.current_dir.clone(), path);
        }
    }

    /// Re-population: consumes `pending_restore`, builds the new listing and commits path,
    /// filter, listing and selection in one step.
    fn reload(&mut self, dir: PathBuf, filter: String) -> Result<(), BrowseError> {
        let restore = self.pending_restore.take();

        let listing = populate(&dir, &compile_filter(&filter)?, self.order)?;

        self.selected = restore
            .as_deref()
            .and_then(|target| listing.position_of(&dir, target))
            .unwrap_or(0);
        self.listing = listing;

        if dir != self.current_dir {
            tracing::debug!(
                from = %self.current_dir.display(),
                to = %dir.display(),
                "changed directory"
            );
        }
        self.current_dir = dir;
        self.filter = filter;
        Ok(())
    }
}
