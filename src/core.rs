//! Core runtime logic for sift.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [fm]: directory listing, filtering and sorting (see [populate], [Entry], [Listing]).
//! - [window]: which slice of a listing fits on screen.
//! - [formatter]: glyphs, sizes, times and fixed-width names for display.
//! - [proc]: file associations and foreground child processes.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.
//! - [error]: the [BrowseError] taxonomy.

pub mod error;
pub mod fm;
pub mod formatter;
pub mod proc;
pub mod terminal;
pub mod window;

pub use error::BrowseError;
pub use fm::{Entry, EntryKind, Listing, SortOrder, compile_filter, populate};
pub use formatter::sanitize_to_exact_width;
pub use proc::{Associations, SpawnRequest};
pub use window::window;
