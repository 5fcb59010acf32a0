//! Miscellaneous utility functions for sift.
//!
//! - [cli]: command-line handling
//! - [helpers]: home directory lookup and path resolution

pub mod cli;
pub mod helpers;

pub use helpers::{expand_home_path, get_home, normalize, resolve_path, shorten_home_path};
