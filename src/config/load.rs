//! The main config loading module for sift.
//!
//! Handles loading and deserializing settings from `sift.toml`.
//!
//! Provides the main [Config] struct, the internal [RawConfig] used for parsing, and the default
//! config file written by `sift --init`.

use crate::config::assoc::{AssocRule, default_rules};
use crate::config::{General, InternalGeneral, Keys};
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};

/// Raw configuration as read from the toml file
/// This struct is deserialized directly from the toml file.
/// It uses owned types and is then converted into the main [Config] struct.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    keys: Keys,
    assoc: Vec<AssocRule>,
}

impl Default for RawConfig {
    fn default() -> Self {
        RawConfig {
            general: General::default(),
            keys: Keys::default(),
            assoc: default_rules(),
        }
    }
}

/// Main configuration struct for sift
#[derive(Debug)]
pub struct Config {
    general: InternalGeneral,
    keys: Keys,
    assoc: Vec<AssocRule>,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            keys: raw.keys,
            assoc: raw.assoc,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    /// A missing file means internal defaults. A file that fails to parse is reported on stderr
    /// and the defaults are used instead.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let raw = toml::from_str::<RawConfig>(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(raw.into())
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    #[inline]
    pub fn assoc(&self) -> &[AssocRule] {
        &self.assoc
    }

    /// Determine the default configuration file path.
    /// Checks the SIFT_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/sift/sift.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("SIFT_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("sift/sift.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/sift/sift.toml");
        }
        PathBuf::from("sift.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {}", path.display()),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {}", path.display());
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

const DEFAULT_TOML: &str = r##"# sift.toml - default configuration for sift
#
# Commented values are the internal defaults.
# Filters and association patterns are case-insensitive regular expressions.

[general]
# filter = "^[^.]"          # default filter, hides dotfiles
# root_filter = "."         # default filter when running as root
# sort_by_time = false
# idle_timeout = 0          # seconds of inactivity before idle_cmd runs, 0 disables
# idle_cmd = "rain"
# selection_marker = "> "

# [keys]
# quit = ["q"]
# go_parent = ["h", "Backspace", "Left"]
# go_into = ["Enter", "Right", "l"]
# filter = ["/"]
# type_filter = ["&"]
# move_down = ["j", "Down"]
# move_up = ["k", "Up"]
# page_down = ["PageDown", "Ctrl+d"]
# page_up = ["PageUp", "Ctrl+u"]
# go_to_top = ["g", "Home", "Ctrl+a"]
# go_to_bottom = ["G", "End", "Ctrl+e"]
# change_dir = ["c"]
# go_home = ["~"]
# toggle_sort = ["t"]
# refresh = ["Ctrl+l"]
# toggle_dotfiles = ["."]

# Run bindings replace the built-in list as a whole.
# `env` overrides `program` when set, `with_name` passes the selected name last.
#
# [[keys.run]]
# keys = ["!"]
# program = "sh"
# env = "SHELL"
#
# [[keys.run]]
# keys = ["z"]
# program = "top"
#
# [[keys.run]]
# keys = ["e"]
# program = "vi"
# env = "EDITOR"
# with_name = true
#
# [[keys.run]]
# keys = ["p"]
# program = "less"
# env = "PAGER"
# with_name = true

# File associations, first match wins. Defining any replaces the built-in list.
#
# [[assoc]]
# pattern = '\.(avi|mp4|mkv|mp3|ogg|flac|mov)$'
# program = "mpv"
#
# [[assoc]]
# pattern = '\.(png|jpg|gif)$'
# program = "sxiv"
#
# [[assoc]]
# pattern = '\.(html|svg)$'
# program = "firefox"
#
# [[assoc]]
# pattern = '\.pdf$'
# program = "mupdf"
#
# [[assoc]]
# pattern = '\.sh$'
# program = "sh"
#
# [[assoc]]
# pattern = "."
# program = "less"
"##;
