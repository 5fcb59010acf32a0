//! Application State and main controller module for sift.
//!
//! This module defines the overall [AppState] struct, which holds all major application
//! information and passes it to relevant UI/Terminal functions
//! - Configuration, keymap and compiled file associations
//! - Navigation state with the current listing
//! - Action context for the prompt modes
//! - Current layout metrics
//! - Status line message and the idle counter
//!
//! This is the primary context/state object passed to most UI/Terminal event logic.

use crate::app::actions::ActionContext;
use crate::app::keymap::{Action, Keymap};
use crate::app::nav::NavState;
use crate::config::Config;
use crate::core::error::BrowseError;
use crate::core::fm::SortOrder;
use crate::core::proc::{Associations, SpawnRequest};
use crate::utils::get_home;

use crossterm::event::KeyEvent;

use std::path::{Path, PathBuf};

/// Enumeration for each individual keypress result processed.
#[derive(Debug)]
pub enum KeypressResult {
    Continue,
    Quit,
    /// Hand the terminal to a child process, then redraw.
    Spawn(SpawnRequest),
    /// An error the browser cannot recover from. The loop ends with it.
    Fatal(BrowseError),
}

/// Metrics of the layout, updated by the renderer on every frame.
#[derive(Debug, Clone, Copy)]
pub struct LayoutMetrics {
    pub list_rows: usize,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self { list_rows: 20 }
    }
}

/// Main struct which holds the central Application state of sift
///
/// AppState owns the navigation state exclusively, everything that reads the listing goes
/// through it. Functions are provided for the event loop: key handling, idle ticks and the
/// layout update from the renderer.
pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,
    pub(super) associations: Associations,

    pub(super) metrics: LayoutMetrics,

    pub(super) nav: NavState,
    pub(super) actions: ActionContext,

    pub(super) status: Option<String>,
    pub(super) idle_ticks: u32,
    pub(super) home: Option<PathBuf>,
}

impl<'a> AppState<'a> {
    /// Builds the state for `initial_path`. `is_root` selects the root default filter.
    ///
    /// # Errors
    /// The initial directory cannot be listed.
    pub fn new(
        config: &'a Config,
        initial_path: &Path,
        is_root: bool,
    ) -> Result<Self, BrowseError> {
        let general = config.general();
        let nav = NavState::new(
            initial_path.to_path_buf(),
            general.default_filter(is_root),
            SortOrder::from_flag(general.sort_by_time()),
        )?;

        Ok(Self {
            config,
            keymap: Keymap::from_config(config),
            associations: Associations::compile(config.assoc()),
            metrics: LayoutMetrics::default(),
            nav,
            actions: ActionContext::default(),
            status: None,
            idle_ticks: 0,
            home: get_home(),
        })
    }

    /// Overrides the home directory used by jump-home, `~` in chdir and the header.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    // Getters/ accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn actions(&self) -> &ActionContext {
        &self.actions
    }

    #[inline]
    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    #[inline]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[inline]
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    pub fn update_layout_metrics(&mut self, metrics: LayoutMetrics) {
        self.metrics = metrics;
    }

    /// One poll timeout without input.
    ///
    /// Only counts while browsing. Returns the idle command once the configured number of ticks
    /// has passed, and starts counting again.
    pub fn idle_tick(&mut self) -> Option<SpawnRequest> {
        let general = self.config.general();
        if general.idle_timeout() == 0 || self.actions.is_input_mode() {
            return None;
        }

        self.idle_ticks += 1;
        if self.idle_ticks < general.idle_timeout() {
            return None;
        }
        self.idle_ticks = 0;

        if general.idle_cmd().is_empty() {
            return None;
        }
        tracing::debug!(cmd = general.idle_cmd(), "idle timeout reached");
        Some(SpawnRequest::new(general.idle_cmd()).in_dir(self.nav.current_dir()))
    }

    /// Central key handler
    ///
    /// Prompt modes get the key first. While browsing, the key is looked up in the keymap and the
    /// status message of the previous action is cleared.
    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        self.idle_ticks = 0;

        if self.actions.is_input_mode() {
            return self.handle_input_mode(key);
        }

        self.status = None;
        match self.keymap.lookup(key) {
            Some(Action::Nav(nav_act)) => self.handle_nav_action(nav_act),
            Some(Action::Filter(filter_act)) => self.handle_filter_action(filter_act),
            Some(Action::View(view_act)) => self.handle_view_action(view_act),
            Some(Action::System(sys_act)) => self.handle_sys_action(sys_act),
            None => KeypressResult::Continue,
        }
    }

    /// Turns the result of a transition into a keypress result.
    ///
    /// Recoverable errors become the status message, fatal ones end the loop.
    pub(super) fn report(&mut self, result: Result<(), BrowseError>) -> KeypressResult {
        match result {
            Ok(()) => KeypressResult::Continue,
            Err(err) if err.is_fatal() => {
                tracing::error!(%err, "fatal browse error");
                KeypressResult::Fatal(err)
            }
            Err(err) => {
                tracing::warn!(%err, "browse action failed");
                self.status = Some(err.status_message());
                KeypressResult::Continue
            }
        }
    }

    pub(super) fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }
}
