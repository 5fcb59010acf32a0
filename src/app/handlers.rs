//! Input action handler methods for sift.
//!
//! This module implements [AppState] methods that process navigation, filter, view and system
//! actions, and the keys typed in the prompt modes.

use crate::app::actions::Mode;
use crate::app::keymap::{FilterAction, NavAction, SystemAction, ViewAction};
use crate::app::nav::GoIn;
use crate::app::state::{AppState, KeypressResult};
use crate::core::error::BrowseError;
use crate::core::proc::{SpawnRequest, program_from_env};

use crossterm::event::{KeyCode::*, KeyEvent, KeyModifiers};
use std::path::PathBuf;

impl<'a> AppState<'a> {
    // Prompt modes

    /// Handles key events while a prompt or incremental filter is active.
    ///
    /// Enter submits the line, Esc cancels. In the prompts a cancel counts as an empty
    /// submission, while incremental typing restores the filter that was active before it began.
    pub(super) fn handle_input_mode(&mut self, key: KeyEvent) -> KeypressResult {
        let typing = matches!(self.actions.mode(), Mode::TypingFilter { .. });

        match key.code {
            Enter => {
                let (mode, line) = self.actions.exit_mode();
                self.submit_prompt(mode, &line)
            }

            Esc => {
                let (mode, _) = self.actions.exit_mode();
                match mode {
                    Mode::TypingFilter { previous } => {
                        let result = self.nav.apply_filter(&previous);
                        self.report(result)
                    }
                    other => self.submit_prompt(other, ""),
                }
            }

            Left => {
                self.actions.action_move_cursor_left();
                KeypressResult::Continue
            }

            Right => {
                self.actions.action_move_cursor_right();
                KeypressResult::Continue
            }

            Home => {
                self.actions.action_cursor_home();
                KeypressResult::Continue
            }

            End => {
                self.actions.action_cursor_end();
                KeypressResult::Continue
            }

            Backspace => {
                self.actions.action_backspace_at_cursor();
                if typing {
                    self.type_filter_step()
                } else {
                    KeypressResult::Continue
                }
            }

            Delete => {
                self.actions.action_delete_at_cursor();
                if typing {
                    self.type_filter_step()
                } else {
                    KeypressResult::Continue
                }
            }

            Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.actions.action_insert_at_cursor(c);
                if typing {
                    self.type_filter_step()
                } else {
                    KeypressResult::Continue
                }
            }

            _ => KeypressResult::Continue,
        }
    }

    fn submit_prompt(&mut self, mode: Mode, line: &str) -> KeypressResult {
        let result = match mode {
            Mode::PromptingFilter | Mode::TypingFilter { .. } => self.nav.apply_filter(line),
            Mode::PromptingChdir => {
                let home = self.home.clone();
                self.nav.change_dir(line, home.as_deref())
            }
            Mode::Browsing => Ok(()),
        };
        self.report(result)
    }

    /// Applies the typed buffer after each keystroke. A pattern that does not compile yet leaves
    /// the committed filter alone without complaining, since the user is still typing it.
    fn type_filter_step(&mut self) -> KeypressResult {
        let buffer = self.actions.input_buffer().to_string();
        match self.nav.apply_filter(&buffer) {
            Err(BrowseError::InvalidFilter { .. }) => KeypressResult::Continue,
            result => self.report(result),
        }
    }

    // Browsing actions

    pub(super) fn handle_nav_action(&mut self, action: NavAction) -> KeypressResult {
        let rows = self.metrics.list_rows;
        match action {
            NavAction::MoveDown => {
                self.nav.move_down();
            }
            NavAction::MoveUp => {
                self.nav.move_up();
            }
            NavAction::PageDown => self.nav.page_down(rows),
            NavAction::PageUp => self.nav.page_up(rows),
            NavAction::GoToTop => self.nav.go_to_top(),
            NavAction::GoToBottom => self.nav.go_to_bottom(),

            NavAction::GoParent => {
                let result = self.nav.go_parent();
                return self.report(result);
            }
            NavAction::GoInto => return self.go_into(),
            NavAction::ChangeDir => self.actions.enter_mode(Mode::PromptingChdir),
            NavAction::GoHome => {
                let home = self.home.clone();
                let result = self.nav.go_home(home.as_deref());
                return self.report(result);
            }
        }
        KeypressResult::Continue
    }

    pub(super) fn handle_filter_action(&mut self, action: FilterAction) -> KeypressResult {
        match action {
            FilterAction::Prompt => {
                self.actions.enter_mode(Mode::PromptingFilter);
                KeypressResult::Continue
            }
            FilterAction::Type => {
                let previous = self.nav.filter().to_string();
                self.actions.enter_mode(Mode::TypingFilter { previous });
                KeypressResult::Continue
            }
            FilterAction::ToggleDotfiles => {
                let result = self.nav.toggle_dotfiles();
                self.report(result)
            }
        }
    }

    pub(super) fn handle_view_action(&mut self, action: ViewAction) -> KeypressResult {
        let result = match action {
            ViewAction::ToggleSort => self.nav.toggle_sort(),
            ViewAction::Refresh => self.nav.refresh(),
        };
        self.report(result)
    }

    pub(super) fn handle_sys_action(&mut self, action: SystemAction) -> KeypressResult {
        match action {
            SystemAction::Quit => KeypressResult::Quit,
            SystemAction::Run(idx) => self.run_binding(idx),
        }
    }

    // Helpers

    fn go_into(&mut self) -> KeypressResult {
        match self.nav.go_in() {
            Ok(GoIn::Entered | GoIn::Nothing) => KeypressResult::Continue,
            Ok(GoIn::Open(path)) => self.open_file(path),
            Ok(GoIn::Unsupported) => {
                self.set_status("Unsupported file");
                KeypressResult::Continue
            }
            Err(err) => self.report(Err(err)),
        }
    }

    fn open_file(&mut self, path: PathBuf) -> KeypressResult {
        match self.associations.resolve_program(&path) {
            Some(program) => KeypressResult::Spawn(
                SpawnRequest::new(program)
                    .with_arg(path)
                    .in_dir(self.nav.current_dir()),
            ),
            None => {
                self.set_status("No association");
                KeypressResult::Continue
            }
        }
    }

    fn run_binding(&mut self, idx: usize) -> KeypressResult {
        let config = self.config;
        let Some(binding) = config.keys().run().get(idx) else {
            return KeypressResult::Continue;
        };

        let program = program_from_env(binding.env(), binding.program());
        let mut req = SpawnRequest::new(program)
            .with_args(binding.args())
            .in_dir(self.nav.current_dir());

        if binding.with_name() {
            match self.nav.selected_entry() {
                Some(entry) => req = req.with_arg(entry.name()),
                None => return KeypressResult::Continue,
            }
        }
        KeypressResult::Spawn(req)
    }
}
