//! Action context and input mode logic for sift.
//!
//! Contains the [ActionContext] struct, tracking the current [Mode] and the line being edited in
//! the prompt modes.

/// Describes the current mode for input handling.
///
/// Every mode is entered from and returns to [Mode::Browsing].
///
/// Variants:
/// * `Browsing` - Default mode, keys go through the keymap.
/// * `PromptingFilter` - Reading a filter pattern, applied on Enter.
/// * `PromptingChdir` - Reading a directory, changed to on Enter.
/// * `TypingFilter` - Every keystroke re-applies the typed filter. `previous` is the filter that
///   was active before typing began and is restored on Esc.
#[derive(Clone, Debug, PartialEq)]
pub enum Mode {
    Browsing,
    PromptingFilter,
    PromptingChdir,
    TypingFilter { previous: String },
}

impl Mode {
    /// Prompt shown in the status line, None while browsing.
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            Mode::Browsing => None,
            Mode::PromptingFilter => Some("filter: "),
            Mode::PromptingChdir => Some("chdir: "),
            Mode::TypingFilter { .. } => Some("type: "),
        }
    }
}

/// Tracks the current mode and the input buffer of the prompts.
///
/// The cursor is a byte offset into the buffer and always sits on a char boundary.
#[derive(Debug)]
pub struct ActionContext {
    mode: Mode,
    input_buffer: String,
    input_cursor_pos: usize,
}

impl ActionContext {
    // Getters / Accessors

    #[inline]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    #[inline]
    pub fn is_input_mode(&self) -> bool {
        self.mode != Mode::Browsing
    }

    #[inline]
    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    #[inline]
    pub fn input_cursor_pos(&self) -> usize {
        self.input_cursor_pos
    }

    /// Switches to `mode` with an empty buffer.
    pub fn enter_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.input_buffer.clear();
        self.input_cursor_pos = 0;
    }

    /// Returns to browsing and hands back the mode that was left together with the typed line.
    pub fn exit_mode(&mut self) -> (Mode, String) {
        let mode = std::mem::replace(&mut self.mode, Mode::Browsing);
        self.input_cursor_pos = 0;
        (mode, std::mem::take(&mut self.input_buffer))
    }

    // Cursor actions

    /// Moves the input cursor one character to the left, if possible.
    pub fn action_move_cursor_left(&mut self) {
        if let Some((prev, _)) = self.input_buffer[..self.input_cursor_pos]
            .char_indices()
            .next_back()
        {
            self.input_cursor_pos = prev;
        }
    }

    /// Moves the input cursor one character to the right, if possible.
    pub fn action_move_cursor_right(&mut self) {
        if let Some(ch) = self.input_buffer[self.input_cursor_pos..].chars().next() {
            self.input_cursor_pos += ch.len_utf8();
        }
    }

    pub fn action_insert_at_cursor(&mut self, ch: char) {
        self.input_buffer.insert(self.input_cursor_pos, ch);
        self.input_cursor_pos += ch.len_utf8();
    }

    /// Deletes the character before the cursor and moves the cursor back.
    pub fn action_backspace_at_cursor(&mut self) {
        if let Some((previous, _)) = self.input_buffer[..self.input_cursor_pos]
            .char_indices()
            .next_back()
        {
            self.input_buffer.remove(previous);
            self.input_cursor_pos = previous;
        }
    }

    /// Deletes the character under the cursor.
    pub fn action_delete_at_cursor(&mut self) {
        if self.input_cursor_pos < self.input_buffer.len() {
            self.input_buffer.remove(self.input_cursor_pos);
        }
    }

    pub fn action_cursor_home(&mut self) {
        self.input_cursor_pos = 0;
    }

    pub fn action_cursor_end(&mut self) {
        self.input_cursor_pos = self.input_buffer.len();
    }
}

impl Default for ActionContext {
    fn default() -> Self {
        Self {
            mode: Mode::Browsing,
            input_buffer: String::new(),
            input_cursor_pos: 0,
        }
    }
}
