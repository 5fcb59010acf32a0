//! Key mapping and action dispatch system for sift
//!
//! Defines key to an action, parsing from the config, and enum variants for all navigation,
//! filter, view and system actions used by sift.

use crate::config::Config;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any action in the app: navigation, filter, view, or system.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Action {
    Nav(NavAction),
    Filter(FilterAction),
    View(ViewAction),
    System(SystemAction),
}

/// Selection movement and directory changes
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NavAction {
    MoveDown,
    MoveUp,
    PageDown,
    PageUp,
    GoToTop,
    GoToBottom,
    GoParent,
    GoInto,
    ChangeDir,
    GoHome,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FilterAction {
    Prompt,
    Type,
    ToggleDotfiles,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ViewAction {
    ToggleSort,
    Refresh,
}

/// System actions (quit, run). `Run` indexes the configured run bindings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SystemAction {
    Quit,
    Run(usize),
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Stores the mapping from Key to action, which is built in the config
pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the config
    #[rustfmt::skip]
    pub fn from_config(config: &Config) -> Self {
        let mut map = HashMap::new();
        let keys = config.keys();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut map);
            };
        }

        use NavAction as N;
        use FilterAction as F;
        use ViewAction as V;
        use SystemAction as S;

        // NavActions
        bind!(keys.move_down(),         Action::Nav(N::MoveDown));
        bind!(keys.move_up(),           Action::Nav(N::MoveUp));
        bind!(keys.page_down(),         Action::Nav(N::PageDown));
        bind!(keys.page_up(),           Action::Nav(N::PageUp));
        bind!(keys.go_to_top(),         Action::Nav(N::GoToTop));
        bind!(keys.go_to_bottom(),      Action::Nav(N::GoToBottom));
        bind!(keys.go_parent(),         Action::Nav(N::GoParent));
        bind!(keys.go_into(),           Action::Nav(N::GoInto));
        bind!(keys.change_dir(),        Action::Nav(N::ChangeDir));
        bind!(keys.go_home(),           Action::Nav(N::GoHome));

        // FilterActions
        bind!(keys.filter(),            Action::Filter(F::Prompt));
        bind!(keys.type_filter(),       Action::Filter(F::Type));
        bind!(keys.toggle_dotfiles(),   Action::Filter(F::ToggleDotfiles));

        // ViewActions
        bind!(keys.toggle_sort(),       Action::View(V::ToggleSort));
        bind!(keys.refresh(),           Action::View(V::Refresh));

        // SystemActions
        bind!(keys.quit(),              Action::System(S::Quit));
        for (idx, run) in keys.run().iter().enumerate() {
            bind!(run.keys(),           Action::System(S::Run(idx)));
        }

        Keymap { map }
    }

    /// Looks up the action for a given key event.
    ///
    /// A shifted character also matches the binding without the shift, since terminals report
    /// `G` or `~` with the modifier set.
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }
}

/// Parses a key string from the config: `j`, `G`, `Enter`, `PageDown`, `Ctrl+d`, `<c-l>`, `F1`.
pub(crate) fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    // single characters bind literally, including the separators themselves
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(Key {
            code: KeyCode::Char(c),
            modifiers,
        });
    }

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "delete" | "del" => code = Some(KeyCode::Delete),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),
            "pagedown" | "pgdn" => code = Some(KeyCode::PageDown),
            "pageup" | "pgup" => code = Some(KeyCode::PageUp),
            "home" => code = Some(KeyCode::Home),
            "end" => code = Some(KeyCode::End),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => tracing::warn!(key = %k, ?action, "ignoring unparsable key binding"),
        }
    }
}
