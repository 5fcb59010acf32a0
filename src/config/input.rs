//! Input configuration options for sift
//!
//! This module defines the `[keys]` table of sift.toml: one list of key strings per browsing
//! action, plus the `[[keys.run]]` bindings that launch external programs.

use serde::Deserialize;

/// Key lists of all built-in actions.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Keys {
    quit: Vec<String>,
    go_parent: Vec<String>,
    go_into: Vec<String>,
    filter: Vec<String>,
    type_filter: Vec<String>,
    move_down: Vec<String>,
    move_up: Vec<String>,
    page_down: Vec<String>,
    page_up: Vec<String>,
    go_to_top: Vec<String>,
    go_to_bottom: Vec<String>,
    change_dir: Vec<String>,
    go_home: Vec<String>,
    toggle_sort: Vec<String>,
    refresh: Vec<String>,
    toggle_dotfiles: Vec<String>,
    run: Vec<RunBinding>,
}

/// A key binding that runs an external program in the foreground.
///
/// The program runs in the current directory. `env` names a variable that replaces `program`
/// when it is set and not empty, and `with_name` appends the selected entry's name after `args`.
#[derive(Deserialize, Debug, Clone)]
pub struct RunBinding {
    keys: Vec<String>,
    program: String,
    #[serde(default)]
    env: Option<String>,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    with_name: bool,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    quit,
    go_parent,
    go_into,
    filter,
    type_filter,
    move_down,
    move_up,
    page_down,
    page_up,
    go_to_top,
    go_to_bottom,
    change_dir,
    go_home,
    toggle_sort,
    refresh,
    toggle_dotfiles,
);

impl Keys {
    #[inline]
    pub fn run(&self) -> &[RunBinding] {
        &self.run
    }
}

impl Default for Keys {
    fn default() -> Self {
        Keys {
            quit: vec!["q".into()],
            go_parent: vec!["h".into(), "Backspace".into(), "Left".into()],
            go_into: vec!["Enter".into(), "Right".into(), "l".into()],
            filter: vec!["/".into()],
            type_filter: vec!["&".into()],
            move_down: vec!["j".into(), "Down".into()],
            move_up: vec!["k".into(), "Up".into()],
            page_down: vec!["PageDown".into(), "Ctrl+d".into()],
            page_up: vec!["PageUp".into(), "Ctrl+u".into()],
            go_to_top: vec!["g".into(), "Home".into(), "Ctrl+a".into()],
            go_to_bottom: vec!["G".into(), "End".into(), "Ctrl+e".into()],
            change_dir: vec!["c".into()],
            go_home: vec!["~".into()],
            toggle_sort: vec!["t".into()],
            refresh: vec!["Ctrl+l".into()],
            toggle_dotfiles: vec![".".into()],
            run: vec![
                RunBinding::new(&["!"], "sh", Some("SHELL"), false),
                RunBinding::new(&["z"], "top", None, false),
                RunBinding::new(&["e"], "vi", Some("EDITOR"), true),
                RunBinding::new(&["p"], "less", Some("PAGER"), true),
            ],
        }
    }
}

impl RunBinding {
    pub fn new(keys: &[&str], program: &str, env: Option<&str>, with_name: bool) -> Self {
        RunBinding {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            program: program.to_string(),
            env: env.map(str::to_string),
            args: Vec::new(),
            with_name,
        }
    }

    #[inline]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    #[inline]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[inline]
    pub fn env(&self) -> Option<&str> {
        self.env.as_deref().filter(|v| !v.is_empty())
    }

    #[inline]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[inline]
    pub fn with_name(&self) -> bool {
        self.with_name
    }
}
