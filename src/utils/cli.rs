//! Command-line argument parsing and help for sift.
//!
//! When invoked with no args (`sift`), sift browses the current directory.

use crate::config::Config;

#[derive(Debug, PartialEq)]
pub enum CliAction {
    RunApp,
    RunAppAtPath(String),
    /// Done, exit with status 0.
    Exit,
    /// Bad invocation, exit with status 1.
    Usage,
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(&args)
}

pub(crate) fn parse_args(args: &[String]) -> CliAction {
    let arg = match args {
        [] => return CliAction::RunApp,
        [arg] => arg.as_str(),
        _ => {
            eprintln!("usage: sift [dir]");
            return CliAction::Usage;
        }
    };

    match arg {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--keybinds" => {
            print_keybinds();
            CliAction::Exit
        }
        "--init" => match Config::generate_default(&Config::default_path()) {
            Ok(()) => CliAction::Exit,
            Err(e) => {
                eprintln!("Error: {}", e);
                CliAction::Usage
            }
        },
        arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
            CliAction::RunAppAtPath(arg.to_string())
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("usage: sift [dir]");
            CliAction::Usage
        }
    }
}

fn print_version() {
    println!("sift {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"sift - a small keyboard-driven directory browser

USAGE:
  sift [DIR]

DIR:
  Directory to open (defaults to current directory)

OPTIONS:
      --init              Generate the default configuration file
      --keybinds          Display the default keybinds
  -h, --help              Print help information
  -v, --version           Display the installed version of sift

ENVIRONMENT:
  SIFT_CONFIG             Override the default config path
  SIFT_LOG                Append debug logs to this file
  SHELL, EDITOR, PAGER    Programs used by the default run bindings
"#
    );
}

const KEYBINDS_TEXT: &str = r##"
=========================
 Key Bindings
=========================
[keys]
  quit                      ["q"]
  go_parent                 ["h", "Backspace", "Left"]
  go_into                   ["Enter", "Right", "l"]
  filter                    ["/"]           (prompt for a regex)
  type_filter               ["&"]           (filter while typing)
  move_down                 ["j", "Down"]
  move_up                   ["k", "Up"]
  page_down                 ["PageDown", "<c-d>"]
  page_up                   ["PageUp", "<c-u>"]
  go_to_top                 ["g", "Home", "<c-a>"]
  go_to_bottom              ["G", "End", "<c-e>"]
  change_dir                ["c"]
  go_home                   ["~"]
  toggle_sort               ["t"]           (name / newest first)
  refresh                   ["<c-l>"]
  toggle_dotfiles           ["."]

[[keys.run]]
  "!"                       $SHELL or sh
  "z"                       top
  "e"                       $EDITOR or vi, with the selected name
  "p"                       $PAGER or less, with the selected name

  Syntax Reference:
    Modifiers: <c-x> (Ctrl), <m-x>/<a-x> (Alt/Meta), <s-x> (Shift)
    Standard:  ctrl+x, alt+x, shift+x, meta+x
    Special:   "space", "back", "enter", "esc", "tab", "pageup", "pagedown", "home", "end"

  Prompts:
    Enter submits, Esc cancels, Left/Right/Home/End move the cursor.
    While typing a filter Esc restores the previous filter.
"##;

fn print_keybinds() {
    println!("{}", KEYBINDS_TEXT);
}
