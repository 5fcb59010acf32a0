//! Input and rendering tests for sift
//!
//! These tests feed key events into [AppState] the way the terminal loop does, and render frames
//! into a ratatui test backend to check what the user would see.
//!
//! These tests create temporary directories, which are cleaned up after the tests complete.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use sift_tui::app::{AppState, KeypressResult, Mode};
use sift_tui::config::{Config, load::RawConfig};
use sift_tui::core::{self, BrowseError};
use sift_tui::ui;

use std::error;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::path::Path;
use tempfile::tempdir;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ch(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

fn type_str(app: &mut AppState, text: &str) {
    for c in text.chars() {
        app.handle_keypress(ch(c));
    }
}

fn config_from(toml: &str) -> Result<Config, Box<dyn error::Error>> {
    let raw: RawConfig = toml::from_str(toml)?;
    Ok(Config::from(raw))
}

fn names(app: &AppState) -> Vec<String> {
    app.nav()
        .entries()
        .iter()
        .map(|e| e.name_str().into_owned())
        .collect()
}

fn screen(
    app: &mut AppState,
    width: u16,
    height: u16,
) -> Result<Vec<String>, Box<dyn error::Error>> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|f| ui::render(f, app))?;

    let buffer = terminal.backend().buffer();
    let lines = (0..height)
        .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
        .collect();
    Ok(lines)
}

fn fixture(dir: &Path) -> Result<(), Box<dyn error::Error>> {
    for name in ["alpha.rs", "beta.txt", "gamma.rs", ".env"] {
        File::create(dir.join(name))?;
    }
    fs::create_dir(dir.join("docs"))?;
    Ok(())
}

#[test]
fn test_ui_sanitization_and_exact_width() {
    let cases = ["short.txt", "very_long_filename.txt", "🦀_crab.rs", "\t_tab"];

    for input in cases {
        let result = core::sanitize_to_exact_width(input, 10);
        let actual_width = unicode_width::UnicodeWidthStr::width(result.as_str());
        assert_eq!(actual_width, 10, "input {input:?} gave {result:?}");
        assert!(!result.chars().any(|c| c.is_control()));
    }
}

#[test]
fn test_incremental_filter_and_cancel() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fixture(dir.path())?;
    let config = Config::default();
    let mut app = AppState::new(&config, dir.path(), false)?;
    assert_eq!(names(&app), vec!["alpha.rs", "beta.txt", "docs", "gamma.rs"]);

    app.handle_keypress(KeyEvent::new(KeyCode::Char('&'), KeyModifiers::SHIFT));
    assert!(matches!(app.actions().mode(), Mode::TypingFilter { .. }));

    type_str(&mut app, r"\.rs");
    assert_eq!(names(&app), vec!["alpha.rs", "gamma.rs"]);

    // an unfinished pattern keeps the last good one
    app.handle_keypress(ch('('));
    assert_eq!(app.nav().filter(), r"\.rs");
    assert_eq!(app.status(), None);

    app.handle_keypress(key(KeyCode::Esc));
    assert_eq!(app.actions().mode(), &Mode::Browsing);
    assert_eq!(app.nav().filter(), "^[^.]");
    assert_eq!(names(&app).len(), 4);
    Ok(())
}

#[test]
fn test_incremental_filter_commits_on_enter() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fixture(dir.path())?;
    let config = Config::default();
    let mut app = AppState::new(&config, dir.path(), false)?;

    app.handle_keypress(ch('&'));
    type_str(&mut app, "TXT");
    app.handle_keypress(key(KeyCode::Enter));

    assert_eq!(app.actions().mode(), &Mode::Browsing);
    assert_eq!(app.nav().filter(), "TXT");
    assert_eq!(names(&app), vec!["beta.txt"]);

    // backspacing to nothing means the default filter
    app.handle_keypress(ch('&'));
    app.handle_keypress(ch('x'));
    app.handle_keypress(key(KeyCode::Backspace));
    app.handle_keypress(key(KeyCode::Enter));
    assert_eq!(app.nav().filter(), "^[^.]");
    Ok(())
}

#[test]
fn test_filter_prompt_rejects_invalid_pattern() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fixture(dir.path())?;
    let config = Config::default();
    let mut app = AppState::new(&config, dir.path(), false)?;

    app.handle_keypress(ch('/'));
    assert_eq!(app.actions().mode(), &Mode::PromptingFilter);
    type_str(&mut app, "[oops");
    // nothing applies until Enter
    assert_eq!(names(&app).len(), 4);
    app.handle_keypress(key(KeyCode::Enter));

    assert!(app.status().is_some());
    assert_eq!(app.nav().filter(), "^[^.]");

    // status clears on the next action
    app.handle_keypress(ch('j'));
    assert_eq!(app.status(), None);

    app.handle_keypress(ch('/'));
    type_str(&mut app, "^g");
    app.handle_keypress(key(KeyCode::Esc));
    assert_eq!(app.nav().filter(), "^[^.]", "cancel is an empty submission");
    Ok(())
}

#[test]
fn test_chdir_prompt_and_home() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fixture(dir.path())?;
    fs::create_dir(dir.path().join("docs").join("api"))?;
    let config = Config::default();
    let mut app =
        AppState::new(&config, dir.path(), false)?.with_home(Some(dir.path().to_path_buf()));

    app.handle_keypress(ch('c'));
    type_str(&mut app, "docs/api");
    app.handle_keypress(key(KeyCode::Enter));
    assert_eq!(app.nav().current_dir(), dir.path().join("docs").join("api"));

    app.handle_keypress(ch('c'));
    type_str(&mut app, "missing");
    app.handle_keypress(key(KeyCode::Enter));
    assert!(app.status().is_some());
    assert_eq!(app.nav().current_dir(), dir.path().join("docs").join("api"));

    app.handle_keypress(KeyEvent::new(KeyCode::Char('~'), KeyModifiers::SHIFT));
    assert_eq!(app.nav().current_dir(), dir.path());
    Ok(())
}

#[test]
fn test_open_file_through_association() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fixture(dir.path())?;
    let config = Config::default();
    let mut app = AppState::new(&config, dir.path(), false)?;

    match app.handle_keypress(key(KeyCode::Enter)) {
        KeypressResult::Spawn(req) => {
            assert_eq!(req.program(), "less");
            assert_eq!(req.arg(), Some(dir.path().join("alpha.rs").as_os_str()));
        }
        other => return Err(format!("expected a spawn, got {other:?}").into()),
    }
    Ok(())
}

#[test]
fn test_open_without_association() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fixture(dir.path())?;
    let config = config_from(
        r#"
        [[assoc]]
        pattern = '\.pdf$'
        program = "mupdf"
        "#,
    )?;
    let mut app = AppState::new(&config, dir.path(), false)?;

    let result = app.handle_keypress(ch('l'));
    assert!(matches!(result, KeypressResult::Continue));
    assert_eq!(app.status(), Some("No association"));
    Ok(())
}

#[test]
fn test_run_bindings() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fixture(dir.path())?;
    let config = config_from(
        r#"
        [[keys.run]]
        keys = ["z"]
        program = "top"

        [[keys.run]]
        keys = ["v"]
        program = "view"
        args = ["-R"]
        with_name = true
        "#,
    )?;
    let mut app = AppState::new(&config, dir.path(), false)?;

    match app.handle_keypress(ch('z')) {
        KeypressResult::Spawn(req) => {
            assert_eq!(req.program(), "top");
            assert_eq!(req.arg(), None);
            assert_eq!(req.dir(), Some(dir.path()));
        }
        other => return Err(format!("expected a spawn, got {other:?}").into()),
    }

    app.handle_keypress(ch('j'));
    match app.handle_keypress(ch('v')) {
        KeypressResult::Spawn(req) => {
            assert_eq!(req.args(), ["-R".to_string()]);
            assert_eq!(req.arg(), Some(OsStr::new("beta.txt")));
        }
        other => return Err(format!("expected a spawn, got {other:?}").into()),
    }

    // with_name on an empty listing does nothing
    app.handle_keypress(ch('/'));
    type_str(&mut app, "^nothing-matches$");
    app.handle_keypress(key(KeyCode::Enter));
    assert!(app.nav().entries().is_empty());
    assert!(matches!(app.handle_keypress(ch('v')), KeypressResult::Continue));
    Ok(())
}

#[test]
fn test_quit_and_unbound_keys() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let config = Config::default();
    let mut app = AppState::new(&config, dir.path(), false)?;

    assert!(matches!(app.handle_keypress(ch('X')), KeypressResult::Continue));
    assert!(matches!(app.handle_keypress(ch('q')), KeypressResult::Quit));
    Ok(())
}

#[test]
fn test_idle_command() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let config = config_from(
        r#"
        [general]
        idle_timeout = 3
        idle_cmd = "cmatrix"
        "#,
    )?;
    let mut app = AppState::new(&config, dir.path(), false)?;

    assert!(app.idle_tick().is_none());
    assert!(app.idle_tick().is_none());
    // a key press starts the count again
    app.handle_keypress(ch('j'));
    assert!(app.idle_tick().is_none());
    assert!(app.idle_tick().is_none());
    let req = app.idle_tick().ok_or("idle command expected")?;
    assert_eq!(req.program(), "cmatrix");

    // prompts do not count
    app.handle_keypress(ch('/'));
    for _ in 0..10 {
        assert!(app.idle_tick().is_none());
    }

    let off = Config::default();
    let mut quiet = AppState::new(&off, dir.path(), false)?;
    for _ in 0..10 {
        assert!(quiet.idle_tick().is_none());
    }
    Ok(())
}

#[test]
fn test_render_frame() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fixture(dir.path())?;
    fs::write(dir.path().join("beta.txt"), [0u8; 2048])?;
    let config = Config::default();
    let mut app = AppState::new(&config, dir.path(), false)?;

    let lines = screen(&mut app, 60, 12)?;
    assert_eq!(app.metrics().list_rows, 8);

    assert!(lines[0].trim_end().ends_with("KiB"), "header: {:?}", lines[0]);
    assert!(lines[2].starts_with("> alpha.rs"));
    assert!(lines[3].starts_with("  beta.txt"));
    assert!(lines[3].trim_end().ends_with("2 KiB"));
    assert!(lines[4].starts_with("  docs/"));
    assert!(lines[11].starts_with("1/4"));

    app.handle_keypress(ch('c'));
    type_str(&mut app, "do");
    let lines = screen(&mut app, 60, 12)?;
    assert!(lines[11].starts_with("chdir: do"));
    Ok(())
}

#[test]
fn test_render_keeps_selection_visible() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    for i in 0..30 {
        File::create(dir.path().join(format!("file{i:02}")))?;
    }
    let config = Config::default();
    let mut app = AppState::new(&config, dir.path(), false)?;

    // 10 rows leave 6 for the list
    screen(&mut app, 40, 10)?;
    for _ in 0..3 {
        app.handle_keypress(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
    }
    assert_eq!(app.nav().selected_idx(), 9);

    let lines = screen(&mut app, 40, 10)?;
    let body = &lines[2..8];
    assert!(body[0].starts_with("  file06"));
    assert!(body[3].starts_with("> file09"));

    app.handle_keypress(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT));
    let lines = screen(&mut app, 40, 10)?;
    assert!(lines[7].starts_with("> file29"));
    Ok(())
}

#[test]
fn test_deleted_directory_reports_status() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("a"))?;
    fs::create_dir(dir.path().join("b"))?;
    let config = Config::default();
    let mut app = AppState::new(&config, dir.path(), false)?;

    app.handle_keypress(ch('j'));
    fs::remove_dir(dir.path().join("b"))?;

    let result = app.handle_keypress(key(KeyCode::Enter));
    assert!(matches!(result, KeypressResult::Continue));
    assert!(app.status().is_some());
    assert_eq!(app.nav().current_dir(), dir.path());
    assert_eq!(names(&app), vec!["a", "b"]);
    assert_eq!(app.nav().selected_idx(), 1);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unstattable_entry_is_fatal() -> Result<(), Box<dyn error::Error>> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    let sealed = dir.path().join("sealed");
    fs::create_dir(&sealed)?;
    File::create(sealed.join("inner.txt"))?;
    // readable but not searchable: names can be listed, children cannot be stat'ed
    fs::set_permissions(&sealed, fs::Permissions::from_mode(0o444))?;

    if fs::symlink_metadata(sealed.join("inner.txt")).is_ok() {
        fs::set_permissions(&sealed, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let config = Config::default();
    let mut app = AppState::new(&config, dir.path(), false)?;
    let result = app.handle_keypress(key(KeyCode::Enter));
    fs::set_permissions(&sealed, fs::Permissions::from_mode(0o755))?;

    match result {
        KeypressResult::Fatal(BrowseError::EntryStatUnavailable { path, .. }) => {
            assert_eq!(path, sealed.join("inner.txt"));
        }
        other => return Err(format!("expected a fatal stat error, got {other:?}").into()),
    }
    assert_eq!(app.nav().current_dir(), dir.path());
    assert_eq!(names(&app), vec!["sealed"]);
    Ok(())
}
