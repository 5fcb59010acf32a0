//! main.rs
//! Entry point for sift

use sift_tui::app::AppState;
use sift_tui::config::Config;
use sift_tui::core::error::BrowseError;
use sift_tui::core::{proc, terminal};
use sift_tui::utils::cli::{CliAction, handle_args};
use sift_tui::utils::{get_home, resolve_path};

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;

fn main() -> io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[sift] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let path_arg = match handle_args() {
        CliAction::Exit => return Ok(()),
        CliAction::Usage => process::exit(1),
        CliAction::RunApp => None,
        CliAction::RunAppAtPath(path) => Some(path),
    };

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("stdin or stdout is not a tty");
        process::exit(1);
    }

    init_logging();
    proc::ignore_interrupt();

    let config = Config::load();

    let cwd = std::env::current_dir()?;
    let (initial_path, shown) = match path_arg {
        Some(arg) => (resolve_path(&cwd, &arg, get_home().as_deref()), arg),
        None => (cwd.clone(), cwd.display().to_string()),
    };

    let mut app = match AppState::new(&config, &initial_path, is_root()) {
        Ok(app) => app,
        Err(BrowseError::DirectoryUnreadable { source, .. }) => {
            eprintln!("{}: {}", shown, source);
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    tracing::debug!(path = %initial_path.display(), "starting");
    if let Err(err) = terminal::run_terminal(&mut app) {
        tracing::error!(%err, "exiting");
        eprintln!("sift: {}", err);
        process::exit(1);
    }
    Ok(())
}

/// Sends tracing output to the file named by `SIFT_LOG`. Without it nothing is recorded, the
/// terminal belongs to the UI.
fn init_logging() {
    let Some(path) = std::env::var_os("SIFT_LOG").map(PathBuf::from) else {
        return;
    };

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .init(),
        Err(err) => eprintln!("[sift] cannot open log file {}: {}", path.display(), err),
    }
}

#[cfg(unix)]
fn is_root() -> bool {
    // SAFETY: getuid has no preconditions and cannot fail.
    unsafe { libc::getuid() == 0 }
}

#[cfg(not(unix))]
fn is_root() -> bool {
    false
}
