//! Terminal rendering and event loop for sift.
//!
//! Handles setup/teardown of raw mode, alternate screen, redraws,
//! and events (keypress, resize, idle timeout) to app logic.

use crate::app::{AppState, KeypressResult};
use crate::core::proc::{SpawnRequest, spawn_foreground};
use crate::ui;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::{io, time::Duration};

/// Poll timeout. Every timeout while browsing is one idle tick.
const TICK: Duration = Duration::from_secs(1);

/// Initializes the terminal in raw mode and alternate screen and runs the main event loop.
///
/// Blocks until quit. The terminal is restored before the loop's result is returned, so a fatal
/// browse error can be printed on the normal screen.
///
/// Returns an std::io::Error if terminal setup or teardown fails, or the loop ended on a fatal
/// error.
pub fn run_terminal(app: &mut AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    result
}

/// Main event loop of sift: draws UI, polls for events and dispatches them to the app.
/// Returns on quit
fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    terminal.draw(|f| ui::render(f, app))?;

    loop {
        if !event::poll(TICK)? {
            if let Some(req) = app.idle_tick() {
                run_child(terminal, &req)?;
                terminal.draw(|f| ui::render(f, app))?;
            }
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match app.handle_keypress(key) {
                    KeypressResult::Quit => break,
                    KeypressResult::Spawn(req) => run_child(terminal, &req)?,
                    KeypressResult::Fatal(err) => return Err(err.into()),
                    KeypressResult::Continue => {}
                }
                terminal.draw(|f| ui::render(f, app))?;
            }

            Event::Resize(_, _) => {
                terminal.draw(|f| ui::render(f, app))?;
            }

            _ => {}
        }
    }
    Ok(())
}

/// Runs a child in the foreground and forces a full repaint afterwards, since the child owned
/// the screen.
fn run_child<B: Backend>(terminal: &mut Terminal<B>, req: &SpawnRequest) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    spawn_foreground(req)?;
    terminal.clear()?;
    Ok(())
}
