//! Process handling for sift: file associations and foreground children.
//!
//! [Associations] resolves a file to the program that opens it. A [SpawnRequest] describes a
//! child to run, and [spawn_foreground] hands it the terminal until it exits.
//!
//! While a child runs the browser is frozen: no input is read and nothing is drawn. The terminal
//! is put back into raw mode and the alternate screen afterwards, and the caller redraws.

use crate::config::AssocRule;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use regex::{Regex, RegexBuilder};

use std::env;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One compiled association rule.
#[derive(Debug, Clone)]
struct Association {
    pattern: Regex,
    program: String,
}

/// Ordered association rules. The first rule whose pattern matches the full path wins.
#[derive(Debug, Clone, Default)]
pub struct Associations {
    rules: Vec<Association>,
}

impl Associations {
    /// Compiles the configured rules case-insensitively, skipping the ones that do not compile.
    pub fn compile(rules: &[AssocRule]) -> Self {
        let rules = rules
            .iter()
            .filter_map(|rule| {
                match RegexBuilder::new(rule.pattern())
                    .case_insensitive(true)
                    .build()
                {
                    Ok(pattern) => Some(Association {
                        pattern,
                        program: rule.program().to_string(),
                    }),
                    Err(err) => {
                        tracing::warn!(pattern = rule.pattern(), %err, "skipping association rule");
                        None
                    }
                }
            })
            .collect();
        Associations { rules }
    }

    pub fn resolve_program(&self, path: &Path) -> Option<&str> {
        let full = path.to_string_lossy();
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(&full))
            .map(|rule| rule.program.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// A child process to run in the foreground.
///
/// The command line is `program args.. [arg]`: the optional argument always comes last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    program: String,
    args: Vec<String>,
    arg: Option<OsString>,
    dir: Option<PathBuf>,
}

impl SpawnRequest {
    pub fn new(program: impl Into<String>) -> Self {
        SpawnRequest {
            program: program.into(),
            args: Vec::new(),
            arg: None,
            dir: None,
        }
    }

    pub fn with_args(mut self, args: &[String]) -> Self {
        self.args = args.to_vec();
        self
    }

    pub fn with_arg(mut self, arg: impl Into<OsString>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    // Accessors

    #[inline]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[inline]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[inline]
    pub fn arg(&self) -> Option<&OsStr> {
        self.arg.as_deref()
    }

    #[inline]
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Builds the [Command] for this request, with the default interrupt disposition restored
    /// for the child.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(arg) = &self.arg {
            cmd.arg(arg);
        }
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }
        restore_default_interrupt(&mut cmd);
        cmd
    }
}

/// Runs the request in the foreground and blocks until the child exits.
///
/// Failing to start the child is only logged. The browser carries on the same way it does after
/// a child that ran.
///
/// # Errors
/// Only terminal mode switches can fail this function.
pub fn spawn_foreground(req: &SpawnRequest) -> io::Result<()> {
    if let Err(err) = which::which(req.program()) {
        tracing::warn!(program = req.program(), %err, "program not found");
        return Ok(());
    }

    let mut stdout = io::stdout();
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, Show)?;

    tracing::debug!(?req, "spawning");
    let status = req.command().status();

    execute!(io::stdout(), EnterAlternateScreen, Hide)?;
    enable_raw_mode()?;

    match status {
        Ok(status) => tracing::debug!(program = req.program(), %status, "child exited"),
        Err(err) => tracing::warn!(program = req.program(), %err, "failed to run"),
    }
    Ok(())
}

/// Program of a run binding: the value of `env_var` when it is set and not empty, else
/// `fallback`.
pub fn program_from_env(env_var: Option<&str>, fallback: &str) -> String {
    pick_program(env_var.and_then(|var| env::var(var).ok()), fallback)
}

fn pick_program(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Makes the browser itself ignore Ctrl-C. Children get the default back in
/// [SpawnRequest::command].
#[cfg(unix)]
pub fn ignore_interrupt() {
    // SAFETY: installing SIG_IGN has no handler code that could race with the program.
    unsafe {
        libc::signal(libc::SIGINT, libc::SIG_IGN);
    }
}

#[cfg(not(unix))]
pub fn ignore_interrupt() {}

#[cfg(unix)]
fn restore_default_interrupt(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    // SAFETY: signal(2) is async-signal-safe and the closure touches no other state.
    unsafe {
        cmd.pre_exec(|| {
            libc::signal(libc::SIGINT, libc::SIG_DFL);
            Ok(())
        });
    }
}

#[cfg(not(unix))]
fn restore_default_interrupt(_cmd: &mut Command) {}
