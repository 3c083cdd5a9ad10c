//! The seam to the external two-phase solver.

use std::{
    io::{BufRead, BufReader, Write},
    process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio},
    sync::Mutex,
};

use log::{debug, info, warn};
use thiserror::Error;

use crate::config::SolverConfig;

/// Why the external solver could not be asked.
///
/// An answer of `Error` is not one of these: that comes back as ordinary text and truncates
/// the solution.
#[derive(Error, Debug)]
pub enum SolverError {
    /// Spawning or talking to the solver process failed.
    #[error("Failed to talk to the solver process: {0}")]
    Io(#[from] std::io::Error),
    /// The process exited or closed its output mid-conversation.
    #[error("The solver process closed its output")]
    Closed,
    /// An earlier caller panicked while holding the process.
    #[error("The solver process lock was poisoned")]
    Poisoned,
    /// Any other failure reported by a solver implementation.
    #[error("{0}")]
    Other(String),
}

/// Something that turns a facelet string into solution text such as `"R U2 F'"`.
///
/// `Sync` so a simulation can share one solver across worker threads.
pub trait FaceletSolver: Sync {
    /// Returns the solver's raw answer for |facelets|.
    ///
    /// # Errors
    ///
    /// Only when the solver could not be reached at all.
    fn solve(&self, facelets: &str) -> Result<String, SolverError>;
}

impl<F> FaceletSolver for F
where
    F: Fn(&str) -> Result<String, SolverError> + Sync,
{
    fn solve(&self, facelets: &str) -> Result<String, SolverError> {
        self(facelets)
    }
}

struct Pipes {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// A long-running solver process spoken to over stdin/stdout, one line per request.
///
/// The process is spawned on first use and reused afterwards. A conversation looks like
///
/// ```text
/// Ready!
/// solve UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB
/// 0.012ms
/// (0)
/// ```
///
/// where the ready line, the request prefix and the number of lines between request and
/// answer all come from [`SolverConfig`].
pub struct TwophaseProcess {
    config: SolverConfig,
    pipes: Mutex<Option<Pipes>>,
}

impl TwophaseProcess {
    /// Prepares a solver; nothing is spawned until the first request.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        TwophaseProcess {
            config,
            pipes: Mutex::new(None),
        }
    }

    fn spawn(&self) -> Result<Pipes, SolverError> {
        info!("Starting solver {:?} {:?}", self.config.program, self.config.args);
        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let stdin = child.stdin.take().ok_or(SolverError::Closed)?;
        let stdout = BufReader::new(child.stdout.take().ok_or(SolverError::Closed)?);
        Ok(Pipes {
            child,
            stdin,
            stdout,
        })
    }

    fn converse(&self, pipes: &mut Pipes, facelets: &str) -> Result<String, SolverError> {
        if let Some(ready) = &self.config.ready_line {
            // Wait until the solver tells us that it's ready
            loop {
                if read_line(&mut pipes.stdout)?.trim_end() == ready {
                    break;
                }
            }
        }

        writeln!(pipes.stdin, "{}{facelets}", self.config.request_prefix)?;
        pipes.stdin.flush()?;

        for _ in 0..self.config.skip_lines {
            read_line(&mut pipes.stdout)?;
        }

        let answer = read_line(&mut pipes.stdout)?.trim().to_owned();
        debug!("Solver answered {answer:?}");
        Ok(answer)
    }
}

impl FaceletSolver for TwophaseProcess {
    fn solve(&self, facelets: &str) -> Result<String, SolverError> {
        let mut guard = self.pipes.lock().map_err(|_| SolverError::Poisoned)?;

        if guard.is_none() {
            *guard = Some(self.spawn()?);
        }

        let answer = match guard.as_mut() {
            Some(pipes) => self.converse(pipes, facelets),
            None => Err(SolverError::Closed),
        };
        if answer.is_err() {
            // Start over with a fresh process next time.
            if let Some(pipes) = guard.take() {
                shut_down(pipes);
            }
        }
        answer
    }
}

impl Drop for TwophaseProcess {
    fn drop(&mut self) {
        if let Ok(pipes) = self.pipes.get_mut() {
            if let Some(pipes) = pipes.take() {
                shut_down(pipes);
            }
        }
    }
}

/// Kills the solver and reaps it. Failures are only logged.
fn shut_down(pipes: Pipes) -> Option<ExitStatus> {
    let Pipes { mut child, stdin, .. } = pipes;
    drop(stdin);
    if let Err(e) = child.kill() {
        warn!("Failed to kill solver process {}: {e}", child.id());
    }
    match child.wait() {
        Ok(status) => {
            debug!("Solver process exited with {status}");
            Some(status)
        }
        Err(e) => {
            warn!("Failed to wait for solver process {}: {e}", child.id());
            None
        }
    }
}

fn read_line(reader: &mut impl BufRead) -> Result<String, SolverError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(SolverError::Closed);
    }
    Ok(line)
}
