//! Log setup for the binary, and the solve loggers: one writing to tracing, one also feeding the
//! on-screen log panel.

use std::{
    fs::OpenOptions,
    sync::mpsc::{Receiver, Sender},
};

use tracing_appender::non_blocking::WorkerGuard;

use crate::{config::Config, maze::Coord, solvers::SolveLogger};

/// Installs a global subscriber that writes plain-text logs to
/// `<log_dir>/mazeline.log`. The terminal itself is left to the maze display.
///
/// Keep the returned guard alive for as long as logs should be flushed.
pub fn init(config: &Config) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_dir.join(Config::LOG_FILE_NAME))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_thread_names(true)
        .with_max_level(config.log_level)
        .try_init()
        .map_err(std::io::Error::other)?;

    Ok(guard)
}

fn start_message(algorithm: &str) -> String {
    format!("Starting {} maze solution...", algorithm)
}

fn step_message(index: usize, coord: Coord, backtracking: bool) -> String {
    let direction = if backtracking {
        "backtracking"
    } else {
        "exploring"
    };
    format!("Step {}: {} at ({},{})", index, direction, coord.0, coord.1)
}

fn complete_message(step_count: usize, backtrack_count: usize) -> String {
    format!(
        "Finished! Total steps: {}, Backtracks: {}",
        step_count, backtrack_count
    )
}

const NO_SOLUTION_MESSAGE: &str = "No solution found!";

/// Writes solve progress as human-readable tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl SolveLogger for TracingLogger {
    fn start(&self, algorithm: &str) {
        tracing::info!("{}", start_message(algorithm));
    }

    fn step(&self, index: usize, coord: Coord, backtracking: bool) {
        tracing::debug!("{}", step_message(index, coord, backtracking));
    }

    fn complete(&self, step_count: usize, backtrack_count: usize) {
        tracing::info!("{}", complete_message(step_count, backtrack_count));
    }

    fn no_solution(&self) {
        tracing::warn!("{}", NO_SOLUTION_MESSAGE);
    }
}

/// Logs like [`TracingLogger`] and also hands every message to the on-screen log panel.
///
/// The solver worker only sends; the panel drains the receiver between frames.
#[derive(Debug)]
pub struct PanelLogger {
    tx: Sender<String>,
}

impl PanelLogger {
    pub fn new() -> (Self, Receiver<String>) {
        let (tx, rx) = std::sync::mpsc::channel();
        (PanelLogger { tx }, rx)
    }

    fn send(&self, message: String) {
        // The panel is gone once the app has quit; the file log still gets everything
        let _ = self.tx.send(message);
    }
}

impl SolveLogger for PanelLogger {
    fn start(&self, algorithm: &str) {
        TracingLogger.start(algorithm);
        self.send(start_message(algorithm));
    }

    fn step(&self, index: usize, coord: Coord, backtracking: bool) {
        TracingLogger.step(index, coord, backtracking);
        self.send(step_message(index, coord, backtracking));
    }

    fn complete(&self, step_count: usize, backtrack_count: usize) {
        TracingLogger.complete(step_count, backtrack_count);
        self.send(complete_message(step_count, backtrack_count));
    }

    fn no_solution(&self) {
        TracingLogger.no_solution();
        self.send(NO_SOLUTION_MESSAGE.to_string());
    }
}
