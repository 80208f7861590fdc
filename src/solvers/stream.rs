//! Running a solve either synchronously (fast mode) or on a worker thread that streams every
//! snapshot to the caller.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, SyncSender},
    },
    thread::JoinHandle,
};

use super::{SolveEvent, SolveLogger, Solver, StepSink};
use crate::maze::{Coord, Glyphs, ParseError, ParsedMaze, parse, render};

/// Result text shown when the exit cannot be reached.
pub const NO_SOLUTION: &str = "No solution found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The text could not be read back as a maze. No search was attempted.
    InvalidMaze(ParseError),
    /// The search exhausted every reachable cell without finding the exit.
    NoSolution,
    /// Another solve holds the [`SolvingFlag`].
    AlreadySolving,
    /// The worker thread died before finishing.
    WorkerPanicked,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidMaze(e) => write!(f, "{}", e),
            SolveError::NoSolution => write!(f, "{}", NO_SOLUTION),
            SolveError::AlreadySolving => write!(f, "A maze is already being solved"),
            SolveError::WorkerPanicked => write!(f, "Solver worker stopped unexpectedly"),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::InvalidMaze(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for SolveError {
    fn from(e: ParseError) -> Self {
        SolveError::InvalidMaze(e)
    }
}

/// Shared "a solve is running" flag. Only one [`SolvingGuard`] can exist at a time.
#[derive(Debug, Clone, Default)]
pub struct SolvingFlag(Arc<AtomicBool>);

impl SolvingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_solving(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Sets the flag, unless it is already set.
    pub fn try_acquire(&self) -> Option<SolvingGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SolvingGuard(self.0.clone()))
    }
}

/// Clears the [`SolvingFlag`] when dropped. A streamed solve moves it into the worker so the
/// flag drops exactly when the worker is done.
#[derive(Debug)]
pub struct SolvingGuard(Arc<AtomicBool>);

impl Drop for SolvingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Counts visits and backtracks. Fast mode uses it on its own, so nothing gets rendered.
#[derive(Debug, Default)]
struct StepCounter {
    steps: usize,
    backtracks: usize,
}

impl StepCounter {
    /// Counts `event`, returning the coordinate and backtracking flag of a counted step.
    fn count(&mut self, event: SolveEvent) -> Option<(Coord, bool)> {
        match event {
            SolveEvent::Visit(coord) => {
                self.steps += 1;
                Some((coord, false))
            }
            SolveEvent::Backtrack(coord) => {
                self.steps += 1;
                self.backtracks += 1;
                Some((coord, true))
            }
            SolveEvent::Solution => None,
        }
    }
}

impl StepSink for StepCounter {
    fn emit(&mut self, event: SolveEvent, _snapshot: String) {
        self.count(event);
    }

    fn wants_snapshots(&self) -> bool {
        false
    }
}

/// Forwards snapshots into the channel and step events to the logger.
struct ChannelSink<'a> {
    tx: SyncSender<String>,
    logger: &'a dyn SolveLogger,
    counter: StepCounter,
    /// Set once the consumer hung up; the search keeps going but stops rendering.
    disconnected: bool,
}

impl StepSink for ChannelSink<'_> {
    fn emit(&mut self, event: SolveEvent, snapshot: String) {
        if let Some((coord, backtracking)) = self.counter.count(event) {
            self.logger.step(self.counter.steps, coord, backtracking);
        }
        if !self.disconnected && self.tx.send(snapshot).is_err() {
            tracing::debug!("[solve worker] snapshot consumer hung up");
            self.disconnected = true;
        }
    }

    fn wants_snapshots(&self) -> bool {
        !self.disconnected
    }
}

/// The snapshots of one streamed solve, in order.
///
/// The solver runs on its own thread and hands over each snapshot through a zero-capacity
/// channel, so it never runs more than one step ahead of the consumer. Iteration ends when the
/// worker finishes; [`SnapshotStream::finish`] then returns the last snapshot received.
pub struct SnapshotStream {
    rx: Receiver<String>,
    worker: Option<JoinHandle<bool>>,
    last: Option<String>,
}

impl SnapshotStream {
    /// Starts `solver` on `maze` in a new worker thread.
    ///
    /// The optional `guard` is released by the worker when it is done.
    pub fn spawn(
        maze: ParsedMaze,
        solver: Solver,
        glyphs: Glyphs,
        logger: Arc<dyn SolveLogger>,
        guard: Option<SolvingGuard>,
    ) -> Self {
        let (tx, rx) = std::sync::mpsc::sync_channel::<String>(0);
        let worker = std::thread::spawn(move || {
            let _guard = guard;
            logger.start(solver.short_name());
            let mut sink = ChannelSink {
                tx,
                logger: logger.as_ref(),
                counter: StepCounter::default(),
                disconnected: false,
            };
            let found = solver.solve(&maze, &glyphs, Some(&mut sink)).is_some();
            logger.complete(sink.counter.steps, sink.counter.backtracks);
            if !found {
                logger.no_solution();
            }
            tracing::debug!("[solve worker] {} finished, found: {}", solver, found);
            // The sender drops with the sink here, which ends the consumer's iteration
            found
        });
        SnapshotStream {
            rx,
            worker: Some(worker),
            last: None,
        }
    }

    /// Drains any remaining snapshots, waits for the worker and returns the final text.
    pub fn finish(mut self) -> Result<String, SolveError> {
        for _ in self.by_ref() {}
        let found = self
            .worker
            .take()
            .map(|worker| worker.join())
            .unwrap_or(Ok(false))
            .map_err(|_| SolveError::WorkerPanicked)?;
        if !found {
            return Err(SolveError::NoSolution);
        }
        self.last.take().ok_or(SolveError::NoSolution)
    }
}

impl Iterator for SnapshotStream {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        // Err means the worker finished and dropped its sender
        let snapshot = self.rx.recv().ok()?;
        self.last = Some(snapshot.clone());
        Some(snapshot)
    }
}

/// Solves `text` on the calling thread without rendering intermediate snapshots.
/// The logger hears about the start and the totals, but not about individual steps.
pub fn solve_fast(
    text: &str,
    solver: Solver,
    glyphs: &Glyphs,
    logger: &dyn SolveLogger,
) -> Result<String, SolveError> {
    let maze = parse(text, glyphs)?;
    logger.start(solver.short_name());
    let mut counter = StepCounter::default();
    let path = solver.solve(&maze, glyphs, Some(&mut counter));
    logger.complete(counter.steps, counter.backtracks);
    match path {
        Some(path) => Ok(render(&maze.grid, &path, glyphs)),
        None => {
            logger.no_solution();
            Err(SolveError::NoSolution)
        }
    }
}

/// Solves `text` on a worker thread, calling `on_snapshot` with every intermediate rendering.
/// Blocks until the worker is done and returns the last snapshot.
pub fn solve_streamed<F: FnMut(&str)>(
    text: &str,
    solver: Solver,
    glyphs: &Glyphs,
    logger: Arc<dyn SolveLogger>,
    guard: Option<SolvingGuard>,
    mut on_snapshot: F,
) -> Result<String, SolveError> {
    let maze = parse(text, glyphs)?;
    let mut stream = SnapshotStream::spawn(maze, solver, glyphs.clone(), logger, guard);
    for snapshot in stream.by_ref() {
        on_snapshot(&snapshot);
    }
    stream.finish()
}

/// Solve boundary for display code: always returns something printable, either the solved
/// maze or the reason there is none.
pub fn solve_to_text<F: FnMut(&str)>(
    text: &str,
    solver: Solver,
    fast: bool,
    glyphs: &Glyphs,
    logger: Arc<dyn SolveLogger>,
    on_snapshot: F,
) -> String {
    let result = if fast {
        solve_fast(text, solver, glyphs, logger.as_ref())
    } else {
        solve_streamed(text, solver, glyphs, logger, None, on_snapshot)
    };
    result.unwrap_or_else(|e| {
        tracing::info!("[solve] {} did not produce a solution: {}", solver, e);
        e.to_string()
    })
}
