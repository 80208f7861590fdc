use std::sync::Arc;

use rand::{Rng, rngs::StdRng};

use crate::{
    config::Config,
    generators::{Generator, generate_text, get_rng},
    maze::Glyphs,
    solvers::{SolveError, SolveLogger, Solver, SolvingFlag, solve_fast, solve_streamed},
};

/// State behind the menu: the maze on display and the requests that can be made against it.
pub struct MazeSession {
    /// Text currently on display. Solves always start from this, never from generator state
    text: String,
    glyphs: Glyphs,
    fast_mode: bool,
    /// Draws one seed per generated maze, so a configured seed replays the whole session
    rng: StdRng,
    logger: Arc<dyn SolveLogger>,
    solving: SolvingFlag,
}

impl MazeSession {
    pub fn new(config: &Config, logger: Arc<dyn SolveLogger>) -> Self {
        Self {
            text: String::new(),
            glyphs: config.style.glyphs(),
            fast_mode: config.fast_mode,
            rng: get_rng(config.seed),
            logger,
            solving: SolvingFlag::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn fast_mode(&self) -> bool {
        self.fast_mode
    }

    pub fn solving_flag(&self) -> &SolvingFlag {
        &self.solving
    }

    /// Replaces the displayed maze with a new one sized for `rows` x `cols` display cells.
    pub fn generate(
        &mut self,
        rows: usize,
        cols: usize,
        generator: Generator,
    ) -> Result<&str, SolveError> {
        if self.solving.is_solving() {
            return Err(SolveError::AlreadySolving);
        }
        let seed = self.rng.random::<u64>();
        tracing::debug!("[session] generating with seed {}", seed);
        self.text = generate_text(rows, cols, generator, Some(seed), &self.glyphs);
        Ok(&self.text)
    }

    /// Solves the displayed maze. In streamed mode `on_snapshot` sees every step before the
    /// solved maze replaces the displayed one; fast mode never calls it.
    ///
    /// On failure the displayed maze is left as it was.
    pub fn solve<F: FnMut(&str)>(
        &mut self,
        solver: Solver,
        on_snapshot: F,
    ) -> Result<&str, SolveError> {
        let guard = self
            .solving
            .try_acquire()
            .ok_or(SolveError::AlreadySolving)?;
        tracing::info!(
            "[session] solving with {} ({} mode)",
            solver,
            if self.fast_mode { "fast" } else { "streamed" }
        );

        let solution = if self.fast_mode {
            let solution = solve_fast(&self.text, solver, &self.glyphs, self.logger.as_ref());
            drop(guard);
            solution
        } else {
            solve_streamed(
                &self.text,
                solver,
                &self.glyphs,
                self.logger.clone(),
                Some(guard),
                on_snapshot,
            )
        }?;

        self.text = solution;
        Ok(&self.text)
    }

    /// Flips fast mode and returns the new setting.
    pub fn toggle_fast_mode(&mut self) -> Result<bool, SolveError> {
        if self.solving.is_solving() {
            return Err(SolveError::AlreadySolving);
        }
        self.fast_mode = !self.fast_mode;
        tracing::info!("[session] fast mode is turned {}", self.fast_mode);
        Ok(self.fast_mode)
    }
}
