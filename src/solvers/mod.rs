use std::collections::HashSet;

mod bfs;
mod dfs;
pub mod stream;

pub use bfs::solve_bfs;
pub use dfs::solve_dfs;
pub use stream::{
    NO_SOLUTION, SnapshotStream, SolveError, SolvingFlag, SolvingGuard, solve_fast,
    solve_streamed, solve_to_text,
};

use crate::maze::{Coord, Glyphs, ParsedMaze, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Dfs,
    Bfs,
}

impl Solver {
    pub const ALL: [Solver; 2] = [Solver::Dfs, Solver::Bfs];

    /// Short label used in menus and log lines.
    pub fn short_name(&self) -> &'static str {
        match self {
            Solver::Dfs => "DFS",
            Solver::Bfs => "BFS",
        }
    }

    /// Runs the search from the maze's entrance to its exit.
    /// Returns the cells of the solution path, or `None` if the exit cannot be reached.
    pub fn solve(
        &self,
        maze: &ParsedMaze,
        glyphs: &Glyphs,
        sink: Option<&mut dyn StepSink>,
    ) -> Option<HashSet<Coord>> {
        match self {
            Solver::Dfs => solve_dfs(maze, glyphs, sink),
            Solver::Bfs => solve_bfs(maze, glyphs, sink),
        }
    }
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
        }
    }
}

/// What happened at one step of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveEvent {
    /// The cell was entered (DFS) or dequeued (BFS).
    Visit(Coord),
    /// DFS gave up on the cell and removed it from the live path.
    Backtrack(Coord),
    /// BFS reached the exit and rebuilt the shortest path.
    Solution,
}

/// Receives every step of a search together with the grid rendered at that moment.
pub trait StepSink {
    fn emit(&mut self, event: SolveEvent, snapshot: String);

    /// Sinks that only count steps return `false` and receive empty snapshots.
    fn wants_snapshots(&self) -> bool {
        true
    }
}

impl<F: FnMut(SolveEvent, String)> StepSink for F {
    fn emit(&mut self, event: SolveEvent, snapshot: String) {
        self(event, snapshot)
    }
}

/// Receives human-facing progress events from a solve. Formatting is up to the implementor.
pub trait SolveLogger: Send + Sync {
    fn start(&self, algorithm: &str);
    fn step(&self, index: usize, coord: Coord, backtracking: bool);
    fn complete(&self, step_count: usize, backtrack_count: usize);
    fn no_solution(&self);
}

/// Fixed neighbor order, as (dx, dy): up, right, down, left.
/// Changing it changes which path DFS finds.
const DIRECTIONS: [(isize, isize); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// The cell one step from `coord` in `dir`, if it stays inside a `width` x `height` grid.
fn step(coord: Coord, dir: (isize, isize), width: usize, height: usize) -> Option<Coord> {
    let x = coord.0.checked_add_signed(dir.0)?;
    let y = coord.1.checked_add_signed(dir.1)?;
    (x < width && y < height).then_some((x, y))
}

/// Renders snapshots only when someone is listening.
struct Emitter<'a, 's> {
    maze: &'a ParsedMaze,
    glyphs: &'a Glyphs,
    sink: Option<&'s mut dyn StepSink>,
}

impl<'a, 's> Emitter<'a, 's> {
    fn new(maze: &'a ParsedMaze, glyphs: &'a Glyphs, sink: Option<&'s mut dyn StepSink>) -> Self {
        Emitter { maze, glyphs, sink }
    }

    fn emit(&mut self, event: SolveEvent, highlighted: &HashSet<Coord>) {
        if let Some(sink) = self.sink.as_mut() {
            let snapshot = if sink.wants_snapshots() {
                render(&self.maze.grid, highlighted, self.glyphs)
            } else {
                String::new()
            };
            sink.emit(event, snapshot);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::generators::{Generator, generate_text};
    use crate::maze::parse;

    /// Records every logger call for assertions.
    #[derive(Default)]
    pub(crate) struct RecordingLogger {
        pub(crate) events: Mutex<Vec<String>>,
    }

    impl RecordingLogger {
        pub(crate) fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl SolveLogger for RecordingLogger {
        fn start(&self, algorithm: &str) {
            self.push(format!("start {}", algorithm));
        }

        fn step(&self, index: usize, coord: Coord, backtracking: bool) {
            self.push(format!("step {} {:?} {}", index, coord, backtracking));
        }

        fn complete(&self, step_count: usize, backtrack_count: usize) {
            self.push(format!("complete {} {}", step_count, backtrack_count));
        }

        fn no_solution(&self) {
            self.push("no solution".to_string());
        }
    }

    /// Parses a maze written with `#` walls and `.` open cells, one char per cell.
    pub(crate) fn maze_from_ascii(ascii: &str) -> ParsedMaze {
        let text = ascii
            .lines()
            .map(|line| {
                line.trim()
                    .chars()
                    .map(|c| if c == '#' { "██" } else { "  " })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        parse(&text, &Glyphs::default()).unwrap()
    }

    /// Checks that `path` is a simple chain of adjacent open cells from entrance to exit.
    pub(crate) fn assert_valid_path(maze: &ParsedMaze, path: &HashSet<Coord>) {
        assert!(path.contains(&maze.entrance));
        assert!(path.contains(&maze.exit));
        assert!(path.iter().all(|&c| maze.grid.is_open(c)));
        for &cell in path {
            let degree = DIRECTIONS
                .iter()
                .filter_map(|&d| step(cell, d, maze.grid.width(), maze.grid.height()))
                .filter(|n| path.contains(n))
                .count();
            let expected = if cell == maze.entrance || cell == maze.exit {
                1
            } else {
                2
            };
            assert_eq!(degree, expected, "cell {:?} breaks the path", cell);
        }
    }

    #[test]
    fn test_step() {
        assert_eq!(step((0, 0), (0, -1), 3, 3), None);
        assert_eq!(step((0, 0), (-1, 0), 3, 3), None);
        assert_eq!(step((2, 2), (1, 0), 3, 3), None);
        assert_eq!(step((1, 1), (0, 1), 3, 3), Some((1, 2)));
    }

    #[test]
    fn test_both_solvers_solve_generated_mazes() {
        let glyphs = Glyphs::default();
        for generator in Generator::ALL {
            for seed in 0..8 {
                let text = generate_text(15, 25, generator, Some(seed), &glyphs);
                let maze = parse(&text, &glyphs).unwrap();
                let dfs = Solver::Dfs.solve(&maze, &glyphs, None).expect("DFS failed");
                let bfs = Solver::Bfs.solve(&maze, &glyphs, None).expect("BFS failed");
                assert_valid_path(&maze, &dfs);
                assert_valid_path(&maze, &bfs);
                // BFS is never longer, and in a perfect maze the simple path is unique
                assert!(bfs.len() <= dfs.len());
                assert_eq!(bfs, dfs);
            }
        }
    }

    #[test]
    fn test_closure_sink() {
        let maze = maze_from_ascii(
            "#.#
             #.#
             #.#",
        );
        let mut events = Vec::new();
        let mut sink = |event: SolveEvent, _snapshot: String| events.push(event);
        let path = Solver::Dfs.solve(&maze, &Glyphs::default(), Some(&mut sink));
        assert_eq!(path.map(|p| p.len()), Some(3));
        assert_eq!(
            events,
            vec![
                SolveEvent::Visit((1, 0)),
                SolveEvent::Visit((1, 1)),
                SolveEvent::Visit((1, 2))
            ]
        );
    }

    #[test]
    fn test_sink_shared_across_mazes() {
        let mut visits = 0;
        let mut sink = |event: SolveEvent, _snapshot: String| {
            if matches!(event, SolveEvent::Visit(_)) {
                visits += 1;
            }
        };
        for solver in Solver::ALL {
            // Each maze lives for one iteration only, the sink for the whole loop
            let maze = maze_from_ascii(
                "#.#
                 #.#",
            );
            let glyphs = Glyphs::default();
            assert!(solver.solve(&maze, &glyphs, Some(&mut sink)).is_some());
        }
        assert_eq!(visits, 4);
    }
}
