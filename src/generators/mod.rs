use rand::{Rng, SeedableRng, rngs::StdRng};

mod kruskal;
mod prim;
mod recur_backtrack;

pub use kruskal::randomized_kruskal;
pub use prim::randomized_prim;
pub use recur_backtrack::recursive_backtrack;

use crate::maze::{Glyphs, Grid, Maze};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    RecurBacktrack,
    Prim,
    Kruskal,
}

impl Generator {
    pub const ALL: [Generator; 3] = [
        Generator::RecurBacktrack,
        Generator::Prim,
        Generator::Kruskal,
    ];

    /// Short label used in menus and log lines.
    pub fn short_name(&self) -> &'static str {
        match self {
            Generator::RecurBacktrack => "DFS",
            Generator::Prim => "Prim's",
            Generator::Kruskal => "Kruskal's",
        }
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::RecurBacktrack => write!(f, "Randomized Depth-First Search (DFS)"),
            Generator::Prim => write!(f, "Prim's Algorithm"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
        }
    }
}

/// Carves a perfect maze into an all-wall grid, then opens one random junction column on the
/// top border and one on the bottom border.
pub fn generate_maze<R: Rng>(mut grid: Grid, generator: Generator, rng: &mut R) -> Maze {
    match generator {
        Generator::RecurBacktrack => recursive_backtrack(&mut grid, rng),
        Generator::Prim => randomized_prim(&mut grid, rng),
        Generator::Kruskal => randomized_kruskal(&mut grid, rng),
    }

    // Junction columns are 1, 3, ..., width - 2
    let cells_per_row = grid.cells_per_row();
    let entrance_col = 1 + 2 * rng.random_range(0..cells_per_row);
    let exit_col = 1 + 2 * rng.random_range(0..cells_per_row);
    Maze::with_openings(grid, entrance_col, exit_col)
}

/// Generates a maze for a display area of `rows` x `cols` cells and returns it as text.
pub fn generate_text(
    rows: usize,
    cols: usize,
    generator: Generator,
    seed: Option<u64>,
    glyphs: &Glyphs,
) -> String {
    let grid = Grid::for_display(rows, cols);
    tracing::info!(
        "[generate] {} on a {}x{} grid (requested {}x{})",
        generator,
        grid.width(),
        grid.height(),
        cols,
        rows
    );
    let mut rng = get_rng(seed);
    let maze = generate_maze(grid, generator, &mut rng);
    tracing::debug!(
        "[generate] entrance at {:?}, exit at {:?}",
        maze.entrance_opening(),
        maze.exit_opening()
    );
    maze.to_text(glyphs)
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use super::*;
    use crate::maze::{between, get_neighbors};

    const SIZES: [(usize, usize); 6] = [(3, 3), (3, 9), (9, 3), (5, 5), (11, 17), (31, 41)];

    /// Walks the junction graph through open connectors and checks it is a spanning tree.
    fn assert_perfect(grid: &Grid) {
        let junctions = grid.junctions().collect::<Vec<_>>();
        assert!(junctions.iter().all(|&j| grid.is_open(j)), "closed junction");

        // Both-even posts are never carved, and nothing inside the border is left half-open
        for y in 1..grid.height() - 1 {
            for x in 1..grid.width() - 1 {
                if x % 2 == 0 && y % 2 == 0 {
                    assert!(grid.is_wall((x, y)), "carved post at {:?}", (x, y));
                }
            }
        }

        assert_eq!(grid.open_connector_count(), junctions.len() - 1);

        let mut seen = HashSet::from([(1, 1)]);
        let mut queue = VecDeque::from([(1, 1)]);
        while let Some(cell) = queue.pop_front() {
            for next in get_neighbors(cell, 2, grid) {
                if grid.is_open(between(cell, next)) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        // R*C nodes, R*C - 1 edges and connected means no cycles either
        assert_eq!(seen.len(), junctions.len(), "junction graph is disconnected");
    }

    fn assert_border(maze: &Maze) {
        let grid = maze.grid();
        let open_border = (0..grid.height())
            .flat_map(|y| (0..grid.width()).map(move |x| (x, y)))
            .filter(|&c| !grid.is_interior(c) && grid.is_open(c))
            .collect::<Vec<_>>();
        let expected = HashSet::from([maze.entrance_opening(), maze.exit_opening()]);
        assert_eq!(open_border.iter().copied().collect::<HashSet<_>>(), expected);
        assert_eq!(open_border.len(), 2);
        assert_eq!(maze.entrance().1, 1);
        assert_eq!(maze.exit().1, grid.height() - 2);
        assert!(grid.is_open(maze.entrance()));
        assert!(grid.is_open(maze.exit()));
        assert_eq!(maze.entrance().0 % 2, 1);
        assert_eq!(maze.exit().0 % 2, 1);
    }

    #[test]
    fn test_every_generator_makes_perfect_mazes() {
        for generator in Generator::ALL {
            for (rows, cols) in SIZES {
                for seed in 0..5 {
                    let mut rng = get_rng(Some(seed));
                    let maze = generate_maze(Grid::for_display(rows, cols), generator, &mut rng);
                    assert_perfect(maze.grid());
                    assert_border(&maze);
                }
            }
        }
    }

    #[test]
    fn test_five_by_five() {
        for generator in Generator::ALL {
            let maze = generate_maze(Grid::for_display(5, 5), generator, &mut get_rng(Some(7)));
            let grid = maze.grid();
            assert_eq!((grid.width(), grid.height()), (5, 5));
            assert_eq!(maze.entrance_opening().1, 0);
            assert_eq!(maze.exit_opening().1, 4);
            // 2x2 junctions -> 3 connectors
            assert_eq!(grid.open_connector_count(), 3);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let glyphs = Glyphs::default();
        for generator in Generator::ALL {
            let a = generate_text(21, 31, generator, Some(42), &glyphs);
            let b = generate_text(21, 31, generator, Some(42), &glyphs);
            assert_eq!(a, b, "{} is not reproducible", generator);
        }
    }

    #[test]
    fn test_generate_text_shape() {
        let text = generate_text(8, 12, Generator::Kruskal, Some(3), &Glyphs::default());
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 7);
        assert!(lines.iter().all(|line| line.chars().count() == 11 * 2));
        assert!(text.ends_with('\n'));
    }
}
