pub mod cell;
pub mod grid;
pub mod text;

use std::collections::HashSet;

pub use cell::{BlockStyle, GlyphError, Glyphs};
pub use grid::{Coord, Grid};
pub use text::{ParseError, ParsedMaze, parse, render};

/// A generated maze: the carved grid plus the junctions just inside its two border openings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    /// Junction on row 1, below the opening on the top row.
    entrance: Coord,
    /// Junction on the second to last row, above the opening on the bottom row.
    exit: Coord,
}

impl Maze {
    /// Opens the border cell above `entrance_col` on the top row and below `exit_col` on the
    /// bottom row.
    ///
    /// # Panics
    /// If either column is not a junction column of `grid`.
    pub fn with_openings(mut grid: Grid, entrance_col: usize, exit_col: usize) -> Self {
        for col in [entrance_col, exit_col] {
            assert!(
                col % 2 == 1 && col + 1 < grid.width(),
                "column {} is not a junction column",
                col
            );
        }
        let bottom = grid.height() - 1;
        grid.set_open((entrance_col, 0));
        grid.set_open((exit_col, bottom));
        Maze {
            entrance: (entrance_col, 1),
            exit: (exit_col, bottom - 1),
            grid,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn entrance(&self) -> Coord {
        self.entrance
    }

    pub fn exit(&self) -> Coord {
        self.exit
    }

    /// Border cell of the entrance.
    pub fn entrance_opening(&self) -> Coord {
        (self.entrance.0, 0)
    }

    /// Border cell of the exit.
    pub fn exit_opening(&self) -> Coord {
        (self.exit.0, self.grid.height() - 1)
    }

    /// Serializes the maze with nothing highlighted.
    pub fn to_text(&self, glyphs: &Glyphs) -> String {
        render(&self.grid, &HashSet::new(), glyphs)
    }
}

/// Get neighbors of a cell.
/// A neighbor is a cell `step` cells away in the cardinal directions, in the fixed order
/// up, right, down, left. Neighbors that would fall outside the grid are skipped.
pub fn get_neighbors(
    coord: Coord,
    step: usize,
    grid: &Grid,
) -> impl Iterator<Item = Coord> + use<> {
    let (x, y) = coord;
    let (width, height) = (grid.width(), grid.height());
    [
        // checked_sub filters out underflow, the bounds check filters out the far edges
        y.checked_sub(step).map(|ny| (x, ny)),
        Some((x + step, y)),
        Some((x, y + step)),
        x.checked_sub(step).map(|nx| (nx, y)),
    ]
    .into_iter()
    .flatten()
    .filter(move |&(nx, ny)| nx < width && ny < height)
}

/// The cell halfway between two junctions two steps apart.
pub fn between(a: Coord, b: Coord) -> Coord {
    ((a.0 + b.0) / 2, (a.1 + b.1) / 2)
}
