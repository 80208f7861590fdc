//! Text form of a maze: one line per grid row, one fixed-width glyph pair per grid column.
//!
//! This text is both what gets displayed and what the solvers read back, so a solve always
//! works on whatever is currently on screen rather than on generator state.

use std::collections::HashSet;
use std::fmt;

use super::cell::Glyphs;
use super::grid::{Coord, Grid};

/// Renders `grid`, drawing every cell in `highlighted` with the solution glyph.
pub fn render(grid: &Grid, highlighted: &HashSet<Coord>, glyphs: &Glyphs) -> String {
    let mut out = String::with_capacity(grid.height() * (grid.width() * 2 * 3 + 1));
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            out.push_str(glyphs.select(grid[(x, y)], highlighted.contains(&(x, y))));
        }
        out.push('\n');
    }
    out
}

/// A grid recovered from text, with the openings found on its top and bottom rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMaze {
    pub grid: Grid,
    /// Open cell on row 0.
    pub entrance: Coord,
    /// Open cell on the last row.
    pub exit: Coord,
}

/// Why a piece of text could not be read back as a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No non-blank lines.
    Empty,
    OddRowWidth {
        row: usize,
    },
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    MissingEntrance,
    MissingExit,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid maze: ")?;
        match self {
            ParseError::Empty => write!(f, "no rows"),
            ParseError::OddRowWidth { row } => {
                write!(f, "row {} does not split into glyph pairs", row)
            }
            ParseError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} characters, expected {}",
                row, found, expected
            ),
            ParseError::MissingEntrance => write!(f, "no opening on the top row"),
            ParseError::MissingExit => write!(f, "no opening on the bottom row"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Reads maze text back into a grid.
///
/// Blank lines are skipped. A pair equal to the wall glyph is a wall; any other pair, including
/// a previously highlighted solution, is open.
pub fn parse(text: &str, glyphs: &Glyphs) -> Result<ParsedMaze, ParseError> {
    let lines = text
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let line_len = lines.first().map(Vec::len).ok_or(ParseError::Empty)?;

    for (row, line) in lines.iter().enumerate() {
        if line.len() % Glyphs::CELL_WIDTH != 0 {
            return Err(ParseError::OddRowWidth { row });
        }
        if line.len() != line_len {
            return Err(ParseError::RaggedRow {
                row,
                expected: line_len,
                found: line.len(),
            });
        }
    }

    let width = line_len / Glyphs::CELL_WIDTH;
    let height = lines.len();
    let mut grid = Grid::new(width, height);
    for (y, line) in lines.iter().enumerate() {
        for (x, pair) in line.chunks(Glyphs::CELL_WIDTH).enumerate() {
            if !glyphs.is_wall_pair(pair) {
                grid.set_open((x, y));
            }
        }
    }

    let first_opening = |y: usize| (0..width).map(|x| (x, y)).find(|&c| grid.is_open(c));
    let entrance = first_opening(0).ok_or(ParseError::MissingEntrance)?;
    let exit = first_opening(height - 1).ok_or(ParseError::MissingExit)?;

    Ok(ParsedMaze {
        grid,
        entrance,
        exit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{Generator, generate_maze, get_rng};
    use crate::maze::BlockStyle;

    const SMALL: &str = "\
██  ██
██  ██
██  ██
";

    fn small_grid() -> Grid {
        let mut grid = Grid::new(3, 3);
        grid.set_open((1, 0));
        grid.set_open((1, 1));
        grid.set_open((1, 2));
        grid
    }

    #[test]
    fn test_render() {
        let glyphs = Glyphs::default();
        assert_eq!(render(&small_grid(), &HashSet::new(), &glyphs), SMALL);

        let highlighted = HashSet::from([(1, 1), (0, 0)]);
        assert_eq!(
            render(&small_grid(), &highlighted, &glyphs),
            "▒▒  ██\n██▒▒██\n██  ██\n"
        );
    }

    #[test]
    fn test_parse() {
        let parsed = parse(SMALL, &Glyphs::default()).unwrap();
        assert_eq!(parsed.grid, small_grid());
        assert_eq!(parsed.entrance, (1, 0));
        assert_eq!(parsed.exit, (1, 2));
    }

    #[test]
    fn test_generated_mazes_read_back_unchanged() {
        for style in BlockStyle::ALL {
            let glyphs = style.glyphs();
            for generator in Generator::ALL {
                for (rows, cols) in [(3, 3), (7, 13), (21, 9), (25, 41)] {
                    let mut rng = get_rng(Some((rows * cols) as u64));
                    let maze = generate_maze(Grid::for_display(rows, cols), generator, &mut rng);
                    let parsed = parse(&render(maze.grid(), &HashSet::new(), &glyphs), &glyphs)
                        .unwrap();
                    assert_eq!(&parsed.grid, maze.grid(), "{} {}x{}", generator, rows, cols);
                    assert_eq!(parsed.entrance, maze.entrance_opening());
                    assert_eq!(parsed.exit, maze.exit_opening());
                }
            }
        }
    }

    #[test]
    fn test_parse_treats_solution_glyph_as_open() {
        let glyphs = Glyphs::default();
        let solved = render(&small_grid(), &HashSet::from([(1, 0), (1, 1)]), &glyphs);
        let parsed = parse(&solved, &glyphs).unwrap();
        assert_eq!(parsed.grid, small_grid());
        assert_eq!(parsed.entrance, (1, 0));
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let text = format!("\n{}\n\n", SMALL);
        let parsed = parse(&text, &Glyphs::default()).unwrap();
        assert_eq!(parsed.grid.height(), 3);
    }

    #[test]
    fn test_parse_picks_first_opening() {
        let text = "██    ██\n██    ██\n██  ████\n";
        let parsed = parse(text, &Glyphs::default()).unwrap();
        assert_eq!(parsed.entrance, (1, 0));
        assert_eq!(parsed.exit, (1, 2));
    }

    #[test]
    fn test_parse_errors() {
        let glyphs = Glyphs::default();
        assert_eq!(parse("", &glyphs), Err(ParseError::Empty));
        assert_eq!(parse("\n\n", &glyphs), Err(ParseError::Empty));
        assert_eq!(
            parse("██  ██\n██ ██\n", &glyphs),
            Err(ParseError::OddRowWidth { row: 1 })
        );
        assert_eq!(
            parse("██  ██\n████\n", &glyphs),
            Err(ParseError::RaggedRow {
                row: 1,
                expected: 6,
                found: 4
            })
        );
        assert_eq!(
            parse("██████\n██  ██\n██  ██\n", &glyphs),
            Err(ParseError::MissingEntrance)
        );
        assert_eq!(
            parse("██  ██\n██  ██\n██████\n", &glyphs),
            Err(ParseError::MissingExit)
        );
    }

    #[test]
    fn test_error_message() {
        assert_eq!(ParseError::Empty.to_string(), "invalid maze: no rows");
    }
}
