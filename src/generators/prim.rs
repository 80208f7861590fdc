use rand::Rng;

use crate::maze::{Coord, Grid, get_neighbors};

/// The two junctions a connector sits between, ordered (up, down) or (left, right).
fn connector_sides(connector: Coord) -> (Coord, Coord) {
    let (x, y) = connector;
    if x % 2 == 0 {
        // Vertical wall piece between a left and a right junction
        ((x - 1, y), (x + 1, y))
    } else {
        ((x, y - 1), (x, y + 1))
    }
}

/// Connectors around `junction` that still lead to an uncarved junction.
fn frontier_walls(junction: Coord, grid: &Grid) -> Vec<Coord> {
    get_neighbors(junction, 1, grid)
        .filter(|&c| grid.is_interior(c))
        .filter(|&c| {
            let (a, b) = connector_sides(c);
            let other = if a == junction { b } else { a };
            grid.is_wall(other)
        })
        .collect()
}

/// Randomized Prim's: grows the maze from the top-left junction by repeatedly carving a random
/// frontier wall.
pub fn randomized_prim<R: Rng>(grid: &mut Grid, rng: &mut R) {
    let start = (1, 1);
    grid.set_open(start);

    // A wall can be listed more than once; stale copies are dropped when drawn
    let mut frontier = frontier_walls(start, grid);

    while !frontier.is_empty() {
        // Randomly select a wall from the frontier
        let idx = rng.random_range(0..frontier.len());
        let wall = frontier.swap_remove(idx);

        let (a, b) = connector_sides(wall);
        let target = match (grid.is_open(a), grid.is_open(b)) {
            (true, false) => b,
            (false, true) => a,
            // Both sides already carved (would close a loop) or neither reachable yet
            _ => continue,
        };

        grid.set_open(wall);
        grid.set_open(target);
        frontier.extend(frontier_walls(target, grid));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    #[test]
    fn test_connector_sides() {
        assert_eq!(connector_sides((2, 1)), ((1, 1), (3, 1)));
        assert_eq!(connector_sides((3, 4)), ((3, 3), (3, 5)));
    }

    #[test]
    fn test_frontier_walls() {
        let mut grid = Grid::new(7, 7);
        grid.set_open((1, 1));
        // Border cells above and left of (1, 1) are not connectors
        assert_eq!(frontier_walls((1, 1), &grid), vec![(2, 1), (1, 2)]);

        grid.set_open((3, 3));
        assert_eq!(frontier_walls((3, 1), &grid), vec![(4, 1)]);
    }

    #[test]
    fn test_randomized_prim() {
        let mut grid = Grid::new(7, 7);
        randomized_prim(&mut grid, &mut get_rng(Some(0)));
        // Check that the start cell is open
        assert!(grid.is_open((1, 1)));
        assert!(grid.junctions().all(|j| grid.is_open(j)));
        assert_eq!(grid.open_connector_count(), 8);
    }
}
