use rand::Rng;

use crate::maze::{Grid, between, get_neighbors};

/// Iterative backtracking from the top-left junction.
pub fn recursive_backtrack<R: Rng>(grid: &mut Grid, rng: &mut R) {
    let start = (1, 1);
    grid.set_open(start);

    // The stack keeps only carved junctions
    let mut stack = vec![start];

    while let Some(&cell) = stack.last() {
        let neighbors = get_neighbors(cell, 2, grid)
            .filter(|&c| grid.is_interior(c) && grid.is_wall(c))
            .collect::<Vec<_>>();

        if neighbors.is_empty() {
            // Dead end, backtrack
            stack.pop();
            continue;
        }

        let neighbor = neighbors[rng.random_range(0..neighbors.len())];
        grid.set_open(between(cell, neighbor));
        grid.set_open(neighbor);
        // Carve on from the neighbor; `cell` stays below it to be revisited on the way back
        stack.push(neighbor);
    }
}
