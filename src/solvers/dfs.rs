use std::collections::HashSet;

use super::{DIRECTIONS, Emitter, SolveEvent, StepSink, step};
use crate::maze::{Coord, Glyphs, ParsedMaze};

/// Depth-first search from the entrance, trying up, right, down, left at every cell.
///
/// Runs on an explicit stack but reports visits and backtracks in exactly the order the
/// recursive formulation would. Every snapshot highlights the live path from the entrance to
/// the current cell.
pub fn solve_dfs(
    maze: &ParsedMaze,
    glyphs: &Glyphs,
    sink: Option<&mut dyn StepSink>,
) -> Option<HashSet<Coord>> {
    let grid = &maze.grid;
    let (width, height) = (grid.width(), grid.height());
    let mut emitter = Emitter::new(maze, glyphs, sink);

    let start = maze.entrance;
    let goal = maze.exit;
    if grid.is_wall(start) {
        return None;
    }

    let mut visited = vec![false; width * height];
    let mut path = HashSet::new();

    visited[start.1 * width + start.0] = true;
    path.insert(start);
    emitter.emit(SolveEvent::Visit(start), &path);
    if start == goal {
        return Some(path);
    }

    // Each frame is a cell on the live path and the next direction to try from it
    let mut stack: Vec<(Coord, usize)> = vec![(start, 0)];

    while let Some(frame) = stack.last_mut() {
        let (cell, dir) = *frame;

        if dir == DIRECTIONS.len() {
            // Every direction failed, drop the cell from the live path
            stack.pop();
            path.remove(&cell);
            emitter.emit(SolveEvent::Backtrack(cell), &path);
            continue;
        }
        frame.1 += 1;

        let Some(next) = step(cell, DIRECTIONS[dir], width, height) else {
            continue;
        };
        let idx = next.1 * width + next.0;
        if visited[idx] || grid.is_wall(next) {
            continue;
        }

        visited[idx] = true;
        path.insert(next);
        emitter.emit(SolveEvent::Visit(next), &path);
        if next == goal {
            return Some(path);
        }
        stack.push((next, 0));
    }

    None
}
