use std::collections::{HashMap, HashSet, VecDeque};

use super::{DIRECTIONS, Emitter, SolveEvent, StepSink, step};
use crate::maze::{Coord, Glyphs, ParsedMaze};

/// Breadth-first search from the entrance.
///
/// Exploration snapshots highlight every cell dequeued so far. Once the exit is dequeued the
/// highlight is replaced by the shortest path, rebuilt from the parent links, and one final
/// [`SolveEvent::Solution`] snapshot is emitted.
pub fn solve_bfs(
    maze: &ParsedMaze,
    glyphs: &Glyphs,
    sink: Option<&mut dyn StepSink>,
) -> Option<HashSet<Coord>> {
    let grid = &maze.grid;
    let (width, height) = (grid.width(), grid.height());
    let mut emitter = Emitter::new(maze, glyphs, sink);

    let start = maze.entrance;
    let goal = maze.exit;

    let mut visited = vec![false; width * height];
    // Every discovered cell except the start points back to the cell it was found from
    let mut parent: HashMap<Coord, Coord> = HashMap::new();
    let mut explored = HashSet::new();
    let mut queue = VecDeque::from([start]);
    visited[start.1 * width + start.0] = true;

    while let Some(current) = queue.pop_front() {
        explored.insert(current);
        emitter.emit(SolveEvent::Visit(current), &explored);

        if current == goal {
            let path = reconstruct_path(&parent, goal);
            emitter.emit(SolveEvent::Solution, &path);
            return Some(path);
        }

        for dir in DIRECTIONS {
            let Some(next) = step(current, dir, width, height) else {
                continue;
            };
            let idx = next.1 * width + next.0;
            if !visited[idx] && grid.is_open(next) {
                visited[idx] = true;
                parent.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    None
}

/// Walks the parent links from `goal` back to the start, both included.
fn reconstruct_path(parent: &HashMap<Coord, Coord>, goal: Coord) -> HashSet<Coord> {
    let mut path = HashSet::from([goal]);
    let mut current = goal;
    while let Some(&prev) = parent.get(&current) {
        path.insert(prev);
        current = prev;
    }
    path
}
