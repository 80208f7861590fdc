use rand::{Rng, seq::SliceRandom};

use crate::maze::{Coord, Grid};

/// Disjoint-set forest over junction indices, with path compression and union by rank.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        // Iterative so that long chains cannot blow the stack
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn unite(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false; // Already in same set
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Greater => {
                self.parent[root_y] = root_x;
            }
            std::cmp::Ordering::Less => {
                self.parent[root_x] = root_y;
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
        true
    }
}

/// Candidate connector between two junctions, tagged with their union-find indices
#[derive(Clone, Copy)]
struct Edge {
    wall: Coord,
    cell1: usize,
    cell2: usize,
}

/// Index of a junction in the union-find forest.
fn junction_index(coord: Coord, cells_per_row: usize) -> usize {
    (coord.1 / 2) * cells_per_row + coord.0 / 2
}

/// Randomized Kruskal's: opens every junction, then walks the shuffled connectors once and keeps
/// each one that joins two separate regions.
pub fn randomized_kruskal<R: Rng>(grid: &mut Grid, rng: &mut R) {
    let cells_per_row = grid.cells_per_row();
    let total_cells = cells_per_row * grid.cells_per_column();
    let (width, height) = (grid.width(), grid.height());

    // Collect the right and lower connector of every junction
    let mut edges: Vec<Edge> = grid
        .junctions()
        .flat_map(|(x, y)| {
            let idx = junction_index((x, y), cells_per_row);
            [
                (x + 2 < width).then(|| Edge {
                    wall: (x + 1, y),
                    cell1: idx,
                    cell2: idx + 1,
                }),
                (y + 2 < height).then(|| Edge {
                    wall: (x, y + 1),
                    cell1: idx,
                    cell2: idx + cells_per_row,
                }),
            ]
        })
        .flatten()
        .collect();

    for junction in grid.junctions() {
        grid.set_open(junction);
    }

    // Shuffle edges randomly
    edges.shuffle(rng);

    let mut uf = UnionFind::new(total_cells);
    for edge in edges {
        // Joining cells of the same set would close a loop
        if uf.unite(edge.cell1, edge.cell2) {
            grid.set_open(edge.wall);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    #[test]
    fn test_union_find() {
        let mut uf = UnionFind::new(5);
        assert!(uf.unite(0, 1));
        assert!(uf.unite(3, 4));
        assert!(!uf.unite(1, 0));
        assert_ne!(uf.find(0), uf.find(3));
        assert!(uf.unite(1, 4));
        assert_eq!(uf.find(0), uf.find(3));
        assert!(!uf.unite(0, 4));
        assert_ne!(uf.find(2), uf.find(0));
    }

    #[test]
    fn test_junction_index() {
        // 3 junctions per row in a 7-wide grid
        assert_eq!(junction_index((1, 1), 3), 0);
        assert_eq!(junction_index((5, 1), 3), 2);
        assert_eq!(junction_index((1, 3), 3), 3);
        assert_eq!(junction_index((5, 5), 3), 8);
    }

    #[test]
    fn test_randomized_kruskal() {
        let mut grid = Grid::new(9, 7);
        randomized_kruskal(&mut grid, &mut get_rng(Some(11)));
        assert!(grid.junctions().all(|j| grid.is_open(j)));
        // 4x3 junctions
        assert_eq!(grid.open_connector_count(), 11);
    }
}
