/// A `(column, row)` position in the grid. Used as map key and set element by the solvers.
pub type Coord = (usize, usize);

/// Rectangular wall/passage matrix. `true` is a wall, `false` an open passage.
///
/// Cells whose column and row are both odd are junctions (maze rooms), cells with exactly one
/// odd coordinate are connectors between two junctions, and both-even cells are wall posts that
/// are never carved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[bool]>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Smallest grid that still holds one junction inside its border.
    pub const MIN_DIMENSION: usize = 3;

    /// Creates a `width` x `height` grid filled with walls.
    pub fn new(width: usize, height: usize) -> Self {
        let data = vec![true; width * height].into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }

    /// Creates an all-wall grid sized for a display area of `rows` x `cols` cells.
    ///
    /// Each dimension is rounded down to the nearest odd value, so the grid always has a
    /// one-cell border around `2k+1` rows and `2m+1` columns, and never drops below
    /// [`Grid::MIN_DIMENSION`].
    pub fn for_display(rows: usize, cols: usize) -> Self {
        Grid::new(Grid::round_to_odd(cols), Grid::round_to_odd(rows))
    }

    fn round_to_odd(n: usize) -> usize {
        let odd = if n % 2 == 0 { n.saturating_sub(1) } else { n };
        odd.max(Grid::MIN_DIMENSION)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Junctions per row, i.e. `(width - 1) / 2`.
    pub fn cells_per_row(&self) -> usize {
        self.width.saturating_sub(1) / 2
    }

    /// Junctions per column, i.e. `(height - 1) / 2`.
    pub fn cells_per_column(&self) -> usize {
        self.height.saturating_sub(1) / 2
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    /// Whether the coordinate lies strictly inside the outer border.
    pub fn is_interior(&self, coord: Coord) -> bool {
        let (x, y) = coord;
        x > 0 && y > 0 && x + 1 < self.width && y + 1 < self.height
    }

    pub fn is_junction(coord: Coord) -> bool {
        coord.0 % 2 == 1 && coord.1 % 2 == 1
    }

    pub fn is_connector(coord: Coord) -> bool {
        (coord.0 % 2 == 1) != (coord.1 % 2 == 1)
    }

    /// Out-of-bounds coordinates read as walls.
    pub fn is_wall(&self, coord: Coord) -> bool {
        !self.is_in_bounds(coord) || self.data[self.ravel_index(coord.0, coord.1)]
    }

    pub fn is_open(&self, coord: Coord) -> bool {
        !self.is_wall(coord)
    }

    /// Sets the cell at `coord`.
    ///
    /// # Panics
    /// If `coord` is out of bounds.
    pub fn set(&mut self, coord: Coord, wall: bool) {
        assert!(
            self.is_in_bounds(coord),
            "coordinate {:?} is out of bounds for a {}x{} grid",
            coord,
            self.width,
            self.height
        );
        let idx = self.ravel_index(coord.0, coord.1);
        self.data[idx] = wall;
    }

    pub fn set_open(&mut self, coord: Coord) {
        self.set(coord, false);
    }

    /// Iterates over every junction coordinate, row by row.
    pub fn junctions(&self) -> impl Iterator<Item = Coord> + use<> {
        let (width, height) = (self.width, self.height);
        (1..height.saturating_sub(1))
            .step_by(2)
            .flat_map(move |y| (1..width.saturating_sub(1)).step_by(2).map(move |x| (x, y)))
    }

    /// Number of interior connector cells that have been opened.
    pub fn open_connector_count(&self) -> usize {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&c| self.is_interior(c) && Grid::is_connector(c) && self.is_open(c))
            .count()
    }

    fn ravel_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = bool;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}
