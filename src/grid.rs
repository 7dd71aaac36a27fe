use crate::error::MazeError;

/// Reference grid height used by the visualiser
pub const REFERENCE_ROWS: i32 = 50;
/// Reference grid width used by the visualiser
pub const REFERENCE_COLS: i32 = 50;

/// A single grid location.
///
/// Carries generation state (wall/visited), search state (g/h/f scores and the
/// predecessor link) and the two neighbour lists each algorithm maintains.
/// Neighbours and `previous` are flat indices into the owning `Grid`.
#[derive(Clone, Debug)]
pub struct Cell {
    i: i32,
    j: i32,
    pub(crate) is_wall: bool,
    pub(crate) is_visited: bool,
    pub(crate) g: f64,
    pub(crate) h: f64,
    pub(crate) f: f64,
    pub(crate) previous: Option<usize>,
    /// Unvisited logical cells two steps away, rebuilt on every generation step
    pub(crate) generation_neighbors: Vec<usize>,
    /// Direct four-way neighbours, filled once when the search starts
    pub(crate) search_neighbors: Vec<usize>,
}

impl Cell {
    fn new(i: i32, j: i32) -> Self {
        Cell {
            i,
            j,
            is_wall: false,
            is_visited: false,
            g: 0.0,
            h: 0.0,
            f: 0.0,
            previous: None,
            generation_neighbors: Vec::new(),
            search_neighbors: Vec::new(),
        }
    }

    /// Row
    pub fn i(&self) -> i32 {
        self.i
    }

    /// Column
    pub fn j(&self) -> i32 {
        self.j
    }

    pub fn is_wall(&self) -> bool {
        self.is_wall
    }

    pub fn is_visited(&self) -> bool {
        self.is_visited
    }

    /// True for cells the carving walk may visit (both coordinates even)
    pub fn is_logical(&self) -> bool {
        self.i % 2 == 0 && self.j % 2 == 0
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn f(&self) -> f64 {
        self.f
    }

    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    pub fn generation_neighbors(&self) -> &[usize] {
        &self.generation_neighbors
    }

    pub fn search_neighbors(&self) -> &[usize] {
        &self.search_neighbors
    }
}

/// Doubled-grid maze storage.
///
/// Cells with both coordinates even are logical maze cells; every other cell is
/// a wall slot that carving may open into a passage.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
    /// Revision number - incremented whenever a wall slot is opened
    revision: u64,
}

impl Grid {
    /// Create a grid with the doubled-grid wall pattern.
    ///
    /// A cell is a wall when either coordinate is odd, except the start
    /// (index 0) and the goal (`rows*cols - cols - 2`), which are forced open.
    pub fn new(rows: i32, cols: i32) -> Result<Self, MazeError> {
        let mut grid = Self::empty(rows, cols)?;
        for cell in &mut grid.cells {
            cell.is_wall = cell.i % 2 != 0 || cell.j % 2 != 0;
        }
        let start = grid.start_index();
        let goal = grid.goal_index();
        grid.cells[start].is_wall = false;
        grid.cells[goal].is_wall = false;
        Ok(grid)
    }

    /// Create the 50x50 reference grid
    pub fn reference() -> Self {
        match Self::new(REFERENCE_ROWS, REFERENCE_COLS) {
            Ok(grid) => grid,
            Err(e) => unreachable!("reference dimensions are valid: {}", e),
        }
    }

    /// Create a grid where every cell is open except the listed indices.
    ///
    /// Used for hand-built search scenarios; no parity rule is applied.
    pub fn with_walls(rows: i32, cols: i32, walls: &[usize]) -> Result<Self, MazeError> {
        let mut grid = Self::empty(rows, cols)?;
        let len = grid.len();
        for &index in walls {
            if index >= len {
                return Err(MazeError::WallOutOfBounds { index, len });
            }
            grid.cells[index].is_wall = true;
        }
        Ok(grid)
    }

    fn empty(rows: i32, cols: i32) -> Result<Self, MazeError> {
        if rows < 2 || cols < 2 {
            return Err(MazeError::GridTooSmall { rows, cols });
        }

        let len = match rows.checked_mul(cols) {
            Some(len) => len as usize,
            None => return Err(MazeError::GridTooLarge { rows, cols }),
        };

        let mut cells = Vec::with_capacity(len);
        for i in 0..rows {
            for j in 0..cols {
                cells.push(Cell::new(i, j));
            }
        }

        Ok(Grid {
            rows,
            cols,
            cells,
            revision: 0,
        })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of cells (`rows * cols`)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub(crate) fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    /// Cell at (i, j), or None when outside the grid
    pub fn cell_at(&self, i: i32, j: i32) -> Option<&Cell> {
        if self.in_bounds(i, j) {
            Some(&self.cells[self.index(i, j)])
        } else {
            None
        }
    }

    /// Check if (i, j) lies inside the grid
    pub fn in_bounds(&self, i: i32, j: i32) -> bool {
        i >= 0 && j >= 0 && i < self.rows && j < self.cols
    }

    /// Convert (i, j) to a flat index.
    ///
    /// Panics when (i, j) is outside the grid: callers bounds-check first, so
    /// reaching the panic means the engine computed a bad coordinate.
    pub fn index(&self, i: i32, j: i32) -> usize {
        assert!(
            self.in_bounds(i, j),
            "cell ({}, {}) is outside the {}x{} grid",
            i,
            j,
            self.rows,
            self.cols
        );
        (j + i * self.cols) as usize
    }

    /// Convert a flat index to (i, j)
    pub fn coords(&self, index: usize) -> (i32, i32) {
        let cell = &self.cells[index];
        (cell.i, cell.j)
    }

    /// Flat index of the start cell
    pub fn start_index(&self) -> usize {
        0
    }

    /// Flat index of the goal cell, `rows*cols - cols - 2`
    pub fn goal_index(&self) -> usize {
        self.cells.len() - self.cols as usize - 2
    }

    /// Turn a wall slot into a carved passage
    pub(crate) fn open_passage(&mut self, index: usize) {
        let cell = &mut self.cells[index];
        if cell.is_wall {
            self.revision += 1;
        }
        cell.is_wall = false;
        cell.is_visited = true;
    }

    /// Get current grid revision number
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Indices of logical cells (both coordinates even)
    pub fn logical_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_logical())
            .map(|(index, _)| index)
    }

    /// Render walls as '■' and open cells as '□', one line per row
    pub fn wall_layout(&self) -> String {
        let mut result = String::with_capacity(self.cells.len() * 4);
        for i in 0..self.rows {
            for j in 0..self.cols {
                let symbol = if self.cells[self.index(i, j)].is_wall {
                    '■'
                } else {
                    '□'
                };
                result.push(symbol);
            }
            result.push('\n');
        }
        result
    }
}
