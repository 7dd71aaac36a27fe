use crate::grid::Cell;
use crate::Grid;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// Trace logging flag - set to true to print every expansion
const TRACE_SEARCH: bool = false;

/// How a cheaper route to an already-open cell is scored.
///
/// `Reference` keeps the historical behaviour of charging one extra step on
/// that branch (`g = g' + 1`); `Exact` stores the true tentative cost `g'`.
/// In a carved maze every cell has a single route, so the branch never fires
/// and both produce the same path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GScoring {
    #[default]
    Reference,
    Exact,
}

/// Outcome of a single search step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStep {
    /// `cell` was closed; `open` and `closed` are the set sizes afterwards
    Expanded { cell: usize, open: usize, closed: usize },
    /// The goal was selected; `length` is the path's edge count
    GoalReached { length: usize },
    /// The frontier ran dry before reaching the goal
    NoSolution,
    /// Called after the search terminated; nothing changed
    Idle,
}

/// Straight-line distance between two cells in grid coordinates
pub fn heuristic(a: &Cell, b: &Cell) -> f64 {
    let di = (a.i() - b.i()) as f64;
    let dj = (a.j() - b.j()) as f64;
    (di * di + dj * dj).sqrt()
}

/// Incremental A* from the grid's start cell to its goal cell.
///
/// The open set keeps insertion order and the cell with the lowest `f` wins,
/// earliest entry first on ties, so runs are reproducible.
pub struct PathFinder {
    grid: Grid,
    start: usize,
    goal: usize,
    open_set: Vec<usize>,
    open_members: HashSet<usize>,
    closed_set: HashSet<usize>,
    current: Option<usize>,
    path: Vec<usize>,
    on_path: HashSet<usize>,
    scoring: GScoring,
    done: bool,
    no_solution: bool,
    expansions: usize,
}

impl PathFinder {
    /// Prepare a search over a finished maze with the reference scoring
    pub fn new(grid: Grid) -> Self {
        Self::with_scoring(grid, GScoring::default())
    }

    pub fn with_scoring(mut grid: Grid, scoring: GScoring) -> Self {
        add_neighbors(&mut grid);

        let start = grid.start_index();
        let goal = grid.goal_index();
        {
            let cell = grid.cell_mut(start);
            cell.g = 0.0;
            cell.h = 0.0;
            cell.f = 0.0;
            cell.previous = None;
        }

        PathFinder {
            grid,
            start,
            goal,
            open_set: vec![start],
            open_members: HashSet::from([start]),
            closed_set: HashSet::new(),
            current: None,
            path: Vec::new(),
            on_path: HashSet::new(),
            scoring,
            done: false,
            no_solution: false,
            expansions: 0,
        }
    }

    /// Advance the search by one expansion
    pub fn step(&mut self) -> SearchStep {
        if self.done || self.no_solution {
            return SearchStep::Idle;
        }

        let Some(winner) = self.lowest_f() else {
            self.no_solution = true;
            if TRACE_SEARCH {
                println!("[A*] Open set exhausted after {} expansions", self.expansions);
            }
            return SearchStep::NoSolution;
        };

        let current = self.open_set[winner];
        self.current = Some(current);
        self.find_the_path(current);

        if current == self.goal {
            self.done = true;
            if TRACE_SEARCH {
                println!(
                    "[A*] Goal {} reached after {} expansions, length {}",
                    current,
                    self.expansions,
                    self.path_length()
                );
            }
            return SearchStep::GoalReached {
                length: self.path_length(),
            };
        }

        self.open_set.remove(winner);
        self.open_members.remove(&current);
        self.closed_set.insert(current);
        self.expansions += 1;

        for position in 0..self.grid.cell(current).search_neighbors.len() {
            let neighbor = self.grid.cell(current).search_neighbors[position];
            if self.closed_set.contains(&neighbor) || self.grid.cell(neighbor).is_wall {
                continue;
            }
            self.relax(current, neighbor);
        }

        if TRACE_SEARCH {
            let (i, j) = self.grid.coords(current);
            println!(
                "[A*] Expanded ({},{}) = ID {}, g={:.2}, f={:.2}, open={}",
                i,
                j,
                current,
                self.grid.cell(current).g,
                self.grid.cell(current).f,
                self.open_set.len()
            );
        }

        SearchStep::Expanded {
            cell: current,
            open: self.open_set.len(),
            closed: self.closed_set.len(),
        }
    }

    /// Position in the open set of the lowest `f`, first entry on ties
    fn lowest_f(&self) -> Option<usize> {
        let mut winner: Option<usize> = None;
        for (position, &index) in self.open_set.iter().enumerate() {
            match winner {
                Some(best) if self.grid.cell(index).f >= self.grid.cell(self.open_set[best]).f => {}
                _ => winner = Some(position),
            }
        }
        winner
    }

    /// Score `neighbor` as reached through `current`
    fn relax(&mut self, current: usize, neighbor: usize) {
        let tentative_g = self.grid.cell(current).g + 1.0;

        let improved = if self.open_members.contains(&neighbor) {
            if tentative_g < self.grid.cell(neighbor).g {
                self.grid.cell_mut(neighbor).g = match self.scoring {
                    GScoring::Reference => tentative_g + 1.0,
                    GScoring::Exact => tentative_g,
                };
                true
            } else {
                false
            }
        } else {
            self.grid.cell_mut(neighbor).g = tentative_g;
            self.open_set.push(neighbor);
            self.open_members.insert(neighbor);
            true
        };

        if improved {
            let h = heuristic(self.grid.cell(neighbor), self.grid.cell(self.goal));
            let cell = self.grid.cell_mut(neighbor);
            cell.h = h;
            cell.f = cell.g + cell.h;
            cell.previous = Some(current);
        }
    }

    /// Rebuild the path from `from` back to the start
    fn find_the_path(&mut self, from: usize) {
        self.path.clear();
        self.on_path.clear();

        let mut cell = Some(from);
        while let Some(index) = cell {
            assert!(
                self.path.len() < self.grid.len(),
                "predecessor chain from {} does not reach the start",
                from
            );
            self.path.push(index);
            self.on_path.insert(index);
            cell = self.grid.cell(index).previous;
        }
    }

    /// Goal reached
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn has_no_solution(&self) -> bool {
        self.no_solution
    }

    /// Either terminal state reached
    pub fn is_finished(&self) -> bool {
        self.done || self.no_solution
    }

    /// Best-known path, from the last selected cell back to the start
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Edge count of the current path
    pub fn path_length(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn is_on_path(&self, index: usize) -> bool {
        self.on_path.contains(&index)
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Frontier in insertion order
    pub fn open_set(&self) -> &[usize] {
        &self.open_set
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open_members.contains(&index)
    }

    pub fn is_closed(&self, index: usize) -> bool {
        self.closed_set.contains(&index)
    }

    pub fn closed_count(&self) -> usize {
        self.closed_set.len()
    }

    pub fn expansions(&self) -> usize {
        self.expansions
    }

    pub fn scoring(&self) -> GScoring {
        self.scoring
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn goal(&self) -> usize {
        self.goal
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Step until the goal is reached or the frontier is exhausted
    pub fn run(&mut self) -> SearchStep {
        loop {
            match self.step() {
                SearchStep::Expanded { .. } => continue,
                outcome => return outcome,
            }
        }
    }
}

/// Fill every cell's four-way neighbour list; walls are filtered during search
fn add_neighbors(grid: &mut Grid) {
    let rows = grid.rows();
    let cols = grid.cols();

    for index in 0..grid.len() {
        let (i, j) = grid.coords(index);
        let mut neighbors = Vec::with_capacity(4);
        if i < rows - 1 {
            neighbors.push(grid.index(i + 1, j));
        }
        if i > 0 {
            neighbors.push(grid.index(i - 1, j));
        }
        if j < cols - 1 {
            neighbors.push(grid.index(i, j + 1));
        }
        if j > 0 {
            neighbors.push(grid.index(i, j - 1));
        }
        grid.cell_mut(index).search_neighbors = neighbors;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(rows: i32, cols: i32) -> Grid {
        Grid::with_walls(rows, cols, &[]).unwrap()
    }

    #[test]
    fn test_search_neighbors_order() {
        let finder = PathFinder::new(open_grid(3, 4));
        let grid = finder.grid();

        // Interior (1,1): down, up, right, left
        assert_eq!(grid.cell(5).search_neighbors(), &[9, 1, 6, 4]);
        // Corner (0,0)
        assert_eq!(grid.cell(0).search_neighbors(), &[4, 1]);
        // Corner (2,3)
        assert_eq!(grid.cell(11).search_neighbors(), &[7, 10]);
    }

    #[test]
    fn test_heuristic_is_euclidean() {
        let grid = open_grid(5, 5);
        assert_eq!(heuristic(grid.cell(0), grid.cell(0)), 0.0);
        assert_eq!(heuristic(grid.cell(0), grid.cell(4)), 4.0);
        // (0,0) to (3,4)
        assert!((heuristic(grid.cell(0), grid.cell(19)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_lowest_f_prefers_earliest_on_ties() {
        let mut finder = PathFinder::new(open_grid(3, 3));
        finder.open_set = vec![4, 2, 7, 1];
        finder.open_members = finder.open_set.iter().copied().collect();
        for &(index, f) in &[(4, 3.0), (2, 2.0), (7, 2.0), (1, 5.0)] {
            finder.grid.cell_mut(index).f = f;
        }

        assert_eq!(finder.lowest_f(), Some(1));
    }

    #[test]
    fn test_reference_scoring_adds_a_step_on_reopen() {
        let mut finder = PathFinder::new(open_grid(3, 3));
        finder.open_set.push(4);
        finder.open_members.insert(4);
        finder.grid.cell_mut(4).g = 10.0;
        finder.grid.cell_mut(1).g = 2.0;

        finder.relax(1, 4);

        let cell = finder.grid.cell(4);
        assert_eq!(cell.g(), 4.0);
        assert_eq!(cell.previous(), Some(1));
        assert!((cell.f() - (4.0 + heuristic(cell, finder.grid.cell(finder.goal)))).abs() < 1e-12);
    }

    #[test]
    fn test_exact_scoring_on_reopen() {
        let mut finder = PathFinder::with_scoring(open_grid(3, 3), GScoring::Exact);
        finder.open_set.push(4);
        finder.open_members.insert(4);
        finder.grid.cell_mut(4).g = 10.0;
        finder.grid.cell_mut(1).g = 2.0;

        finder.relax(1, 4);

        assert_eq!(finder.grid.cell(4).g(), 3.0);
    }

    #[test]
    fn test_reopen_without_improvement_is_ignored() {
        let mut finder = PathFinder::new(open_grid(3, 3));
        finder.open_set.push(4);
        finder.open_members.insert(4);
        finder.grid.cell_mut(4).g = 2.0;
        finder.grid.cell_mut(4).previous = Some(3);
        finder.grid.cell_mut(1).g = 2.0;

        finder.relax(1, 4);

        assert_eq!(finder.grid.cell(4).g(), 2.0);
        assert_eq!(finder.grid.cell(4).previous(), Some(3));
    }

    #[test]
    fn test_new_neighbor_joins_open_set() {
        let mut finder = PathFinder::new(open_grid(3, 3));
        finder.relax(0, 1);

        assert_eq!(finder.open_set(), &[0, 1]);
        let cell = finder.grid.cell(1);
        assert_eq!(cell.g(), 1.0);
        assert_eq!(cell.previous(), Some(0));
    }

    #[test]
    fn test_open_grid_straight_line() {
        // 3x4 open grid: goal = 12 - 4 - 2 = 6 = (1,2)
        let mut finder = PathFinder::new(open_grid(3, 4));
        assert_eq!(finder.goal(), 6);

        let outcome = finder.run();
        assert_eq!(outcome, SearchStep::GoalReached { length: 3 });
        assert_eq!(finder.path().first(), Some(&6));
        assert_eq!(finder.path().last(), Some(&0));
        assert_eq!(finder.step(), SearchStep::Idle);
    }

    #[test]
    fn test_expansion_relaxes_every_neighbor() {
        // Interior cell (1,1) of a 3x4 open grid, reached with g = 2
        let mut finder = PathFinder::new(open_grid(3, 4));
        finder.open_set = vec![5];
        finder.open_members = [5].into_iter().collect();
        finder.grid.cell_mut(5).g = 2.0;

        assert!(matches!(finder.step(), SearchStep::Expanded { cell: 5, .. }));
        assert_eq!(finder.grid().cell(5).search_neighbors(), &[9, 1, 6, 4]);
        assert_eq!(finder.open_set(), &[9, 1, 6, 4]);
        for index in [9, 1, 6, 4] {
            assert_eq!(finder.grid().cell(index).g(), 3.0);
            assert_eq!(finder.grid().cell(index).previous(), Some(5));
        }
    }

    #[test]
    fn test_walled_off_goal_has_no_solution() {
        // 4x4: goal = 10 = (2,2), fenced by 6, 9, 11, 14
        let grid = Grid::with_walls(4, 4, &[6, 9, 11, 14]).unwrap();
        let mut finder = PathFinder::new(grid);

        assert_eq!(finder.run(), SearchStep::NoSolution);
        assert!(finder.has_no_solution());
        assert!(!finder.is_done());
        assert!(!finder.is_open(10));
        // (3,3) is cut off as well, leaving ten reachable cells
        assert_eq!(finder.closed_count(), 10);
        assert_eq!(finder.step(), SearchStep::Idle);
    }
}
