use crate::Grid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Source of the one nondeterministic choice in the system: which candidate
/// neighbour the carving walk moves to.
pub trait RandomSource {
    /// Return an index in `0..len`. Never called with `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Seedable uniform random source
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a deterministic source
    pub fn new(seed: u64) -> Self {
        SeededRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded from the operating system
    pub fn from_entropy() -> Self {
        SeededRandom {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Outcome of a single generation step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationStep {
    /// Moved from `from` to the unvisited cell `to`, opening the `wall` slot between them
    Carved { from: usize, to: usize, wall: usize },
    /// Dead end: popped `to` off the stack
    Backtracked { to: usize },
    /// Stack exhausted, generation complete
    Finished,
    /// Called after generation completed; nothing changed
    Idle,
}

// (di, dj) offsets scanned for the next logical cell, in order
const CARVE_DIRECTIONS: [(i32, i32); 4] = [(0, -2), (2, 0), (0, 2), (-2, 0)];

/// Randomized depth-first backtracking over the doubled grid.
///
/// Each call to `step` does one unit of work so a driver can animate the carve.
pub struct MazeGenerator<R: RandomSource> {
    grid: Grid,
    random: R,
    stack: Vec<usize>,
    current: usize,
    done: bool,
    steps: usize,
}

impl<R: RandomSource> MazeGenerator<R> {
    /// Start carving from the grid's start cell
    pub fn new(mut grid: Grid, random: R) -> Self {
        let current = grid.start_index();
        grid.cell_mut(current).is_visited = true;

        MazeGenerator {
            grid,
            random,
            stack: Vec::new(),
            current,
            done: false,
            steps: 0,
        }
    }

    /// Advance the carve by one unit of work
    pub fn step(&mut self) -> GenerationStep {
        if self.done {
            return GenerationStep::Idle;
        }
        self.steps += 1;

        if let Some(next) = self.check_neighbors() {
            let from = self.current;
            self.grid.cell_mut(next).is_visited = true;
            self.stack.push(from);
            let wall = self.remove_wall(from, next);
            self.grid.cell_mut(from).generation_neighbors.clear();
            self.current = next;
            GenerationStep::Carved { from, to: next, wall }
        } else if let Some(previous) = self.stack.pop() {
            self.current = previous;
            GenerationStep::Backtracked { to: previous }
        } else {
            self.done = true;
            GenerationStep::Finished
        }
    }

    /// Rebuild the current cell's candidate list and pick one at random
    fn check_neighbors(&mut self) -> Option<usize> {
        let (i, j) = self.grid.coords(self.current);

        let mut candidates = Vec::with_capacity(CARVE_DIRECTIONS.len());
        for (di, dj) in CARVE_DIRECTIONS {
            if let Some(cell) = self.grid.cell_at(i + di, j + dj) {
                if !cell.is_visited {
                    candidates.push(self.grid.index(i + di, j + dj));
                }
            }
        }

        let choice = if candidates.is_empty() {
            None
        } else {
            let pick = self.random.pick(candidates.len());
            assert!(
                pick < candidates.len(),
                "random source returned {} for {} candidates",
                pick,
                candidates.len()
            );
            Some(candidates[pick])
        };

        self.grid.cell_mut(self.current).generation_neighbors = candidates;
        choice
    }

    /// Open the wall slot halfway between two logical cells and return its index
    fn remove_wall(&mut self, from: usize, to: usize) -> usize {
        let (fi, fj) = self.grid.coords(from);
        let (ti, tj) = self.grid.coords(to);
        let wall = self.grid.index(fi + (ti - fi) / 2, fj + (tj - fj) / 2);
        self.grid.open_passage(wall);
        wall
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The active cell of the walk
    pub fn current(&self) -> usize {
        self.current
    }

    /// Backtracking stack, bottom first
    pub fn stack(&self) -> &[usize] {
        &self.stack
    }

    /// Number of non-idle steps taken so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Step until done, returning the number of steps taken
    pub fn run(&mut self) -> usize {
        while !self.done {
            self.step();
        }
        self.steps
    }
}
