use crate::error::MazeError;
use crate::grid::{REFERENCE_COLS, REFERENCE_ROWS};
use crate::maze::{GenerationStep, MazeGenerator, RandomSource};
use crate::pathfinding::{GScoring, PathFinder, SearchStep};
use crate::step_log::{StepEvent, StepLog};
use crate::Grid;

/// Display classification of a cell, the input a renderer picks colours from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Wall,
    /// Open but never touched by carving (the goal on odd-sized grids)
    Passage,
    /// Visited by the carving walk
    Carved,
    /// Active cell of the running phase
    Current,
    Open,
    Closed,
    /// On the current best-known path
    Path,
}

/// Drives generation to completion, then the search, one step at a time.
///
/// The search is created the moment generation finishes, from a snapshot of
/// the carved grid, so the two phases never touch the same cells.
pub struct MazeSession<R: RandomSource> {
    generator: MazeGenerator<R>,
    finder: Option<PathFinder>,
    scoring: GScoring,
    log: Option<StepLog>,
}

impl<R: RandomSource> MazeSession<R> {
    pub fn new(rows: i32, cols: i32, random: R, scoring: GScoring) -> Result<Self, MazeError> {
        let grid = Grid::new(rows, cols)?;
        Ok(MazeSession {
            generator: MazeGenerator::new(grid, random),
            finder: None,
            scoring,
            log: None,
        })
    }

    /// Session over the 50x50 reference grid
    pub fn reference(random: R, scoring: GScoring) -> Result<Self, MazeError> {
        Self::new(REFERENCE_ROWS, REFERENCE_COLS, random, scoring)
    }

    /// Record every step outcome in a `StepLog`
    pub fn with_step_log(mut self) -> Self {
        self.log = Some(StepLog::new());
        self
    }

    pub fn generation_step(&mut self) -> GenerationStep {
        let outcome = self.generator.step();
        if outcome != GenerationStep::Idle {
            self.record(StepEvent::Generation(outcome));
        }
        if outcome == GenerationStep::Finished {
            let grid = self.generator.grid().clone();
            self.finder = Some(PathFinder::with_scoring(grid, self.scoring));
        }
        outcome
    }

    pub fn generation_done(&self) -> bool {
        self.generator.is_done()
    }

    /// Advance the search; `Idle` until generation has finished
    pub fn search_step(&mut self) -> SearchStep {
        let outcome = match self.finder.as_mut() {
            Some(finder) => finder.step(),
            None => return SearchStep::Idle,
        };
        if outcome != SearchStep::Idle {
            self.record(StepEvent::Search(outcome));
        }
        outcome
    }

    pub fn search_done(&self) -> bool {
        self.finder.as_ref().is_some_and(|finder| finder.is_done())
    }

    pub fn search_has_no_solution(&self) -> bool {
        self.finder.as_ref().is_some_and(|finder| finder.has_no_solution())
    }

    /// Run both phases to their terminal state and return the search outcome
    pub fn run_to_completion(&mut self) -> SearchStep {
        while !self.generation_done() {
            self.generation_step();
        }
        loop {
            match self.search_step() {
                SearchStep::Expanded { .. } => continue,
                outcome => return outcome,
            }
        }
    }

    fn record(&mut self, event: StepEvent) {
        if let Some(log) = self.log.as_mut() {
            log.log(event);
        }
    }

    /// The grid of the active phase
    pub fn grid(&self) -> &Grid {
        match &self.finder {
            Some(finder) => finder.grid(),
            None => self.generator.grid(),
        }
    }

    pub fn generator(&self) -> &MazeGenerator<R> {
        &self.generator
    }

    pub fn finder(&self) -> Option<&PathFinder> {
        self.finder.as_ref()
    }

    pub fn step_log(&self) -> Option<&StepLog> {
        self.log.as_ref()
    }

    /// Best-known path, goal end first; empty before the search starts
    pub fn path(&self) -> &[usize] {
        match &self.finder {
            Some(finder) => finder.path(),
            None => &[],
        }
    }

    pub fn is_on_path(&self, index: usize) -> bool {
        self.finder.as_ref().is_some_and(|finder| finder.is_on_path(index))
    }

    pub fn cell_kind(&self, index: usize) -> CellKind {
        let cell = self.grid().cell(index);

        if let Some(finder) = &self.finder {
            if finder.current() == Some(index) {
                return CellKind::Current;
            }
            if finder.is_on_path(index) {
                return CellKind::Path;
            }
            if finder.is_closed(index) {
                return CellKind::Closed;
            }
            if finder.is_open(index) {
                return CellKind::Open;
            }
        } else if self.generator.current() == index {
            return CellKind::Current;
        }

        if cell.is_wall() {
            CellKind::Wall
        } else if cell.is_visited() {
            CellKind::Carved
        } else {
            CellKind::Passage
        }
    }

    /// Text layout: '■' wall, '□' open, '*' path, 'S' start, 'G' goal
    pub fn to_text(&self) -> String {
        let grid = self.grid();
        let mut result = String::new();

        for i in 0..grid.rows() {
            for j in 0..grid.cols() {
                let index = grid.index(i, j);
                let symbol = if index == grid.start_index() {
                    'S'
                } else if index == grid.goal_index() {
                    'G'
                } else if self.is_on_path(index) {
                    '*'
                } else if grid.cell(index).is_wall() {
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
