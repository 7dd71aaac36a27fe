pub mod config;
pub mod error;
pub mod grid;
pub mod maze;
pub mod pathfinding;
pub mod session;
pub mod step_log;

pub use error::MazeError;
pub use grid::{Cell, Grid};
pub use maze::{GenerationStep, MazeGenerator, RandomSource, SeededRandom};
pub use pathfinding::{GScoring, PathFinder, SearchStep};
pub use session::{CellKind, MazeSession};
