use thiserror::Error;

/// Errors surfaced by grid construction, configuration and step-log persistence.
///
/// A search that exhausts its frontier is not an error; see `SearchStep::NoSolution`.
#[derive(Debug, Error)]
pub enum MazeError {
    /// The grid cannot hold a start and a goal cell.
    #[error("grid must be at least 2x2, got {rows}x{cols}")]
    GridTooSmall { rows: i32, cols: i32 },

    /// `rows * cols` does not fit the cell index range.
    #[error("grid of {rows}x{cols} cells is too large")]
    GridTooLarge { rows: i32, cols: i32 },

    /// A wall index given to `Grid::with_walls` lies outside the grid.
    #[error("wall index {index} is outside a grid of {len} cells")]
    WallOutOfBounds { index: usize, len: usize },

    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("step log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("step log JSON failed: {0}")]
    Json(#[from] serde_json::Error),
}
