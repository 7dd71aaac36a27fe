#![allow(dead_code)]

use maze_astar::{Grid, MazeGenerator, RandomSource, SeededRandom};
use std::collections::VecDeque;

/// Random source that always takes the first candidate
pub struct FirstPick;

impl RandomSource for FirstPick {
    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}

/// Carve a full maze and hand back the grid
pub fn carve<R: RandomSource>(rows: i32, cols: i32, random: R) -> Grid {
    let grid = Grid::new(rows, cols).expect("valid dimensions");
    let mut generator = MazeGenerator::new(grid, random);
    generator.run();
    generator.into_grid()
}

pub fn carve_seeded(rows: i32, cols: i32, seed: u64) -> Grid {
    carve(rows, cols, SeededRandom::new(seed))
}

/// Build a grid from a drawn layout, one line per row.
///
/// '■' and '█' are walls, any other character is open. No parity rule is
/// applied, so the drawing is taken exactly as written.
pub fn parse_layout(text: &str) -> Grid {
    let lines: Vec<Vec<char>> = text
        .lines()
        .map(|line| line.trim().chars().collect())
        .filter(|line: &Vec<char>| !line.is_empty())
        .collect();
    let rows = lines.len() as i32;
    let cols = lines.first().map_or(0, |line| line.len()) as i32;

    let mut walls = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line.len() as i32, cols, "row {} is {} wide, expected {}", i, line.len(), cols);
        for (j, &symbol) in line.iter().enumerate() {
            if symbol == '■' || symbol == '█' {
                walls.push(i * cols as usize + j);
            }
        }
    }

    Grid::with_walls(rows, cols, &walls).expect("layout is at least 2x2")
}

/// Breadth-first step counts from `from` over open cells, ignoring any
/// neighbour lists stored on the cells
pub fn bfs_distances(grid: &Grid, from: usize) -> Vec<Option<usize>> {
    let mut distances = vec![None; grid.len()];
    let mut queue = VecDeque::new();
    distances[from] = Some(0);
    queue.push_back(from);

    while let Some(index) = queue.pop_front() {
        let (i, j) = grid.coords(index);
        let here = distances[index].unwrap_or(0);
        for (di, dj) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            if let Some(cell) = grid.cell_at(i + di, j + dj) {
                let next = grid.index(i + di, j + dj);
                if !cell.is_wall() && distances[next].is_none() {
                    distances[next] = Some(here + 1);
                    queue.push_back(next);
                }
            }
        }
    }

    distances
}

/// Visualize a path on a grid
pub fn visualize_path(grid: &Grid, path: &[usize]) -> String {
    let mut result = String::new();
    for i in 0..grid.rows() {
        for j in 0..grid.cols() {
            let index = grid.index(i, j);
            let symbol = if index == grid.start_index() {
                'S'
            } else if index == grid.goal_index() {
                'G'
            } else if path.contains(&index) {
                '*'
            } else if grid.cell(index).is_wall() {
                '█'
            } else {
                '.'
            };
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}

/// Check that consecutive path cells are one grid step apart
pub fn is_connected_path(grid: &Grid, path: &[usize]) -> bool {
    path.windows(2).all(|pair| {
        let (ai, aj) = grid.coords(pair[0]);
        let (bi, bj) = grid.coords(pair[1]);
        (ai - bi).abs() + (aj - bj).abs() == 1
    })
}
