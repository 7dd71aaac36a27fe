use arboard::Clipboard;
use macroquad::prelude::*;
use maze_astar::config::Config;
use maze_astar::grid::{REFERENCE_COLS, REFERENCE_ROWS};
use maze_astar::{CellKind, GScoring, MazeSession, SearchStep, SeededRandom};

const INFO_HEIGHT: f32 = 90.0;

fn new_session(seed: Option<u64>, scoring: GScoring, logging: bool) -> MazeSession<SeededRandom> {
    let random = match seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };
    let session = match MazeSession::reference(random, scoring) {
        Ok(session) => session,
        Err(e) => unreachable!("reference grid is valid: {}", e),
    };
    if logging {
        session.with_step_log()
    } else {
        session
    }
}

fn save_step_log(session: &MazeSession<SeededRandom>, path: &str) {
    if let Some(log) = session.step_log() {
        match log.save_to_file(path) {
            Ok(()) => println!("Step log saved to {}", path),
            Err(e) => eprintln!("Failed to save step log: {}", e),
        }
    }
}

/// Run both phases without a window and print the result
fn run_headless(config: &Config) {
    let mut session = new_session(
        config.maze.seed,
        config.maze.scoring,
        config.logging.enable_step_log,
    );

    let outcome = session.run_to_completion();
    println!("{}", session.to_text());

    match outcome {
        SearchStep::GoalReached { length } => println!("Path found: {} steps", length),
        SearchStep::NoSolution => println!("No solution"),
        other => println!("Search stopped early: {:?}", other),
    }

    if let Some(log) = session.step_log() {
        println!("\n{}", log.summary());
    }
    save_step_log(&session, &config.logging.step_log_path);
}

/// Visualization state
struct VisState {
    session: MazeSession<SeededRandom>,
    config: Config,
    log_saved: bool,
}

impl VisState {
    fn new(config: Config) -> Self {
        let session = new_session(
            config.maze.seed,
            config.maze.scoring,
            config.logging.enable_step_log,
        );
        VisState {
            session,
            config,
            log_saved: false,
        }
    }

    fn restart(&mut self) {
        // A configured seed would replay the same maze, so draw a fresh one
        self.session = new_session(
            None,
            self.config.maze.scoring,
            self.config.logging.enable_step_log,
        );
        self.log_saved = false;
    }

    fn update(&mut self) {
        if !self.session.generation_done() {
            for _ in 0..self.config.animation.generation_steps_per_frame {
                self.session.generation_step();
                if self.session.generation_done() {
                    break;
                }
            }
            return;
        }

        for _ in 0..self.config.animation.search_steps_per_frame {
            match self.session.search_step() {
                SearchStep::Expanded { .. } => {}
                _ => break,
            }
        }

        let finished = self.session.search_done() || self.session.search_has_no_solution();
        if finished && !self.log_saved {
            save_step_log(&self.session, &self.config.logging.step_log_path);
            self.log_saved = true;
        }
    }

    fn color_for(&self, kind: CellKind) -> Color {
        let show_sets = self.config.visual.show_search_sets;
        match kind {
            CellKind::Wall => BLACK,
            CellKind::Passage => YELLOW,
            CellKind::Carved => Color::from_rgba(255, 0, 255, 255),
            CellKind::Current => GREEN,
            CellKind::Open if show_sets => Color::from_rgba(120, 220, 120, 255),
            CellKind::Closed if show_sets => Color::from_rgba(220, 90, 90, 255),
            CellKind::Open | CellKind::Closed => Color::from_rgba(255, 0, 255, 255),
            CellKind::Path => BLUE,
        }
    }

    fn copy_to_clipboard(&self) {
        let layout = self.session.to_text();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&layout) {
                    println!("Failed to copy to clipboard: {}", e);
                } else {
                    println!("Maze layout copied to clipboard!");
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                println!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn draw(&self) {
        let visual = &self.config.visual;
        clear_background(Color::from_rgba(
            visual.background_r,
            visual.background_g,
            visual.background_b,
            255,
        ));

        let size = visual.cell_size;
        let grid = self.session.grid();
        for (index, cell) in grid.cells().iter().enumerate() {
            // Rows run down the screen, columns across
            let px = cell.j() as f32 * size;
            let py = cell.i() as f32 * size;
            let color = self.color_for(self.session.cell_kind(index));
            draw_rectangle(px, py, size, size, color);
        }

        let status = if !self.session.generation_done() {
            format!("Carving... step {}", self.session.generator().steps())
        } else if self.session.search_has_no_solution() {
            "No solution".to_string()
        } else if self.session.search_done() {
            format!("Path found: {} steps", self.session.path().len().saturating_sub(1))
        } else {
            format!("Searching... best path {} steps", self.session.path().len().saturating_sub(1))
        };

        let info_y = grid.rows() as f32 * size + 20.0;
        draw_text(&status, 10.0, info_y, 20.0, WHITE);
        draw_text("C: copy maze to clipboard  R: new maze  Esc: close", 10.0, info_y + 25.0, 18.0, WHITE);
    }
}

fn window_conf() -> Conf {
    let visual = Config::load().visual;
    Conf {
        window_title: visual.window_title,
        window_width: (REFERENCE_COLS as f32 * visual.cell_size) as i32,
        window_height: (REFERENCE_ROWS as f32 * visual.cell_size + INFO_HEIGHT) as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = Config::load();

    // Check command line arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--headless" {
        run_headless(&config);
        return;
    }

    let mut state = VisState::new(config);

    loop {
        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }

        if is_key_pressed(KeyCode::R) {
            state.restart();
        }

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.update();
        state.draw();

        next_frame().await
    }
}
