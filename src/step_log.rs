use crate::error::MazeError;
use crate::maze::GenerationStep;
use crate::pathfinding::SearchStep;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A recorded step outcome from either phase
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StepEvent {
    Generation(GenerationStep),
    Search(SearchStep),
}

/// Logged step with timestamp
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedStep {
    /// Milliseconds since the log was created
    pub timestamp_ms: u64,
    pub event: StepEvent,
}

/// Step logger
pub struct StepLog {
    start_time: Instant,
    steps: Vec<LoggedStep>,
}

impl Default for StepLog {
    fn default() -> Self {
        Self::new()
    }
}

impl StepLog {
    pub fn new() -> Self {
        StepLog {
            start_time: Instant::now(),
            steps: Vec::new(),
        }
    }

    /// Wrap steps read back from a saved log
    pub fn from_steps(steps: Vec<LoggedStep>) -> Self {
        StepLog {
            start_time: Instant::now(),
            steps,
        }
    }

    /// Log an event with the current timestamp
    pub fn log(&mut self, event: StepEvent) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.steps.push(LoggedStep { timestamp_ms, event });
    }

    /// Get all logged steps
    pub fn steps(&self) -> &[LoggedStep] {
        &self.steps
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), MazeError> {
        let json = serde_json::to_string_pretty(&self.steps)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a log saved by `save_to_file`
    pub fn load_from_file(path: &str) -> Result<Self, MazeError> {
        let json = std::fs::read_to_string(path)?;
        let steps: Vec<LoggedStep> = serde_json::from_str(&json)?;
        Ok(Self::from_steps(steps))
    }

    /// Print log to console
    pub fn print(&self) {
        println!("\n=== Step Log ({} events) ===", self.steps.len());
        for (n, logged) in self.steps.iter().enumerate() {
            println!("[{:6}ms] #{:5} {:?}", logged.timestamp_ms, n + 1, logged.event);
        }
        println!("=== End of Log ===\n");
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut carved = 0;
        let mut backtracked = 0;
        let mut expanded = 0;
        let mut outcome = "search not finished".to_string();
        let mut generation_ms = None;

        for logged in &self.steps {
            match &logged.event {
                StepEvent::Generation(GenerationStep::Carved { .. }) => carved += 1,
                StepEvent::Generation(GenerationStep::Backtracked { .. }) => backtracked += 1,
                StepEvent::Generation(GenerationStep::Finished) => {
                    generation_ms = Some(logged.timestamp_ms)
                }
                StepEvent::Search(SearchStep::Expanded { .. }) => expanded += 1,
                StepEvent::Search(SearchStep::GoalReached { length }) => {
                    outcome = format!("goal reached, path length {}", length)
                }
                StepEvent::Search(SearchStep::NoSolution) => outcome = "no solution".to_string(),
                StepEvent::Generation(GenerationStep::Idle) | StepEvent::Search(SearchStep::Idle) => {}
            }
        }

        let duration = self.steps.last().map(|last| last.timestamp_ms).unwrap_or(0);
        let generation = match generation_ms {
            Some(ms) => format!("finished at {}ms", ms),
            None => "not finished".to_string(),
        };

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Generation: {} carved, {} backtracked, {}\n\
             Search: {} expanded, {}",
            duration,
            self.steps.len(),
            carved,
            backtracked,
            generation,
            expanded,
            outcome
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut log = StepLog::new();
        log.log(StepEvent::Generation(GenerationStep::Carved { from: 0, to: 2, wall: 1 }));
        log.log(StepEvent::Generation(GenerationStep::Backtracked { to: 0 }));
        log.log(StepEvent::Generation(GenerationStep::Finished));
        log.log(StepEvent::Search(SearchStep::Expanded { cell: 0, open: 1, closed: 1 }));
        log.log(StepEvent::Search(SearchStep::GoalReached { length: 2 }));

        let summary = log.summary();
        assert!(summary.contains("Total Events: 5"), "{}", summary);
        assert!(summary.contains("1 carved, 1 backtracked"), "{}", summary);
        assert!(summary.contains("1 expanded, goal reached, path length 2"), "{}", summary);
    }

    #[test]
    fn test_empty_summary() {
        let summary = StepLog::new().summary();
        assert!(summary.contains("Total Events: 0"));
        assert!(summary.contains("not finished"));
    }

    #[test]
    fn test_save_and_load() {
        let mut log = StepLog::new();
        log.log(StepEvent::Generation(GenerationStep::Carved { from: 0, to: 12, wall: 6 }));
        log.log(StepEvent::Search(SearchStep::NoSolution));

        let path = std::env::temp_dir().join(format!("maze_astar_step_log_{}.json", std::process::id()));
        let path = path.to_string_lossy().to_string();
        log.save_to_file(&path).unwrap();
        let loaded = StepLog::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.steps(), log.steps());
    }

    #[test]
    fn test_load_missing_file() {
        let result = StepLog::load_from_file("/nonexistent/maze_astar/step_log.json");
        assert!(matches!(result, Err(MazeError::Io(_))));
    }
}
