//! Print the summary of a step log written by the visualiser.
//!
//! Usage: summarize_step_log [path] [--verbose]
//! The path defaults to `step_log.json`.

use maze_astar::step_log::StepLog;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map(String::as_str)
        .unwrap_or("step_log.json");

    let log = match StepLog::load_from_file(path) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path, e);
            process::exit(1);
        }
    };

    if verbose {
        log.print();
    }
    println!("{}", log.summary());
}
