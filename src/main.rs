//! CLI entry point for the solver.
//!
//! Usage:
//!   unblock-solver solve <puzzle.txt> [options]
//!   unblock-solver solve --stdin [options]
//!   unblock-solver compare <puzzle.txt> [options]
//!
//! Options:
//!   --algorithm <bfs|astar>   Search algorithm (default: bfs)
//!   --heuristic <name>        Heuristic for A* (required with astar)
//!   --timeout <seconds>       Maximum search time (default: 600)
//!   --pretty                  Pretty-print the JSON report

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;

use unblock_solver::{
    solve_astar, solve_bfs, Heuristic, Move, Puzzle, SearchOutcome, SolveReport, SolverConfig,
};

#[derive(Parser)]
#[command(name = "unblock-solver")]
#[command(about = "Exhaustive and heuristic-guided solver for sliding-block puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one puzzle and print a JSON report
    Solve {
        /// Path to a puzzle file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the puzzle from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Search algorithm
        #[arg(long, value_enum, default_value = "bfs")]
        algorithm: Algorithm,

        /// Heuristic for A*: blocking, manhattan, critical-path,
        /// blocking-mobility or two-step
        #[arg(long)]
        heuristic: Option<String>,

        /// Maximum search time in seconds
        #[arg(long, default_value = "600")]
        timeout: u64,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },
    /// Run BFS and every A* heuristic on one puzzle and print a summary
    Compare {
        /// Path to a puzzle file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Maximum search time in seconds, per solver
        #[arg(long, default_value = "600")]
        timeout: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    Bfs,
    Astar,
}

/// JSON report for one solve
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput<'a> {
    solver: &'a str,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a [Move]>,
    nodes_explored: usize,
    time_seconds: f64,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Commands) -> unblock_solver::Result<ExitCode> {
    match command {
        Commands::Solve {
            file,
            stdin,
            algorithm,
            heuristic,
            timeout,
            pretty,
        } => {
            let text = read_input(file, stdin)?;
            let puzzle: Puzzle = text.parse()?;
            let board = puzzle.into_board()?;
            info!(
                "solving a {0}x{0} puzzle with {1} vehicles",
                board.grid_size(),
                board.vehicles().len()
            );
            let config = SolverConfig {
                timeout: Duration::from_secs(timeout),
            };

            let (solver, report) = match algorithm {
                Algorithm::Bfs => {
                    if heuristic.is_some() {
                        eprintln!("error: --heuristic only applies to --algorithm astar");
                        return Ok(ExitCode::from(2));
                    }
                    ("bfs".to_string(), solve_bfs(board, &config))
                }
                Algorithm::Astar => {
                    let Some(name) = heuristic else {
                        eprintln!("error: --heuristic is required for --algorithm astar");
                        return Ok(ExitCode::from(2));
                    };
                    let heuristic = Heuristic::from_name(&name)?;
                    (
                        format!("astar+{}", heuristic.name()),
                        solve_astar(board, heuristic, &config),
                    )
                }
            };

            let output = format_report(&solver, &report);
            let json = if pretty {
                serde_json::to_string_pretty(&output)
            } else {
                serde_json::to_string(&output)
            }
            .unwrap();
            println!("{json}");

            Ok(if matches!(report.outcome, SearchOutcome::Solved { .. }) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Compare { file, timeout } => {
            let puzzle = Puzzle::load(&file)?;
            let config = SolverConfig {
                timeout: Duration::from_secs(timeout),
            };
            info!("comparing all solvers on {}", file.display());

            let board = puzzle.clone().into_board()?;
            print_summary("bfs", &solve_bfs(board, &config));
            for heuristic in Heuristic::ALL {
                let board = puzzle.clone().into_board()?;
                let summary = format!("astar+{}", heuristic.name());
                print_summary(&summary, &solve_astar(board, heuristic, &config));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_input(file: Option<PathBuf>, stdin: bool) -> unblock_solver::Result<String> {
    if stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else if let Some(path) = file {
        Ok(std::fs::read_to_string(path)?)
    } else {
        eprintln!("error: provide a puzzle file or --stdin");
        std::process::exit(2);
    }
}

fn format_report<'a>(solver: &'a str, report: &'a SolveReport) -> SolveOutput<'a> {
    let (outcome, moves, path) = match &report.outcome {
        SearchOutcome::Solved { moves, path } => ("solved", Some(*moves), Some(path.as_slice())),
        SearchOutcome::Exhausted => ("noSolution", None, None),
        SearchOutcome::TimedOut => ("timedOut", None, None),
    };
    SolveOutput {
        solver,
        outcome,
        moves,
        path,
        nodes_explored: report.nodes_explored,
        time_seconds: report.elapsed.as_secs_f64(),
    }
}

fn print_summary(solver: &str, report: &SolveReport) {
    match &report.outcome {
        SearchOutcome::Solved { moves, .. } => println!(
            "{solver}: {moves} moves in {:.2}s ({} nodes explored)",
            report.elapsed.as_secs_f64(),
            report.nodes_explored
        ),
        SearchOutcome::Exhausted => println!(
            "{solver}: no solution ({} nodes explored)",
            report.nodes_explored
        ),
        SearchOutcome::TimedOut => println!(
            "{solver}: timed out after {:.2}s ({} nodes explored)",
            report.elapsed.as_secs_f64(),
            report.nodes_explored
        ),
    }
}
