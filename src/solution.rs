// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Shared driver for the puzzle binaries

use std::error::Error;
use std::fmt::Display;
use std::fs::read_to_string;
use std::io::{self, Write, stdout};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{ArgAction, Parser};
use log::LevelFilter;

use crate::parse_program;
use crate::puzzles::PuzzleError;

#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Solve an Advent of Code 2019 Intcode puzzle", long_about = None)]
struct PuzzleArgs {
    #[arg(help = "The puzzle input")]
    input: PathBuf,
    #[arg(short, long, action = ArgAction::Count)]
    #[arg(help = "Log more details to stderr (repeatable)")]
    verbose: u8,
}

/// Map the number of `-v` flags to a maximum log level
pub const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Set up [env_logger] to write to stderr at the level selected by `verbosity`.
///
/// The environment is not consulted.
pub fn init_logging(verbosity: u8) {
    // a logger may already be installed when running under the test harness
    let _ = env_logger::Builder::new()
        .filter_level(level_for(verbosity))
        .format_timestamp(None)
        .try_init();
}

/// Write the answers and the elapsed time in the format shared by every puzzle binary
pub fn report(
    out: &mut impl Write,
    p1: impl Display,
    p2: impl Display,
    elapsed: Duration,
) -> io::Result<()> {
    writeln!(out, "P1: {p1}")?;
    writeln!(out, "P2: {p2}")?;
    writeln!(out)?;
    writeln!(out, "Time: {:.7}", elapsed.as_secs_f64())
}

fn solve_file<A: Display, B: Display>(
    path: &Path,
    solve: impl FnOnce(&[i64]) -> Result<(A, B), PuzzleError>,
) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    let text =
        read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let program = parse_program(&text)?;
    log::debug!("loaded {} integers from {}", program.len(), path.display());
    let (p1, p2) = solve(&program)?;
    let elapsed = start.elapsed();
    log::info!("solved in {elapsed:?}");
    report(&mut stdout().lock(), p1, p2, elapsed)?;
    Ok(())
}

/// Parse the command line, then read and solve the puzzle input with `solve`.
///
/// Errors are printed to stderr, and result in [ExitCode::FAILURE].
pub fn run<A: Display, B: Display>(
    solve: impl FnOnce(&[i64]) -> Result<(A, B), PuzzleError>,
) -> ExitCode {
    let args = match PuzzleArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(args.verbose);

    match solve_file(&args.input, solve) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
