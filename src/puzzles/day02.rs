// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! [Day 2](https://adventofcode.com/2019/day/2): 1202 Program Alarm

use super::{PuzzleError, run_to_halt};
use crate::{InstructionSet, Interpreter};

#[allow(clippy::unreadable_literal, reason = "from Advent of Code")]
const TARGET: i64 = 19690720;

/// Run `program` with the given noun and verb written to addresses 1 and 2, returning the value
/// left at address 0
pub fn run_with(program: &[i64], noun: i64, verb: i64) -> Result<i64, PuzzleError> {
    let mut i = Interpreter::with_instruction_set(program.iter().copied(), InstructionSet::Basic);
    i.mem_set(1, noun)?;
    i.mem_set(2, verb)?;
    let output = run_to_halt(&mut i, [])?;
    if !output.is_empty() {
        return Err(PuzzleError::UnexpectedOutput(output));
    }
    Ok(i.mem_get(0)?)
}

/// Restore the "1202 program alarm" state
pub fn part1(program: &[i64]) -> Result<i64, PuzzleError> {
    run_with(program, 12, 2)
}

/// Find the noun and verb that produce `19690720`, answering `100 * noun + verb`
pub fn part2(program: &[i64]) -> Result<i64, PuzzleError> {
    for noun in 0..=99 {
        for verb in 0..=99 {
            if run_with(program, noun, verb)? == TARGET {
                log::debug!("found noun {noun} and verb {verb}");
                return Ok(100 * noun + verb);
            }
        }
    }
    Err(PuzzleError::NoSolution)
}

#[allow(missing_docs)]
pub fn solve(program: &[i64]) -> Result<(i64, i64), PuzzleError> {
    Ok((part1(program)?, part2(program)?))
}
