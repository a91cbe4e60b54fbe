// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! [Day 9](https://adventofcode.com/2019/day/9): Sensor Boost

use super::{PuzzleError, run_to_halt};
use crate::Interpreter;

/// Run the BOOST program in the given mode, expecting exactly one output
pub fn boost(program: &[i64], mode: i64) -> Result<i64, PuzzleError> {
    let mut i = Interpreter::new(program.iter().copied());
    match run_to_halt(&mut i, [mode])?[..] {
        [keycode] => Ok(keycode),
        ref output => Err(PuzzleError::UnexpectedOutput(output.to_vec())),
    }
}

#[allow(missing_docs)]
pub fn solve(program: &[i64]) -> Result<(i64, i64), PuzzleError> {
    // test mode, then sensor boost mode
    Ok((boost(program, 1)?, boost(program, 2)?))
}
