// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! [Day 7](https://adventofcode.com/2019/day/7): Amplification Circuit

use super::PuzzleError;
use crate::InstructionSet;
use crate::amplifier::{Wiring, search_phases_with};

/// The highest signal that can be sent to the thrusters through five amplifiers in series
pub fn part1(program: &[i64]) -> Result<i64, PuzzleError> {
    let best = search_phases_with(
        program,
        &[0, 1, 2, 3, 4],
        Wiring::Serial,
        InstructionSet::Diagnostic,
    )?;
    log::info!("best serial phase settings: {:?}", best.phases);
    Ok(best.signal)
}

/// The highest signal that can be sent to the thrusters through five amplifiers in a feedback
/// loop
pub fn part2(program: &[i64]) -> Result<i64, PuzzleError> {
    let best = search_phases_with(
        program,
        &[5, 6, 7, 8, 9],
        Wiring::Feedback,
        InstructionSet::Diagnostic,
    )?;
    log::info!("best feedback phase settings: {:?}", best.phases);
    Ok(best.signal)
}

#[allow(missing_docs)]
pub fn solve(program: &[i64]) -> Result<(i64, i64), PuzzleError> {
    Ok((part1(program)?, part2(program)?))
}
