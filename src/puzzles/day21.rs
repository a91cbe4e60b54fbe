// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! [Day 21](https://adventofcode.com/2019/day/21): Springdroid Adventure

use super::{PuzzleError, run_to_halt};
use crate::Interpreter;
use crate::ascii;

/// Jump if there's a hole within 3 tiles and ground to land on at the 4th
const WALK: [&str; 5] = ["NOT C J", "AND D J", "NOT A T", "OR T J", "WALK"];

/// Like [WALK], but also wait for a better landing spot if the 5th and 8th tiles are holes
const RUN: [&str; 10] = [
    "OR E J", "OR H J", "AND D J", "OR B T", "AND C T", "NOT T T", "AND T J", "NOT A T", "OR T J",
    "RUN",
];

/// Program the springdroid with `script`, one springscript instruction per line, and report the
/// amount of hull damage it measured
pub fn survey(program: &[i64], script: &[&str]) -> Result<i64, PuzzleError> {
    let mut input = String::new();
    for line in script {
        input.push_str(line);
        input.push('\n');
    }
    let mut droid = Interpreter::new(program.iter().copied());
    let output = run_to_halt(&mut droid, ascii::encode(&input)?)?;
    match output.last() {
        Some(&damage) if damage > 0x7f => Ok(damage),
        _ => Err(PuzzleError::DroidFell(ascii::decode(&output)?)),
    }
}

#[allow(missing_docs)]
pub fn solve(program: &[i64]) -> Result<(i64, i64), PuzzleError> {
    Ok((survey(program, &WALK)?, survey(program, &RUN)?))
}
