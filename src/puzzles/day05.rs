// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! [Day 5](https://adventofcode.com/2019/day/5): Sunny with a Chance of Asteroids

use super::{PuzzleError, run_to_halt};
use crate::{InstructionSet, Interpreter};

/// Run the diagnostic program for the system with the given ID.
///
/// Every output but the last is the result of a test, and must be `0`. The last is the
/// diagnostic code.
pub fn diagnose(program: &[i64], system_id: i64) -> Result<i64, PuzzleError> {
    let mut i =
        Interpreter::with_instruction_set(program.iter().copied(), InstructionSet::Diagnostic);
    let mut outputs = run_to_halt(&mut i, [system_id])?;
    let diagnostic = outputs.pop().ok_or(PuzzleError::UnexpectedOutput(Vec::new()))?;
    if let Some((test, &value)) = outputs.iter().enumerate().find(|&(_, &v)| v != 0) {
        return Err(PuzzleError::DiagnosticFailed { test, value });
    }
    Ok(diagnostic)
}

#[allow(missing_docs)]
pub fn solve(program: &[i64]) -> Result<(i64, i64), PuzzleError> {
    // air conditioner unit, then thermal radiator controller
    Ok((diagnose(program, 1)?, diagnose(program, 5)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// outputs 999 if the input is below 8, 1000 if it's equal to 8, or 1001 if it's above 8
    const COMPARE_TO_8: [i64; 47] = [
        3, 21, 1008, 21, 8, 20, 1005, 20, 22, 107, 8, 21, 20, 1006, 20, 31, 1106, 0, 36, 98, 0, 0,
        1002, 21, 125, 20, 4, 20, 1105, 1, 46, 104, 999, 1105, 1, 46, 1101, 1000, 1, 20, 4, 20,
        1105, 1, 46, 98, 99,
    ];

    #[test]
    fn larger_example() {
        assert_eq!(diagnose(&COMPARE_TO_8, 7), Ok(999));
        assert_eq!(diagnose(&COMPARE_TO_8, 8), Ok(1000));
        assert_eq!(diagnose(&COMPARE_TO_8, 9), Ok(1001));
        assert_eq!(solve(&COMPARE_TO_8), Ok((999, 999)));
    }

    #[test]
    fn passing_tests_are_skipped() {
        assert_eq!(diagnose(&[104, 0, 104, 0, 104, 0, 99], 1), Ok(0));
        assert_eq!(diagnose(&[3, 9, 104, 0, 104, 0, 4, 9, 99, 0], 5), Ok(5));
    }

    #[test]
    fn failing_test_is_reported() {
        assert_eq!(
            diagnose(&[104, 0, 104, 3, 104, 77, 99], 1),
            Err(PuzzleError::DiagnosticFailed { test: 1, value: 3 })
        );
    }

    #[test]
    fn silence_is_an_error() {
        assert_eq!(
            diagnose(&[3, 0, 99], 1),
            Err(PuzzleError::UnexpectedOutput(vec![]))
        );
    }
}
