// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Solve [Day 5](https://adventofcode.com/2019/day/5) for the puzzle input at the given path

use intcode::puzzles::day05;
use intcode::solution;
use std::process::ExitCode;

fn main() -> ExitCode {
    solution::run(day05::solve)
}
