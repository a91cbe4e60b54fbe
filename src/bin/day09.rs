// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Solve [Day 9](https://adventofcode.com/2019/day/9) for the puzzle input at the given path

use intcode::puzzles::day09;
use intcode::solution;
use std::process::ExitCode;

fn main() -> ExitCode {
    solution::run(day09::solve)
}
