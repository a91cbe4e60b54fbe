// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Solve [Day 2](https://adventofcode.com/2019/day/2) for the puzzle input at the given path

use intcode::puzzles::day02;
use intcode::solution;
use std::process::ExitCode;

fn main() -> ExitCode {
    solution::run(day02::solve)
}
