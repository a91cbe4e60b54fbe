// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Solve [Day 11](https://adventofcode.com/2019/day/11) for the puzzle input at the given path

use intcode::puzzles::day11;
use intcode::solution;
use std::process::ExitCode;

fn main() -> ExitCode {
    solution::run(day11::solve)
}
