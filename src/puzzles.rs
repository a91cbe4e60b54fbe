// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Solutions to the Advent of Code 2019 puzzles that run on the Intcode computer
//!
//! Each submodule provides a `solve` function taking the parsed puzzle input and returning the
//! answers to both parts, suitable for passing to [`solution::run`](crate::solution::run).

use std::error::Error;
use std::fmt::{self, Display};

use crate::amplifier::AmplifierError;
use crate::ascii::AsciiError;
use crate::{Interpreter, InterpreterError, NegativeMemAccess, State};

pub mod day02;
pub mod day05;
pub mod day07;
pub mod day09;
pub mod day11;
pub mod day21;
pub mod day23;

/// An error that prevented a puzzle from being solved
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum PuzzleError {
    /// The Intcode program faulted
    Interpreter(InterpreterError),
    /// A chain of amplifiers failed
    Amplifier(AmplifierError),
    /// The puzzle tried to access a negative address directly
    NegativeMemAccess(NegativeMemAccess),
    /// The program is waiting for input that the puzzle doesn't provide
    StalledOnInput,
    /// The program output something other than what the puzzle expects
    UnexpectedOutput(Vec<i64>),
    /// A diagnostic program reported a failed test
    DiagnosticFailed {
        /// Index of the failed test in the output
        test: usize,
        /// The non-zero value the test reported
        value: i64,
    },
    /// No combination of inputs produced the required result
    NoSolution,
    /// The hull painting robot was given an instruction it can't follow
    InvalidRobotOutput(i64),
    /// Text couldn't be exchanged with an ASCII-capable program
    Ascii(AsciiError),
    /// The springdroid fell into space, and the program described its last moments
    DroidFell(String),
    /// A network interface sent a packet to an address that doesn't exist
    InvalidPacketAddress(i64),
}

impl Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interpreter(e) => Display::fmt(e, f),
            Self::Amplifier(e) => Display::fmt(e, f),
            Self::NegativeMemAccess(e) => Display::fmt(e, f),
            Self::StalledOnInput => write!(f, "intcode program is waiting for more input"),
            Self::UnexpectedOutput(out) => write!(f, "intcode had unexpected output {out:?}"),
            Self::DiagnosticFailed { test, value } => {
                write!(f, "diagnostic test {test} failed with {value}")
            }
            Self::NoSolution => write!(f, "no inputs produced the required result"),
            Self::InvalidRobotOutput(i) => write!(f, "{i} is not a valid robot instruction"),
            Self::Ascii(e) => Display::fmt(e, f),
            Self::DroidFell(report) => write!(f, "the springdroid fell:\n{}", report.trim_end()),
            Self::InvalidPacketAddress(addr) => write!(f, "no network interface at address {addr}"),
        }
    }
}

impl Error for PuzzleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Interpreter(e) => Some(e),
            Self::Amplifier(e) => Some(e),
            Self::NegativeMemAccess(e) => Some(e),
            Self::Ascii(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InterpreterError> for PuzzleError {
    fn from(e: InterpreterError) -> Self {
        Self::Interpreter(e)
    }
}

impl From<AmplifierError> for PuzzleError {
    fn from(e: AmplifierError) -> Self {
        Self::Amplifier(e)
    }
}

impl From<AsciiError> for PuzzleError {
    fn from(e: AsciiError) -> Self {
        Self::Ascii(e)
    }
}

impl From<NegativeMemAccess> for PuzzleError {
    fn from(e: NegativeMemAccess) -> Self {
        Self::NegativeMemAccess(e)
    }
}

/// Run `interp` with `inputs` until it halts, returning all of its output
fn run_to_halt(
    interp: &mut Interpreter,
    inputs: impl IntoIterator<Item = i64>,
) -> Result<Vec<i64>, PuzzleError> {
    match interp.run_through_inputs(inputs)? {
        (output, State::Halted) => {
            if interp.pending_input() > 0 {
                log::warn!("{} inputs were left unread", interp.pending_input());
            }
            Ok(output)
        }
        (_, State::Awaiting) => Err(PuzzleError::StalledOnInput),
    }
}
