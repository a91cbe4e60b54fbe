// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Chains of [Interpreter]s, each feeding its output to the next, as used for the amplifiers of
//! [Day 7](https://adventofcode.com/2019/day/7).
//!
//! # Example
//!
//! ```
//! use intcode::amplifier::{AmplifierChain, Wiring, search_phases};
//! const CODE: [i64; 17] = [3, 15, 3, 16, 1002, 16, 10, 16, 1, 16, 15, 15, 4, 15, 99, 0, 0];
//!
//! let chain = AmplifierChain::new(&CODE, &[4, 3, 2, 1, 0], Wiring::Serial);
//! assert_eq!(chain.run(0).unwrap(), 43210);
//!
//! let best = search_phases(&CODE, &[0, 1, 2, 3, 4], Wiring::Serial).unwrap();
//! assert_eq!((best.phases, best.signal), (vec![4, 3, 2, 1, 0], 43210));
//! ```

use itertools::Itertools;
use std::error::Error;
use std::fmt::{self, Display};

use crate::{InstructionSet, Interpreter, InterpreterError, State};

/// Where the last stage of an [AmplifierChain] sends its output
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Wiring {
    /// The last stage's output leaves the chain
    Serial,
    /// The last stage's output is fed back into the first stage
    Feedback,
}

/// An error that occured while running an [AmplifierChain]
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AmplifierError {
    /// One of the stages encountered an error
    Stage {
        /// Index of the stage within the chain
        stage: usize,
        #[allow(missing_docs)]
        source: InterpreterError,
    },
    /// The chain has no stages
    NoStages,
    /// Every stage that's still running is waiting on input that will never arrive
    Deadlock,
    /// Every stage halted, but the last never output anything
    NoSignal,
}

impl Display for AmplifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stage { stage, source } => write!(f, "amplifier {stage} failed: {source}"),
            Self::NoStages => write!(f, "amplifier chain has no stages"),
            Self::Deadlock => write!(f, "every running amplifier is waiting for input"),
            Self::NoSignal => write!(f, "the last amplifier halted without any output"),
        }
    }
}

impl Error for AmplifierError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Stage { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A series of interpreters, each running its own copy of the same program, where each stage's
/// output is the next stage's input.
#[derive(Debug, Clone)]
pub struct AmplifierChain {
    stages: Vec<Interpreter>,
    wiring: Wiring,
}

impl AmplifierChain {
    /// Create one stage per phase setting, each with its phase setting queued as its first input.
    pub fn new(program: &[i64], phases: &[i64], wiring: Wiring) -> Self {
        Self::with_instruction_set(program, phases, wiring, InstructionSet::Full)
    }

    /// Like [AmplifierChain::new], with each stage only accepting instructions in
    /// `instruction_set`
    pub fn with_instruction_set(
        program: &[i64],
        phases: &[i64],
        wiring: Wiring,
        instruction_set: InstructionSet,
    ) -> Self {
        let stages = phases
            .iter()
            .map(|&phase| {
                let mut stage =
                    Interpreter::with_instruction_set(program.iter().copied(), instruction_set);
                stage.push_input(phase);
                stage
            })
            .collect();
        Self { stages, wiring }
    }

    /// Feed `signal` into the first stage, then run the stages round-robin, each until it halts or
    /// runs out of input, until all of them have halted.
    ///
    /// Returns the last value output by the last stage.
    pub fn run(mut self, signal: i64) -> Result<i64, AmplifierError> {
        let count = self.stages.len();
        let last = count.checked_sub(1).ok_or(AmplifierError::NoStages)?;
        self.stages[0].push_input(signal);

        let mut final_signal = None;
        let mut round = 0_u64;
        loop {
            round += 1;
            let mut progressed = false;
            for idx in 0..=last {
                let stage = &mut self.stages[idx];
                if stage.is_halted() {
                    continue;
                }
                let state = stage
                    .run()
                    .map_err(|source| AmplifierError::Stage { stage: idx, source })?;
                let outputs = stage.take_output();
                progressed |= state == State::Halted || !outputs.is_empty();

                if idx == last {
                    final_signal = outputs.last().copied().or(final_signal);
                    if self.wiring == Wiring::Serial {
                        continue;
                    }
                }
                self.stages[(idx + 1) % count].extend_input(outputs);
            }

            if self.stages.iter().all(Interpreter::is_halted) {
                log::trace!("amplifier chain halted after {round} rounds");
                break final_signal.ok_or(AmplifierError::NoSignal);
            }
            if !progressed {
                log::debug!("amplifier chain deadlocked in round {round}");
                break Err(AmplifierError::Deadlock);
            }
        }
    }
}

/// The outcome of [search_phases]
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PhaseSearch {
    /// The phase settings that produced the strongest signal, in stage order
    pub phases: Vec<i64>,
    /// The strongest signal
    pub signal: i64,
    /// How many phase setting permutations were tried
    pub evaluated: usize,
}

/// Try every ordering of `phase_set` as the phase settings of an [AmplifierChain] fed an initial
/// signal of `0`, and find the one producing the strongest signal.
///
/// Orderings are tried in lexicographic order, and orderings that only differ by swapping equal
/// phases are only tried once. If several produce the same signal, the first is kept.
pub fn search_phases(
    program: &[i64],
    phase_set: &[i64],
    wiring: Wiring,
) -> Result<PhaseSearch, AmplifierError> {
    search_phases_with(program, phase_set, wiring, InstructionSet::Full)
}

/// Like [search_phases], with each stage only accepting instructions in `instruction_set`
pub fn search_phases_with(
    program: &[i64],
    phase_set: &[i64],
    wiring: Wiring,
    instruction_set: InstructionSet,
) -> Result<PhaseSearch, AmplifierError> {
    if phase_set.is_empty() {
        return Err(AmplifierError::NoStages);
    }
    let mut best: Option<PhaseSearch> = None;
    let mut evaluated = 0;
    let orderings = phase_set.iter().copied().sorted().permutations(phase_set.len());
    for phases in orderings.unique() {
        let signal =
            AmplifierChain::with_instruction_set(program, &phases, wiring, instruction_set)
                .run(0)?;
        evaluated += 1;
        log::debug!("phases {phases:?} produced signal {signal}");
        if best.as_ref().is_none_or(|b| signal > b.signal) {
            best = Some(PhaseSearch {
                phases,
                signal,
                evaluated: 0,
            });
        }
    }
    let mut best = best.ok_or(AmplifierError::NoStages)?;
    best.evaluated = evaluated;
    Ok(best)
}
