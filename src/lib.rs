// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD
#![warn(missing_docs)]

//! Library providing a configurable Intcode virtual machine, tools to chain several machines
//! together, and solutions to the Advent of Code 2019 puzzles built on top of them.
//!
//! The interpreter is fully functional, with all of the [Opcodes] and [Parameter Modes] defined in
//! the completed Intcode computer for [Day 9]. Earlier, more restricted revisions of the machine
//! can be selected with an [InstructionSet].
//!
//! # Example
//!
//! ```rust
//! use intcode::prelude::*;
//! let mut interpreter = Interpreter::new(vec![104, 1024, 99]);
//!
//! assert_eq!(
//!     interpreter.run_through_inputs(std::iter::empty()).unwrap(),
//!     (vec![1024], State::Halted)
//! );
//! ```
//!
//! Machines can also be driven one instruction at a time, which is what the [amplifier] module
//! does to run several of them in a feedback loop:
//!
//! ```rust
//! use intcode::prelude::*;
//! let mut interpreter = Interpreter::new(vec![3, 0, 4, 0, 99]);
//!
//! // nothing to read yet, so the machine is suspended without side effects
//! assert_eq!(interpreter.tick(), Ok(StepOutcome::Stopped(State::Awaiting)));
//! assert_eq!(interpreter.instr_ptr(), 0);
//!
//! interpreter.push_input(7);
//! assert_eq!(interpreter.run(), Ok(State::Halted));
//! assert_eq!(interpreter.take_output(), vec![7]);
//! ```
//!
//! [Opcodes]: https://esolangs.org/wiki/Intcode#Opcodes
//! [Parameter Modes]: https://esolangs.org/wiki/Intcode#Parameter_Modes
//! [Day 9]: https://adventofcode.com/2019/day/9

/// A module providing the memory model: a dense region holding the loaded program, with sparse
/// storage for everything past its end.
mod mmu;

mod internals;

pub mod amplifier;
pub mod ascii;
pub mod puzzles;
pub mod solution;
pub mod trace;

use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::ops::{Index, IndexMut};

pub use mmu::Memory;
use trace::Trace;

/// A small module that re-exports items needed when working with the Intcode interpreter
pub mod prelude {
    pub use crate::{InstructionSet, Interpreter, State, StepOutcome, parse_program};
    pub use std::iter::empty;
}

/// The state of the intcode system, returned whenever the intcode system has stopped.
///
/// [Awaiting](State::Awaiting) means that there are more instructions to execute, but all input
/// has been consumed and the next instruction requires input.
///
/// [Halted](State::Halted) means that a `HALT` instruction has been executed. Once it's been
/// returned, no more instructions will be executed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum State {
    /// Execution is awaiting input
    Awaiting,
    /// Execution has halted
    Halted,
}

/// The result of executing a single instruction with [Interpreter::tick]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StepOutcome {
    /// An instruction was executed, and there may be more to execute
    Running,
    /// No instruction was executed, for the reason given in the [State]
    Stopped(State),
}

/// Which revision of the Intcode computer an [Interpreter] emulates
///
/// Each Advent of Code puzzle that introduced new instructions built on the previous ones, so each
/// variant accepts a strict superset of the instructions of the one before it.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum InstructionSet {
    /// `ADD`, `MUL` and `HALT`, as introduced on [Day 2](https://adventofcode.com/2019/day/2)
    Basic,
    /// I/O, jumps and comparisons, as introduced on [Day 5](https://adventofcode.com/2019/day/5)
    Diagnostic,
    /// Relative mode and `RBO`, as introduced on [Day 9](https://adventofcode.com/2019/day/9)
    #[default]
    Full,
}

impl InstructionSet {
    /// Whether `opcode` is part of this instruction set
    pub const fn supports(self, opcode: OpCode) -> bool {
        match (self, opcode) {
            (_, OpCode::Add | OpCode::Mul | OpCode::Halt) => true,
            (Self::Basic, _) => false,
            (Self::Diagnostic, OpCode::Rbo) => false,
            (Self::Diagnostic | Self::Full, _) => true,
        }
    }

    /// Whether parameters may use [ParamMode::Relative]
    pub const fn relative_mode(self) -> bool {
        matches!(self, Self::Full)
    }
}

/// A negative memory address was accessed
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct NegativeMemAccess(pub i64);

impl Display for NegativeMemAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attempted to access negative memory address {}", self.0)
    }
}

impl Error for NegativeMemAccess {}

/// An instruction word could not be decoded
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DecodeError {
    /// The low two digits don't name an opcode
    UnknownOpcode(i64),
    /// One of the parameter mode digits isn't a known mode
    UnknownMode(i64),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOpcode(op) => write!(f, "unrecognized opcode {op}"),
            Self::UnknownMode(mode) => write!(f, "unknown parameter mode {mode}"),
        }
    }
}

impl Error for DecodeError {}

/// An error occured when executing an intcode instruction
///
/// Every variant other than [Poisoned](InterpreterError::Poisoned) records the instruction
/// pointer of the instruction that caused it.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InterpreterError {
    /// An invalid opcode, or one outside of the interpreter's [InstructionSet], was encountered
    UnrecognizedOpcode {
        /// the opcode, i.e. the instruction word modulo 100
        opcode: i64,
        #[allow(missing_docs)]
        instr_ptr: u64,
    },
    /// An unknown parameter mode, or one outside of the interpreter's [InstructionSet], was
    /// encountered
    UnknownMode {
        #[allow(missing_docs)]
        mode: i64,
        #[allow(missing_docs)]
        instr_ptr: u64,
    },
    /// A negative memory address was encountered
    NegativeMemAccess {
        #[allow(missing_docs)]
        address: i64,
        #[allow(missing_docs)]
        instr_ptr: u64,
    },
    /// An instruction tried to write to an immediate destination
    WriteToImmediate {
        /// the raw parameter
        param: i64,
        #[allow(missing_docs)]
        instr_ptr: u64,
    },
    /// A jump instruction tried to jump to a negative address
    JumpToNegative {
        #[allow(missing_docs)]
        dest: i64,
        #[allow(missing_docs)]
        instr_ptr: u64,
    },
    /// An arithmetic result, a relative address, or the relative base didn't fit in an `i64`
    Overflow {
        #[allow(missing_docs)]
        instr_ptr: u64,
    },
    /// The interpreter previously encountered an error, so its state can't be trusted
    Poisoned,
}

impl InterpreterError {
    /// The instruction pointer of the faulting instruction, if known
    pub const fn instr_ptr(&self) -> Option<u64> {
        match *self {
            Self::UnrecognizedOpcode { instr_ptr, .. }
            | Self::UnknownMode { instr_ptr, .. }
            | Self::NegativeMemAccess { instr_ptr, .. }
            | Self::WriteToImmediate { instr_ptr, .. }
            | Self::JumpToNegative { instr_ptr, .. }
            | Self::Overflow { instr_ptr } => Some(instr_ptr),
            Self::Poisoned => None,
        }
    }

    pub(crate) const fn from_decode(err: DecodeError, instr_ptr: u64) -> Self {
        match err {
            DecodeError::UnknownOpcode(opcode) => Self::UnrecognizedOpcode { opcode, instr_ptr },
            DecodeError::UnknownMode(mode) => Self::UnknownMode { mode, instr_ptr },
        }
    }
}

impl Display for InterpreterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedOpcode { opcode, instr_ptr } => {
                write!(f, "unknown instruction {opcode} at {instr_ptr}")
            }
            Self::UnknownMode { mode, instr_ptr } => {
                write!(f, "unknown parameter mode {mode} at {instr_ptr}")
            }
            Self::NegativeMemAccess { address, instr_ptr } => write!(
                f,
                "instruction at {instr_ptr} accessed negative memory address {address}"
            ),
            Self::WriteToImmediate { param, instr_ptr } => write!(
                f,
                "instruction at {instr_ptr} attempted to write to immediate {param}"
            ),
            Self::JumpToNegative { dest, instr_ptr } => {
                write!(f, "instruction at {instr_ptr} attempted to jump to {dest}")
            }
            Self::Overflow { instr_ptr } => {
                write!(f, "integer overflow in instruction at {instr_ptr}")
            }
            Self::Poisoned => write!(f, "interpreter was used after a previous error"),
        }
    }
}

impl Error for InterpreterError {}

/// A program's text could not be parsed into Intcode
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ParseError {
    /// Position of the offending token within the comma-separated list, starting at 0
    pub index: usize,
    /// The offending token, with surrounding whitespace trimmed
    pub token: Box<str>,
    /// The underlying integer parsing error
    pub error: ParseIntError,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid integer {:?} at position {}: {}",
            self.token, self.index, self.error
        )
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// Parse comma-separated decimal integers into Intcode, as given in Advent of Code inputs
///
/// Surrounding whitespace, both of the whole input and of each integer, is ignored.
///
/// ```
/// use intcode::parse_program;
/// assert_eq!(parse_program("1,0, 0,0,99\n"), Ok(vec![1, 0, 0, 0, 99]));
/// assert_eq!(parse_program("1,x,99").unwrap_err().index, 1);
/// ```
pub fn parse_program(text: &str) -> Result<Vec<i64>, ParseError> {
    text.trim()
        .split(',')
        .map(str::trim)
        .enumerate()
        .map(|(index, token)| {
            token.parse().map_err(|error| ParseError {
                index,
                token: token.into(),
                error,
            })
        })
        .collect()
}

/// Parameter mode for Intcode instruction
///
/// Intcode instruction parameters each have a mode:  [positional], [immediate], or [relative].
///
/// When executing an intcode instruction, the instruction's parameters are interpreted in
/// accordance with their associated modes.
///
/// [positional]: ParamMode::Positional
/// [immediate]: ParamMode::Immediate
/// [relative]: ParamMode::Relative
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ParamMode {
    /// Positional Mode
    ///
    /// A parameter in positional mode evaluates to the value at the address specified by the
    /// parameter.
    Positional = 0,
    /// Immediate Mode
    ///
    /// A parameter in immediate mode evaluates directly to the value specified. Instructions which
    /// write to memory may not use immediate mode for their destinations.
    #[doc(alias = "#")]
    Immediate = 1,
    /// Relative Mode
    ///
    /// A parameter in relative mode evaluates to the value at the address specified by the
    /// parameter, added to the [Relative Base], which starts out as `0` but can be modified
    /// throughout the program's execution.
    ///
    /// [Relative Base]: https://adventofcode.com/2019/day/9
    #[doc(alias = "@")]
    Relative = 2,
}

impl ParamMode {
    /// Extract the modes of all three parameters from an instruction word
    ///
    /// Modes for parameters that an instruction doesn't take are still validated.
    pub fn extract(word: i64) -> Result<[Self; 3], DecodeError> {
        let digit = |place: i64| Self::try_from((word / place) % 10);
        Ok([digit(100)?, digit(1000)?, digit(10000)?])
    }
}

impl Display for ParamMode {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamMode::Positional => Ok(()),
            ParamMode::Immediate => write!(fmt, "#"),
            ParamMode::Relative => write!(fmt, "@"),
        }
    }
}

impl TryFrom<i64> for ParamMode {
    type Error = DecodeError;
    fn try_from(i: i64) -> Result<Self, Self::Error> {
        match i {
            0 => Ok(ParamMode::Positional),
            1 => Ok(ParamMode::Immediate),
            2 => Ok(ParamMode::Relative),
            _ => Err(DecodeError::UnknownMode(i)),
        }
    }
}

/// An Intcode operation
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[allow(missing_docs, reason = "names match the Intcode documentation")]
pub enum OpCode {
    Add = 1,
    Mul = 2,
    In = 3,
    Out = 4,
    Jnz = 5,
    Jz = 6,
    Lt = 7,
    Eq = 8,
    Rbo = 9,
    Halt = 99,
}

impl OpCode {
    /// The number of parameters that the instruction takes
    pub const fn param_count(self) -> u64 {
        match self {
            Self::Add | Self::Mul | Self::Lt | Self::Eq => 3,
            Self::Jnz | Self::Jz => 2,
            Self::In | Self::Out | Self::Rbo => 1,
            Self::Halt => 0,
        }
    }
}

impl TryFrom<i64> for OpCode {
    type Error = DecodeError;
    fn try_from(i: i64) -> Result<Self, Self::Error> {
        match i {
            1 => Ok(Self::Add),
            2 => Ok(Self::Mul),
            3 => Ok(Self::In),
            4 => Ok(Self::Out),
            5 => Ok(Self::Jnz),
            6 => Ok(Self::Jz),
            7 => Ok(Self::Lt),
            8 => Ok(Self::Eq),
            9 => Ok(Self::Rbo),
            99 => Ok(Self::Halt),
            _ => Err(DecodeError::UnknownOpcode(i)),
        }
    }
}

impl Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "ADD",
            Self::Mul => "MUL",
            Self::In => "IN",
            Self::Out => "OUT",
            Self::Jnz => "JNZ",
            Self::Jz => "JZ",
            Self::Lt => "LT",
            Self::Eq => "EQ",
            Self::Rbo => "RBO",
            Self::Halt => "HALT",
        })
    }
}

/// A decoded instruction word
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Instruction {
    /// The operation to perform
    pub opcode: OpCode,
    /// The modes of the 1st, 2nd and 3rd parameters
    pub modes: [ParamMode; 3],
}

impl Instruction {
    /// Decode an instruction word
    ///
    /// Given a 5 digit number, digits ABCDE are used as follows:
    /// DE is the two-digit opcode,
    /// C is the 1st parameter's mode,
    /// B is the 2nd parameter's mode,
    /// A is the 3rd parameter's mode.
    ///
    /// ```
    /// use intcode::{Instruction, OpCode, ParamMode};
    /// assert_eq!(
    ///     Instruction::decode(1002),
    ///     Ok(Instruction {
    ///         opcode: OpCode::Mul,
    ///         modes: [ParamMode::Positional, ParamMode::Immediate, ParamMode::Positional],
    ///     })
    /// );
    /// ```
    pub fn decode(word: i64) -> Result<Self, DecodeError> {
        Ok(Self {
            opcode: OpCode::try_from(word % 100)?,
            modes: ParamMode::extract(word)?,
        })
    }
}

/// An intcode interpreter, which owns its memory and its input and output queues.
#[derive(Clone)]
pub struct Interpreter {
    index: u64,
    rel_offset: i64,
    code: Memory,
    instruction_set: InstructionSet,
    inputs: VecDeque<i64>,
    outputs: VecDeque<i64>,
    halted: bool,
    poisoned: bool,
    trace: Option<Trace>,
}

// ignore the trace field
impl PartialEq for Interpreter {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.rel_offset == other.rel_offset
            && self.code == other.code
            && self.instruction_set == other.instruction_set
            && self.inputs == other.inputs
            && self.outputs == other.outputs
            && self.halted == other.halted
            && self.poisoned == other.poisoned
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Interpreter")
            .field("code", &self.code)
            .field("rbo", &self.rel_offset)
            .field("ip", &self.index)
            .field("instruction_set", &self.instruction_set)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("halted", &self.halted)
            .field("poisoned", &self.poisoned)
            .finish_non_exhaustive()
    }
}

impl Index<u64> for Interpreter {
    type Output = i64;

    fn index(&self, i: u64) -> &Self::Output {
        self.code.index(i)
    }
}

impl IndexMut<u64> for Interpreter {
    fn index_mut(&mut self, i: u64) -> &mut Self::Output {
        self.code.index_mut(i)
    }
}

impl Interpreter {
    /// Create a new interpreter supporting the [full](InstructionSet::Full) instruction set.
    /// Collects `code` into the starting memory state.
    pub fn new(code: impl IntoIterator<Item = i64>) -> Self {
        Self::with_instruction_set(code, InstructionSet::Full)
    }

    /// Create a new interpreter which only accepts instructions in `instruction_set`
    pub fn with_instruction_set(
        code: impl IntoIterator<Item = i64>,
        instruction_set: InstructionSet,
    ) -> Self {
        Self {
            index: 0,
            rel_offset: 0,
            code: code.into_iter().collect(),
            instruction_set,
            inputs: VecDeque::new(),
            outputs: VecDeque::new(),
            halted: false,
            poisoned: false,
            trace: None,
        }
    }

    /// The instruction set this interpreter was created with
    pub fn instruction_set(&self) -> InstructionSet {
        self.instruction_set
    }

    /// The address of the next instruction to execute
    pub fn instr_ptr(&self) -> u64 {
        self.index
    }

    /// The current relative base
    pub fn rel_base(&self) -> i64 {
        self.rel_offset
    }

    /// Whether a `HALT` instruction has been executed
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// A view of the interpreter's memory
    pub fn memory(&self) -> &Memory {
        &self.code
    }

    /// Manually set a memory location
    #[doc(alias("poke", "write"))]
    pub fn mem_set(&mut self, address: i64, value: i64) -> Result<(), NegativeMemAccess> {
        self.code.write(address, value)
    }

    /// Get the memory at `address`
    #[doc(alias = "peek")]
    pub fn mem_get(&self, address: i64) -> Result<i64, NegativeMemAccess> {
        self.code.read(address)
    }

    /// Append a value to the back of the input queue
    pub fn push_input(&mut self, value: i64) {
        self.inputs.push_back(value);
    }

    /// Append values to the back of the input queue, in order
    pub fn extend_input(&mut self, values: impl IntoIterator<Item = i64>) {
        self.inputs.extend(values);
    }

    /// The number of queued inputs that have yet to be read
    pub fn pending_input(&self) -> usize {
        self.inputs.len()
    }

    /// Remove the oldest value from the output queue
    pub fn pop_output(&mut self) -> Option<i64> {
        self.outputs.pop_front()
    }

    /// The number of values waiting in the output queue
    pub fn pending_output(&self) -> usize {
        self.outputs.len()
    }

    /// Drain the output queue
    pub fn take_output(&mut self) -> Vec<i64> {
        self.outputs.drain(..).collect()
    }

    /// Execute a single instruction.
    ///
    /// If the next instruction is an `IN` and the input queue is empty, nothing is changed and
    /// [`StepOutcome::Stopped(State::Awaiting)`](State::Awaiting) is returned, so the same
    /// instruction is retried on the next call. Once halted, further calls do nothing.
    ///
    /// On error, the interpreter is poisoned, and all further calls fail with
    /// [InterpreterError::Poisoned].
    pub fn tick(&mut self) -> Result<StepOutcome, InterpreterError> {
        if self.poisoned {
            return Err(InterpreterError::Poisoned);
        }
        if self.halted {
            return Ok(StepOutcome::Stopped(State::Halted));
        }
        let outcome = self.exec_instruction();
        if outcome.is_err() {
            self.poisoned = true;
        }
        outcome
    }

    /// Execute until either the program halts, or it tries to read nonexistent input, returning
    /// the [State] it stopped in. Outputs are left in the output queue.
    pub fn run(&mut self) -> Result<State, InterpreterError> {
        loop {
            if let StepOutcome::Stopped(state) = self.tick()? {
                break Ok(state);
            }
        }
    }

    /// Queue up `inputs`, then execute until either the program halts, or it tries to read
    /// nonexistent input.
    /// Returns `Ok((v, s))`, where `v` is a [`Vec<i64>`] containing all outputs that it found, and
    /// `s` is the [`State`] at the time it stopped.
    ///
    /// On error, it will return an [`InterpreterError`] that reflects the error.
    pub fn run_through_inputs(
        &mut self,
        inputs: impl IntoIterator<Item = i64>,
    ) -> Result<(Vec<i64>, State), InterpreterError> {
        self.extend_input(inputs);
        let state = self.run()?;
        Ok((self.take_output(), state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::iter::empty;

    /// Example program from day 9, which takes no input and outputs its own code
    #[test]
    fn quine() {
        let quine_code = vec![
            109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99,
        ];
        let mut interpreter = Interpreter::new(quine_code.clone());
        let (outputs, State::Halted) = interpreter.run_through_inputs(empty()).unwrap() else {
            panic!("Did not halt");
        };
        assert_eq!(quine_code, outputs);
    }

    /// Example program from day 9, which "should output a 16-digit number"
    #[test]
    fn output_sixteen_digit() {
        let mut interpreter = Interpreter::new([1102, 34915192, 34915192, 7, 4, 7, 99, 0]);
        let (outputs, State::Halted) = interpreter.run_through_inputs(empty()).unwrap() else {
            panic!("Did not halt");
        };
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].to_string().len(), 16);
    }

    /// Example program from day 9, which "should output the large number in the middle"
    #[test]
    fn large_number() {
        let mut interpreter = Interpreter::new([104, 1125899906842624, 99]);
        let (outputs, State::Halted) = interpreter.run_through_inputs(empty()).unwrap() else {
            panic!("Did not halt");
        };
        assert_eq!(outputs, vec![1125899906842624]);
    }

    /// Ensure that running out of input leaves the interpreter in a sane state that can be
    /// recovered from
    #[test]
    fn missing_input_recoverable() {
        let mut interpreter = Interpreter::new(vec![3, 10, 4, 10, 99]);
        let old_state = interpreter.clone();

        let stalled_run = interpreter.run_through_inputs(empty());

        assert_eq!(stalled_run, Ok((vec![], State::Awaiting)));
        assert_eq!(interpreter, old_state);

        // make sure that interpreter can still be used
        assert_eq!(
            interpreter.run_through_inputs(vec![1]),
            Ok((vec![1], State::Halted))
        );
    }

    #[test]
    fn blocked_input_has_no_side_effects() {
        let mut interpreter = Interpreter::new([3, 0, 4, 0, 99]);
        for _ in 0..3 {
            assert_eq!(interpreter.tick(), Ok(StepOutcome::Stopped(State::Awaiting)));
        }
        assert_eq!(interpreter.instr_ptr(), 0);
        assert_eq!(interpreter[0], 3);

        interpreter.push_input(7);
        assert_eq!(interpreter.tick(), Ok(StepOutcome::Running));
        assert_eq!(interpreter.instr_ptr(), 2);
        assert_eq!(interpreter[0], 7);
        assert_eq!(interpreter.pending_input(), 0);
    }

    #[test]
    fn halted_tick_is_a_no_op() {
        let mut interpreter = Interpreter::new([99]);
        assert_eq!(interpreter.tick(), Ok(StepOutcome::Stopped(State::Halted)));
        let halted = interpreter.clone();
        assert_eq!(interpreter.tick(), Ok(StepOutcome::Stopped(State::Halted)));
        assert!(interpreter.is_halted());
        assert_eq!(interpreter, halted);
    }

    #[test]
    fn immediate_operands_are_literals() {
        // positional mode reads memory[5] and memory[6], which are past the end of the program
        let mut positional = Interpreter::new([1, 5, 6, 0, 99]);
        assert_eq!(positional.run(), Ok(State::Halted));
        assert_eq!(positional[0], 0);

        let mut immediate = Interpreter::new([1101, 5, 6, 0, 99]);
        assert_eq!(immediate.run(), Ok(State::Halted));
        assert_eq!(immediate[0], 11);
    }

    #[test]
    fn relative_write_lands_at_base_plus_offset() {
        // RBO #7, then ADD #2, #3, @3
        let mut interpreter = Interpreter::new([109, 7, 21101, 2, 3, 3, 99]);
        assert_eq!(interpreter.run(), Ok(State::Halted));
        assert_eq!(interpreter.rel_base(), 7);
        assert_eq!(interpreter.mem_get(10), Ok(5));
        assert_eq!(interpreter.mem_get(3), Ok(2), "offset alone must not be written");
    }

    #[test]
    fn unknown_opcode_is_fatal() {
        let mut interpreter = Interpreter::new([1101, 1, 1, 5, 42, 0]);
        assert_eq!(interpreter.tick(), Ok(StepOutcome::Running));
        let err = interpreter.run().unwrap_err();
        assert_eq!(
            err,
            InterpreterError::UnrecognizedOpcode {
                opcode: 42,
                instr_ptr: 4
            }
        );
        assert_eq!(err.instr_ptr(), Some(4));
        assert_eq!(err.to_string(), "unknown instruction 42 at 4");
        assert_eq!(interpreter.tick(), Err(InterpreterError::Poisoned));
    }

    #[test]
    fn write_to_immediate_is_fatal() {
        let mut interpreter = Interpreter::new([11101, 1, 1, 5, 99]);
        assert_eq!(
            interpreter.run(),
            Err(InterpreterError::WriteToImmediate {
                param: 5,
                instr_ptr: 0
            })
        );
    }

    #[test]
    fn negative_addresses_are_fatal() {
        let mut read = Interpreter::new([1, -1, 0, 0, 99]);
        assert_eq!(
            read.run(),
            Err(InterpreterError::NegativeMemAccess {
                address: -1,
                instr_ptr: 0
            })
        );

        let mut write = Interpreter::new([109, -10, 21101, 1, 1, 3, 99]);
        assert_eq!(
            write.run(),
            Err(InterpreterError::NegativeMemAccess {
                address: -7,
                instr_ptr: 2
            })
        );

        let mut jump = Interpreter::new([1105, 1, -4]);
        assert_eq!(
            jump.run(),
            Err(InterpreterError::JumpToNegative {
                dest: -4,
                instr_ptr: 0
            })
        );
    }

    #[test]
    fn overflow_is_fatal() {
        let mut add = Interpreter::new([1101, i64::MAX, 1, 0, 99]);
        assert_eq!(add.run(), Err(InterpreterError::Overflow { instr_ptr: 0 }));
        assert_eq!(add.mem_get(0), Ok(1101));
        assert_eq!(add.tick(), Err(InterpreterError::Poisoned));

        let mut mul = Interpreter::new([104, 1, 1102, i64::MIN, -1, 0, 99]);
        assert_eq!(mul.run(), Err(InterpreterError::Overflow { instr_ptr: 2 }));
        assert_eq!(mul.take_output(), vec![1]);

        let mut rbo = Interpreter::new([109, i64::MAX, 109, 1, 99]);
        assert_eq!(rbo.run(), Err(InterpreterError::Overflow { instr_ptr: 2 }));
        assert_eq!(rbo.rel_base(), i64::MAX);

        let mut read = Interpreter::new([109, i64::MAX, 204, 1, 99]);
        assert_eq!(read.run(), Err(InterpreterError::Overflow { instr_ptr: 2 }));

        let mut write = Interpreter::new([109, -5, 21101, 1, 1, i64::MIN, 99]);
        assert_eq!(write.run(), Err(InterpreterError::Overflow { instr_ptr: 2 }));
        assert_eq!(
            write.run().unwrap_err().to_string(),
            "interpreter was used after a previous error"
        );
    }

    #[test]
    fn arithmetic_at_the_limits() {
        let mut interp = Interpreter::new([
            1101,
            i64::MAX,
            i64::MIN,
            0,
            1102,
            i64::MIN,
            1,
            1,
            1107,
            i64::MIN,
            i64::MAX,
            2,
            4,
            0,
            4,
            1,
            4,
            2,
            99,
        ]);
        assert_eq!(
            interp.run_through_inputs([]),
            Ok((vec![-1, i64::MIN, 1], State::Halted))
        );
        assert_eq!(
            InterpreterError::Overflow { instr_ptr: 4 }.to_string(),
            "integer overflow in instruction at 4"
        );
    }

    #[test]
    fn instruction_set_gates_opcodes_and_modes() {
        let mut basic = Interpreter::with_instruction_set([3, 0, 99], InstructionSet::Basic);
        basic.push_input(1);
        assert_eq!(
            basic.run(),
            Err(InterpreterError::UnrecognizedOpcode {
                opcode: 3,
                instr_ptr: 0
            })
        );

        let mut diagnostic =
            Interpreter::with_instruction_set([109, 1, 99], InstructionSet::Diagnostic);
        assert_eq!(
            diagnostic.run(),
            Err(InterpreterError::UnrecognizedOpcode {
                opcode: 9,
                instr_ptr: 0
            })
        );

        let mut relative = Interpreter::with_instruction_set([204, 0, 99], InstructionSet::Diagnostic);
        assert_eq!(
            relative.run(),
            Err(InterpreterError::UnknownMode {
                mode: 2,
                instr_ptr: 0
            })
        );
        let mut relative = Interpreter::new([204, 0, 99]);
        assert_eq!(relative.run_through_inputs([]), Ok((vec![204], State::Halted)));
    }

    #[test]
    fn decoding_is_pure() {
        for word in [1, 2, 1002, 21101, 99, 109, 20208] {
            assert_eq!(Instruction::decode(word), Instruction::decode(word));
        }
        assert_eq!(
            Instruction::decode(20208),
            Ok(Instruction {
                opcode: OpCode::Eq,
                modes: [
                    ParamMode::Relative,
                    ParamMode::Positional,
                    ParamMode::Relative
                ],
            })
        );
        assert_eq!(Instruction::decode(42), Err(DecodeError::UnknownOpcode(42)));
        assert_eq!(Instruction::decode(301), Err(DecodeError::UnknownMode(3)));
        assert_eq!(Instruction::decode(-1), Err(DecodeError::UnknownOpcode(-1)));
    }

    #[test]
    fn parse_errors_locate_the_token() {
        assert_eq!(parse_program(" 1, -2 ,3\n"), Ok(vec![1, -2, 3]));
        let err = parse_program("1,2,,4").unwrap_err();
        assert_eq!((err.index, &*err.token), (2, ""));
        let err = parse_program("1,2,x4").unwrap_err();
        assert_eq!((err.index, &*err.token), (2, "x4"));
        assert!(parse_program("").is_err());
    }

    #[test]
    fn determinism() {
        let code = [3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];
        let mut a = Interpreter::new(code);
        let mut b = Interpreter::new(code);
        assert_eq!(a.run_through_inputs([8]), b.run_through_inputs([8]));
        assert_eq!(a.memory(), b.memory());
    }
}
