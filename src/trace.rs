// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Recording of executed instructions
//!
//! An [Interpreter] can keep a [Trace] of every instruction it completes. The same records are
//! sent to the [`log`] facade at the `trace` level, one line per instruction.
use std::fmt::{self, Display};

use super::{Instruction, Interpreter, OpCode, ParamMode};

/// A parameter as written in memory, paired with what it resolved to
type Resolved = (i64, i64);

/// A record of one executed instruction, which can be queried with its various methods, or
/// rendered as a single line with its [Display] impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracedInstr {
    op_int: i64,
    instr: Instruction,
    instr_ptr: u64,
    rel_base: i64,
    params: [Resolved; 3],
}

impl TracedInstr {
    /// The relative base when the instruction was executed
    pub fn rel_base(&self) -> i64 {
        self.rel_base
    }

    /// Where the instruction was in memory
    pub fn instr_ptr(&self) -> u64 {
        self.instr_ptr
    }

    /// The instruction word, including its parameter modes
    pub fn op_int(&self) -> i64 {
        self.op_int
    }

    #[allow(missing_docs)]
    pub fn op_code(&self) -> OpCode {
        self.instr.opcode
    }

    /// If the instruction stored a value, return that value
    pub fn stored_val(&self) -> Option<i64> {
        match self.instr.opcode {
            OpCode::Add | OpCode::Mul | OpCode::Lt | OpCode::Eq | OpCode::In => {
                self.params().last().map(|&(_, stored)| stored)
            }
            _ => None,
        }
    }

    #[allow(missing_docs)]
    pub fn param_modes(&self) -> [ParamMode; 3] {
        self.instr.modes
    }

    /// The parameters the instruction took, each as a pair of the raw value in memory and the
    /// value it resolved to. For instructions that store a value, the last pair holds the stored
    /// value instead.
    #[allow(clippy::cast_possible_truncation, reason = "at most 3")]
    pub fn params(&self) -> &[Resolved] {
        &self.params[..self.instr.opcode.param_count() as usize]
    }

    pub(super) fn build(
        op_int: i64,
        instr: Instruction,
        instr_ptr: u64,
        rel_base: i64,
        resolved_params: &[Resolved],
    ) -> Self {
        debug_assert_eq!(resolved_params.len() as u64, instr.opcode.param_count());
        let mut params = [(0, 0); 3];
        params
            .iter_mut()
            .zip(resolved_params)
            .for_each(|(slot, &param)| *slot = param);
        Self {
            op_int,
            instr,
            instr_ptr,
            rel_base,
            params,
        }
    }
}

impl Interpreter {
    /// Begin a [Trace] of executed instructions. If a trace is already running, this replaces that
    /// trace and returns in a [`Some`], otherwise, it returns [`None`].
    ///
    /// # Example
    /// ```
    ///# use intcode::prelude::*;
    /// let mut interp = Interpreter::new([1101, 90, 9, 4, 99]);
    /// assert!(interp.start_trace().is_none());
    /// interp.run().unwrap();
    /// let trace = interp.end_trace().unwrap();
    /// assert_eq!(trace.0.len(), 2);
    /// assert_eq!(trace.0[0].stored_val(), Some(99));
    /// ```
    pub fn start_trace(&mut self) -> Option<Trace> {
        self.trace.replace(Trace::new())
    }

    /// Stop tracing executed instructions into a [Trace]. If no trace was active, returns [`None`]
    ///
    /// see [Interpreter::start_trace]
    pub fn end_trace(&mut self) -> Option<Trace> {
        self.trace.take()
    }

    /// Get a view of the current trace
    pub fn show_trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// A log of instructions that an [Interpreter] has executed since a call to
/// [Interpreter::start_trace]
///
/// see [Interpreter::start_trace]
pub struct Trace(pub Vec<TracedInstr>);

impl Trace {
    pub(crate) fn push(&mut self, instr: TracedInstr) {
        self.0.push(instr)
    }

    pub(crate) fn new() -> Self {
        Self(Vec::new())
    }
}

/// `<ip> | rbo <base> | <word> | <OPCODE> <params>`, where each parameter is shown with its mode
/// prefix, then `=` and the value it resolved to, or `<-` and the value stored through it.
impl Display for TracedInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opcode = self.instr.opcode;
        write!(
            f,
            "{:>8} | rbo {:>5} | {:05} | {opcode}",
            self.instr_ptr, self.rel_base, self.op_int
        )?;
        let stores = self.stored_val().is_some();
        let params = self.params();
        for (i, (&(raw, val), mode)) in params.iter().zip(self.instr.modes).enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            let arrow = if stores && i + 1 == params.len() { "<-" } else { "=" };
            write!(f, "{sep}{mode}{raw}{arrow}{val}")?;
        }
        match (opcode, params) {
            (OpCode::Jnz, &[(_, cond), (_, dest)]) | (OpCode::Jz, &[(_, cond), (_, dest)]) => {
                if (cond != 0) == (opcode == OpCode::Jnz) {
                    write!(f, " (jumped to {dest})")
                } else {
                    write!(f, " (fell through)")
                }
            }
            (OpCode::Rbo, &[(_, offset)]) => {
                write!(f, " (rbo now {})", self.rel_base.saturating_add(offset))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_resolution() {
        let mut interp = Interpreter::new([109, 3, 22101, 4, -2, 1, 204, 1, 99]);
        interp.start_trace();
        assert_eq!(interp.run_through_inputs([]), Ok((vec![7], crate::State::Halted)));
        let Trace(trace) = interp.end_trace().unwrap();
        let lines: Vec<String> = trace.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            [
                "       0 | rbo     0 | 00109 | RBO #3=3 (rbo now 3)",
                "       2 | rbo     3 | 22101 | ADD #4=4, @-2=3, @1<-7",
                "       6 | rbo     3 | 00204 | OUT @1=7",
                "       8 | rbo     3 | 00099 | HALT",
            ]
        );
        assert_eq!(trace[1].params().to_vec(), vec![(4, 4), (-2, 3), (1, 7)]);
        assert_eq!(trace[1].stored_val(), Some(7));
        assert_eq!(trace[1].rel_base(), 3);
        assert!(trace[3].params().is_empty());
        assert_eq!(trace[3].stored_val(), None);
    }

    #[test]
    fn jumps_show_where_they_went() {
        let mut interp = Interpreter::new([1105, 0, 9, 1006, 9, 7, 0, 99, 0, 0]);
        interp.start_trace();
        interp.run().unwrap();
        let Trace(trace) = interp.end_trace().unwrap();
        let lines: Vec<String> = trace.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            [
                "       0 | rbo     0 | 01105 | JNZ #0=0, #9=9 (fell through)",
                "       3 | rbo     0 | 01006 | JZ 9=0, #7=7 (jumped to 7)",
                "       7 | rbo     0 | 00099 | HALT",
            ]
        );
    }

    #[test]
    fn tracing_is_off_by_default() {
        let mut interp = Interpreter::new([104, 1, 99]);
        interp.run().unwrap();
        assert!(interp.show_trace().is_none());
        assert!(interp.end_trace().is_none());
    }
}
