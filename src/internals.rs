// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use super::*;
use trace::TracedInstr;

impl Interpreter {
    /// Check that `mode` is allowed by the interpreter's instruction set
    fn check_mode(&self, mode: ParamMode) -> Result<(), InterpreterError> {
        if mode == ParamMode::Relative && !self.instruction_set.relative_mode() {
            Err(InterpreterError::UnknownMode {
                mode: mode as i64,
                instr_ptr: self.index,
            })
        } else {
            Ok(())
        }
    }

    fn negative_access(&self, NegativeMemAccess(address): NegativeMemAccess) -> InterpreterError {
        InterpreterError::NegativeMemAccess {
            address,
            instr_ptr: self.index,
        }
    }

    fn overflow(&self) -> InterpreterError {
        InterpreterError::Overflow {
            instr_ptr: self.index,
        }
    }

    /// Add the relative base to a relative-mode parameter
    fn relative(&self, raw: i64) -> Result<i64, InterpreterError> {
        raw.checked_add(self.rel_offset).ok_or_else(|| self.overflow())
    }

    /// The raw, unresolved value of the parameter at `offset`
    fn raw_param(&self, offset: u64) -> i64 {
        self.code[self.index + offset]
    }

    /// Processes the parameter at `offset` into a concrete value using the method appropriate for
    /// `mode`.
    pub(crate) fn resolve_param(
        &self,
        mode: ParamMode,
        offset: u64,
    ) -> Result<i64, InterpreterError> {
        self.check_mode(mode)?;
        let raw = self.raw_param(offset);
        match mode {
            ParamMode::Positional => self.code.read(raw),
            ParamMode::Immediate => Ok(raw),
            ParamMode::Relative => self.code.read(self.relative(raw)?),
        }
        .map_err(|e| self.negative_access(e))
    }

    /// Processes the parameter at `offset` into a concrete address to write to according to
    /// `mode`.
    pub(crate) fn resolve_dest(
        &self,
        mode: ParamMode,
        offset: u64,
    ) -> Result<i64, InterpreterError> {
        self.check_mode(mode)?;
        let raw = self.raw_param(offset);
        let address = match mode {
            ParamMode::Positional => raw,
            ParamMode::Relative => self.relative(raw)?,
            ParamMode::Immediate => {
                return Err(InterpreterError::WriteToImmediate {
                    param: raw,
                    instr_ptr: self.index,
                });
            }
        };
        if address < 0 {
            Err(self.negative_access(NegativeMemAccess(address)))
        } else {
            Ok(address)
        }
    }

    fn store(&mut self, dest: i64, val: i64) -> Result<(), InterpreterError> {
        self.code.write(dest, val).map_err(|e| self.negative_access(e))
    }

    /// Record the instruction about to be completed in the active trace and the log
    fn record(&mut self, op_int: i64, instr: Instruction, resolved_params: &[(i64, i64)]) {
        if self.trace.is_none() && !log::log_enabled!(log::Level::Trace) {
            return;
        }
        let traced = TracedInstr::build(op_int, instr, self.index, self.rel_offset, resolved_params);
        log::trace!("{traced}");
        if let Some(trace) = self.trace.as_mut() {
            trace.push(traced);
        }
    }

    /// common logic of all 4 instructions that take 3 parameters
    fn op3(
        &mut self,
        op_int: i64,
        instr: Instruction,
        operation: impl Fn(i64, i64) -> Option<i64>,
    ) -> Result<StepOutcome, InterpreterError> {
        let a = self.resolve_param(instr.modes[0], 1)?;
        let b = self.resolve_param(instr.modes[1], 2)?;
        let dest = self.resolve_dest(instr.modes[2], 3)?;
        let val = operation(a, b).ok_or_else(|| self.overflow())?;
        self.record(
            op_int,
            instr,
            &[
                (self.raw_param(1), a),
                (self.raw_param(2), b),
                (self.raw_param(3), val),
            ],
        );
        self.store(dest, val)?;
        self.index += 4;
        Ok(StepOutcome::Running)
    }

    fn jump(
        &mut self,
        op_int: i64,
        instr: Instruction,
        func: impl Fn(i64) -> bool,
    ) -> Result<StepOutcome, InterpreterError> {
        let expr = self.resolve_param(instr.modes[0], 1)?;
        let dest = self.resolve_param(instr.modes[1], 2)?;
        let taken = func(expr);
        if taken && dest < 0 {
            return Err(InterpreterError::JumpToNegative {
                dest,
                instr_ptr: self.index,
            });
        }
        self.record(
            op_int,
            instr,
            &[(self.raw_param(1), expr), (self.raw_param(2), dest)],
        );
        if taken {
            self.index = dest.cast_unsigned();
        } else {
            self.index += 3;
        }
        Ok(StepOutcome::Running)
    }

    pub(crate) fn exec_instruction(&mut self) -> Result<StepOutcome, InterpreterError> {
        let op_int = self.code[self.index];
        let instr = Instruction::decode(op_int)
            .map_err(|e| InterpreterError::from_decode(e, self.index))?;
        if !self.instruction_set.supports(instr.opcode) {
            return Err(InterpreterError::UnrecognizedOpcode {
                opcode: instr.opcode as i64,
                instr_ptr: self.index,
            });
        }

        match instr.opcode {
            OpCode::Add => self.op3(op_int, instr, i64::checked_add),
            OpCode::Mul => self.op3(op_int, instr, i64::checked_mul),
            OpCode::Lt => self.op3(op_int, instr, |a, b| Some(i64::from(a < b))),
            OpCode::Eq => self.op3(op_int, instr, |a, b| Some(i64::from(a == b))),
            OpCode::Jnz => self.jump(op_int, instr, |v| v != 0),
            OpCode::Jz => self.jump(op_int, instr, |v| v == 0),
            OpCode::In => {
                let dest = self.resolve_dest(instr.modes[0], 1)?;
                let Some(input) = self.inputs.pop_front() else {
                    return Ok(StepOutcome::Stopped(State::Awaiting));
                };
                self.record(op_int, instr, &[(self.raw_param(1), input)]);
                self.store(dest, input)?;
                self.index += 2;
                Ok(StepOutcome::Running)
            }
            OpCode::Out => {
                let val = self.resolve_param(instr.modes[0], 1)?;
                self.record(op_int, instr, &[(self.raw_param(1), val)]);
                self.outputs.push_back(val);
                self.index += 2;
                Ok(StepOutcome::Running)
            }
            OpCode::Rbo => {
                let val = self.resolve_param(instr.modes[0], 1)?;
                let rel_offset = self.rel_offset.checked_add(val).ok_or_else(|| self.overflow())?;
                self.record(op_int, instr, &[(self.raw_param(1), val)]);
                self.rel_offset = rel_offset;
                self.index += 2;
                Ok(StepOutcome::Running)
            }
            OpCode::Halt => {
                self.record(op_int, instr, &[]);
                self.halted = true;
                Ok(StepOutcome::Stopped(State::Halted))
            }
        }
    }
}
