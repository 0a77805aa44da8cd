//! Shared test helpers for `ladder_logic_core` integration tests.

#![allow(unreachable_pub)]

use std::collections::HashMap;

use ladder_logic_core::{Instruction, InstructionSink, LadderError, Program};

// ─── Fixtures ────────────────────────────────────────────────────────────────

/// A system call driving a coil, with a commentary line.
pub const SOCKET: &str = "\
!! this is an example of calling a system function      !!
||--{socket tcp FD}--------------------------(CLIENT)---||";

/// Two rungs: a start/stop latch with an emergency stop, and a motor
/// following the latch.
pub const LATCH: &str = "\
!! this is an example of a latch with an emergency stop !!
||--[/ESTOP]----[/STOP]----+--[START]--+------(RUN)-----||
||                         |           |                ||
||                         +---[RUN]---+                ||
||                                                      ||
||--[RUN]-------------------------------------(MOTOR)---||";

/// A four-branch parallel block.
pub const FOUR_WAY: &str = "\
||--+--[A]--+--(X)--||
||  |       |       ||
||  +--[B]--+       ||
||  |       |       ||
||  +--[C]--+       ||
||  |       |       ||
||  +--[D]--+       ||";

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Render a program as listing lines (`in A`, `and`, ...).
#[allow(dead_code)]
pub fn listing(program: &Program) -> Vec<String> {
    program.iter().map(ToString::to_string).collect()
}

/// Build a program from listing lines.
#[allow(dead_code)]
pub fn program(lines: &[&str]) -> Program {
    Program::new(
        lines
            .iter()
            .map(|line| {
                Instruction::from_parts(line.split(' ').map(str::to_string).collect())
                    .unwrap_or_else(|e| panic!("bad listing line {line:?}: {e}"))
            })
            .collect(),
    )
}

// ─── Toy executor ────────────────────────────────────────────────────────────

/// A boolean stack machine standing in for a real ladder runtime.
///
/// Reads and writes named variables; unknown names read as `false`, calls
/// push `false`. Folded names (`/X`) read and write inverted.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct Machine {
    pub vars: HashMap<String, bool>,
    stack: Vec<bool>,
}

#[allow(dead_code)]
impl Machine {
    pub fn with_inputs(inputs: &[(&str, bool)]) -> Self {
        Self {
            vars: inputs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect(),
            stack: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> bool {
        self.vars.get(name).copied().unwrap_or(false)
    }

    fn pop(&mut self) -> bool {
        self.stack.pop().expect("toy machine stack underflow")
    }
}

impl InstructionSink for Machine {
    fn push(&mut self, instruction: Instruction) -> Result<(), LadderError> {
        match instruction {
            Instruction::In(name) => {
                let value = match name.strip_prefix('/') {
                    Some(plain) => !self.get(plain),
                    None => self.get(&name),
                };
                self.stack.push(value);
            }
            Instruction::Not => {
                let v = self.pop();
                self.stack.push(!v);
            }
            Instruction::And => {
                let (b, a) = (self.pop(), self.pop());
                self.stack.push(a && b);
            }
            Instruction::Or => {
                let (b, a) = (self.pop(), self.pop());
                self.stack.push(a || b);
            }
            Instruction::Out(name) => {
                let v = self.pop();
                match name.strip_prefix('/') {
                    Some(plain) => self.vars.insert(plain.to_string(), !v),
                    None => self.vars.insert(name, v),
                };
            }
            Instruction::Call(_) => self.stack.push(false),
        }
        Ok(())
    }
}

/// Run `program` once over `inputs` and return the final variables.
#[allow(dead_code)]
pub fn run(program: &Program, inputs: &[(&str, bool)]) -> Machine {
    let mut machine = Machine::with_inputs(inputs);
    program
        .visit(&mut machine)
        .expect("toy machine never fails");
    machine
}
