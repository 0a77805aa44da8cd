//! The instruction sequence shared by the compiler and the decompiler.
//!
//! A [`Program`] is a postfix stack program: operands are pushed before the
//! operators that consume them, and each `out` writes one coil. Order is
//! load-bearing, so the sequence is only ever traversed front to back through
//! [`Program::visit`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LadderError;

/// A single stack-machine instruction.
///
/// Serialized as a JSON array: `["in", name]`, `["not"]`, `["and"]`,
/// `["or"]`, `["out", name]`, and calls as their bare token list
/// (`["socket", "tcp", "FD"]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Push the value of a named contact. A leading `/` marks a folded negation.
    In(String),
    /// Negate the value on top of the stack.
    Not,
    /// Combine the two topmost values with logical AND.
    And,
    /// Combine the two topmost values with logical OR.
    Or,
    /// Write the top of the stack to a named coil, ending one expression.
    Out(String),
    /// Invoke a system function; the first token is its name.
    Call(Vec<String>),
}

impl Instruction {
    /// Mnemonic used in listings and error messages.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::In(_) => "in",
            Instruction::Not => "not",
            Instruction::And => "and",
            Instruction::Or => "or",
            Instruction::Out(_) => "out",
            Instruction::Call(_) => "call",
        }
    }

    /// Rebuild an instruction from its serialized array form.
    ///
    /// The five mnemonics are recognized only with their exact arity; any
    /// other non-empty token list is a call.
    pub fn from_parts(parts: Vec<String>) -> Result<Self, String> {
        let known = match parts.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            [] => return Err("empty instruction".to_string()),
            ["in", name] => Some(Instruction::In((*name).to_string())),
            ["out", name] => Some(Instruction::Out((*name).to_string())),
            ["not"] => Some(Instruction::Not),
            ["and"] => Some(Instruction::And),
            ["or"] => Some(Instruction::Or),
            _ => None,
        };
        Ok(known.unwrap_or(Instruction::Call(parts)))
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::In(name) | Instruction::Out(name) => {
                write!(f, "{} {}", self.mnemonic(), name)
            }
            Instruction::Call(tokens) => write!(f, "call {}", tokens.join(" ")),
            Instruction::Not | Instruction::And | Instruction::Or => f.write_str(self.mnemonic()),
        }
    }
}

impl Serialize for Instruction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Instruction::In(name) | Instruction::Out(name) => {
                (self.mnemonic(), name).serialize(serializer)
            }
            Instruction::Not | Instruction::And | Instruction::Or => {
                (self.mnemonic(),).serialize(serializer)
            }
            Instruction::Call(tokens) => tokens.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Instruction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parts = Vec::<String>::deserialize(deserializer)?;
        Instruction::from_parts(parts).map_err(serde::de::Error::custom)
    }
}

/// Receives instructions one at a time, in program order.
///
/// This is the traversal seam between the sequence and whatever consumes it:
/// the negation folder, the tree builder, or an external executor.
pub trait InstructionSink {
    /// Accept the next instruction.
    fn push(&mut self, instruction: Instruction) -> Result<(), LadderError>;

    /// Called once after the last instruction.
    fn finish(&mut self) -> Result<(), LadderError> {
        Ok(())
    }
}

impl InstructionSink for Vec<Instruction> {
    fn push(&mut self, instruction: Instruction) -> Result<(), LadderError> {
        Vec::push(self, instruction);
        Ok(())
    }
}

/// An ordered, postfix instruction sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Wrap an instruction list.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// The instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Iterate over the instructions in program order.
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Push every instruction into `sink` in order, then finish it.
    pub fn visit<S: InstructionSink + ?Sized>(&self, sink: &mut S) -> Result<(), LadderError> {
        for instruction in &self.instructions {
            sink.push(instruction.clone())?;
        }
        sink.finish()
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self::new(instructions)
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
