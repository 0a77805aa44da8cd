use super::ast::{Coil, Expr};
use super::fold::NotFolder;
use crate::error::LadderError;
use crate::program::{Instruction, InstructionSink, Program};

/// Receives completed coil trees in program order.
pub trait CoilSink {
    /// Accept the next coil.
    fn coil(&mut self, coil: Coil) -> Result<(), LadderError>;
}

impl CoilSink for Vec<Coil> {
    fn coil(&mut self, coil: Coil) -> Result<(), LadderError> {
        self.push(coil);
        Ok(())
    }
}

/// Rebuilds expression trees from a postfix instruction stream.
///
/// Operands accumulate on a stack; every `out` pops one and hands the
/// finished [`Coil`] downstream, so the stack does not carry values across
/// coils. Operands still on the stack at [`InstructionSink::finish`] are an
/// error.
#[derive(Debug)]
pub struct TreeBuilder<C> {
    stack: Vec<Expr>,
    downstream: C,
}

impl<C: CoilSink> TreeBuilder<C> {
    /// Wrap a downstream coil sink.
    pub fn new(downstream: C) -> Self {
        Self {
            stack: Vec::new(),
            downstream,
        }
    }

    /// Recover the downstream sink.
    pub fn into_inner(self) -> C {
        self.downstream
    }

    /// Pop `N` operands, earliest-pushed first.
    fn pop<const N: usize>(&mut self, mnemonic: &'static str) -> Result<[Expr; N], LadderError> {
        let available = self.stack.len();
        if available < N {
            return Err(LadderError::StackUnderflow {
                mnemonic,
                needed: N,
                available,
            });
        }
        let popped: Vec<Expr> = self.stack.drain(available - N..).collect();
        popped.try_into().map_err(|_| LadderError::StackUnderflow {
            mnemonic,
            needed: N,
            available,
        })
    }
}

impl<C: CoilSink> InstructionSink for TreeBuilder<C> {
    fn push(&mut self, instruction: Instruction) -> Result<(), LadderError> {
        let mnemonic = instruction.mnemonic();
        match instruction {
            Instruction::In(name) => self.stack.push(Expr::Contact { name }),
            Instruction::Call(tokens) => self.stack.push(Expr::Call { tokens }),
            Instruction::Not => {
                let [operand] = self.pop::<1>(mnemonic)?;
                self.stack.push(Expr::not(operand));
            }
            Instruction::And => {
                let [left, right] = self.pop::<2>(mnemonic)?;
                self.stack.push(Expr::and(left, right));
            }
            Instruction::Or => {
                let [left, right] = self.pop::<2>(mnemonic)?;
                self.stack.push(Expr::or(left, right));
            }
            Instruction::Out(name) => {
                let [value] = self.pop::<1>(mnemonic)?;
                self.downstream.coil(Coil { name, value })?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), LadderError> {
        if self.stack.is_empty() {
            return Ok(());
        }
        let count = self.stack.len();
        tracing::debug!(count, "operands left on the stack after the last coil");
        self.stack.clear();
        Err(LadderError::DanglingOperands { count })
    }
}

/// Fold negations and rebuild one tree per coil.
pub fn build_trees(program: &Program) -> Result<Vec<Coil>, LadderError> {
    let mut folder = NotFolder::new(TreeBuilder::new(Vec::new()));
    program.visit(&mut folder)?;
    let coils = folder.into_inner().into_inner();
    tracing::debug!(coils = coils.len(), "rebuilt coil trees");
    Ok(coils)
}
