use crate::error::LadderError;
use crate::program::{Instruction, InstructionSink, Program};

/// Collapses `in X, not` into `in /X` and `not, out X` into `out /X`.
///
/// Holds at most one instruction of lookahead and forwards everything else
/// unchanged. The held instruction is flushed by [`InstructionSink::finish`].
///
/// Folding toggles the marker rather than always prefixing one: `in /A, not`
/// becomes `in A`, not `in //A`. See [`negate`].
#[derive(Debug)]
pub struct NotFolder<S> {
    downstream: S,
    pending: Option<Instruction>,
}

impl<S: InstructionSink> NotFolder<S> {
    /// Wrap a downstream sink.
    pub fn new(downstream: S) -> Self {
        Self {
            downstream,
            pending: None,
        }
    }

    /// Recover the downstream sink.
    pub fn into_inner(self) -> S {
        self.downstream
    }

    fn flush(&mut self) -> Result<(), LadderError> {
        match self.pending.take() {
            Some(held) => self.downstream.push(held),
            None => Ok(()),
        }
    }
}

impl<S: InstructionSink> InstructionSink for NotFolder<S> {
    fn push(&mut self, instruction: Instruction) -> Result<(), LadderError> {
        match (self.pending.take(), instruction) {
            (Some(Instruction::In(name)), Instruction::Not) => {
                self.downstream.push(Instruction::In(negate(&name)))
            }
            (Some(Instruction::Not), Instruction::Out(name)) => {
                self.downstream.push(Instruction::Out(negate(&name)))
            }
            (Some(held), out @ Instruction::Out(_)) => {
                self.downstream.push(held)?;
                self.downstream.push(out)
            }
            (held, next) => {
                self.pending = held;
                self.flush()?;
                self.pending = Some(next);
                Ok(())
            }
        }
    }

    fn finish(&mut self) -> Result<(), LadderError> {
        self.flush()?;
        self.downstream.finish()
    }
}

/// Toggle the `/` negation marker on a name.
pub fn negate(name: &str) -> String {
    match name.strip_prefix('/') {
        Some(plain) => plain.to_string(),
        None => format!("/{name}"),
    }
}

/// Run the negation folder over a whole program.
pub fn fold_negations(program: &Program) -> Result<Program, LadderError> {
    let mut folder = NotFolder::new(Vec::new());
    program.visit(&mut folder)?;
    Ok(Program::new(folder.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(listing: &[Instruction]) -> Vec<String> {
        fold_negations(&Program::new(listing.to_vec()))
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn input(name: &str) -> Instruction {
        Instruction::In(name.into())
    }

    fn output(name: &str) -> Instruction {
        Instruction::Out(name.into())
    }

    #[test]
    fn folds_negated_contact_and_coil() {
        assert_eq!(
            fold(&[input("A"), Instruction::Not, Instruction::Not, output("B")]),
            ["in /A", "out /B"]
        );
    }

    #[test]
    fn not_after_an_operator_is_kept() {
        assert_eq!(
            fold(&[input("A"), input("B"), Instruction::And, Instruction::Not, input("C"), Instruction::Or, output("X")]),
            ["in A", "in B", "and", "not", "in C", "or", "out X"]
        );
    }

    #[test]
    fn trailing_instruction_is_flushed() {
        assert_eq!(fold(&[input("A"), output("B"), input("C")]), ["in A", "out B", "in C"]);
        assert_eq!(fold(&[input("A"), Instruction::Not]), ["in /A"]);
        assert_eq!(fold(&[Instruction::Not]), ["not"]);
    }

    #[test]
    fn double_negation_toggles_back() {
        assert_eq!(fold(&[input("/A"), Instruction::Not, output("X")]), ["in A", "out X"]);
    }

    #[test]
    fn folded_input_is_unchanged() {
        let folded = [input("/A"), input("B"), Instruction::And, output("/X")];
        assert_eq!(fold(&folded), ["in /A", "in B", "and", "out /X"]);
    }

    #[test]
    fn finish_reaches_downstream() {
        #[derive(Default)]
        struct Finished(bool);
        impl InstructionSink for Finished {
            fn push(&mut self, _: Instruction) -> Result<(), LadderError> {
                Ok(())
            }
            fn finish(&mut self) -> Result<(), LadderError> {
                self.0 = true;
                Ok(())
            }
        }

        let mut folder = NotFolder::new(Finished::default());
        Program::new(vec![input("A")]).visit(&mut folder).unwrap();
        assert!(folder.into_inner().0);
    }
}
