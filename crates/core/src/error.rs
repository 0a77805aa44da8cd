//! Typed errors for compiling and decompiling ladder programs.

use std::fmt;

use ladder_logic_diagnostics::{Diagnostic, Span, codes};

use crate::grammar::canvas::Direction;

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        std::collections::BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// Every failure the compiler or decompiler can report.
///
/// All variants are fatal: no partial program or schematic is produced.
/// Use [`LadderError::to_diagnostic`] to turn one into a reportable
/// [`Diagnostic`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LadderError {
    /// The rung parser met text it cannot interpret.
    #[error("syntax error: {kind} at `{remainder}`")]
    Syntax {
        /// What went wrong.
        kind: SyntaxErrorKind,
        /// The unparsed remainder of the offending line.
        remainder: String,
        /// Byte span of the remainder in the schematic text.
        span: Span,
    },

    /// An instruction needed more operands than the stack held.
    #[error("stack underflow: `{mnemonic}` needs {needed} operand(s), {available} available")]
    StackUnderflow {
        /// Mnemonic of the instruction that underflowed.
        mnemonic: &'static str,
        /// Operands the instruction consumes.
        needed: usize,
        /// Operands that were on the stack.
        available: usize,
    },

    /// Operands were left on the stack after the last coil was written.
    #[error("{count} operand(s) left on the stack after the last `out`")]
    DanglingOperands {
        /// Operands that no coil consumed.
        count: usize,
    },

    /// A negation wraps an expression that has no negated glyph.
    #[error("cannot draw a negated {operand}; only contacts and coils can be negated")]
    UnrenderableNegation {
        /// Kind of the negated expression (e.g. `"and"`, `"call"`).
        operand: &'static str,
    },

    /// The drawing cursor left the canvas through the top or left edge.
    #[error("canvas cursor moved {direction} past the edge at row {row}, column {col}")]
    CanvasBounds {
        /// Direction of the rejected move.
        direction: Direction,
        /// Cursor row before the move.
        row: usize,
        /// Cursor column before the move.
        col: usize,
    },
}

/// Refinement of [`LadderError::Syntax`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// No construct starts with the character under the cursor.
    Unrecognized,
    /// A contact, coil, or call is missing its closing character.
    Unterminated {
        /// The closing character that was expected.
        closer: char,
    },
    /// A parallel block has no right rail.
    UnclosedBranch,
    /// A coil was found inside a parallel branch.
    CoilInBranch,
    /// A contact or coil name, or a call token list, is empty.
    EmptyOperand,
}

impl SyntaxErrorKind {
    /// Diagnostic code for this kind of syntax error.
    pub fn code(self) -> &'static str {
        match self {
            SyntaxErrorKind::Unrecognized => codes::PARSER_UNRECOGNIZED,
            SyntaxErrorKind::Unterminated { .. } => codes::PARSER_UNTERMINATED,
            SyntaxErrorKind::UnclosedBranch => codes::PARSER_UNCLOSED_BRANCH,
            SyntaxErrorKind::CoilInBranch => codes::PARSER_COIL_IN_BRANCH,
            SyntaxErrorKind::EmptyOperand => codes::PARSER_EMPTY_OPERAND,
        }
    }
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxErrorKind::Unrecognized => write!(f, "unrecognized construct"),
            SyntaxErrorKind::Unterminated { closer } => write!(f, "missing closing `{closer}`"),
            SyntaxErrorKind::UnclosedBranch => write!(f, "parallel block has no right rail"),
            SyntaxErrorKind::CoilInBranch => write!(f, "coil inside a parallel branch"),
            SyntaxErrorKind::EmptyOperand => write!(f, "empty operand"),
        }
    }
}

impl LadderError {
    /// Diagnostic code identifying this error.
    pub fn code(&self) -> &'static str {
        match self {
            LadderError::Syntax { kind, .. } => kind.code(),
            LadderError::StackUnderflow { .. } => codes::TREE_STACK_UNDERFLOW,
            LadderError::DanglingOperands { .. } => codes::TREE_DANGLING_OPERANDS,
            LadderError::UnrenderableNegation { .. } => codes::RENDER_UNRENDERABLE_NEGATION,
            LadderError::CanvasBounds { .. } => codes::CANVAS_OUT_OF_BOUNDS,
        }
    }

    /// Convert into an error [`Diagnostic`] with code, span, and context.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            LadderError::Syntax {
                kind,
                remainder,
                span,
            } => Diagnostic::error(kind.code(), format!("syntax error: {kind}"), Some(*span))
                .with_context(ctx!("remainder" => remainder.as_str())),
            LadderError::StackUnderflow {
                mnemonic,
                needed,
                available,
            } => Diagnostic::error(self.code(), self.to_string(), None).with_context(ctx!(
                "mnemonic" => *mnemonic,
                "needed" => needed.to_string(),
                "available" => available.to_string(),
            )),
            LadderError::DanglingOperands { count } => {
                Diagnostic::error(self.code(), self.to_string(), None)
                    .with_context(ctx!("count" => count.to_string()))
            }
            LadderError::UnrenderableNegation { operand } => {
                Diagnostic::error(self.code(), self.to_string(), None)
                    .with_context(ctx!("operand" => *operand))
            }
            LadderError::CanvasBounds { direction, row, col } => {
                Diagnostic::error(self.code(), self.to_string(), None).with_context(ctx!(
                    "direction" => direction.to_string(),
                    "row" => row.to_string(),
                    "col" => col.to_string(),
                ))
            }
        }
    }
}
