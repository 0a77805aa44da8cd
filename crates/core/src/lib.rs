//! Ladder logic core library.
//!
//! Translates between ASCII relay-ladder schematics and flat postfix
//! instruction sequences. The main entry points are [`compile`] for
//! schematic text to [`Program`] and [`decompile`] for the way back.
//!
//! Decompiling runs the same streaming pipeline a consumer would:
//! [`NotFolder`] feeds [`TreeBuilder`], which feeds a [`SchematicWriter`].

#![warn(missing_docs)]

/// Error types and diagnostic conversion.
pub mod error;
/// Ladder grammar: rung splitter, parser, trees, canvas, and renderer.
pub mod grammar;
/// The instruction sequence and its traversal seam.
pub mod program;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Errors
pub use error::{LadderError, SyntaxErrorKind};

// Instruction sequence
pub use program::{Instruction, InstructionSink, Program};

// Parser
pub use grammar::parser::{parse_rungs, parse_str};
pub use grammar::rung::{Rung, RungLine, split_rungs};

// Trees
pub use grammar::ast::{Coil, Expr};
pub use grammar::fold::{NotFolder, fold_negations};
pub use grammar::tree::{CoilSink, TreeBuilder, build_trees};

// Renderer
pub use grammar::canvas::{Canvas, Direction, Marker};
pub use grammar::emit::{EmitConfig, SchematicWriter, emit_schematic};

// Diagnostics (re-exported from the diagnostics crate)
pub use ladder_logic_diagnostics::{Diagnostic, Severity, Span, codes};

// Serialization helpers
pub use grammar::dump::to_pretty_json;

/// Compile schematic text into an instruction sequence.
///
/// Fails with [`LadderError::Syntax`] on the first malformed rung; no partial
/// program is returned.
pub fn compile(schematic: &str) -> Result<Program, LadderError> {
    parse_str(schematic)
}

/// Draw an instruction sequence as schematic text with default settings.
pub fn decompile(program: &Program) -> Result<String, LadderError> {
    decompile_with_config(program, &EmitConfig::default())
}

/// Draw an instruction sequence as schematic text.
///
/// The sequence may be folded or unfolded; negations are folded before the
/// trees are rebuilt.
pub fn decompile_with_config(program: &Program, config: &EmitConfig) -> Result<String, LadderError> {
    let mut pipeline = NotFolder::new(TreeBuilder::new(SchematicWriter::new(config)));
    program.visit(&mut pipeline)?;
    Ok(pipeline.into_inner().into_inner().finish())
}
