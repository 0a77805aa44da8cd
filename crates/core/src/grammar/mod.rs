/// Expression trees rebuilt from instruction sequences.
pub mod ast;
/// Growable character grid with cursor primitives.
pub mod canvas;
/// JSON serialization helpers for programs and trees.
pub mod dump;
/// Schematic renderer: draws coil trees back into ladder text.
pub mod emit;
/// Negation folding over instruction streams.
pub mod fold;
/// Rung parser: converts schematic rungs into postfix instructions.
pub mod parser;
/// Rung splitter: groups bordered schematic lines into rungs.
pub mod rung;
/// Tree builder: rebuilds one expression tree per coil.
pub mod tree;
