//! Diagnostics for the ladder logic toolchain.
//!
//! Provides [`Diagnostic`], [`Severity`], and [`Span`] types used to report
//! errors from the rung parser, the tree builder, and the schematic renderer.
//! Diagnostic codes are defined in the [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// Hard error: the input is invalid.
    Error,
    /// Warning: the input may produce unexpected results.
    Warn,
    /// Informational note.
    Info,
}

/// Byte span in the source input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }
}

/// A diagnostic message produced by the compiler or decompiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"LL1001"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Optional byte span in the source input that this diagnostic relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Machine-readable context for tooling. Keys and values are free-form strings.
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Error, message, span)
    }

    /// Attach machine-readable context metadata (builder pattern).
    ///
    /// Keys are short descriptors like `"remainder"` or `"mnemonic"`.
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    let text = match id {
        codes::PARSER_UNRECOGNIZED => {
            "The rung parser expected a contact `[name]`, a coil `(name)`, a call \
             `{tokens}`, or a parallel block opening `+`, but found another character. \
             Only `-` may fill the space between elements."
        }
        codes::PARSER_UNTERMINATED => {
            "A contact, coil, or call was opened but its closing `]`, `)`, or `}` does \
             not appear later on the same row (or inside the enclosing branch)."
        }
        codes::PARSER_UNCLOSED_BRANCH => {
            "A parallel block opened with `+` has no right rail: no column to its right \
             shows `+` on every branch row and `|` or `+` on every row in between."
        }
        codes::PARSER_COIL_IN_BRANCH => {
            "Coils terminate a whole rung expression and must sit on the rung row, \
             after every parallel block has closed."
        }
        codes::PARSER_EMPTY_OPERAND => {
            "Contacts and coils need a name, and calls need at least one token."
        }
        codes::TREE_STACK_UNDERFLOW => {
            "The instruction sequence is not a well-formed postfix program: an \
             instruction consumed more operands than had been pushed."
        }
        codes::TREE_DANGLING_OPERANDS => {
            "Every value pushed onto the stack must be written to a coil by a later \
             `out`. Operands remaining after the last `out` have no drawing, so the \
             sequence is rejected instead of silently dropping them. In a schematic this \
             means contacts follow the last coil of a rung."
        }
        codes::RENDER_UNRENDERABLE_NEGATION => {
            "Schematics can only negate single contacts `[/name]` and coils `(/name)`. \
             A `not` applied to a combined expression or a call has no drawing."
        }
        codes::CANVAS_OUT_OF_BOUNDS => {
            "The schematic renderer moved its cursor above the first row or left of the \
             first column. This indicates a renderer bug."
        }
        _ => return None,
    };
    Some(text)
}
