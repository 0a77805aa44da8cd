//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. Ranges: `LL1xxx` rung parser, `LL2xxx` tree
//! reconstruction and rendering, `LL3xxx` canvas.

// ── Rung parser ─────────────────────────────────────────────────────────

/// A character that starts no known construct (contact, coil, call, branch).
pub const PARSER_UNRECOGNIZED: &str = "LL1001";

/// A contact, coil, or call is missing its closing bracket.
pub const PARSER_UNTERMINATED: &str = "LL1002";

/// A parallel block has no right rail closing all of its branches.
pub const PARSER_UNCLOSED_BRANCH: &str = "LL1003";

/// A coil appears inside a parallel branch.
pub const PARSER_COIL_IN_BRANCH: &str = "LL1004";

/// A contact, coil, or call has an empty name.
pub const PARSER_EMPTY_OPERAND: &str = "LL1005";

// ── Tree reconstruction / rendering ─────────────────────────────────────

/// An instruction needed more operands than the stack held.
pub const TREE_STACK_UNDERFLOW: &str = "LL2001";

/// A negation wraps something that has no negated glyph.
pub const RENDER_UNRENDERABLE_NEGATION: &str = "LL2002";

/// Operands were left on the stack after the last `out`.
pub const TREE_DANGLING_OPERANDS: &str = "LL2003";

// ── Canvas ──────────────────────────────────────────────────────────────

/// The drawing cursor moved past the top or left edge.
pub const CANVAS_OUT_OF_BOUNDS: &str = "LL3001";

/// Every known diagnostic code, in numeric order.
pub const ALL: &[&str] = &[
    PARSER_UNRECOGNIZED,
    PARSER_UNTERMINATED,
    PARSER_UNCLOSED_BRANCH,
    PARSER_COIL_IN_BRANCH,
    PARSER_EMPTY_OPERAND,
    TREE_STACK_UNDERFLOW,
    RENDER_UNRENDERABLE_NEGATION,
    TREE_DANGLING_OPERANDS,
    CANVAS_OUT_OF_BOUNDS,
];
