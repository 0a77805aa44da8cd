//! Schematic renderer: draws coil trees back into bordered ladder text.
//!
//! Each coil becomes its own rung. Series connections are drawn left to
//! right; parallel blocks stack their branches downward between a left and
//! a right rail. Output re-parses to the same instruction sequence, modulo
//! negation folding.

use super::ast::{Coil, Expr};
use super::canvas::{Canvas, Marker};
use super::fold::negate;
use super::rung::FILL;
use super::tree::CoilSink;
use crate::error::LadderError;

// ── Configuration ───────────────────────────────────────────────────────

/// Configuration for the schematic renderer.
#[derive(Debug, Clone, Default)]
pub struct EmitConfig {
    /// Minimum content width of every schematic row. Rungs shorter than this
    /// are padded with wire.
    pub min_width: usize,
}

// ── Public API ──────────────────────────────────────────────────────────

/// Draw a list of coils as schematic text.
pub fn emit_schematic(coils: &[Coil], config: &EmitConfig) -> Result<String, LadderError> {
    let mut writer = SchematicWriter::new(config);
    for coil in coils {
        writer.rung(coil)?;
    }
    Ok(writer.finish())
}

/// A [`CoilSink`] that draws every coil it receives onto a [`Canvas`].
#[derive(Debug, Clone)]
pub struct SchematicWriter {
    canvas: Canvas,
    coils: usize,
}

impl SchematicWriter {
    /// An empty drawing.
    pub fn new(config: &EmitConfig) -> Self {
        Self {
            canvas: Canvas::with_width(config.min_width),
            coils: 0,
        }
    }

    /// Finish the drawing and return the schematic text.
    pub fn finish(self) -> String {
        tracing::debug!(coils = self.coils, rows = self.canvas.height(), "rendered schematic");
        self.canvas.into_schematic()
    }

    fn expr(&mut self, expr: &Expr) -> Result<(), LadderError> {
        match expr {
            Expr::Contact { name } => self.contact(name),
            Expr::Call { tokens } => {
                self.canvas.draw(&format!("--{{{}}}--", tokens.join(" ")));
                self.canvas.right();
            }
            Expr::Not { operand } => match operand.as_ref() {
                Expr::Contact { name } => self.contact(&negate(name)),
                other => {
                    return Err(LadderError::UnrenderableNegation {
                        operand: other.kind(),
                    });
                }
            },
            Expr::And { .. } => {
                for term in expr.series_terms() {
                    self.expr(term)?;
                }
            }
            Expr::Or { .. } => self.parallel(&expr.or_branches())?,
        }
        Ok(())
    }

    fn contact(&mut self, name: &str) {
        self.canvas.draw(&format!("--[{name}]--"));
        self.canvas.right();
    }

    /// Draw a parallel block whose first branch starts at the cursor.
    ///
    /// Branch rows are separated by rail rows; a branch starts one rail row
    /// below the deepest row the previous branch reached. Every branch is
    /// wired to the right edge, and the right rail is then drawn up the last
    /// column from the bottom branch.
    fn parallel(&mut self, branches: &[&Expr]) -> Result<(), LadderError> {
        self.canvas.draw("--");
        self.canvas.right();
        let top_left = self.canvas.marker();

        let mut left = top_left;
        let mut bottom = top_left.row;
        for (i, branch) in branches.iter().enumerate() {
            if i > 0 {
                self.canvas.set_marker(left);
                while self.canvas.row() <= bottom {
                    self.canvas.down();
                    self.canvas.put('|');
                }
                self.canvas.down();
                left = self.canvas.marker();
            }

            self.canvas.put('+');
            self.canvas.right();
            let outer = self.canvas.begin_depth();
            self.expr(branch)?;
            bottom = self.canvas.end_depth(outer);
            self.canvas.fill(FILL);
        }

        self.canvas.set_marker(left);
        self.canvas.end();
        self.canvas.replace_up(top_left, right_rail)?;
        self.canvas.draw("+--");
        self.canvas.right();
        Ok(())
    }

    /// Draw one coil as its own rung.
    fn rung(&mut self, coil: &Coil) -> Result<(), LadderError> {
        let start: Marker = self.canvas.marker();
        self.canvas.fill(FILL);
        self.canvas.set_marker(start);

        self.expr(&coil.value)?;
        self.canvas.draw(&format!("--({})--", coil.name));
        self.canvas.bottom();
        self.canvas.down();
        self.canvas.crlf();
        self.coils += 1;
        Ok(())
    }
}

impl CoilSink for SchematicWriter {
    fn coil(&mut self, coil: Coil) -> Result<(), LadderError> {
        self.rung(&coil)
    }
}

/// Glyphs of the right rail: wire ends become junctions, gaps become rail.
fn right_rail(ch: char) -> Option<&'static str> {
    match ch {
        ' ' => Some("| "),
        FILL => Some("+ "),
        _ => None,
    }
}
