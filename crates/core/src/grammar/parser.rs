use ladder_logic_diagnostics::Span;

use super::rung::{FILL, Rung, split_rungs};
use crate::error::{LadderError, SyntaxErrorKind};
use crate::program::{Instruction, Program};

/// Marks a negated contact or coil inside its brackets.
const NEGATION: char = '/';
/// Vertical connector between the rows of a parallel block.
const RAIL: char = '|';
/// Opens and closes a parallel block; also marks each branch row.
const BRANCH: char = '+';

/// Where an expression is being parsed. Coils are only legal on the rung row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Rung,
    Branch,
}

// ─── Public API ─────────────────────────────────────────────────────────────

/// Compile schematic text into a postfix instruction sequence.
///
/// Fails on the first syntax error; no partial program is returned.
pub fn parse_str(schematic: &str) -> Result<Program, LadderError> {
    let rungs = split_rungs(schematic);
    tracing::debug!(rungs = rungs.len(), "split schematic into rungs");
    parse_rungs(&rungs)
}

/// Compile already-split rungs into one instruction sequence.
pub fn parse_rungs(rungs: &[Rung]) -> Result<Program, LadderError> {
    let mut out = Vec::new();
    for (index, rung) in rungs.iter().enumerate() {
        tracing::trace!(rung = index, rows = rung.lines.len(), "parsing rung");
        RungParser {
            rung,
            out: &mut out,
        }
        .rung()?;
    }
    tracing::debug!(instructions = out.len(), "compiled schematic");
    Ok(Program::new(out))
}

// ─── Parser Implementation ─────────────────────────────────────────────────

/// Recursive-descent scanner over the rows of one rung.
///
/// Every expression is parsed over a region of one row: a start column and
/// an exclusive end column. The rung row spans the whole line; a branch of a
/// parallel block spans the columns between the block's two rails.
struct RungParser<'a> {
    rung: &'a Rung,
    out: &'a mut Vec<Instruction>,
}

impl RungParser<'_> {
    fn rung(&mut self) -> Result<(), LadderError> {
        let end = self.rung.lines.first().map_or(0, |line| line.len());
        self.expression(0, 0, end, Scope::Rung)
    }

    fn at(&self, row: usize, col: usize) -> Option<char> {
        self.rung.lines.get(row).and_then(|line| line.get(col))
    }

    /// Parse operands left to right, ANDing each one after the first.
    ///
    /// A coil consumes the expression so far; anything after it on the row
    /// starts a fresh expression.
    fn expression(
        &mut self,
        row: usize,
        mut col: usize,
        end: usize,
        scope: Scope,
    ) -> Result<(), LadderError> {
        let mut operands = 0usize;
        loop {
            while col < end && self.at(row, col) == Some(FILL) {
                col += 1;
            }
            let Some(ch) = (col < end).then(|| self.at(row, col)).flatten() else {
                return Ok(());
            };

            col = match ch {
                '[' => self.contact(row, col, end)?,
                '{' => self.call(row, col, end)?,
                BRANCH => self.parallel(row, col, end)?,
                '(' if scope == Scope::Rung => {
                    col = self.coil(row, col, end)?;
                    operands = 0;
                    continue;
                }
                '(' => return Err(self.syntax(SyntaxErrorKind::CoilInBranch, row, col)),
                _ if self.blank_until(row, col, end) => return Ok(()),
                _ => return Err(self.syntax(SyntaxErrorKind::Unrecognized, row, col)),
            };

            operands += 1;
            if operands > 1 {
                self.out.push(Instruction::And);
            }
        }
    }

    /// `[name]` or `[/name]`. Returns the column after the closing bracket.
    fn contact(&mut self, row: usize, open: usize, end: usize) -> Result<usize, LadderError> {
        let (text, close) = self.enclosed(row, open, end, ']')?;
        let (name, negated) = split_negation(&text);
        if name.is_empty() {
            return Err(self.syntax(SyntaxErrorKind::EmptyOperand, row, open));
        }

        self.out.push(Instruction::In(name.to_string()));
        if negated {
            self.out.push(Instruction::Not);
        }
        Ok(close + 1)
    }

    /// `(name)` or `(/name)`. Returns the column after the closing paren.
    fn coil(&mut self, row: usize, open: usize, end: usize) -> Result<usize, LadderError> {
        let (text, close) = self.enclosed(row, open, end, ')')?;
        let (name, negated) = split_negation(&text);
        if name.is_empty() {
            return Err(self.syntax(SyntaxErrorKind::EmptyOperand, row, open));
        }

        if negated {
            self.out.push(Instruction::Not);
        }
        self.out.push(Instruction::Out(name.to_string()));
        Ok(close + 1)
    }

    /// `{name arg ...}`. Returns the column after the closing brace.
    fn call(&mut self, row: usize, open: usize, end: usize) -> Result<usize, LadderError> {
        let (text, close) = self.enclosed(row, open, end, '}')?;
        let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            return Err(self.syntax(SyntaxErrorKind::EmptyOperand, row, open));
        }

        self.out.push(Instruction::Call(tokens));
        Ok(close + 1)
    }

    /// A parallel block opening at `(row, open)`.
    ///
    /// Branch rows are found by walking down the left rail while it shows
    /// `|` or `+`; every `+` starts a branch. Each branch is parsed in place
    /// up to the right rail, and n branches are joined by n-1 `or`s.
    fn parallel(&mut self, row: usize, open: usize, end: usize) -> Result<usize, LadderError> {
        let mut branches = vec![row];
        let mut below = row + 1;
        while let Some(ch @ (RAIL | BRANCH)) = self.at(below, open) {
            if ch == BRANCH {
                branches.push(below);
            }
            below += 1;
        }

        let close = (open + 1..end)
            .find(|&col| self.is_right_rail(col, &branches))
            .ok_or_else(|| self.syntax(SyntaxErrorKind::UnclosedBranch, row, open))?;

        for (i, &branch) in branches.iter().enumerate() {
            self.expression(branch, open + 1, close, Scope::Branch)?;
            if i > 0 {
                self.out.push(Instruction::Or);
            }
        }
        Ok(close + 1)
    }

    /// Whether `col` closes every branch: `+` on each branch row and a rail
    /// or `+` on every row in between.
    fn is_right_rail(&self, col: usize, branches: &[usize]) -> bool {
        let (Some(&top), Some(&bottom)) = (branches.first(), branches.last()) else {
            return false;
        };
        (top..=bottom).all(|row| match self.at(row, col) {
            Some(BRANCH) => true,
            Some(RAIL) => !branches.contains(&row),
            _ => false,
        })
    }

    /// Text between the opener at `open` and the first `closer` before `end`,
    /// plus the closer's column.
    fn enclosed(
        &self,
        row: usize,
        open: usize,
        end: usize,
        closer: char,
    ) -> Result<(String, usize), LadderError> {
        let line = &self.rung.lines[row];
        let limit = end.min(line.len());
        let close = (open + 1..limit)
            .find(|&col| line.chars[col] == closer)
            .ok_or_else(|| self.syntax(SyntaxErrorKind::Unterminated { closer }, row, open))?;
        Ok((line.chars[open + 1..close].iter().collect(), close))
    }

    fn blank_until(&self, row: usize, col: usize, end: usize) -> bool {
        (col..end)
            .map_while(|c| self.at(row, c))
            .all(char::is_whitespace)
    }

    fn syntax(&self, kind: SyntaxErrorKind, row: usize, col: usize) -> LadderError {
        let line = &self.rung.lines[row];
        LadderError::Syntax {
            kind,
            remainder: line.remainder(col),
            span: Span::new(line.byte_offset(col), line.byte_offset(line.len())),
        }
    }
}

/// Strip a leading negation marker, trimming the surrounding blanks.
fn split_negation(text: &str) -> (&str, bool) {
    let text = text.trim();
    match text.strip_prefix(NEGATION) {
        Some(name) => (name.trim(), true),
        None => (text, false),
    }
}
