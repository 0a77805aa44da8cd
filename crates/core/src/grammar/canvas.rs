//! A growable character grid with a drawing cursor.
//!
//! All rows share one width. Moving right past the edge widens every row by
//! repeating its last character, so wires keep running and blank rows stay
//! blank. Moving down past the bottom appends a blank row.

use std::fmt;

use super::rung::BORDER;
use crate::error::LadderError;

/// A cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward column 0.
    Left,
    /// Toward row 0.
    Up,
    /// Away from column 0.
    Right,
    /// Away from row 0.
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
        })
    }
}

/// A saved cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

/// Character grid plus cursor.
#[derive(Debug, Clone)]
pub struct Canvas {
    rows: Vec<Vec<char>>,
    row: usize,
    col: usize,
    /// Lowest row reached since the last [`Canvas::begin_depth`].
    deepest: usize,
}

impl Canvas {
    /// A canvas holding one blank row `width` cells wide.
    pub fn with_width(width: usize) -> Self {
        Self {
            rows: vec![vec![' '; width]],
            row: 0,
            col: 0,
            deepest: 0,
        }
    }

    /// Current width shared by every row.
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cursor row.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Cursor column.
    pub fn col(&self) -> usize {
        self.col
    }

    fn widen(&mut self) {
        for row in &mut self.rows {
            let last = row.last().copied().unwrap_or(' ');
            row.push(last);
        }
    }

    fn bounds(&self, direction: Direction) -> LadderError {
        LadderError::CanvasBounds {
            direction,
            row: self.row,
            col: self.col,
        }
    }

    /// Move one cell left.
    pub fn left(&mut self) -> Result<(), LadderError> {
        if self.col == 0 {
            return Err(self.bounds(Direction::Left));
        }
        self.col -= 1;
        Ok(())
    }

    /// Move one cell right, widening the grid at the edge.
    pub fn right(&mut self) {
        self.col += 1;
        while self.col >= self.width() {
            self.widen();
        }
    }

    /// Move one cell up.
    pub fn up(&mut self) -> Result<(), LadderError> {
        if self.row == 0 {
            return Err(self.bounds(Direction::Up));
        }
        self.row -= 1;
        Ok(())
    }

    /// Move one cell down, appending a blank row at the bottom.
    pub fn down(&mut self) {
        self.row += 1;
        if self.row == self.rows.len() {
            let width = self.width();
            self.rows.push(vec![' '; width]);
        }
        self.deepest = self.deepest.max(self.row);
    }

    /// Character under the cursor.
    pub fn peek(&self) -> char {
        self.rows[self.row].get(self.col).copied().unwrap_or(' ')
    }

    /// Write one character under the cursor without moving.
    pub fn put(&mut self, ch: char) {
        while self.col >= self.width() {
            self.widen();
        }
        self.rows[self.row][self.col] = ch;
    }

    /// Write `text` starting under the cursor; the cursor ends on its last
    /// character.
    pub fn draw(&mut self, text: &str) {
        let mut chars = text.chars();
        let Some(first) = chars.next() else {
            return;
        };
        self.put(first);
        for ch in chars {
            self.right();
            self.put(ch);
        }
    }

    /// Overwrite the rest of the row with `ch`; the cursor ends on the last
    /// column.
    pub fn fill(&mut self, ch: char) {
        let width = self.width();
        if self.col >= width {
            return;
        }
        self.rows[self.row][self.col..].fill(ch);
        self.col = width - 1;
    }

    /// Save the cursor position.
    pub fn marker(&self) -> Marker {
        Marker {
            row: self.row,
            col: self.col,
        }
    }

    /// Restore a saved cursor position.
    pub fn set_marker(&mut self, marker: Marker) {
        self.row = marker.row;
        self.col = marker.col;
    }

    /// Jump to the last row.
    pub fn bottom(&mut self) {
        self.row = self.rows.len() - 1;
    }

    /// Jump to the last column.
    pub fn end(&mut self) {
        self.col = self.width().saturating_sub(1);
    }

    /// Move to column 0 of the next row.
    pub fn crlf(&mut self) {
        self.col = 0;
        self.down();
    }

    /// Walk up from the cursor to just below `marker.row`, redrawing each
    /// cell in the cursor column through `table`. Cells the table does not
    /// map are left alone. The cursor ends on `marker.row`.
    pub fn replace_up(
        &mut self,
        marker: Marker,
        table: impl Fn(char) -> Option<&'static str>,
    ) -> Result<(), LadderError> {
        while self.row > marker.row {
            let here = self.marker();
            if let Some(replacement) = table(self.peek()) {
                self.draw(replacement);
            }
            self.set_marker(here);
            self.up()?;
        }
        Ok(())
    }

    /// Start tracking the lowest row reached, from the cursor row.
    ///
    /// Returns the outer depth to hand back to [`Canvas::end_depth`].
    pub fn begin_depth(&mut self) -> usize {
        std::mem::replace(&mut self.deepest, self.row)
    }

    /// Stop tracking and return the lowest row reached since the matching
    /// [`Canvas::begin_depth`]. The outer tracking continues to include it.
    pub fn end_depth(&mut self, outer: usize) -> usize {
        let deepest = self.deepest;
        self.deepest = outer.max(deepest);
        deepest
    }

    /// Finish the drawing as bordered schematic text.
    ///
    /// The grid grows downward from its seed row, which ends up last; it is
    /// rotated to the front so rows read top to bottom.
    pub fn into_schematic(mut self) -> String {
        self.rows.rotate_right(1);
        self.rows
            .iter()
            .map(|row| format!("{BORDER}{}{BORDER}", row.iter().collect::<String>()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(canvas: &Canvas) -> Vec<String> {
        canvas.rows.iter().map(|r| r.iter().collect()).collect()
    }

    #[test]
    fn draw_widens_by_repeating_the_edge() {
        let mut canvas = Canvas::with_width(0);
        canvas.down();
        canvas.set_marker(Marker { row: 0, col: 0 });
        canvas.draw("--[A]");
        assert_eq!(rows(&canvas), ["--[A]", "     "]);
        assert_eq!(canvas.col(), 4);

        canvas.right();
        canvas.draw("-");
        canvas.right();
        assert_eq!(rows(&canvas), ["--[A]--", "       "]);
    }

    #[test]
    fn fill_runs_to_the_edge() {
        let mut canvas = Canvas::with_width(6);
        canvas.right();
        canvas.right();
        canvas.fill('-');
        assert_eq!(rows(&canvas), ["  ----"]);
        assert_eq!(canvas.col(), 5);
    }

    #[test]
    fn moving_off_the_top_or_left_fails() {
        let mut canvas = Canvas::with_width(3);
        assert_eq!(
            canvas.left().unwrap_err(),
            LadderError::CanvasBounds {
                direction: Direction::Left,
                row: 0,
                col: 0
            }
        );
        assert!(matches!(
            canvas.up(),
            Err(LadderError::CanvasBounds {
                direction: Direction::Up,
                ..
            })
        ));
    }

    #[test]
    fn replace_up_rewrites_a_column() {
        let mut canvas = Canvas::with_width(4);
        canvas.fill('-');
        canvas.crlf();
        canvas.crlf();
        canvas.fill('-');
        let top = Marker { row: 0, col: 0 };
        canvas.replace_up(top, |c| match c {
            ' ' => Some("| "),
            '-' => Some("+ "),
            _ => None,
        })
        .unwrap();
        assert_eq!(canvas.row(), 0);
        assert_eq!(rows(&canvas), ["-----", "   | ", "---+ "]);
    }

    #[test]
    fn depth_tracking_nests() {
        let mut canvas = Canvas::with_width(1);
        let outer = canvas.begin_depth();
        canvas.down();
        let inner = canvas.begin_depth();
        canvas.down();
        canvas.down();
        assert_eq!(canvas.end_depth(inner), 3);
        canvas.set_marker(Marker { row: 0, col: 0 });
        assert_eq!(canvas.end_depth(outer), 3);
    }

    #[test]
    fn schematic_starts_with_the_seed_row() {
        let mut canvas = Canvas::with_width(2);
        canvas.fill('-');
        canvas.crlf();
        assert_eq!(canvas.into_schematic(), "||  ||\n||--||");
    }
}
