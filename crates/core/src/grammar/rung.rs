/// Border marker framing every line that belongs to a rung.
pub const BORDER: &str = "||";

/// Wire character that fills the space between rung elements.
pub const FILL: char = '-';

/// One bordered line of a rung, with the border markers stripped.
///
/// Columns are addressed positionally across the lines of a rung, so the
/// content is kept as characters rather than bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RungLine {
    /// Content characters between the borders.
    pub chars: Vec<char>,
    /// Byte offset of the first content character in the schematic text.
    pub offset: usize,
}

impl RungLine {
    /// Character at `col`, if the line is that long.
    pub fn get(&self, col: usize) -> Option<char> {
        self.chars.get(col).copied()
    }

    /// Number of content characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the line has no content between its borders.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Byte offset in the schematic text of the character at `col`.
    pub fn byte_offset(&self, col: usize) -> usize {
        let col = col.min(self.chars.len());
        self.offset + self.chars[..col].iter().map(|c| c.len_utf8()).sum::<usize>()
    }

    /// The text from `col` to the end of the line, without trailing blanks.
    pub fn remainder(&self, col: usize) -> String {
        let col = col.min(self.chars.len());
        self.chars[col..].iter().collect::<String>().trim_end().to_string()
    }
}

/// The lines of one rung: the rung row first, then any rows below it that
/// carry parallel branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rung {
    /// Content lines, top to bottom. Never empty.
    pub lines: Vec<RungLine>,
}

/// Split schematic text into rungs.
///
/// Only lines framed by [`BORDER`] on both ends take part; everything else is
/// commentary and is skipped. A bordered line whose content starts with
/// [`FILL`] opens a new rung; any other bordered line is appended to the
/// current rung as an extra row.
pub fn split_rungs(schematic: &str) -> Vec<Rung> {
    let trimmed = schematic.trim();
    let mut line_start = schematic.len() - schematic.trim_start().len();
    let mut rungs = Vec::new();
    let mut current: Vec<RungLine> = Vec::new();

    for raw in trimmed.split('\n') {
        let start = line_start;
        line_start += raw.len() + 1;

        let line = raw.trim_end();
        if line.len() < 2 * BORDER.len() || !line.starts_with(BORDER) || !line.ends_with(BORDER) {
            continue;
        }

        let content = &line[BORDER.len()..line.len() - BORDER.len()];
        if content.starts_with(FILL) && !current.is_empty() {
            rungs.push(Rung {
                lines: std::mem::take(&mut current),
            });
        }
        current.push(RungLine {
            chars: content.chars().collect(),
            offset: start + BORDER.len(),
        });
    }

    if !current.is_empty() {
        rungs.push(Rung { lines: current });
    }

    rungs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(rung: &Rung) -> Vec<String> {
        rung.lines
            .iter()
            .map(|l| l.chars.iter().collect())
            .collect()
    }

    #[test]
    fn fill_led_lines_open_rungs() {
        let text = "||--[A]--(B)--||\n||  |        ||\n||--[C]--(D)--||";
        let rungs = split_rungs(text);
        assert_eq!(rungs.len(), 2);
        assert_eq!(rows(&rungs[0]), ["--[A]--(B)--", "  |        "]);
        assert_eq!(rows(&rungs[1]), ["--[C]--(D)--"]);
    }

    #[test]
    fn unbordered_lines_are_commentary() {
        let text = "!! a latch !!\n||--[A]--(B)--||\nplain words\n";
        let rungs = split_rungs(text);
        assert_eq!(rungs.len(), 1);
        assert_eq!(rows(&rungs[0]), ["--[A]--(B)--"]);
    }

    #[test]
    fn leading_blank_row_forms_its_own_rung() {
        let text = "||      ||\n||--(B)-||";
        let rungs = split_rungs(text);
        assert_eq!(rungs.len(), 2);
        assert_eq!(rows(&rungs[0]), ["      "]);
    }

    #[test]
    fn offsets_point_into_the_source() {
        let text = "  \n!! note !!\n||--[A]--||\r\n||--[B]--||";
        let rungs = split_rungs(text);
        assert_eq!(rungs.len(), 2);
        let second = &rungs[1].lines[0];
        assert_eq!(&text[second.offset..second.offset + 7], "--[B]--");
        let first = &rungs[0].lines[0];
        assert_eq!(&text[first.byte_offset(2)..first.byte_offset(5)], "[A]");
    }

    #[test]
    fn short_and_empty_lines_are_ignored() {
        assert!(split_rungs("").is_empty());
        assert!(split_rungs("|||").is_empty());
        let rungs = split_rungs("||||");
        assert_eq!(rungs.len(), 1);
        assert!(rungs[0].lines[0].is_empty());
    }

    #[test]
    fn remainder_trims_trailing_blanks() {
        let line = RungLine {
            chars: "--?x--   ".chars().collect(),
            offset: 0,
        };
        assert_eq!(line.remainder(2), "?x--");
        assert_eq!(line.remainder(40), "");
    }
}
