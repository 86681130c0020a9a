use crate::Span;

/// Represents a location in the source text.
///
/// Produced by [`LineIndex`] when a token position has to be shown to a
/// human, e.g. in an error report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, counted in characters)
    pub column: usize,
    /// Character offset from the start of the input
    pub offset: usize,
}

impl Position {
    /// Creates a new position at the start of the input.
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps character offsets of a text to lines and columns.
///
/// Token positions of a `char` stream are character offsets, so a failure
/// span can be located in the original text without re-parsing it.
#[derive(Debug, Clone)]
pub struct LineIndex<'src> {
    text: &'src str,
    /// Char offset and byte offset of the first character of every line.
    line_starts: Vec<(usize, usize)>,
    char_len: usize,
}

impl<'src> LineIndex<'src> {
    /// Builds the index for `text`.
    pub fn new(text: &'src str) -> Self {
        let mut line_starts = vec![(0, 0)];
        let mut char_len = 0;
        for (chars, (bytes, ch)) in text.char_indices().enumerate() {
            if ch == '\n' {
                line_starts.push((chars + 1, bytes + 1));
            }
            char_len = chars + 1;
        }
        Self {
            text,
            line_starts,
            char_len,
        }
    }

    /// Returns the number of lines. An empty text has one (empty) line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Locates a character offset. Offsets past the end clamp to the end.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.char_len);
        let line = self
            .line_starts
            .partition_point(|&(start, _)| start <= offset)
            .saturating_sub(1);
        let column = offset - self.line_starts[line].0 + 1;
        Position::at(line + 1, column, offset)
    }

    /// Returns the text of a 1-indexed line without its line terminator.
    pub fn line(&self, line: usize) -> Option<&'src str> {
        let index = line.checked_sub(1)?;
        let &(_, start) = self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .map(|&(_, next)| next - 1)
            .unwrap_or(self.text.len());
        let text = &self.text[start..end];
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    /// Returns the character span of a 1-indexed line, terminator excluded.
    pub fn line_span(&self, line: usize) -> Option<Span> {
        let text = self.line(line)?;
        let start = self.line_starts[line - 1].0;
        Some(Span::new(start, start + text.chars().count()))
    }

    /// Converts a character offset into a byte offset of the text.
    pub fn byte_offset(&self, offset: usize) -> usize {
        let offset = offset.min(self.char_len);
        let line = self
            .line_starts
            .partition_point(|&(start, _)| start <= offset)
            .saturating_sub(1);
        let (char_start, byte_start) = self.line_starts[line];
        self.text[byte_start..]
            .char_indices()
            .nth(offset - char_start)
            .map(|(bytes, _)| byte_start + bytes)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_new() {
        let pos = Position::new();
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
        assert_eq!(pos.offset, 0);
    }

    #[test]
    fn test_position_default() {
        assert_eq!(Position::default(), Position::new());
    }

    #[test]
    fn test_line_index_single_line() {
        let index = LineIndex::new("hello");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.position(0), Position::at(1, 1, 0));
        assert_eq!(index.position(4), Position::at(1, 5, 4));
        assert_eq!(index.line(1), Some("hello"));
        assert_eq!(index.line(2), None);
    }

    #[test]
    fn test_line_index_multi_line() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.position(3), Position::at(2, 1, 3));
        assert_eq!(index.position(4), Position::at(2, 2, 4));
        assert_eq!(index.position(7), Position::at(4, 1, 7));
        assert_eq!(index.line(2), Some("cd"));
        assert_eq!(index.line(3), Some(""));
        assert_eq!(index.line_span(2), Some(Span::new(3, 5)));
    }

    #[test]
    fn test_line_index_newline_belongs_to_its_line() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.position(2), Position::at(1, 3, 2));
    }

    #[test]
    fn test_line_index_clamps_past_end() {
        let index = LineIndex::new("abc");
        assert_eq!(index.position(10), Position::at(1, 4, 3));
    }

    #[test]
    fn test_line_index_crlf() {
        let index = LineIndex::new("ab\r\ncd");
        assert_eq!(index.line(1), Some("ab"));
        assert_eq!(index.position(4), Position::at(2, 1, 4));
    }

    #[test]
    fn test_byte_offset_multibyte() {
        let index = LineIndex::new("é=1\nλx");
        assert_eq!(index.byte_offset(0), 0);
        assert_eq!(index.byte_offset(1), 2);
        assert_eq!(index.byte_offset(4), 5);
        assert_eq!(index.byte_offset(5), 7);
        assert_eq!(index.byte_offset(6), "é=1\nλx".len());
        assert_eq!(index.byte_offset(99), "é=1\nλx".len());
    }
}
