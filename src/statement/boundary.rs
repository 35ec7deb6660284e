//! Statement resolution at a cursor position.

use tower_lsp::lsp_types::Position;

use crate::document::LineIndex;

use super::is_comment;
use super::keywords::KeywordSet;
use super::logical::logical_statement_at;
use super::splitter::{split, Segment};

/// A resolved statement: a trimmed slice of document text with its byte
/// offsets. `end` is exclusive and, for semicolon-terminated statements,
/// includes the terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub start: usize,
    pub end: usize,
    /// Trimmed statement text, terminator retained when present.
    pub text: String,
}

/// Why no statement could be resolved at the cursor.
///
/// The three causes are distinct so the client can report them distinctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoStatement {
    /// The cursor sits after all real content in the document.
    PastContent,
    /// The cursor is on a blank or comment line with no content below it.
    BlankLine,
    /// Neither the semicolon strategy nor the logical scanner found a
    /// boundary enclosing the cursor.
    NoBoundary,
}

/// Find the statement at the cursor position.
///
/// Tries semicolon-delimited segments first; when none contains the cursor
/// (no terminators in the document, or the cursor lies past the last one),
/// falls back to the keyword-driven logical scanner.
pub fn statement_at(
    index: &LineIndex,
    keywords: &KeywordSet,
    position: Position,
) -> Result<Statement, NoStatement> {
    let Some(offset) = index.position_to_offset(position) else {
        return Err(NoStatement::PastContent);
    };

    // A document without a single terminator has no semicolon-delimited
    // statements; only the logical scanner applies there.
    let text = index.source();
    if text.contains(';') {
        for segment in split(text) {
            if segment.contains(offset) {
                return Ok(statement_from_segment(text, &segment));
            }
        }
    }

    // A cursor parked on a blank or comment line only counts as "inside" a
    // statement when real content still exists further down.
    let line = position.line as usize;
    let current = index.line_text(line).trim();
    if (current.is_empty() || is_comment(current)) && !has_content_below(index, line) {
        return Err(NoStatement::BlankLine);
    }

    // Trailing whitespace region after all real content
    if text[offset..].trim().is_empty() {
        return Err(NoStatement::PastContent);
    }

    logical_statement_at(index, keywords, position).ok_or(NoStatement::NoBoundary)
}

/// Build a [`Statement`] from a semicolon segment: trim the body, then
/// re-append the terminator when the segment carries one.
fn statement_from_segment(text: &str, segment: &Segment) -> Statement {
    let raw = segment.raw(text);
    let statement_text = match raw.strip_suffix(';') {
        Some(body) => format!("{};", body.trim()),
        None => raw.trim().to_string(),
    };
    Statement {
        start: segment.start,
        end: segment.end,
        text: statement_text,
    }
}

/// Whether any non-blank, non-comment line exists below `line`.
fn has_content_below(index: &LineIndex, line: usize) -> bool {
    (line + 1..index.line_count()).any(|below| {
        let text = index.line_text(below).trim();
        !text.is_empty() && !is_comment(text)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(source: &str) -> LineIndex {
        LineIndex::new(source.to_string())
    }

    fn at(index: &LineIndex, line: u32, character: u32) -> Result<Statement, NoStatement> {
        statement_at(index, &KeywordSet::default(), Position::new(line, character))
    }

    #[test]
    fn cursor_anywhere_in_terminated_statement_resolves_it() {
        let idx = index("SELECT 1;");
        for character in 0..=9 {
            let statement = at(&idx, 0, character).unwrap();
            assert_eq!(statement.text, "SELECT 1;");
            assert_eq!((statement.start, statement.end), (0, 9));
        }
    }

    #[test]
    fn resolves_second_statement_on_following_line() {
        let idx = index("SELECT 1;\nSELECT 2;");
        let statement = at(&idx, 1, 3).unwrap();
        assert_eq!(statement.text, "SELECT 2;");
        assert_eq!((statement.start, statement.end), (10, 19));
    }

    #[test]
    fn statement_text_is_trimmed_with_terminator_retained() {
        let idx = index("\n  SELECT 1  ;\n");
        let statement = at(&idx, 1, 4).unwrap();
        // Inner whitespace before the `;` is dropped along with the trim
        assert_eq!(statement.text, "SELECT 1;");
    }

    #[test]
    fn unterminated_final_statement_resolves_without_terminator() {
        let idx = index("SELECT 1;\nSELECT 2");
        let statement = at(&idx, 1, 0).unwrap();
        assert_eq!(statement.text, "SELECT 2");
        assert_eq!(statement.end, 18);
    }

    #[test]
    fn statement_at_is_idempotent() {
        let idx = index("SELECT 1;\n\nSELECT 2;");
        let position = Position::new(0, 4);
        let keywords = KeywordSet::default();
        assert_eq!(
            statement_at(&idx, &keywords, position),
            statement_at(&idx, &keywords, position),
        );
    }

    #[test]
    fn blank_line_with_no_content_below_is_rejected() {
        let idx = index("SELECT 1;\n\n");
        assert_eq!(at(&idx, 2, 0), Err(NoStatement::BlankLine));

        // Comment lines below do not count as content
        let idx = index("SELECT 1\n\n-- trailing note\n");
        assert_eq!(at(&idx, 1, 0), Err(NoStatement::BlankLine));
    }

    #[test]
    fn blank_line_with_content_below_still_fails_without_boundary() {
        // The blank line between statements belongs to neither
        let idx = index("SELECT 1\n\nSELECT 2");
        assert_eq!(at(&idx, 1, 0), Err(NoStatement::NoBoundary));
    }

    #[test]
    fn comment_line_with_no_content_below_is_rejected() {
        let idx = index("SELECT 1\n-- done\n");
        assert_eq!(at(&idx, 1, 3), Err(NoStatement::BlankLine));
    }

    #[test]
    fn cursor_at_end_of_final_unterminated_line_is_past_content() {
        let idx = index("SELECT 1\nFROM t\n");
        assert_eq!(at(&idx, 1, 6), Err(NoStatement::PastContent));
    }

    #[test]
    fn falls_back_to_logical_scan_without_terminators() {
        let idx = index("-- comment\nSELECT 1\nFROM t");
        let statement = at(&idx, 1, 2).unwrap();
        assert_eq!(statement.text, "SELECT 1\nFROM t");
    }

    #[test]
    fn cursor_on_boundary_between_adjacent_segments_takes_the_earlier() {
        // Offset 9 is both the end of segment one and the start of segment two
        let idx = index("SELECT 1;SELECT 2;");
        let statement = at(&idx, 0, 9).unwrap();
        assert_eq!(statement.text, "SELECT 1;");
    }

    #[test]
    fn position_past_last_line_is_past_content() {
        let idx = index("SELECT 1;");
        assert_eq!(at(&idx, 5, 0), Err(NoStatement::PastContent));
    }

    #[test]
    fn empty_document_has_nothing_to_resolve() {
        let idx = index("");
        assert_eq!(at(&idx, 0, 0), Err(NoStatement::BlankLine));
    }
}
