//! Locating the statement that follows the one just resolved.

use tower_lsp::lsp_types::Position;

use crate::document::LineIndex;

use super::is_comment;
use super::keywords::KeywordSet;
use super::logical::logical_statement_at;
use super::splitter::split;

/// Where the cursor should land after the current statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPlacement {
    /// Move the cursor to an existing position.
    Move(Position),
    /// No blank line exists to park on: the client must insert a newline at
    /// `insert_at`, then move the cursor to `park`.
    InsertBlankLine { insert_at: Position, park: Position },
}

/// Find where the cursor should go after executing the statement at
/// `position`.
///
/// Looks for the next semicolon-delimited statement first, then for the
/// next keyword-leading line, and otherwise parks after the last statement,
/// synthesizing a blank line when the document does not end in one.
///
/// Returns `None` only when no statement encloses `position`; callers
/// resolve the current statement first, so that path is defensive.
pub fn next_statement_start(
    index: &LineIndex,
    keywords: &KeywordSet,
    position: Position,
) -> Option<NextPlacement> {
    let end_offset = current_statement_end(index, keywords, position)?;

    if let Some(target) = next_terminated_start(index, end_offset) {
        return Some(NextPlacement::Move(target));
    }

    let end_line = index.offset_to_position(end_offset).line as usize;
    if let Some(target) = next_keyword_start(index, keywords, end_line) {
        return Some(NextPlacement::Move(target));
    }

    Some(park_after_last(index, end_line))
}

/// Byte offset just past the current statement.
///
/// Semicolon arithmetic when the document has terminators: the offset just
/// past the enclosing partition's `;`, or the end of text for the final
/// unterminated partition. Terminator-less documents use the logical
/// scanner's statement end instead, mirroring statement resolution.
fn current_statement_end(
    index: &LineIndex,
    keywords: &KeywordSet,
    position: Position,
) -> Option<usize> {
    let text = index.source();
    if !text.contains(';') {
        return logical_statement_at(index, keywords, position).map(|statement| statement.end);
    }

    let offset = index.position_to_offset(position)?;
    let parts: Vec<&str> = text.split(';').collect();
    let last = parts.len() - 1;

    let mut current = 0;
    for (i, part) in parts.iter().enumerate() {
        let end = current + part.len();
        if offset >= current && offset <= end {
            return Some(end + usize::from(i < last));
        }
        current += part.len() + 1;
    }
    None
}

/// First non-blank, non-comment line within the first semicolon-delimited
/// segment that follows `search_start`.
///
/// Only the first segment is inspected; a comment-only segment there hands
/// the search over to the keyword scan.
fn next_terminated_start(index: &LineIndex, search_start: usize) -> Option<Position> {
    let remaining = &index.source()[search_start..];
    let segment = split(remaining).into_iter().next()?;

    let mut line_offset = search_start + segment.start;
    for line in segment.raw(remaining).split('\n') {
        let trimmed = line.trim();
        if !trimmed.is_empty() && !is_comment(trimmed) {
            let column = line.len() - line.trim_start().len();
            return Some(index.offset_to_position(line_offset + column));
        }
        line_offset += line.len() + 1;
    }
    None
}

/// First keyword-leading line after `after_line`, for documents whose next
/// statement carries no terminator.
fn next_keyword_start(
    index: &LineIndex,
    keywords: &KeywordSet,
    after_line: usize,
) -> Option<Position> {
    for line in after_line + 1..index.line_count() {
        let trimmed = index.line_text(line).trim();
        if !trimmed.is_empty() && !is_comment(trimmed) && keywords.starts_statement(trimmed) {
            return Some(index.offset_to_position(index.first_non_whitespace(line)));
        }
    }
    None
}

/// The current statement was the last one: pick (or synthesize) an empty
/// line below it for the cursor to land on.
fn park_after_last(index: &LineIndex, end_line: usize) -> NextPlacement {
    let last_line = index.line_count() - 1;

    if end_line >= last_line {
        if index.line_text(last_line).trim().is_empty() {
            return NextPlacement::Move(Position::new(last_line as u32, 0));
        }
        // Append a newline after the final line, park on the fresh line
        let insert_at = index.offset_to_position(index.line_range(last_line).end);
        return NextPlacement::InsertBlankLine {
            insert_at,
            park: Position::new(last_line as u32 + 1, 0),
        };
    }

    let next_line = end_line + 1;
    let target = Position::new(next_line as u32, 0);
    if index.line_text(next_line).trim().is_empty() {
        NextPlacement::Move(target)
    } else {
        NextPlacement::InsertBlankLine {
            insert_at: target,
            park: target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn next(source: &str, line: u32, character: u32) -> Option<NextPlacement> {
        let index = LineIndex::new(source.to_string());
        next_statement_start(&index, &KeywordSet::default(), Position::new(line, character))
    }

    #[test]
    fn moves_to_next_terminated_statement() {
        let placement = next("SELECT 1;\nSELECT 2;", 0, 3).unwrap();
        assert_eq!(placement, NextPlacement::Move(Position::new(1, 0)));
    }

    #[test]
    fn skips_blank_and_comment_lines_before_next_statement() {
        let placement = next("SELECT 1;\n\n-- next one\n  SELECT 2;", 0, 0).unwrap();
        assert_eq!(placement, NextPlacement::Move(Position::new(3, 2)));
    }

    #[test]
    fn finds_unterminated_trailing_statement() {
        let placement = next("SELECT 1;\n\nSELECT 2", 0, 4).unwrap();
        assert_eq!(placement, NextPlacement::Move(Position::new(2, 0)));
    }

    #[test]
    fn keyword_scan_takes_over_after_a_comment_only_segment() {
        // The first segment after the statement holds only a comment, so
        // the keyword line scan locates the following statement instead.
        let placement = next("SELECT 1;\n-- preamble;\nselect 2", 0, 5).unwrap();
        assert_eq!(placement, NextPlacement::Move(Position::new(2, 0)));
    }

    #[test]
    fn parks_on_existing_blank_terminal_line() {
        let placement = next("SELECT 1;\n", 0, 2).unwrap();
        assert_eq!(placement, NextPlacement::Move(Position::new(1, 0)));
    }

    #[test]
    fn parks_in_place_when_already_on_a_blank_terminal_line() {
        // Cursor in the trailing whitespace partition: its end is the blank
        // final line, which is already a valid parking spot.
        let placement = next("SELECT 1;\n\n", 2, 0).unwrap();
        assert_eq!(placement, NextPlacement::Move(Position::new(2, 0)));
    }

    #[test]
    fn appends_blank_line_after_final_unterminated_statement() {
        let placement = next("SELECT 1", 0, 4).unwrap();
        assert_eq!(
            placement,
            NextPlacement::InsertBlankLine {
                insert_at: Position::new(0, 8),
                park: Position::new(1, 0),
            }
        );
    }

    #[test]
    fn parks_on_blank_line_between_statements_worth_of_whitespace() {
        // Statement ends mid-document with a blank line right below it
        let placement = next("SELECT 1;\n\n-- only comments follow\n", 0, 0).unwrap();
        assert_eq!(placement, NextPlacement::Move(Position::new(1, 0)));
    }

    #[test]
    fn inserts_blank_line_when_next_line_is_a_comment() {
        let placement = next("SELECT 1;\n-- no statement after\n", 0, 0).unwrap();
        assert_eq!(
            placement,
            NextPlacement::InsertBlankLine {
                insert_at: Position::new(1, 0),
                park: Position::new(1, 0),
            }
        );
    }

    #[test]
    fn statement_end_spans_to_terminator() {
        let index = LineIndex::new("SELECT 1;\nSELECT 2;".to_string());
        let keywords = KeywordSet::default();
        // Anywhere in the first statement ends just past its `;`
        assert_eq!(
            current_statement_end(&index, &keywords, Position::new(0, 0)),
            Some(9)
        );
        assert_eq!(
            current_statement_end(&index, &keywords, Position::new(0, 8)),
            Some(9)
        );
        // The second, final partition ends at end of text
        assert_eq!(
            current_statement_end(&index, &keywords, Position::new(1, 4)),
            Some(19)
        );
    }

    #[test]
    fn statement_end_is_logical_without_terminators() {
        let index = LineIndex::new("SELECT 1\nFROM t\n\nSELECT 2".to_string());
        let keywords = KeywordSet::default();
        // End of the FROM line, not end of text
        assert_eq!(
            current_statement_end(&index, &keywords, Position::new(0, 3)),
            Some(15)
        );
    }

    #[test]
    fn advances_between_unterminated_statements() {
        let placement = next("SELECT 1\nFROM t\n\nUPDATE t SET x = 2\n", 0, 2).unwrap();
        assert_eq!(placement, NextPlacement::Move(Position::new(3, 0)));
    }

    #[test]
    fn never_moves_backwards() {
        let sources = [
            "SELECT 1;\nSELECT 2;",
            "SELECT 1;\n\nSELECT 2",
            "SELECT 1\nFROM t\n\nSELECT 2",
            "SELECT 1;",
            "SELECT 1",
        ];
        let keywords = KeywordSet::default();
        for source in sources {
            let index = LineIndex::new(source.to_string());
            let origin = Position::new(0, 0);
            let Some(placement) = next_statement_start(&index, &keywords, origin) else {
                panic!("no placement for {source:?}");
            };
            let target = match placement {
                NextPlacement::Move(p) => p,
                NextPlacement::InsertBlankLine { park, .. } => park,
            };
            assert!(
                target.line > origin.line || target.character > origin.character,
                "placement {target:?} does not advance for {source:?}",
            );
        }
    }

    #[test]
    fn defensive_none_when_position_is_outside_the_document() {
        assert_eq!(next("SELECT 1;", 7, 0), None);
    }

    #[test]
    fn defensive_none_when_no_statement_encloses_the_cursor() {
        // Blank cursor line in a terminator-less document: nothing to end
        assert_eq!(next("VACUUM\n\n", 1, 0), None);
    }
}
