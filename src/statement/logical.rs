//! Keyword-driven statement detection for documents without terminators.

use tower_lsp::lsp_types::Position;

use crate::document::LineIndex;

use super::boundary::Statement;
use super::is_comment;
use super::keywords::KeywordSet;

/// Find the statement around the cursor by line-level heuristics.
///
/// The candidate range grows from the cursor's line in both directions until
/// it hits a logical boundary: a blank line, a `--` comment line, or a line
/// beginning with a statement keyword. A keyword line starts a *different*
/// statement and is never absorbed — which also means a multi-line
/// expression whose continuation line happens to begin with a keyword is
/// split apart. That is the price of the heuristic.
pub fn logical_statement_at(
    index: &LineIndex,
    keywords: &KeywordSet,
    position: Position,
) -> Option<Statement> {
    let line = position.line as usize;
    let current = index.line_text(line).trim();
    if current.is_empty() || is_comment(current) {
        return None;
    }

    let mut start_line = line;
    while start_line > 0 && !is_boundary(index.line_text(start_line - 1), keywords) {
        start_line -= 1;
    }

    let mut end_line = line;
    while end_line + 1 < index.line_count() && !is_boundary(index.line_text(end_line + 1), keywords)
    {
        end_line += 1;
    }

    let start = index.line_range(start_line).start;
    let end = index.line_range(end_line).end;
    let text = index.slice(start..end).trim();

    let offset = index.position_to_offset(position)?;
    if offset >= start && offset <= end && !text.is_empty() {
        Some(Statement {
            start,
            end,
            text: text.to_string(),
        })
    } else {
        None
    }
}

/// Whether a line terminates the up/down expansion.
fn is_boundary(line: &str, keywords: &KeywordSet) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || is_comment(trimmed) || keywords.starts_statement(trimmed)
}
