//! Custom request payloads and their pure handlers.
//!
//! Every handler is a pure function over a document snapshot; the `Backend`
//! only looks up the document and delegates here. Resolution never executes
//! anything — the client owns whatever channel runs the returned SQL, and
//! it must apply the returned edit (if any) before repositioning its cursor.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::{Position, Range, TextDocumentIdentifier, TextEdit};

use crate::document::LineIndex;
use crate::statement::{next_statement_start, statement_at, KeywordSet, NextPlacement, NoStatement};

/// Response to `sqlsp/currentStatement`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentStatementResponse {
    /// The resolved statement, or `None` with a `reason`.
    pub statement: Option<ResolvedStatement>,
    /// Why nothing resolved: "past-content", "blank-line" or "no-boundary".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

/// A statement the client can hand to its execution channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStatement {
    /// Trimmed statement text, terminator retained when present.
    pub text: String,
    /// The statement's extent in the document.
    pub range: Range,
}

/// Response to `sqlsp/nextStatementStart`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextStatementResponse {
    /// Where to put the cursor; `None` when no statement enclosed the
    /// request position.
    pub placement: Option<Placement>,
}

/// A cursor target, with an optional edit to apply first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// The position to move the cursor to.
    pub position: Position,
    /// A newline insertion the client must apply before moving; present
    /// only when parking past the last statement needs a fresh blank line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert: Option<TextEdit>,
}

/// Parameters for `sqlsp/selectionText`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionTextParams {
    pub text_document: TextDocumentIdentifier,
    pub range: Range,
}

/// Response carrying resolved text, for `sqlsp/selectionText` and
/// `sqlsp/documentText`. `None` when the resolved region is blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextResponse {
    pub text: Option<String>,
}

/// Resolve the statement at the cursor position.
pub fn current_statement(
    index: &LineIndex,
    keywords: &KeywordSet,
    position: Position,
) -> CurrentStatementResponse {
    match statement_at(index, keywords, position) {
        Ok(statement) => CurrentStatementResponse {
            statement: Some(ResolvedStatement {
                range: index.span_to_range(&(statement.start..statement.end)),
                text: statement.text,
            }),
            reason: None,
        },
        Err(miss) => CurrentStatementResponse {
            statement: None,
            reason: Some(reason_code(miss)),
        },
    }
}

/// Resolve the cursor placement following the statement at `position`.
pub fn next_statement(
    index: &LineIndex,
    keywords: &KeywordSet,
    position: Position,
) -> NextStatementResponse {
    let placement = next_statement_start(index, keywords, position).map(|p| match p {
        NextPlacement::Move(position) => Placement {
            position,
            insert: None,
        },
        NextPlacement::InsertBlankLine { insert_at, park } => Placement {
            position: park,
            insert: Some(TextEdit {
                range: Range::new(insert_at, insert_at),
                new_text: "\n".to_string(),
            }),
        },
    });
    NextStatementResponse { placement }
}

/// Trimmed text of a selection.
pub fn selection_text(index: &LineIndex, range: Range) -> TextResponse {
    let text = index
        .position_to_offset(range.start)
        .zip(index.position_to_offset(range.end))
        .map(|(start, end)| index.slice(start..end).trim().to_string())
        .filter(|text| !text.is_empty());
    TextResponse { text }
}

/// Trimmed text of the whole document.
pub fn document_text(index: &LineIndex) -> TextResponse {
    let text = index.source().trim();
    TextResponse {
        text: (!text.is_empty()).then(|| text.to_string()),
    }
}

fn reason_code(miss: NoStatement) -> &'static str {
    match miss {
        NoStatement::PastContent => "past-content",
        NoStatement::BlankLine => "blank-line",
        NoStatement::NoBoundary => "no-boundary",
    }
}
