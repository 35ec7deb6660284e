//! Document symbols: one entry per semicolon-delimited statement.

use tower_lsp::lsp_types::{DocumentSymbol, SymbolKind};

use crate::document::LineIndex;
use crate::statement::{is_comment, split};

/// Build an outline of the document's statements.
///
/// Each semicolon-delimited segment becomes one flat symbol named after its
/// first content line (or its first line, for comment-only segments).
#[allow(deprecated)] // DocumentSymbol::deprecated must still be populated
pub fn statement_symbols(index: &LineIndex) -> Vec<DocumentSymbol> {
    split(index.source())
        .iter()
        .map(|segment| {
            let raw = segment.raw(index.source());
            let name = raw
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty() && !is_comment(line))
                .unwrap_or_else(|| raw.trim())
                .to_string();

            let range = index.span_to_range(&segment.span());
            DocumentSymbol {
                name,
                detail: None,
                kind: SymbolKind::OBJECT,
                tags: None,
                deprecated: None,
                range,
                selection_range: range,
                children: None,
            }
        })
        .collect()
}
