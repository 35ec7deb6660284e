//! SQL statement segmentation and cursor-relative navigation.
//!
//! Two strategies cooperate, in order:
//! 1. Semicolon-based: `split` partitions the text on `;` and the cursor
//!    resolves to the segment containing it.
//! 2. Keyword-based: for documents without terminators, a line scanner
//!    expands from the cursor to the nearest logical boundaries (blank
//!    lines, `--` comment lines, statement-leading keyword lines).
//!
//! All functions are pure and operate on an immutable [`LineIndex`]
//! snapshot; nothing here mutates the document or caches across calls.
//!
//! [`LineIndex`]: crate::LineIndex

mod boundary;
mod keywords;
mod logical;
mod next;
mod splitter;

pub use boundary::{statement_at, NoStatement, Statement};
pub use keywords::{KeywordSet, DEFAULT_KEYWORDS};
pub use logical::logical_statement_at;
pub use next::{next_statement_start, NextPlacement};
pub use splitter::{split, Segment};

/// Line-comment marker recognized as a logical boundary.
const LINE_COMMENT: &str = "--";

/// Whether an already-trimmed line is a `--` comment line.
pub(crate) fn is_comment(trimmed_line: &str) -> bool {
    trimmed_line.starts_with(LINE_COMMENT)
}
