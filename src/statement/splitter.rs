//! Semicolon-based statement segmentation.
//!
//! Splitting is purely lexical: a `;` inside a string literal or a comment
//! still ends a segment. Known limitation — fixing it requires a real SQL
//! tokenizer aware of literals, quoted identifiers, and block comments.

use std::ops::Range;

/// A semicolon-delimited partition of document text.
///
/// `end` is exclusive and includes the terminating `;`, except for the final
/// partition, which has no terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Byte offset of the partition start.
    pub start: usize,
    /// Exclusive byte offset of the partition end.
    pub end: usize,
}

impl Segment {
    /// Byte range of this segment.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether the cursor offset falls within this segment.
    ///
    /// Inclusive on both ends so a cursor sitting exactly on a boundary
    /// character still resolves to the segment.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }

    /// The raw (untrimmed) text of this segment.
    pub fn raw<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Split text into semicolon-delimited segments.
///
/// Whitespace-only partitions are filtered out but still consume offset
/// space, so segment offsets stay accurate for the original text. Segment
/// spans never overlap and appear in document order.
pub fn split(text: &str) -> Vec<Segment> {
    let parts: Vec<&str> = text.split(';').collect();
    let last = parts.len() - 1;

    let mut segments = Vec::new();
    let mut offset = 0;
    for (i, part) in parts.iter().enumerate() {
        if !part.trim().is_empty() {
            // Include the consumed `;` except for the final partition
            let end = offset + part.len() + usize::from(i < last);
            segments.push(Segment { start: offset, end });
        }
        offset += part.len() + 1; // +1 for the consumed `;`
    }
    segments
}
