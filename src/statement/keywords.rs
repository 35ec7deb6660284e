//! Statement-leading keyword detection for the logical scanner.

use regex::Regex;

/// Keywords treated as statement starts when no explicit terminator is
/// available. Dialect-specific leaders (EXPLAIN, PRAGMA, COPY, ...) are not
/// included by default; add them through `[statement] keywords` in
/// settings.toml.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "select", "insert", "update", "delete", "create", "drop", "alter", "with",
];

/// Case-insensitive matcher for lines that begin a statement.
///
/// Matching is a plain prefix match with no word boundary, so a line starting
/// with `selection_audit` also counts as a statement start. This replicates
/// the segmentation behavior editors relying on this server already observe;
/// tightening it would silently re-segment existing documents.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    pattern: Regex,
}

impl KeywordSet {
    /// Build a matcher from a keyword list.
    ///
    /// Blank entries are dropped; an effectively empty list falls back to
    /// [`DEFAULT_KEYWORDS`].
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let escaped: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .map(|k| regex::escape(&k))
            .collect();

        if escaped.is_empty() {
            return Self::default();
        }

        let pattern = Regex::new(&format!("(?i)^(?:{})", escaped.join("|"))).unwrap();
        Self { pattern }
    }

    /// Whether a trimmed line begins with one of the statement keywords.
    pub fn starts_statement(&self, trimmed_line: &str) -> bool {
        self.pattern.is_match(trimmed_line)
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keywords_match_case_insensitively() {
        let keywords = KeywordSet::default();
        assert!(keywords.starts_statement("SELECT * FROM t"));
        assert!(keywords.starts_statement("select 1"));
        assert!(keywords.starts_statement("With cte AS (SELECT 1)"));
        assert!(keywords.starts_statement("DROP TABLE t"));
    }

    #[test]
    fn non_leading_keywords_do_not_match() {
        let keywords = KeywordSet::default();
        assert!(!keywords.starts_statement("FROM t"));
        assert!(!keywords.starts_statement("  SELECT 1")); // caller trims
        assert!(!keywords.starts_statement("-- select commented out"));
    }

    #[test]
    fn prefix_matching_has_no_word_boundary() {
        let keywords = KeywordSet::default();
        assert!(keywords.starts_statement("selection_audit()"));
        assert!(keywords.starts_statement("created_at"));
    }

    #[test]
    fn custom_keyword_list_replaces_defaults() {
        let keywords = KeywordSet::new(["explain", "pragma"]);
        assert!(keywords.starts_statement("EXPLAIN SELECT 1"));
        assert!(keywords.starts_statement("PRAGMA table_info(t)"));
        assert!(!keywords.starts_statement("SELECT 1"));
    }

    #[test]
    fn blank_entries_are_dropped() {
        let keywords = KeywordSet::new(["explain", "  ", ""]);
        assert!(keywords.starts_statement("explain analyze"));
        // A blank entry must not turn the pattern into a match-everything
        assert!(!keywords.starts_statement("FROM t"));
    }

    #[test]
    fn empty_list_falls_back_to_defaults() {
        let keywords = KeywordSet::new(Vec::<String>::new());
        assert!(keywords.starts_statement("SELECT 1"));
    }

    #[test]
    fn regex_metacharacters_in_keywords_are_escaped() {
        let keywords = KeywordSet::new(["select.*"]);
        assert!(keywords.starts_statement("select.* rest"));
        assert!(!keywords.starts_statement("select 1"));
    }
}
