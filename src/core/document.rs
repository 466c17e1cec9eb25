//! Documents held by the tab session

use std::fmt;

/// Title given to documents that have no content yet
pub const DEFAULT_TITLE: &str = "New Tab";

/// Fallback title when nothing usable can be derived from content
pub const UNTITLED_TITLE: &str = "Untitled";

/// Maximum length of a title derived from document content, in characters
pub const DERIVED_TITLE_MAX_CHARS: usize = 20;

/// Identifier for a document, unique for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

impl DocumentId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One open markdown document, shown as a tab
#[derive(Debug, Clone)]
pub struct Document {
    /// Session-unique identifier
    pub id: DocumentId,
    /// Label shown in the tab strip
    pub title: String,
    /// Raw markdown source; empty means the tab is still unfilled
    pub content: String,
    /// True only while a drag gesture hovers over this document's view
    pub pending_drop: bool,
}

impl Document {
    /// Create an empty document with the default title
    pub fn blank(id: DocumentId) -> Self {
        Self {
            id,
            title: DEFAULT_TITLE.to_string(),
            content: String::new(),
            pending_drop: false,
        }
    }

    /// Create an already-filled document
    pub fn with_content(id: DocumentId, title: String, content: String) -> Self {
        Self {
            id,
            title,
            content,
            pending_drop: false,
        }
    }

    /// Whether the content is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Derive a tab title from document content.
///
/// Uses the first non-blank line with leading heading markers and
/// surrounding whitespace stripped, truncated to
/// [`DERIVED_TITLE_MAX_CHARS`] characters. Falls back to
/// [`UNTITLED_TITLE`] when nothing remains.
pub fn derive_title(content: &str) -> String {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");
    let stripped = first_line.trim_start_matches('#').trim();
    let title: String = stripped.chars().take(DERIVED_TITLE_MAX_CHARS).collect();
    if title.is_empty() {
        UNTITLED_TITLE.to_string()
    } else {
        title
    }
}

/// Title for an imported file: the file name with a trailing markdown
/// extension stripped.
pub fn title_from_file_name(file_name: &str) -> String {
    let re = regex_lite::Regex::new(r"(?i)\.(md|markdown)$").unwrap();
    re.replace(file_name, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_title_strips_heading_markers() {
        assert_eq!(derive_title("# Hello World\nbody"), "Hello World");
        assert_eq!(derive_title("### Deep heading"), "Deep heading");
    }

    #[test]
    fn test_derive_title_skips_blank_lines() {
        assert_eq!(derive_title("\n   \n## Notes\ntext"), "Notes");
    }

    #[test]
    fn test_derive_title_truncates_long_lines() {
        let line = "a".repeat(40);
        assert_eq!(derive_title(&line), "a".repeat(20));
    }

    #[test]
    fn test_derive_title_falls_back_to_untitled() {
        assert_eq!(derive_title(""), UNTITLED_TITLE);
        assert_eq!(derive_title("   \n\t\n"), UNTITLED_TITLE);
        assert_eq!(derive_title("###"), UNTITLED_TITLE);
    }

    #[test]
    fn test_title_from_file_name_strips_extension() {
        assert_eq!(title_from_file_name("notes.md"), "notes");
        assert_eq!(title_from_file_name("README.markdown"), "README");
        assert_eq!(title_from_file_name("UPPER.MD"), "UPPER");
    }

    #[test]
    fn test_title_from_file_name_keeps_inner_dots() {
        assert_eq!(title_from_file_name("v1.2-notes.md"), "v1.2-notes");
        assert_eq!(title_from_file_name("plain.txt"), "plain.txt");
    }

    #[test]
    fn test_blank_document() {
        let doc = Document::blank(DocumentId::new(1));
        assert_eq!(doc.title, DEFAULT_TITLE);
        assert!(doc.is_blank());
        assert!(!doc.pending_drop);
    }

    #[test]
    fn test_whitespace_only_content_counts_as_blank() {
        let doc = Document::with_content(DocumentId::new(1), "t".to_string(), "  \n\t".to_string());
        assert!(doc.is_blank());
    }
}
