//! Markdown conversion helpers and file export

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pulldown_cmark::{html, Options, Parser};

use crate::core::document;

/// Convert markdown to an HTML fragment
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut html = String::new();
    html::push_html(&mut html, parser);
    html
}

/// Strip markdown punctuation for plain-text previews.
///
/// Drops heading, emphasis, code and link-bracket characters, keeps
/// the first `max_chars` characters of what remains and appends an
/// ellipsis when the source itself is longer than `max_chars`.
pub fn preview_text(content: &str, max_chars: usize) -> String {
    let re = regex_lite::Regex::new(r"[#*`_~\[\]()]").unwrap();
    let plain = re.replace_all(content, "");
    let mut preview: String = plain.chars().take(max_chars).collect();
    if content.chars().count() > max_chars {
        preview.push_str("...");
    }
    preview
}

/// Make a document title safe to use as a file name.
///
/// Characters reserved on common file systems become underscores and
/// trailing dots and spaces are dropped. An empty result falls back
/// to the untitled name.
pub fn sanitize_file_name(title: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim_end_matches(['.', ' ']);
    if cleaned.is_empty() {
        document::UNTITLED_TITLE.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Write a document's raw markdown to disk
pub fn write_markdown(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .with_context(|| format!("Failed to save file: {}", path.display()))?;
    tracing::info!("Saved markdown to {}", path.display());
    Ok(())
}

/// Render a document to a standalone HTML page and write it to disk
pub fn write_html(path: &Path, title: &str, markdown: &str) -> Result<()> {
    fs::write(path, html_page(title, markdown))
        .with_context(|| format!("Failed to save file: {}", path.display()))?;
    tracing::info!("Saved HTML to {}", path.display());
    Ok(())
}

fn html_page(title: &str, markdown: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_text(title),
        markdown_to_html(markdown)
    )
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_html_renders_basic_blocks() {
        let html = markdown_to_html("# Title\n\nSome **bold** text");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_markdown_to_html_enables_extensions() {
        assert!(markdown_to_html("~~gone~~").contains("<del>gone</del>"));
        assert!(markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |").contains("<table>"));
        assert!(markdown_to_html("- [x] done").contains("checkbox"));
    }

    #[test]
    fn test_preview_text_strips_markers_and_truncates() {
        assert_eq!(preview_text("# **Bold** text here", 10), " Bold text...");
    }

    #[test]
    fn test_preview_text_without_truncation() {
        assert_eq!(preview_text("hi", 10), "hi");
        assert_eq!(preview_text("# hi", 10), " hi");
    }

    #[test]
    fn test_preview_ellipsis_follows_source_length() {
        // Short once stripped, but the source is over the limit.
        assert_eq!(preview_text("####*()[]x", 9), "x...");
    }

    #[test]
    fn test_preview_text_is_character_based() {
        assert_eq!(preview_text("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_sanitize_file_name_replaces_reserved_characters() {
        assert_eq!(sanitize_file_name("a/b:c*d?e"), "a_b_c_d_e");
        assert_eq!(sanitize_file_name("plain name"), "plain name");
    }

    #[test]
    fn test_sanitize_file_name_trims_trailing_dots() {
        assert_eq!(sanitize_file_name("notes. "), "notes");
    }

    #[test]
    fn test_sanitize_file_name_falls_back_when_empty() {
        assert_eq!(sanitize_file_name("   "), "Untitled");
        assert_eq!(sanitize_file_name("..."), "Untitled");
    }

    #[test]
    fn test_html_page_escapes_title() {
        let page = html_page("<Tags> & Co", "body");
        assert!(page.contains("<title>&lt;Tags&gt; &amp; Co</title>"));
    }

    #[test]
    fn test_write_markdown_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");
        write_markdown(&path, "# Out").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Out");
    }

    #[test]
    fn test_write_html_renders_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        write_html(&path, "Out", "# Heading").unwrap();
        let page = fs::read_to_string(&path).unwrap();
        assert!(page.contains("<h1>Heading</h1>"));
        assert!(page.starts_with("<!DOCTYPE html>"));
    }
}
