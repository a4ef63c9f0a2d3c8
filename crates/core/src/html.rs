//! Markdown-to-HTML conversion and line-oriented block classification.
//!
//! The PDF renderer does not build a DOM tree. The Markdown body is converted
//! to HTML once, then each physical line of the HTML output is treated as at
//! most one block, classified by its leading tag. Lines opening with a tag
//! that is not in the classification table are skipped entirely.
//!
//! This line-driven model assumes the converter emits one block per line,
//! which holds for headings, single-line paragraphs, list items, and the
//! first line of code blocks. Converters that wrap a single tag across
//! several physical lines are not reassembled — each line stands alone.

use pulldown_cmark::{html, Options, Parser};

/// Converts a Markdown document to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Block classification of a single HTML line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `<h1>` — document title
    Title,
    /// `<h2>` — section heading
    Section,
    /// `<h3>` — subsection heading
    Subsection,
    /// `<p>` — body paragraph
    Paragraph,
    /// `<li>` — bulleted list item
    Bullet,
    /// `<blockquote>` — quoted text
    Quote,
    /// `<code>` or `<pre>` — monospace code
    Code,
    /// No leading tag at all — drawn with paragraph styling
    Plain,
}

impl BlockKind {
    /// Headings are drawn even when their stripped text is empty; every
    /// other kind skips empty text.
    pub fn is_heading(self) -> bool {
        matches!(self, BlockKind::Title | BlockKind::Section | BlockKind::Subsection)
    }
}

/// Classifies one physical HTML line by its leading block tag.
///
/// Returns `None` for blank lines and for lines opening with a tag outside
/// the classification table (e.g. `</ul>` or `<hr />`) — those draw nothing.
pub fn classify_line(line: &str) -> Option<BlockKind> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with("<h1>") {
        Some(BlockKind::Title)
    } else if trimmed.starts_with("<h2>") {
        Some(BlockKind::Section)
    } else if trimmed.starts_with("<h3>") {
        Some(BlockKind::Subsection)
    } else if trimmed.starts_with("<p>") {
        Some(BlockKind::Paragraph)
    } else if trimmed.starts_with("<li>") {
        Some(BlockKind::Bullet)
    } else if trimmed.starts_with("<blockquote>") {
        Some(BlockKind::Quote)
    } else if trimmed.starts_with("<code>") || trimmed.starts_with("<pre>") {
        Some(BlockKind::Code)
    } else if !trimmed.starts_with('<') {
        Some(BlockKind::Plain)
    } else {
        None
    }
}

/// Strips HTML tags, decodes the standard entities, and trims the result.
///
/// Tags are any `<...>` span with a closing `>`; an unterminated `<` is kept
/// verbatim. Entities are decoded sequentially in a fixed order, so a
/// double-encoded `&amp;lt;` decodes to `&lt;`.
pub fn strip_html(line: &str) -> String {
    const ENTITIES: [(&str, &str); 6] = [
        ("&nbsp;", " "),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&amp;", "&"),
        ("&quot;", "\""),
        ("&#39;", "'"),
    ];

    let mut text = remove_tags(line);
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }
    text.trim().to_string()
}

/// Removes `<...>` spans. Equivalent to replacing `<[^>]*>` with nothing.
fn remove_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        match rest[start + 1..].find('>') {
            Some(end) => rest = &rest[start + 1 + end + 1..],
            None => {
                // no closing '>': keep the tail as-is
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
