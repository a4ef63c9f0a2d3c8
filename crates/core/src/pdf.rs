//! PDF rendering of Markdown report documents.
//!
//! The Markdown body is converted to HTML, then each physical line is
//! classified by [`crate::html::classify_line`] and drawn with a per-tag
//! style rule onto A4 pages with ~2 cm margins.
//!
//! Vertical flow is owned by [`PageWriter`]: every drawn block advances the
//! cursor, and the writer starts a new page when a block would cross the
//! bottom margin. The per-tag rendering loop never computes page breaks.
//!
//! Rendering is synchronous; the wall-clock timeout is enforced by the
//! caller racing this function against a timer.

use crate::constants::{A4_HEIGHT_MM, A4_WIDTH_MM, PAGE_MARGIN_MM, PDF_DOC_TITLE};
use crate::error::RenderError;
use crate::html::{self, BlockKind};
use printpdf::path::PaintMode;
use printpdf::*;
use std::io::BufWriter;

const PT_TO_MM: f32 = 0.352_778;

/// Line advance as a multiple of the font size.
const LINE_FACTOR: f32 = 1.4;

/// Approximate glyph advance as a fraction of the font size, for one
/// width unit (ASCII = 1 unit, other scripts = 2 units).
const UNIT_WIDTH_EM: f32 = 0.5;

const CONTENT_WIDTH_MM: f32 = A4_WIDTH_MM - 2.0 * PAGE_MARGIN_MM;

/// Vertical padding inside a code background band.
const CODE_PAD_MM: f32 = 1.5;

#[derive(Debug, Clone, Copy)]
enum FontKind {
    Regular,
    Bold,
    Oblique,
    Mono,
}

/// Drawing rule for one block classification.
struct BlockStyle {
    size: f32,
    font: FontKind,
    color: (f32, f32, f32),
    indent_mm: f32,
    space_after_mm: f32,
    prefix: &'static str,
}

fn style_for(kind: BlockKind) -> BlockStyle {
    match kind {
        BlockKind::Title => BlockStyle {
            size: 24.0,
            font: FontKind::Bold,
            color: (0.102, 0.102, 0.102),
            indent_mm: 0.0,
            space_after_mm: 0.0, // the separator rule carries the spacing
            prefix: "",
        },
        BlockKind::Section => BlockStyle {
            size: 18.0,
            font: FontKind::Bold,
            color: (0.165, 0.165, 0.165),
            indent_mm: 0.0,
            space_after_mm: 5.0,
            prefix: "",
        },
        BlockKind::Subsection => BlockStyle {
            size: 14.0,
            font: FontKind::Bold,
            color: (0.227, 0.227, 0.227),
            indent_mm: 0.0,
            space_after_mm: 4.0,
            prefix: "",
        },
        BlockKind::Paragraph | BlockKind::Plain => BlockStyle {
            size: 12.0,
            font: FontKind::Regular,
            color: (0.2, 0.2, 0.2),
            indent_mm: 0.0,
            space_after_mm: 4.0,
            prefix: "",
        },
        BlockKind::Bullet => BlockStyle {
            size: 12.0,
            font: FontKind::Regular,
            color: (0.2, 0.2, 0.2),
            indent_mm: 7.0,
            space_after_mm: 2.0,
            prefix: "• ",
        },
        BlockKind::Quote => BlockStyle {
            size: 12.0,
            font: FontKind::Oblique,
            color: (0.4, 0.4, 0.4),
            indent_mm: 7.0,
            space_after_mm: 4.0,
            prefix: "",
        },
        BlockKind::Code => BlockStyle {
            size: 10.0,
            font: FontKind::Mono,
            color: (0.2, 0.2, 0.2),
            indent_mm: 2.0,
            space_after_mm: 4.0,
            prefix: "",
        },
    }
}

fn mm(value: f32) -> Mm {
    Mm(value.into())
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r.into(), g.into(), b.into(), None))
}

struct FontSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
    mono: IndirectFontRef,
}

impl FontSet {
    fn load(doc: &PdfDocumentReference) -> Result<Self, RenderError> {
        let add = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|e| RenderError::Draw(format!("font load failed: {e}")))
        };
        Ok(Self {
            regular: add(BuiltinFont::Helvetica)?,
            bold: add(BuiltinFont::HelveticaBold)?,
            oblique: add(BuiltinFont::HelveticaOblique)?,
            mono: add(BuiltinFont::Courier)?,
        })
    }

    fn get(&self, kind: FontKind) -> &IndirectFontRef {
        match kind {
            FontKind::Regular => &self.regular,
            FontKind::Bold => &self.bold,
            FontKind::Oblique => &self.oblique,
            FontKind::Mono => &self.mono,
        }
    }
}

/// Cursor-driven page writer.
///
/// Owns the document, the active page layer, and the vertical cursor.
/// Inserts a fresh A4 page whenever a requested advance would cross the
/// bottom margin, so drawing code never handles pagination.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: FontSet,
    y: Mm,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, RenderError> {
        let (doc, page, layer) = PdfDocument::new(title, mm(A4_WIDTH_MM), mm(A4_HEIGHT_MM), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);
        let fonts = FontSet::load(&doc)?;
        Ok(Self {
            doc,
            layer,
            fonts,
            y: mm(A4_HEIGHT_MM - PAGE_MARGIN_MM),
        })
    }

    fn break_page_if_needed(&mut self, advance: Mm) {
        if self.y - advance < mm(PAGE_MARGIN_MM) {
            let (page, layer) = self.doc.add_page(mm(A4_WIDTH_MM), mm(A4_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = mm(A4_HEIGHT_MM - PAGE_MARGIN_MM);
        }
    }

    fn text_block(&mut self, style: &BlockStyle, text: &str) {
        let line_height = style.size * PT_TO_MM * LINE_FACTOR;
        let x = mm(PAGE_MARGIN_MM + style.indent_mm);
        let font = self.fonts.get(style.font).clone();

        let mut content = String::with_capacity(style.prefix.len() + text.len());
        content.push_str(style.prefix);
        content.push_str(text);

        for line in wrap_text(&content, max_units(style)) {
            self.break_page_if_needed(mm(line_height));
            self.y -= mm(line_height);
            self.layer.set_fill_color(rgb(style.color));
            self.layer.use_text(line, style.size.into(), x, self.y, &font);
        }

        self.y -= mm(style.space_after_mm);
    }

    /// Horizontal separator drawn under the title heading.
    fn rule(&mut self) {
        self.break_page_if_needed(mm(6.0));
        self.y -= mm(2.0);

        self.layer.set_outline_color(rgb((0.2, 0.2, 0.2)));
        self.layer.set_outline_thickness(2.0);
        let line = Line {
            points: vec![
                (Point::new(mm(PAGE_MARGIN_MM), self.y), false),
                (Point::new(mm(A4_WIDTH_MM - PAGE_MARGIN_MM), self.y), false),
            ],
            is_closed: false,
        };
        self.layer.add_line(line);

        self.y -= mm(4.0);
    }

    /// Monospace text on a light background band across the content width.
    fn code_block(&mut self, style: &BlockStyle, text: &str) {
        let line_height = style.size * PT_TO_MM * LINE_FACTOR;
        let lines = wrap_text(text, max_units(style));
        let band_height = line_height * lines.len() as f32 + 2.0 * CODE_PAD_MM;

        self.break_page_if_needed(mm(band_height));

        self.layer.set_fill_color(rgb((0.961, 0.961, 0.961)));
        let band = Rect::new(
            mm(PAGE_MARGIN_MM),
            self.y - mm(band_height),
            mm(A4_WIDTH_MM - PAGE_MARGIN_MM),
            self.y,
        )
        .with_mode(PaintMode::Fill);
        self.layer.add_rect(band);

        let x = mm(PAGE_MARGIN_MM + style.indent_mm);
        let font = self.fonts.get(style.font).clone();
        self.y -= mm(CODE_PAD_MM);
        for line in lines {
            self.y -= mm(line_height);
            self.layer.set_fill_color(rgb(style.color));
            self.layer.use_text(line, style.size.into(), x, self.y, &font);
        }

        self.y -= mm(CODE_PAD_MM + style.space_after_mm);
    }

    fn finish(self) -> Result<Vec<u8>, RenderError> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| RenderError::Draw(format!("pdf save failed: {e}")))?;
        buf.into_inner()
            .map_err(|e| RenderError::Draw(format!("pdf buffer flush failed: {e}")))
    }
}

/// Renders a Markdown document to a PDF byte buffer.
///
/// Headings draw even when their text is empty (they still advance the
/// cursor); every other classification skips empty text so no blank blocks
/// are drawn. Lines with an unrecognised leading tag draw nothing.
///
/// # Errors
///
/// Returns [`RenderError`] if font loading, drawing, or buffer assembly
/// fails. Timeout enforcement happens at the caller.
pub fn render_markdown(markdown: &str) -> Result<Vec<u8>, RenderError> {
    let html_out = html::markdown_to_html(markdown);
    let mut writer = PageWriter::new(PDF_DOC_TITLE)?;

    for line in html_out.lines() {
        let Some(kind) = html::classify_line(line) else {
            continue;
        };
        let text = html::strip_html(line);
        if text.is_empty() && !kind.is_heading() {
            continue;
        }

        let style = style_for(kind);
        match kind {
            BlockKind::Title => {
                writer.text_block(&style, &text);
                writer.rule();
            }
            BlockKind::Code => writer.code_block(&style, &text),
            _ => writer.text_block(&style, &text),
        }
    }

    writer.finish()
}

fn max_units(style: &BlockStyle) -> usize {
    let unit_mm = style.size * PT_TO_MM * UNIT_WIDTH_EM;
    (((CONTENT_WIDTH_MM - style.indent_mm) / unit_mm) as usize).max(1)
}

fn char_units(c: char) -> usize {
    if c.is_ascii() {
        1
    } else {
        2
    }
}

/// Wraps text into drawable lines of at most `max_units` width units.
///
/// Prefers breaking at whitespace; runs without whitespace that exceed the
/// limit (CJK prose has no spaces) are hard-broken at character boundaries.
/// Empty text yields one empty line so headings still advance the cursor.
fn wrap_text(text: &str, max_units: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut units = 0usize;

    for word in text.split_whitespace() {
        let word_units: usize = word.chars().map(char_units).sum();

        if word_units > max_units {
            if !current.is_empty() {
                current.push(' ');
                units += 1;
            }
            for c in word.chars() {
                let u = char_units(c);
                if units + u > max_units && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    units = 0;
                }
                current.push(c);
                units += u;
            }
            continue;
        }

        let sep = usize::from(!current.is_empty());
        if units + sep + word_units > max_units && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            units = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            units += 1;
        }
        current.push_str(word);
        units += word_units;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::assemble_report;
    use symrep_types::SymptomEntry;
    use uuid::Uuid;

    fn entry(name: &str, description: &str) -> SymptomEntry {
        SymptomEntry {
            id: Uuid::nil(),
            name: name.to_string(),
            description: description.to_string(),
            display_order: 1,
        }
    }

    #[test]
    fn test_render_produces_pdf_header() {
        let body = assemble_report(&[entry("头痛", "持续性头部疼痛。")]);
        let bytes = render_markdown(&body).unwrap();
        assert!(!bytes.is_empty());
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_empty_markdown_is_valid_pdf() {
        let bytes = render_markdown("").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_covers_all_block_kinds() {
        let markdown = "# 标题\n\n段落正文。\n\n- 条目一\n- 条目二\n\n> 引用\n\n    let x = 1;\n";
        let bytes = render_markdown(markdown).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_long_document_paginates() {
        let mut markdown = String::from("# 症状报告\n\n");
        for i in 0..120 {
            markdown.push_str(&format!("### 症状{i}\n\n这是一段足够长的描述，反复出现以填满多页。\n\n"));
        }
        let long = render_markdown(&markdown).unwrap();
        let short = render_markdown("# 症状报告\n").unwrap();
        assert!(long.len() > short.len());
        assert!(long.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_wrap_text_short_line_passes_through() {
        assert_eq!(wrap_text("hello world", 80), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_text_breaks_at_whitespace() {
        let lines = wrap_text("aaa bbb ccc", 7);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn test_wrap_text_hard_breaks_cjk_runs() {
        // 10 CJK chars = 20 units; a 10-unit limit forces two lines
        let lines = wrap_text(&"痛".repeat(10), 10);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].chars().count(), 5);
    }

    #[test]
    fn test_wrap_text_empty_yields_one_empty_line() {
        assert_eq!(wrap_text("", 80), vec![String::new()]);
    }

    #[test]
    fn test_max_units_is_positive_for_all_kinds() {
        for kind in [
            BlockKind::Title,
            BlockKind::Section,
            BlockKind::Subsection,
            BlockKind::Paragraph,
            BlockKind::Bullet,
            BlockKind::Quote,
            BlockKind::Code,
            BlockKind::Plain,
        ] {
            assert!(max_units(&style_for(kind)) > 0);
        }
    }
}
