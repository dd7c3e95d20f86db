//! Paginated PDF export
//!
//! Text is word-wrapped to a fixed column count and split into A4 pages,
//! then drawn with the built-in Helvetica face. [`paginate`] holds the
//! layout so page breaks can be checked without rendering.

use anyhow::{anyhow, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const FONT_SIZE: f32 = 11.0;
const LINE_HEIGHT: f32 = 5.5;
const LAYER: &str = "Text";

/// Characters per wrapped line at 11pt Helvetica across the text width
pub const LINE_WIDTH: usize = 85;

/// Lines that fit between the top and bottom margins
pub const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2.0 * MARGIN) / LINE_HEIGHT) as usize;

/// Split text into pages of wrapped lines
///
/// Always returns at least one page. Blank lines are kept as spacing.
pub fn paginate(text: &str) -> Vec<Vec<String>> {
    let lines: Vec<String> = text.lines().flat_map(|line| wrap(line, LINE_WIDTH)).collect();

    if lines.is_empty() {
        return vec![Vec::new()];
    }

    lines
        .chunks(LINES_PER_PAGE)
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Greedy word wrap; words longer than `width` are split
fn wrap(line: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if current_len > 0 {
                out.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            out.push(word.into_iter().collect());
            word = rest;
        }

        if current_len > 0 && current_len + 1 + word.len() > width {
            out.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 || out.is_empty() {
        out.push(current);
    }
    out
}

/// The built-in PDF fonts only cover a Latin code page
fn printable(line: &str) -> String {
    line.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201c}' | '\u{201d}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\t' => ' ',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '?',
        })
        .collect()
}

/// Render text as a paginated A4 PDF document
pub fn render(title: &str, text: &str) -> Result<Vec<u8>> {
    let pages = paginate(text);

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow!("Failed to load PDF font: {:?}", e))?;

    for (index, lines) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
            doc.get_page(page).get_layer(layer)
        };
        draw_page(&layer, &font, lines);
    }

    doc.save_to_bytes()
        .map_err(|e| anyhow!("Failed to render PDF: {:?}", e))
}

fn draw_page(layer: &PdfLayerReference, font: &IndirectFontRef, lines: &[String]) {
    let top = PAGE_HEIGHT - MARGIN - FONT_SIZE * 0.3528;

    for (row, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let y = top - row as f32 * LINE_HEIGHT;
        layer.use_text(printable(line), FONT_SIZE, Mm(MARGIN), Mm(y), font);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_page() {
        let pages = paginate("January 1st, 2024\nMood: 7/10\n\nQuiet morning.");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].len(), 4);
        assert_eq!(pages[0][2], "");
    }

    #[test]
    fn test_empty_text_is_one_blank_page() {
        assert_eq!(paginate(""), vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_long_text_spans_pages() {
        let text = (1..=LINES_PER_PAGE * 2 + 1)
            .map(|i| format!("Line {}", i))
            .collect::<Vec<_>>()
            .join("\n");

        let pages = paginate(&text);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), LINES_PER_PAGE);
        assert_eq!(pages[1][0], format!("Line {}", LINES_PER_PAGE + 1));
        assert_eq!(pages[2], vec![format!("Line {}", LINES_PER_PAGE * 2 + 1)]);
    }

    #[test]
    fn test_wrapped_paragraph_counts_toward_pages() {
        // one paragraph long enough to fill more than a page once wrapped
        let paragraph = "presence ".repeat(LINE_WIDTH * LINES_PER_PAGE / 9 + 50);
        let pages = paginate(&paragraph);
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().flatten().all(|l| l.chars().count() <= LINE_WIDTH));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("   ", 10), vec![""]);
    }

    #[test]
    fn test_printable() {
        assert_eq!(printable("It\u{2019}s \u{201c}now\u{201d} \u{2014} caf\u{e9}"), "It's \"now\" - caf?");
    }

    #[test]
    fn test_render_multi_page_document() {
        let text = "Be here.\n".repeat(LINES_PER_PAGE * 3);
        let bytes = render("Journal", &text).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
