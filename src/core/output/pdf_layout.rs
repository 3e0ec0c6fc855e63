//! Page layout for PDF table reports.
//!
//! [`layout_table`] turns a title, column set and cell text into pages of
//! positioned rows. Cell text is wrapped by glyph advance, using the
//! Helvetica metrics for built-in text and each [`ScriptFace`]'s own widths
//! for embedded fonts; the renderer only draws what the layout says.
//!
//! All measurements are in points (1/72 inch).
//!
//! # Example
//!
//! ```
//! use droidpack::core::output::Column;
//! use droidpack::core::output::pdf_layout::{FontChoice, layout_table};
//!
//! let columns = [Column { title: "Sender", width: 80.0 }, Column { title: "Message", width: 240.0 }];
//! let rows = vec![
//!     vec!["Alice".to_string(), "Hello".to_string()],
//!     vec!["Bank".to_string(), "W".repeat(60)],
//! ];
//! let layout = layout_table("SMS Messages Report", &columns, &rows, &[]);
//!
//! let body = &layout.pages[0].rows[1..];
//! assert_eq!(body[0].cells[1].font, FontChoice::Regular);
//! assert_eq!(body[0].cells[1].lines, ["Hello"]);
//! // 60 capital Ws are far wider than the column
//! assert!(body[1].cells[1].lines.len() > 1);
//! ```

use crate::config::ScriptFont;

use super::Column;
use super::font_metrics::{FontMetrics, GlyphWidths};

/// A4 portrait width.
pub const PAGE_WIDTH: f32 = 595.28;
/// A4 portrait height.
pub const PAGE_HEIGHT: f32 = 841.89;
pub const MARGIN: f32 = 72.0;

pub const TITLE_FONT_SIZE: f32 = 16.0;
/// Space between the title baseline area and the table.
pub const TITLE_SPACING: f32 = 12.0;
pub const HEADER_FONT_SIZE: f32 = 10.0;
pub const BODY_FONT_SIZE: f32 = 9.0;
pub const LEADING: f32 = 11.0;
pub const CELL_PADDING: f32 = 3.0;
pub const HEADER_BOTTOM_PADDING: f32 = 6.0;

/// Font for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontChoice {
    /// Built-in Helvetica
    Regular,
    /// Built-in Helvetica-Bold (header row)
    Bold,
    /// Index into the loaded script faces
    Script(usize),
}

/// A script font that loaded, with the widths of its glyphs.
#[derive(Debug, Clone)]
pub struct ScriptFace {
    pub font: ScriptFont,
    pub widths: GlyphWidths,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutCell {
    pub lines: Vec<String>,
    pub font: FontChoice,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRow {
    pub cells: Vec<LayoutCell>,
    pub height: f32,
    pub is_header: bool,
}

/// One page; the first row of every page is the header.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPage {
    /// Set on the first page only.
    pub title: Option<String>,
    pub rows: Vec<LayoutRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub column_widths: Vec<f32>,
    /// Left edge of the table; the table is centred on the page.
    pub table_x: f32,
    pub pages: Vec<LayoutPage>,
}

impl TableLayout {
    /// Number of body rows across all pages.
    pub fn body_row_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| &p.rows)
            .filter(|r| !r.is_header)
            .count()
    }

    pub fn table_width(&self) -> f32 {
        self.column_widths.iter().sum()
    }
}

/// Picks the first script face covering a character of `text`.
pub fn choose_font(text: &str, scripts: &[ScriptFace]) -> FontChoice {
    scripts
        .iter()
        .position(|face| face.font.detect(text))
        .map_or(FontChoice::Regular, FontChoice::Script)
}

/// Metrics a cell drawn with `choice` is measured with.
pub fn font_metrics(choice: FontChoice, scripts: &[ScriptFace]) -> FontMetrics<'_> {
    match choice {
        FontChoice::Regular => FontMetrics::Helvetica,
        FontChoice::Bold => FontMetrics::HelveticaBold,
        FontChoice::Script(i) => scripts
            .get(i)
            .map_or(FontMetrics::Helvetica, |face| FontMetrics::Embedded(&face.widths)),
    }
}

/// Text width available inside a column.
pub fn usable_width(column_width: f32) -> f32 {
    (column_width - 2.0 * CELL_PADDING).max(0.0)
}

/// Glyph advance (1/1000 em) that fits on one line of a column.
pub fn line_capacity(column_width: f32, font_size: f32) -> u32 {
    (usable_width(column_width) * 1000.0 / font_size).floor() as u32
}

/// Wraps text at word boundaries into lines whose total advance is at most
/// `capacity`.
///
/// Words wider than a line are split between characters; a line always
/// takes at least one character. Embedded newlines start new lines. Always
/// returns at least one line.
pub fn wrap_text(text: &str, capacity: u32, advance: impl Fn(char) -> u32) -> Vec<String> {
    let width_of = |s: &str| s.chars().map(&advance).sum::<u32>();
    let space = advance(' ');
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0u32;

        for word in paragraph.split_whitespace() {
            let word_width = width_of(word);
            let needed = if current.is_empty() {
                word_width
            } else {
                current_width + space + word_width
            };

            if needed <= capacity {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_width = needed;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if word_width <= capacity {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for ch in word.chars() {
                let ch_width = advance(ch);
                if !current.is_empty() && current_width + ch_width > capacity {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn header_row(columns: &[Column]) -> LayoutRow {
    let cells = columns
        .iter()
        .map(|c| LayoutCell {
            lines: wrap_text(c.title, line_capacity(c.width, HEADER_FONT_SIZE), |ch| {
                FontMetrics::HelveticaBold.advance(ch)
            }),
            font: FontChoice::Bold,
        })
        .collect::<Vec<_>>();
    let line_count = cells.iter().map(|c| c.lines.len()).max().unwrap_or(1);
    LayoutRow {
        cells,
        height: line_count as f32 * LEADING + CELL_PADDING + HEADER_BOTTOM_PADDING,
        is_header: true,
    }
}

fn body_row(columns: &[Column], values: &[String], scripts: &[ScriptFace], max_lines: usize) -> LayoutRow {
    let cells = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let text = values.get(i).map_or("", String::as_str);
            let font = choose_font(text, scripts);
            let metrics = font_metrics(font, scripts);
            let mut lines = wrap_text(text, line_capacity(c.width, BODY_FONT_SIZE), |ch| {
                metrics.advance(ch)
            });
            lines.truncate(max_lines.max(1));
            LayoutCell { lines, font }
        })
        .collect::<Vec<_>>();
    let line_count = cells.iter().map(|c| c.lines.len()).max().unwrap_or(1);
    LayoutRow {
        cells,
        height: line_count as f32 * LEADING + 2.0 * CELL_PADDING,
        is_header: false,
    }
}

/// Lays out a titled table over as many pages as needed.
///
/// The header row is repeated at the top of every page. A row taller than a
/// whole page is clipped to the lines that fit.
pub fn layout_table(
    title: &str,
    columns: &[Column],
    rows: &[Vec<String>],
    scripts: &[ScriptFace],
) -> TableLayout {
    let column_widths: Vec<f32> = columns.iter().map(|c| c.width).collect();
    let table_width: f32 = column_widths.iter().sum();
    let table_x = (PAGE_WIDTH - table_width) / 2.0;

    let header = header_row(columns);
    let frame_height = PAGE_HEIGHT - 2.0 * MARGIN;
    let title_height = TITLE_FONT_SIZE + TITLE_SPACING;
    let max_lines =
        ((frame_height - title_height - header.height - 2.0 * CELL_PADDING) / LEADING).floor() as usize;

    let mut pages = Vec::new();
    let mut page = LayoutPage {
        title: Some(title.to_string()),
        rows: vec![header.clone()],
    };
    let mut remaining = frame_height - title_height - header.height;

    for values in rows {
        let row = body_row(columns, values, scripts, max_lines);
        if row.height > remaining && page.rows.len() > 1 {
            pages.push(std::mem::replace(
                &mut page,
                LayoutPage {
                    title: None,
                    rows: vec![header.clone()],
                },
            ));
            remaining = frame_height - header.height;
        }
        remaining -= row.height;
        page.rows.push(row);
    }
    pages.push(page);

    TableLayout {
        column_widths,
        table_x,
        pages,
    }
}
