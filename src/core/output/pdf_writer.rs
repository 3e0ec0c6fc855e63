//! PDF output writer.
//!
//! Draws a [`TableLayout`] with `printpdf`. Built-in Helvetica covers Latin
//! text; each configured [`ScriptFont`] is embedded from its TrueType file
//! and used for the cells that need it.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Pt, Rect, Rgb,
};

use super::font_metrics::GlyphWidths;
use super::pdf_layout::{
    BODY_FONT_SIZE, CELL_PADDING, FontChoice, HEADER_FONT_SIZE, LEADING, LayoutRow, MARGIN,
    PAGE_HEIGHT, PAGE_WIDTH, ScriptFace, TITLE_FONT_SIZE, TITLE_SPACING, TableLayout, layout_table,
};
use super::{Column, ReportRecord};
use crate::config::{PdfConfig, ScriptFont};
use crate::error::{DroidpackError, Result};

const LAYER_NAME: &str = "Layer 1";
const GRID_THICKNESS: f32 = 0.25;

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn black() -> Color {
    rgb(0.0, 0.0, 0.0)
}

fn grey() -> Color {
    rgb(0.5, 0.5, 0.5)
}

fn whitesmoke() -> Color {
    rgb(0.96, 0.96, 0.96)
}

fn mm(pt: f32) -> Mm {
    Mm::from(Pt(pt))
}

/// Fonts available to one document.
struct FontSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Same order as the loaded [`ScriptFace`]s.
    scripts: Vec<IndirectFontRef>,
}

impl FontSet {
    /// Adds the built-in fonts and every script font that loads.
    ///
    /// A script font that cannot be read or parsed is left out with a
    /// warning; its cells are then laid out and drawn with Helvetica.
    fn load(doc: &PdfDocumentReference, config: &PdfConfig) -> Result<(Self, Vec<ScriptFace>)> {
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(DroidpackError::pdf)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(DroidpackError::pdf)?;

        let mut scripts = Vec::new();
        let mut faces = Vec::new();
        for font in &config.script_fonts {
            match load_script_font(doc, font) {
                Ok((font_ref, widths)) => {
                    log::debug!("embedded {} font {}", font.name, font.path.display());
                    scripts.push(font_ref);
                    faces.push(ScriptFace {
                        font: font.clone(),
                        widths,
                    });
                }
                Err(e) => log::warn!(
                    "{} font {} unavailable ({e}); using the default font",
                    font.name,
                    font.path.display()
                ),
            }
        }

        Ok((
            Self {
                regular,
                bold,
                scripts,
            },
            faces,
        ))
    }

    fn get(&self, choice: FontChoice) -> &IndirectFontRef {
        match choice {
            FontChoice::Regular => &self.regular,
            FontChoice::Bold => &self.bold,
            FontChoice::Script(i) => self.scripts.get(i).unwrap_or(&self.regular),
        }
    }
}

fn load_script_font(
    doc: &PdfDocumentReference,
    font: &ScriptFont,
) -> Result<(IndirectFontRef, GlyphWidths)> {
    let data = fs::read(&font.path)?;
    let widths = GlyphWidths::from_ttf(&data).map_err(DroidpackError::pdf)?;
    if widths.is_empty() {
        return Err(DroidpackError::pdf("font maps no Unicode characters"));
    }
    let font_ref = doc
        .add_external_font(data.as_slice())
        .map_err(DroidpackError::pdf)?;
    Ok((font_ref, widths))
}

/// Writes records as a titled, paginated PDF table.
///
/// Parent directories are created as needed. With no records nothing is
/// written and `Ok(0)` is returned.
///
/// Returns the number of rows written.
pub fn write_pdf<R: ReportRecord>(records: &[R], path: &Path, config: &PdfConfig) -> Result<usize> {
    if records.is_empty() {
        log::info!("no {} records; skipping {}", R::KIND.noun(), path.display());
        return Ok(0);
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| r.pdf_cells(config.max_body_chars))
        .collect();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let pages = render(R::pdf_title(), R::pdf_columns(), &rows, path, config)?;

    log::info!(
        "wrote {} rows on {} pages to {}",
        records.len(),
        pages,
        path.display()
    );
    Ok(records.len())
}

/// Lays out and draws the table; returns the page count.
fn render(
    title: &str,
    columns: &[Column],
    rows: &[Vec<String>],
    path: &Path,
    config: &PdfConfig,
) -> Result<usize> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), LAYER_NAME);
    let (fonts, faces) = FontSet::load(&doc, config)?;
    let layout = layout_table(title, columns, rows, &faces);

    for (i, page) in layout.pages.iter().enumerate() {
        let (page_idx, layer_idx) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), LAYER_NAME)
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);

        let mut top = PAGE_HEIGHT - MARGIN;
        if let Some(title) = &page.title {
            layer.set_fill_color(black());
            layer.use_text(
                title.as_str(),
                TITLE_FONT_SIZE,
                mm(layout.table_x),
                mm(top - TITLE_FONT_SIZE),
                &fonts.bold,
            );
            top -= TITLE_FONT_SIZE + TITLE_SPACING;
        }

        for row in &page.rows {
            draw_row(&layer, &layout, row, top, &fonts);
            top -= row.height;
        }
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(DroidpackError::pdf)?;
    Ok(layout.pages.len())
}

fn draw_row(layer: &PdfLayerReference, layout: &TableLayout, row: &LayoutRow, top: f32, fonts: &FontSet) {
    let bottom = top - row.height;
    let (font_size, text_color) = if row.is_header {
        (HEADER_FONT_SIZE, whitesmoke())
    } else {
        (BODY_FONT_SIZE, black())
    };

    if row.is_header {
        layer.set_fill_color(grey());
        let right = layout.table_x + layout.table_width();
        layer.add_rect(
            Rect::new(mm(layout.table_x), mm(bottom), mm(right), mm(top)).with_mode(PaintMode::Fill),
        );
    }

    layer.set_outline_color(black());
    layer.set_outline_thickness(GRID_THICKNESS);

    let mut x = layout.table_x;
    for (cell, width) in row.cells.iter().zip(&layout.column_widths) {
        layer.add_line(Line {
            points: vec![
                (Point::new(mm(x), mm(bottom)), false),
                (Point::new(mm(x + width), mm(bottom)), false),
                (Point::new(mm(x + width), mm(top)), false),
                (Point::new(mm(x), mm(top)), false),
            ],
            is_closed: true,
        });

        layer.set_fill_color(text_color.clone());
        let font = fonts.get(cell.font);
        let mut baseline = top - CELL_PADDING - font_size;
        for line in &cell.lines {
            if !line.is_empty() {
                layer.use_text(line.as_str(), font_size, mm(x + CELL_PADDING), mm(baseline), font);
            }
            baseline -= LEADING;
        }
        x += width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CallRecord, MessageRecord};

    const FIXTURE_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/RobotoMedium.ttf");

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_write_pdf_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("call_logs.pdf");
        let calls = vec![
            CallRecord::new("+15550100", "1715700000000").with_type_code("1").with_duration("65"),
            CallRecord::new("5551234", "1715600000000").with_type_code("3"),
        ];

        let written = write_pdf(&calls, &path, &PdfConfig::new().without_script_fonts()).unwrap();
        assert_eq!(written, 2);

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_pdf_empty_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sms.pdf");
        let written = write_pdf::<MessageRecord>(&[], &path, &PdfConfig::new()).unwrap();
        assert_eq!(written, 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_script_font_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sms.pdf");
        let config = PdfConfig::new()
            .without_script_fonts()
            .with_script_font(
                ScriptFont::new("Devanagari", dir.path().join("missing.ttf")).with_range(0x0900, 0x097F),
            );
        let messages = vec![MessageRecord::new("Ravi", "namaste नमस्ते")];

        let written = write_pdf(&messages, &path, &config).unwrap();
        assert_eq!(written, 1);
        assert!(path.exists());
    }

    #[test]
    fn test_many_rows_paginate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sms.pdf");
        let messages: Vec<_> = (0..150)
            .map(|i| MessageRecord::new(i.to_string(), "x".repeat(400)))
            .collect();
        let written = write_pdf(&messages, &path, &PdfConfig::new().without_script_fonts()).unwrap();
        assert_eq!(written, 150);
    }

    #[test]
    fn test_loaded_script_font_is_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sms.pdf");
        let config = PdfConfig::new()
            .without_script_fonts()
            .with_script_font(ScriptFont::new("Devanagari", FIXTURE_FONT).with_range(0x0900, 0x097F));
        let messages = vec![
            MessageRecord::new("Ravi", "नमस्ते दुनिया"),
            MessageRecord::new("Alice", "Plain Latin text"),
        ];

        assert_eq!(write_pdf(&messages, &path, &config).unwrap(), 2);
        let bytes = fs::read(&path).unwrap();
        assert!(contains(&bytes, b"/FontFile2"));
    }

    #[test]
    fn test_builtin_only_has_no_embedded_font() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sms.pdf");
        let messages = vec![MessageRecord::new("Alice", "Plain Latin text")];

        write_pdf(&messages, &path, &PdfConfig::new().without_script_fonts()).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert!(!contains(&bytes, b"/FontFile2"));
    }

    #[test]
    fn test_unparsable_font_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.ttf");
        fs::write(&bogus, b"not a font").unwrap();
        let doc = PdfDocument::empty("fonts");
        let config = PdfConfig::new()
            .without_script_fonts()
            .with_script_font(ScriptFont::new("Bogus", &bogus).with_range(0x0900, 0x097F))
            .with_script_font(ScriptFont::new("Roboto", FIXTURE_FONT).with_range(0x0041, 0x005A));

        let (fonts, faces) = FontSet::load(&doc, &config).unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].font.name, "Roboto");
        assert_eq!(fonts.scripts.len(), 1);
    }
}
