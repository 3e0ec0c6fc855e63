//! Glyph advance widths for measuring PDF cell text.
//!
//! Widths are in 1/1000 em, so a line of text at `size` points is
//! `sum(advance) * size / 1000` points wide. The built-in Helvetica tables are
//! the Adobe core font metrics; embedded fonts read their advances from the
//! TrueType `hmtx` table.

use std::collections::HashMap;

/// First code point of the built-in tables (space).
const FIRST_LISTED: u32 = 0x20;

/// Width assumed for built-in characters outside U+0020..U+007E.
///
/// At least as wide as every Latin-1 glyph of both Helvetica faces.
const UNLISTED_WIDTH: u32 = 1000;

/// Helvetica advances for U+0020..=U+007E.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 222, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

/// Helvetica-Bold advances for U+0020..=U+007E.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 333, 474, 556, 556, 889, 722, 278, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    333, 333, 584, 584, 584, 611, 975,
    // A-Z
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    333, 278, 333, 584, 556, 333,
    // a-z
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // { | } ~
    389, 280, 389, 584,
];

/// Advances of every character an embedded font maps to a glyph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphWidths {
    advances: HashMap<char, u32>,
}

impl GlyphWidths {
    /// Reads the advances of a TrueType/OpenType font file.
    pub fn from_ttf(data: &[u8]) -> Result<Self, ttf_parser::FaceParsingError> {
        let face = ttf_parser::Face::parse(data, 0)?;
        let units_per_em = u32::from(face.units_per_em().max(1));

        let mut advances = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables.into_iter().filter(|s| s.is_unicode()) {
                subtable.codepoints(|cp| {
                    let Some(ch) = char::from_u32(cp) else {
                        return;
                    };
                    let advance = face
                        .glyph_index(ch)
                        .and_then(|id| face.glyph_hor_advance(id));
                    if let Some(advance) = advance {
                        // rounded up to whole 1/1000 em
                        let scaled = (u32::from(advance) * 1000).div_ceil(units_per_em);
                        advances.insert(ch, scaled);
                    }
                });
            }
        }
        Ok(Self { advances })
    }

    /// Returns `true` if the font maps no Unicode characters.
    pub fn is_empty(&self) -> bool {
        self.advances.is_empty()
    }

    /// Advance of `ch`; characters without a glyph are not drawn and take
    /// no space.
    pub fn advance(&self, ch: char) -> u32 {
        self.advances.get(&ch).copied().unwrap_or(0)
    }
}

/// The metrics a cell is measured with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontMetrics<'a> {
    Helvetica,
    HelveticaBold,
    Embedded(&'a GlyphWidths),
}

impl FontMetrics<'_> {
    /// Advance of `ch` in 1/1000 em.
    pub fn advance(&self, ch: char) -> u32 {
        match self {
            FontMetrics::Helvetica => builtin_advance(&HELVETICA, ch),
            FontMetrics::HelveticaBold => builtin_advance(&HELVETICA_BOLD, ch),
            FontMetrics::Embedded(widths) => widths.advance(ch),
        }
    }

    /// Advance of `text` in 1/1000 em.
    pub fn text_advance(&self, text: &str) -> u32 {
        text.chars().map(|c| self.advance(c)).sum()
    }

    /// Width of `text` in points at `font_size`.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self.text_advance(text) as f32 * font_size / 1000.0
    }
}

fn builtin_advance(table: &[u16; 95], ch: char) -> u32 {
    (ch as u32)
        .checked_sub(FIRST_LISTED)
        .and_then(|i| table.get(i as usize))
        .map_or(UNLISTED_WIDTH, |&w| u32::from(w))
}
