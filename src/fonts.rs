use std::sync::OnceLock;

use crate::model::{FontFamily, FontStyle};

/// Metrics for one of the standard-14 Type1 fonts.
pub(crate) struct FontEntry {
    pub(crate) base_font: &'static str,
    /// Widths at 1000 units/em for WinAnsi bytes 32..=255.
    pub(crate) widths_1000: Vec<f32>,
}

impl FontEntry {
    pub(crate) fn char_width_1000(&self, ch: char) -> f32 {
        let byte = char_to_winansi(ch);
        if byte >= 32 {
            self.widths_1000[(byte - 32) as usize]
        } else {
            0.0
        }
    }

    /// Width of `text` in em units.
    pub(crate) fn unit_width(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.char_width_1000(ch)).sum::<f32>() / 1000.0
    }
}

const STYLES: [FontStyle; 4] = [
    FontStyle::Normal,
    FontStyle::Bold,
    FontStyle::Italic,
    FontStyle::BoldItalic,
];

const FAMILIES: [FontFamily; 3] = [FontFamily::Helvetica, FontFamily::Times, FontFamily::Courier];

static FONT_TABLE: OnceLock<Vec<FontEntry>> = OnceLock::new();

fn slot(family: FontFamily, style: FontStyle) -> usize {
    let f = FAMILIES.iter().position(|&x| x == family).unwrap_or(0);
    let s = STYLES.iter().position(|&x| x == style).unwrap_or(0);
    f * STYLES.len() + s
}

pub(crate) fn font_entry(family: FontFamily, style: FontStyle) -> &'static FontEntry {
    let table = FONT_TABLE.get_or_init(|| {
        let mut entries = Vec::with_capacity(FAMILIES.len() * STYLES.len());
        for family in FAMILIES {
            for style in STYLES {
                entries.push(FontEntry {
                    base_font: base_font_name(family, style),
                    widths_1000: widths_for(family, style),
                });
            }
        }
        entries
    });
    &table[slot(family, style)]
}

/// Resource name used for the font in page dictionaries (`/F1` .. `/F12`).
pub(crate) fn resource_name(family: FontFamily, style: FontStyle) -> String {
    format!("F{}", slot(family, style) + 1)
}

fn base_font_name(family: FontFamily, style: FontStyle) -> &'static str {
    match (family, style) {
        (FontFamily::Helvetica, FontStyle::Normal) => "Helvetica",
        (FontFamily::Helvetica, FontStyle::Bold) => "Helvetica-Bold",
        (FontFamily::Helvetica, FontStyle::Italic) => "Helvetica-Oblique",
        (FontFamily::Helvetica, FontStyle::BoldItalic) => "Helvetica-BoldOblique",
        (FontFamily::Times, FontStyle::Normal) => "Times-Roman",
        (FontFamily::Times, FontStyle::Bold) => "Times-Bold",
        (FontFamily::Times, FontStyle::Italic) => "Times-Italic",
        (FontFamily::Times, FontStyle::BoldItalic) => "Times-BoldItalic",
        (FontFamily::Courier, FontStyle::Normal) => "Courier",
        (FontFamily::Courier, FontStyle::Bold) => "Courier-Bold",
        (FontFamily::Courier, FontStyle::Italic) => "Courier-Oblique",
        (FontFamily::Courier, FontStyle::BoldItalic) => "Courier-BoldOblique",
    }
}

/// Parse a family name loosely; unknown names fall back to Helvetica.
pub fn parse_family(name: &str) -> FontFamily {
    match name.trim().to_ascii_lowercase().as_str() {
        "helvetica" | "arial" | "sans-serif" => FontFamily::Helvetica,
        "times" | "times new roman" | "times-roman" | "serif" => FontFamily::Times,
        "courier" | "courier new" | "monospace" => FontFamily::Courier,
        other => {
            log::warn!("Font not found: {other}, using Helvetica");
            FontFamily::Helvetica
        }
    }
}

fn widths_for(family: FontFamily, style: FontStyle) -> Vec<f32> {
    let bold = matches!(style, FontStyle::Bold | FontStyle::BoldItalic);
    match (family, bold) {
        (FontFamily::Courier, _) => vec![600.0; 224],
        (FontFamily::Helvetica, false) => helvetica_widths(),
        (FontFamily::Helvetica, true) => helvetica_bold_widths(),
        (FontFamily::Times, false) => times_widths(),
        (FontFamily::Times, true) => times_bold_widths(),
    }
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi chars 32..=255.
fn helvetica_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,                          // space
            33..=47 => 333.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 333.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => 833.0,                          // M (wide)
            65..=90 => 667.0,                     // uppercase A-Z (average)
            91..=96 => 333.0,                     // brackets etc.
            102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
            109 | 119 => 833.0,                   // m w (wide)
            97..=122 => 556.0,                    // lowercase a-z (average)
            _ => 556.0,
        })
        .collect()
}

fn helvetica_bold_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,
            33..=47 => 333.0,
            48..=57 => 556.0,
            58..=64 => 333.0,
            73 => 278.0,
            74 => 556.0,
            77 => 833.0,
            65..=90 => 722.0,
            91..=96 => 333.0,
            105 | 106 | 108 => 278.0,
            102 | 116 => 333.0,
            109 => 889.0,
            119 => 778.0,
            97..=122 => 611.0,
            _ => 611.0,
        })
        .collect()
}

fn times_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 250.0,
            33..=47 => 333.0,
            48..=57 => 500.0,
            58..=64 => 278.0,
            73 => 333.0,
            74 => 389.0,
            77 => 889.0,
            87 => 944.0,
            65..=90 => 722.0,
            91..=96 => 333.0,
            102 | 105 | 106 | 108 | 116 => 278.0,
            109 => 778.0,
            119 => 722.0,
            97..=122 => 444.0,
            _ => 500.0,
        })
        .collect()
}

fn times_bold_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 250.0,
            33..=47 => 333.0,
            48..=57 => 500.0,
            58..=64 => 333.0,
            73 => 389.0,
            74 => 500.0,
            77 => 944.0,
            87 => 1000.0,
            65..=90 => 722.0,
            91..=96 => 333.0,
            102 | 105 | 106 | 108 | 116 => 333.0,
            109 => 833.0,
            119 => 722.0,
            97..=122 => 500.0,
            _ => 500.0,
        })
        .collect()
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Unmappable chars are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match char_to_winansi(c) {
            0 => None,
            byte => Some(byte),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn courier_is_monospaced() {
        let entry = font_entry(FontFamily::Courier, FontStyle::Bold);
        assert_eq!(entry.unit_width("iiii"), entry.unit_width("MMMM"));
        assert!((entry.unit_width("ab") - 1.2).abs() < 1e-6);
    }

    #[test]
    fn bold_helvetica_is_wider() {
        let regular = font_entry(FontFamily::Helvetica, FontStyle::Normal).unit_width("Table");
        let bold = font_entry(FontFamily::Helvetica, FontStyle::Bold).unit_width("Table");
        assert!(bold > regular);
    }

    #[test]
    fn winansi_maps_typographic_quotes() {
        assert_eq!(to_winansi_bytes("\u{201C}a\u{201D}"), vec![0x93, b'a', 0x94]);
        assert_eq!(to_winansi_bytes("a\u{4E00}b"), vec![b'a', b'b']);
    }

    #[test]
    fn resource_names_are_distinct() {
        assert_eq!(resource_name(FontFamily::Helvetica, FontStyle::Normal), "F1");
        assert_eq!(resource_name(FontFamily::Courier, FontStyle::BoldItalic), "F12");
    }
}
