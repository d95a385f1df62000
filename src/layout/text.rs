//! Font metrics and text encoding for the built-in Helvetica faces.

use std::borrow::Cow;

/// Points per millimetre.
pub const MM_TO_PT: f32 = 72.0 / 25.4;

/// Millimetres per point.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Marker appended to visually truncated text.
pub const ELLIPSIS: &str = "..";

/// Built-in font faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// Helvetica
    Regular,
    /// Helvetica-Bold
    Bold,
}

impl Font {
    /// Resource name used in page content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    /// PostScript base font name.
    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }
}

/// Helvetica advance widths (1/1000 em) for ASCII 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722,
    667, 611, 722, 667, 944, 667, 667, 611, // 'A'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333,
    500, 278, 556, 500, 722, 500, 500, 500, // 'a'..'z'
    334, 260, 334, 584, // '{'..'~'
];

const DEFAULT_WIDTH: u16 = 556;

/// Bold glyphs run slightly wider than regular ones.
const BOLD_FACTOR: f32 = 1.06;

fn char_width(c: char) -> u16 {
    let code = c as u32;
    if (32..=126).contains(&code) {
        HELVETICA_WIDTHS[(code - 32) as usize]
    } else {
        DEFAULT_WIDTH
    }
}

/// Width of `text` in millimetres at `size` points.
pub fn text_width(text: &str, size: f32, font: Font) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c) as u32).sum();
    units_to_mm(units, size, font)
}

fn units_to_mm(units: u32, size: f32, font: Font) -> f32 {
    let factor = match font {
        Font::Regular => 1.0,
        Font::Bold => BOLD_FACTOR,
    };
    units as f32 / 1000.0 * size * PT_TO_MM * factor
}

/// Cut `text` so that it fits within `max_width` millimetres.
///
/// Text that already fits is returned unchanged. Otherwise the longest
/// prefix that fits together with [`ELLIPSIS`] is returned.
pub fn truncate_to_width(text: &str, max_width: f32, size: f32, font: Font) -> Cow<'_, str> {
    if text_width(text, size, font) <= max_width {
        return Cow::Borrowed(text);
    }

    let budget = max_width - text_width(ELLIPSIS, size, font);
    let mut used = 0.0;
    let mut end = 0;
    for (idx, c) in text.char_indices() {
        let w = units_to_mm(char_width(c) as u32, size, font);
        if used + w > budget {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }

    Cow::Owned(format!("{}{}", &text[..end], ELLIPSIS))
}

/// Encode text for a WinAnsiEncoding font.
///
/// Characters with no WinAnsi code point become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E => c as u8,
            0xA0..=0xFF => c as u32 as u8,
            _ => match c {
                '\u{20AC}' => 0x80,
                '\u{2026}' => 0x85,
                '\u{2018}' => 0x91,
                '\u{2019}' => 0x92,
                '\u{201C}' => 0x93,
                '\u{201D}' => 0x94,
                '\u{2022}' => 0x95,
                '\u{2013}' => 0x96,
                '\u{2014}' => 0x97,
                _ => b'?',
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_scales_with_size() {
        let small = text_width("salary", 8.0, Font::Regular);
        let large = text_width("salary", 16.0, Font::Regular);
        assert!((large - 2.0 * small).abs() < 1e-4);
        assert!(text_width("salary", 8.0, Font::Bold) > small);
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        let out = truncate_to_width("age", 50.0, 8.0, Font::Regular);
        assert!(matches!(out, Cow::Borrowed("age")));
    }

    #[test]
    fn test_truncate_long_text() {
        let name = "a_very_long_column_name_that_cannot_fit";
        let out = truncate_to_width(name, 15.0, 8.0, Font::Bold);
        assert!(out.ends_with(ELLIPSIS));
        assert!(out.len() < name.len());
        assert!(text_width(&out, 8.0, Font::Bold) <= 15.0 + 1e-3);
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("abc"), b"abc".to_vec());
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
    }
}
