// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Advance widths for the built-in Helvetica faces.
//
// Values are the Adobe AFM widths (1/1000 em) for the printable ASCII range
// 0x20..=0x7E. Text is measured as the WinAnsi bytes the PDF surface draws,
// so unmappable characters measure as `?`. Bytes above the table use the
// face's average width.

use super::winansi;
use crate::surface::FontWeight;

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

const FIRST_CHAR: u8 = 0x20;
const MISSING_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn advance(byte: u8, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Regular => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    };
    byte.checked_sub(FIRST_CHAR)
        .and_then(|idx| table.get(idx as usize))
        .copied()
        .unwrap_or(MISSING_WIDTH)
}

/// Width of `text` in points at `size_pt`.
pub fn text_width_pt(text: &str, weight: FontWeight, size_pt: f32) -> f32 {
    let units: u32 = winansi::encode(text)
        .into_iter()
        .map(|byte| u32::from(advance(byte, weight)))
        .sum();
    units as f32 * size_pt / 1000.0
}

/// Width of `text` in millimetres at `size_pt`.
pub fn text_width_mm(text: &str, weight: FontWeight, size_pt: f32) -> f32 {
    text_width_pt(text, weight, size_pt) * MM_PER_PT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_widths() {
        // "Hi" = H(722) + i(222) at 10pt.
        assert!((text_width_pt("Hi", FontWeight::Regular, 10.0) - 9.44).abs() < 1e-4);
        assert!((text_width_pt(" ", FontWeight::Bold, 1000.0) - 278.0).abs() < 1e-3);
    }

    #[test]
    fn empty_text_has_no_width() {
        assert_eq!(text_width_mm("", FontWeight::Regular, 12.0), 0.0);
    }

    #[test]
    fn latin1_letters_measure_as_one_glyph() {
        let w = text_width_pt("é", FontWeight::Regular, 1000.0);
        assert!((w - f32::from(MISSING_WIDTH)).abs() < 1e-3);
        let jose = text_width_pt("José", FontWeight::Bold, 10.0);
        let jos = text_width_pt("Jos", FontWeight::Bold, 10.0);
        assert!((jose - jos - f32::from(MISSING_WIDTH) / 100.0).abs() < 1e-4);
    }

    #[test]
    fn unmappable_text_measures_as_replacement() {
        for weight in [FontWeight::Regular, FontWeight::Bold] {
            assert_eq!(
                text_width_pt("आशा", weight, 12.0),
                text_width_pt("???", weight, 12.0)
            );
        }
        // Bold '?' is wider than the average fallback.
        assert_eq!(advance(b'?', FontWeight::Bold), 611);
    }

    #[test]
    fn tilde_is_last_entry() {
        assert_eq!(advance(b'~', FontWeight::Regular), 584);
        assert_eq!(advance(b'~', FontWeight::Bold), 584);
    }
}
