// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// WinAnsiEncoding (Windows-1252) for the built-in PDF fonts.
//
// The standard Helvetica faces decode string bytes through WinAnsi, so text
// must be transcoded before it reaches a content stream. Characters with no
// WinAnsi code point become `?`, both when drawn and when measured.

/// Byte written for characters WinAnsi cannot represent.
pub const REPLACEMENT: u8 = b'?';

/// WinAnsi code point of `ch`, if it has one.
pub fn encode_char(ch: char) -> Option<u8> {
    let cp = ch as u32;
    match cp {
        0x20..=0x7E | 0xA0..=0xFF => Some(cp as u8),
        _ => match ch {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}

/// Transcode `text` to WinAnsi bytes, one byte per character.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| encode_char(ch).unwrap_or(REPLACEMENT))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        assert_eq!(encode("Asha Rao, 34"), b"Asha Rao, 34".to_vec());
    }

    #[test]
    fn latin1_names_map_to_single_bytes() {
        assert_eq!(
            encode("José Müller"),
            vec![0x4A, 0x6F, 0x73, 0xE9, 0x20, 0x4D, 0xFC, 0x6C, 0x6C, 0x65, 0x72]
        );
    }

    #[test]
    fn windows_1252_specials() {
        assert_eq!(encode("€ – ’"), vec![0x80, 0x20, 0x96, 0x20, 0x92]);
    }

    #[test]
    fn unmappable_characters_are_replaced_per_char() {
        assert_eq!(encode("आशा"), b"???".to_vec());
        assert_eq!(encode("Rx\u{1F3E5}"), b"Rx?".to_vec());
        assert_eq!(encode("a\tb"), b"a?b".to_vec());
    }
}
