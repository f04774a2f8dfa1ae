//! WinAnsi (CP1252) encoding for the standard Type1 fonts.

/// Replacement byte for characters the encoding cannot represent.
pub const REPLACEMENT: u8 = b'?';

/// Map a character to its WinAnsiEncoding byte.
///
/// Box-drawing characters are transliterated to ASCII (`─` to `-`, `│` to
/// `|`, corners and tees to `+`) so diagrams stay legible; any other
/// unsupported character becomes `?`.
pub fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        ' '..='~' => ch as u8,
        '\t' => b' ',
        '\u{A0}'..='\u{FF}' => ch as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        '\u{2500}'..='\u{257F}' => box_drawing_fallback(ch),
        _ => REPLACEMENT,
    }
}

fn box_drawing_fallback(ch: char) -> u8 {
    match ch {
        '─' | '━' | '═' | '┄' | '┅' | '┈' | '┉' | '╌' | '╍' | '╴' | '╶' | '╸' | '╺' => b'-',
        '│' | '┃' | '║' | '┆' | '┇' | '┊' | '┋' | '╎' | '╏' | '╵' | '╷' | '╹' | '╻' => b'|',
        _ => b'+',
    }
}

/// Encode a string as WinAnsi bytes, one byte per character.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

/// Encode a PDF text string (document info entries).
///
/// ASCII text is stored as-is; anything else is UTF-16BE with a byte order
/// mark, which every reader accepts for text strings.
pub fn encode_text_string(text: &str) -> Vec<u8> {
    if text.is_ascii() {
        return text.as_bytes().to_vec();
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}
