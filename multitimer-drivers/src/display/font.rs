//! Fourteen-segment font
//!
//! Bit layout per character (LSB first):
//!
//! ```text
//!  bit:  0 A    1 B    2 C    3 D    4 E    5 F
//!        6 G1   7 G2   8 H    9 J   10 K   11 L
//!       12 M   13 N   14 DP
//! ```
//!
//! Covers digits, upper-case letters (lower case is folded) and the few
//! symbols the gadget draws. Anything else renders blank.

/// Decimal point segment
pub const DP: u16 = 1 << 14;

const DIGITS: [u16; 10] = [
    0x0C3F, // 0
    0x0006, // 1
    0x00DB, // 2
    0x008F, // 3
    0x00E6, // 4
    0x2069, // 5
    0x00FD, // 6
    0x0007, // 7
    0x00FF, // 8
    0x00EF, // 9
];

const LETTERS: [u16; 26] = [
    0x00F7, // A
    0x128F, // B
    0x0039, // C
    0x120F, // D
    0x00F9, // E
    0x0071, // F
    0x00BD, // G
    0x00F6, // H
    0x1209, // I
    0x001E, // J
    0x2470, // K
    0x0038, // L
    0x0536, // M
    0x2136, // N
    0x003F, // O
    0x00F3, // P
    0x203F, // Q
    0x20F3, // R
    0x00ED, // S
    0x1201, // T
    0x003E, // U
    0x0C30, // V
    0x2836, // W
    0x2D00, // X
    0x1500, // Y
    0x0C09, // Z
];

/// Segment bits for `ch`
pub fn glyph(ch: char) -> u16 {
    match ch {
        '0'..='9' => DIGITS[(ch as u8 - b'0') as usize],
        'A'..='Z' => LETTERS[(ch as u8 - b'A') as usize],
        'a'..='z' => LETTERS[(ch as u8 - b'a') as usize],
        '-' => 0x00C0,
        '/' => 0x0C00,
        '\\' => 0x2100,
        '|' => 0x1200,
        '_' => 0x0008,
        '*' => 0x3FC0,
        '+' => 0x12C0,
        _ => 0,
    }
}
