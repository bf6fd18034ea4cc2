// ASCII ctype table
//
// One bitmask per ASCII code point. Composite classes are unions of the
// primitive bits so a single AND answers "is this a word character".

pub const UPPER: u32 = 0x0001;
pub const LOWER: u32 = 0x0002;
pub const DIGIT: u32 = 0x0004;
pub const SPACE: u32 = 0x0008;
pub const PUNCT: u32 = 0x0010;
pub const CNTRL: u32 = 0x0020;
pub const BLANK: u32 = 0x0040;
pub const HEX: u32 = 0x0080;
pub const UNDER: u32 = 0x0100;

pub const ALPHA: u32 = UPPER | LOWER;
pub const ALNUM: u32 = UPPER | LOWER | DIGIT;
pub const GRAPH: u32 = PUNCT | UPPER | LOWER | DIGIT;
pub const WORD: u32 = UPPER | LOWER | UNDER | DIGIT;
pub const XDIGIT: u32 = HEX;

static CTYPE: [u32; 128] = build_table();

const fn classify(c: u8) -> u32 {
    let mut bits = 0;
    if c.is_ascii_uppercase() {
        bits |= UPPER;
    }
    if c.is_ascii_lowercase() {
        bits |= LOWER;
    }
    if c.is_ascii_digit() {
        bits |= DIGIT;
    }
    if c.is_ascii_hexdigit() {
        bits |= HEX;
    }
    // \t \n \x0B \f \r and space
    if matches!(c, b'\t' | b'\n' | 0x0B | 0x0C | b'\r' | b' ') {
        bits |= SPACE;
    }
    if c == b'\t' || c == b' ' {
        bits |= BLANK;
    }
    if c < 0x20 || c == 0x7F {
        bits |= CNTRL;
    }
    if c.is_ascii_punctuation() {
        bits |= PUNCT;
    }
    if c == b'_' {
        bits |= UNDER;
    }
    bits
}

const fn build_table() -> [u32; 128] {
    let mut table = [0; 128];
    let mut i = 0;
    while i < 128 {
        table[i] = classify(i as u8);
        i += 1;
    }
    table
}

#[inline]
pub fn is_type(c: u32, mask: u32) -> bool {
    c < 128 && CTYPE[c as usize] & mask != 0
}

#[inline]
pub fn is_ascii(c: u32) -> bool {
    c < 128
}

#[inline]
pub fn is_alpha(c: u32) -> bool {
    is_type(c, ALPHA)
}

#[inline]
pub fn is_space(c: u32) -> bool {
    is_type(c, SPACE)
}

/// Value of an ASCII hex digit. Callers check `is_ascii_hexdigit` first.
#[inline]
pub fn hex_value(c: u32) -> u32 {
    match c {
        0x30..=0x39 => c - 0x30,
        0x41..=0x46 => c - 0x41 + 10,
        0x61..=0x66 => c - 0x61 + 10,
        _ => 0,
    }
}

/// ASCII lowercase; every other code point maps to itself.
#[inline]
pub fn to_lower(c: u32) -> u32 {
    if is_type(c, UPPER) { c + 0x20 } else { c }
}

/// ASCII uppercase; every other code point maps to itself.
#[inline]
pub fn to_upper(c: u32) -> u32 {
    if is_type(c, LOWER) { c - 0x20 } else { c }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_includes_vertical_tab() {
        for c in [b'\t', b'\n', 0x0B, 0x0C, b'\r', b' '] {
            assert!(is_space(c as u32), "{c:#x}");
        }
        assert!(!is_space(0x85));
        assert!(!is_space(0xA0));
    }

    #[test]
    fn test_word_and_punct() {
        assert!(is_type('_' as u32, WORD));
        assert!(is_type('_' as u32, PUNCT));
        assert!(is_type('z' as u32, WORD));
        assert!(!is_type('-' as u32, WORD));
        assert!(!is_type('é' as u32, WORD));
    }

    #[test]
    fn test_case_mapping_is_ascii_only() {
        assert_eq!(to_lower('Q' as u32), 'q' as u32);
        assert_eq!(to_upper('q' as u32), 'Q' as u32);
        assert_eq!(to_lower('É' as u32), 'É' as u32);
        assert_eq!(hex_value('f' as u32), 15);
        assert_eq!(hex_value('A' as u32), 10);
    }
}
