// Simple (single code point) case mapping
//
// Full mappings that expand to several code points ("ß" -> "SS") leave the
// code point unchanged, matching one-to-one case folding.

use super::ascii;

/// Simple uppercase mapping of a code point.
pub fn to_upper(c: u32) -> u32 {
    if ascii::is_ascii(c) {
        return ascii::to_upper(c);
    }
    match char::from_u32(c) {
        Some(ch) => single(ch.to_uppercase()).unwrap_or(c),
        None => c,
    }
}

/// Simple lowercase mapping of a code point.
pub fn to_lower(c: u32) -> u32 {
    if ascii::is_ascii(c) {
        return ascii::to_lower(c);
    }
    // U+0130 lowercases to "i\u{307}" in full mapping; the simple mapping is 'i'.
    if c == 0x130 {
        return 'i' as u32;
    }
    match char::from_u32(c) {
        Some(ch) => single(ch.to_lowercase()).unwrap_or(c),
        None => c,
    }
}

/// Canonical fold used for Unicode case-insensitive comparison.
#[inline]
pub fn fold(c: u32) -> u32 {
    to_lower(to_upper(c))
}

fn single(mut it: impl Iterator<Item = char>) -> Option<u32> {
    let first = it.next()?;
    match it.next() {
        None => Some(first as u32),
        Some(_) => None,
    }
}

/// Case-insensitive equality of two code points.
pub fn eq_ignore_case(a: u32, b: u32, unicode: bool) -> bool {
    if a == b {
        return true;
    }
    if unicode {
        let ua = to_upper(a);
        let ub = to_upper(b);
        ua == ub || to_lower(ua) == to_lower(ub)
    } else {
        ascii::to_lower(a) == ascii::to_lower(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_mappings() {
        assert_eq!(to_upper('a' as u32), 'A' as u32);
        assert_eq!(to_lower('Σ' as u32), 'σ' as u32);
        assert_eq!(to_upper('ß' as u32), 'ß' as u32);
        assert_eq!(to_lower(0x130), 'i' as u32);
    }

    #[test]
    fn test_fold_unifies_sigma_forms() {
        assert_eq!(fold('ς' as u32), fold('Σ' as u32));
        assert_eq!(fold('σ' as u32), fold('Σ' as u32));
    }

    #[test]
    fn test_ascii_vs_unicode_equality() {
        assert!(eq_ignore_case('K' as u32, 'k' as u32, false));
        assert!(!eq_ignore_case('É' as u32, 'é' as u32, false));
        assert!(eq_ignore_case('É' as u32, 'é' as u32, true));
        assert!(eq_ignore_case(0x212A, 'k' as u32, true));
    }
}
