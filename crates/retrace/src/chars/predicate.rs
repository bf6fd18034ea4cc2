// Character predicates
//
// A closed set of tests on a single code point. Compound classes
// (`[a-z&&[^aeiou]]`, `\P{L}`) are trees of these.

use std::sync::Arc;

use unicode_general_category::{GeneralCategory, get_general_category};

use super::{ascii, case};

#[derive(Debug, Clone)]
pub(crate) enum CharPredicate {
    /// Exactly one code point.
    Single(u32),
    /// ASCII letter compared case-insensitively.
    SingleI { lower: u32, upper: u32 },
    /// Unicode case-insensitive code point, stored folded.
    SingleU(u32),
    /// Inclusive range.
    Range(u32, u32),
    /// Range compared with ASCII case folding.
    RangeI(u32, u32),
    /// Range compared with Unicode case folding.
    RangeU(u32, u32),
    /// ASCII ctype bitmask, see `ascii`.
    Ctype(u32),
    /// Bitmask of general categories, see `category_bit`.
    Category(u32),
    /// Sorted, non-overlapping inclusive ranges.
    Ranges(Arc<[(u32, u32)]>),
    /// Latin-1 membership bits collected while parsing a class.
    Bits(Box<[u64; 4]>),
    /// `.` without DOTALL.
    Dot,
    /// `.` with UNIX_LINES.
    UnixDot,
    /// `.` with DOTALL.
    All,
    /// `\h`
    HorizWs,
    /// `\v`
    VertWs,
    /// U+FDD0..U+FDEF and the last two code points of every plane.
    Noncharacter,
    Union(Box<CharPredicate>, Box<CharPredicate>),
    Intersect(Box<CharPredicate>, Box<CharPredicate>),
    Negate(Box<CharPredicate>),
}

impl CharPredicate {
    pub fn is(&self, c: u32) -> bool {
        match self {
            CharPredicate::Single(x) => c == *x,
            CharPredicate::SingleI { lower, upper } => c == *lower || c == *upper,
            CharPredicate::SingleU(folded) => c == *folded || case::fold(c) == *folded,
            CharPredicate::Range(lo, hi) => (*lo..=*hi).contains(&c),
            CharPredicate::RangeI(lo, hi) => {
                let r = *lo..=*hi;
                r.contains(&c)
                    || (ascii::is_ascii(c)
                        && (r.contains(&ascii::to_upper(c)) || r.contains(&ascii::to_lower(c))))
            }
            CharPredicate::RangeU(lo, hi) => {
                let r = *lo..=*hi;
                if r.contains(&c) {
                    return true;
                }
                let up = case::to_upper(c);
                r.contains(&up) || r.contains(&case::to_lower(up))
            }
            CharPredicate::Ctype(mask) => ascii::is_type(c, *mask),
            CharPredicate::Category(mask) => category_mask(c) & mask != 0,
            CharPredicate::Ranges(ranges) => in_ranges(ranges, c),
            CharPredicate::Bits(bits) => c < 256 && bits[(c >> 6) as usize] & (1 << (c & 63)) != 0,
            CharPredicate::Dot => {
                c != '\n' as u32 && c != '\r' as u32 && (c | 1) != 0x2029 && c != 0x85
            }
            CharPredicate::UnixDot => c != '\n' as u32,
            CharPredicate::All => true,
            CharPredicate::HorizWs => {
                matches!(c, 0x09 | 0x20 | 0xA0 | 0x1680 | 0x180E | 0x202F | 0x205F | 0x3000)
                    || (0x2000..=0x200A).contains(&c)
            }
            CharPredicate::VertWs => matches!(c, 0x0A..=0x0D | 0x85 | 0x2028 | 0x2029),
            CharPredicate::Noncharacter => (c & 0xFFFE) == 0xFFFE || (0xFDD0..=0xFDEF).contains(&c),
            CharPredicate::Union(a, b) => a.is(c) || b.is(c),
            CharPredicate::Intersect(a, b) => a.is(c) && b.is(c),
            CharPredicate::Negate(p) => !p.is(c),
        }
    }

    pub fn union(self, other: CharPredicate) -> CharPredicate {
        CharPredicate::Union(Box::new(self), Box::new(other))
    }

    pub fn and(self, other: CharPredicate) -> CharPredicate {
        CharPredicate::Intersect(Box::new(self), Box::new(other))
    }

    pub fn negate(self) -> CharPredicate {
        match self {
            CharPredicate::Negate(inner) => *inner,
            p => CharPredicate::Negate(Box::new(p)),
        }
    }
}

fn in_ranges(ranges: &[(u32, u32)], c: u32) -> bool {
    ranges
        .binary_search_by(|&(lo, hi)| {
            if hi < c {
                std::cmp::Ordering::Less
            } else if lo > c {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

/// Bit assigned to each general category in a `Category` mask.
pub(crate) const fn category_bit(gc: GeneralCategory) -> u32 {
    use GeneralCategory::*;
    let shift = match gc {
        Unassigned => 0,
        UppercaseLetter => 1,
        LowercaseLetter => 2,
        TitlecaseLetter => 3,
        ModifierLetter => 4,
        OtherLetter => 5,
        NonspacingMark => 6,
        EnclosingMark => 7,
        SpacingMark => 8,
        DecimalNumber => 9,
        LetterNumber => 10,
        OtherNumber => 11,
        SpaceSeparator => 12,
        LineSeparator => 13,
        ParagraphSeparator => 14,
        Control => 15,
        Format => 16,
        PrivateUse => 17,
        Surrogate => 18,
        DashPunctuation => 19,
        OpenPunctuation => 20,
        ClosePunctuation => 21,
        ConnectorPunctuation => 22,
        OtherPunctuation => 23,
        MathSymbol => 24,
        CurrencySymbol => 25,
        ModifierSymbol => 26,
        OtherSymbol => 27,
        InitialPunctuation => 28,
        FinalPunctuation => 29,
        #[allow(unreachable_patterns)]
        _ => 0,
    };
    1 << shift
}

/// General category of a code point; surrogates have no `char`.
pub(crate) fn category(c: u32) -> GeneralCategory {
    match char::from_u32(c) {
        Some(ch) => get_general_category(ch),
        None if (0xD800..=0xDFFF).contains(&c) => GeneralCategory::Surrogate,
        None => GeneralCategory::Unassigned,
    }
}

#[inline]
pub(crate) fn category_mask(c: u32) -> u32 {
    category_bit(category(c))
}

/// Set a bit in a `Bits` predicate.
pub(crate) fn set_bit(bits: &mut [u64; 4], c: u32) {
    if c < 256 {
        bits[(c >> 6) as usize] |= 1 << (c & 63);
    }
}
