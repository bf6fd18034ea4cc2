// Compile flags
//
// Bit values are fixed: they are part of the persisted `(source, flags)`
// form and must round-trip unchanged.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Flags: u32 {
        /// Only `\n` terminates a line for `.`, `^` and `$`. Inline `(?d)`.
        const UNIX_LINES = 0x01;
        /// ASCII case-insensitive matching. Inline `(?i)`.
        const CASE_INSENSITIVE = 0x02;
        /// Whitespace and `#` comments are ignored in the pattern. Inline `(?x)`.
        const COMMENTS = 0x04;
        /// `^` and `$` match at line terminators. Inline `(?m)`.
        const MULTILINE = 0x08;
        /// The whole pattern is a literal string.
        const LITERAL = 0x10;
        /// `.` matches any character, line terminators included. Inline `(?s)`.
        const DOTALL = 0x20;
        /// Case folding follows Unicode instead of ASCII. Inline `(?u)`.
        const UNICODE_CASE = 0x40;
        /// Canonically equivalent sequences match each other.
        const CANON_EQ = 0x80;
        /// Predefined and POSIX classes use Unicode definitions. Inline `(?U)`.
        const UNICODE_CHARACTER_CLASS = 0x100;
    }
}

impl Flags {
    /// Applies implied flags: Unicode character classes always fold
    /// case the Unicode way.
    pub(crate) fn normalized(self) -> Flags {
        if self.contains(Flags::UNICODE_CHARACTER_CLASS) {
            self | Flags::UNICODE_CASE
        } else {
            self
        }
    }

    /// Flag toggled by an inline modifier letter.
    pub(crate) fn from_inline(c: char) -> Option<Flags> {
        let f = match c {
            'i' => Flags::CASE_INSENSITIVE,
            'm' => Flags::MULTILINE,
            's' => Flags::DOTALL,
            'd' => Flags::UNIX_LINES,
            'u' => Flags::UNICODE_CASE,
            'c' => Flags::CANON_EQ,
            'x' => Flags::COMMENTS,
            'U' => Flags::UNICODE_CHARACTER_CLASS | Flags::UNICODE_CASE,
            _ => return None,
        };
        Some(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_values_are_stable() {
        assert_eq!(Flags::UNIX_LINES.bits(), 0x01);
        assert_eq!(Flags::CASE_INSENSITIVE.bits(), 0x02);
        assert_eq!(Flags::COMMENTS.bits(), 0x04);
        assert_eq!(Flags::MULTILINE.bits(), 0x08);
        assert_eq!(Flags::LITERAL.bits(), 0x10);
        assert_eq!(Flags::DOTALL.bits(), 0x20);
        assert_eq!(Flags::UNICODE_CASE.bits(), 0x40);
        assert_eq!(Flags::CANON_EQ.bits(), 0x80);
        assert_eq!(Flags::UNICODE_CHARACTER_CLASS.bits(), 0x100);
    }

    #[test]
    fn test_unicode_classes_imply_unicode_case() {
        let f = Flags::UNICODE_CHARACTER_CLASS.normalized();
        assert!(f.contains(Flags::UNICODE_CASE));
        assert_eq!(Flags::MULTILINE.normalized(), Flags::MULTILINE);
        assert_eq!(
            Flags::from_inline('U'),
            Some(Flags::UNICODE_CHARACTER_CLASS | Flags::UNICODE_CASE)
        );
        assert_eq!(Flags::from_inline('q'), None);
    }
}
