// Named character properties
//
// Resolves the names accepted inside `\p{...}`:
// - binary Unicode properties (`IsAlphabetic`, `IsWhite_Space`, ...)
// - general categories (`Lu`, `L`, `LC`, ...) and POSIX/ASCII names (`Alpha`)
// - `java*` names mirroring the classic character predicates
// - scripts, resolved against the Unicode tables shipped with regex-syntax
//
// Range tables are built once on first use and shared afterwards.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex_syntax::ParserBuilder;
use regex_syntax::hir::{Class, HirKind};
use unicode_general_category::GeneralCategory as Gc;

use super::ascii;
use super::predicate::{CharPredicate, category_bit as bit, category_mask};

type RangeTable = Arc<[(u32, u32)]>;

static ALPHABETIC: Lazy<RangeTable> = Lazy::new(|| binary_table("Alphabetic"));
static LOWERCASE: Lazy<RangeTable> = Lazy::new(|| binary_table("Lowercase"));
static UPPERCASE: Lazy<RangeTable> = Lazy::new(|| binary_table("Uppercase"));
static IDEOGRAPHIC: Lazy<RangeTable> = Lazy::new(|| binary_table("Ideographic"));
static BIDI_MIRRORED: Lazy<RangeTable> = Lazy::new(|| binary_table("Bidi_Mirrored"));
static ID_START: Lazy<RangeTable> = Lazy::new(|| binary_table("ID_Start"));
static ID_CONTINUE: Lazy<RangeTable> = Lazy::new(|| binary_table("ID_Continue"));

/// Ranges of a Unicode class expression such as `sc=Greek` or `Alphabetic`.
fn ucd_ranges(query: &str) -> Option<RangeTable> {
    let hir = ParserBuilder::new()
        .build()
        .parse(&format!("\\p{{{query}}}"))
        .ok()?;
    match hir.kind() {
        HirKind::Class(Class::Unicode(cls)) => Some(
            cls.ranges()
                .iter()
                .map(|r| (r.start() as u32, r.end() as u32))
                .collect(),
        ),
        // single code point classes come back as literals
        HirKind::Literal(lit) => {
            let c = std::str::from_utf8(&lit.0).ok()?.chars().next()? as u32;
            Some(Arc::from(vec![(c, c)]))
        }
        _ => None,
    }
}

fn binary_table(name: &str) -> RangeTable {
    match ucd_ranges(name) {
        Some(table) => table,
        None => {
            log::warn!("unicode property table {name} unavailable");
            Arc::from(Vec::new())
        }
    }
}

fn table(t: &Lazy<RangeTable>) -> CharPredicate {
    CharPredicate::Ranges(Arc::clone(t))
}

fn cat(mask: u32) -> CharPredicate {
    CharPredicate::Category(mask)
}

const LETTER: u32 = bit(Gc::UppercaseLetter)
    | bit(Gc::LowercaseLetter)
    | bit(Gc::TitlecaseLetter)
    | bit(Gc::ModifierLetter)
    | bit(Gc::OtherLetter);
const MARK: u32 = bit(Gc::NonspacingMark) | bit(Gc::EnclosingMark) | bit(Gc::SpacingMark);
const NUMBER: u32 = bit(Gc::DecimalNumber) | bit(Gc::LetterNumber) | bit(Gc::OtherNumber);
const SEPARATOR: u32 =
    bit(Gc::SpaceSeparator) | bit(Gc::LineSeparator) | bit(Gc::ParagraphSeparator);
const OTHER: u32 = bit(Gc::Control)
    | bit(Gc::Format)
    | bit(Gc::PrivateUse)
    | bit(Gc::Surrogate)
    | bit(Gc::Unassigned);
const PUNCTUATION: u32 = bit(Gc::DashPunctuation)
    | bit(Gc::OpenPunctuation)
    | bit(Gc::ClosePunctuation)
    | bit(Gc::ConnectorPunctuation)
    | bit(Gc::OtherPunctuation)
    | bit(Gc::InitialPunctuation)
    | bit(Gc::FinalPunctuation);
const SYMBOL: u32 = bit(Gc::MathSymbol)
    | bit(Gc::CurrencySymbol)
    | bit(Gc::ModifierSymbol)
    | bit(Gc::OtherSymbol);
const CASED_LETTER: u32 =
    bit(Gc::UppercaseLetter) | bit(Gc::LowercaseLetter) | bit(Gc::TitlecaseLetter);

// ===== Building blocks shared by several names =====

pub(crate) fn digit() -> CharPredicate {
    cat(bit(Gc::DecimalNumber))
}

pub(crate) fn letter() -> CharPredicate {
    cat(LETTER)
}

pub(crate) fn letter_or_digit() -> CharPredicate {
    cat(LETTER | bit(Gc::DecimalNumber))
}

pub(crate) fn alphabetic() -> CharPredicate {
    table(&ALPHABETIC)
}

pub(crate) fn white_space() -> CharPredicate {
    cat(SEPARATOR)
        .union(CharPredicate::Range(0x09, 0x0D))
        .union(CharPredicate::Single(0x85))
}

fn join_control() -> CharPredicate {
    CharPredicate::Range(0x200C, 0x200D)
}

pub(crate) fn word() -> CharPredicate {
    alphabetic()
        .union(cat(MARK | bit(Gc::DecimalNumber) | bit(Gc::ConnectorPunctuation)))
        .union(join_control())
}

// ===== Direct tests used by the matcher =====

/// `\w` under UNICODE_CHARACTER_CLASS.
pub(crate) fn is_word(c: u32) -> bool {
    static WORD: Lazy<CharPredicate> = Lazy::new(word);
    WORD.is(c)
}

pub(crate) fn is_letter_or_digit(c: u32) -> bool {
    category_mask(c) & (LETTER | bit(Gc::DecimalNumber)) != 0
}

pub(crate) fn is_nonspacing_mark(c: u32) -> bool {
    category_mask(c) == bit(Gc::NonspacingMark)
}

fn hex_digit() -> CharPredicate {
    digit()
        .union(CharPredicate::Ctype(ascii::HEX))
        .union(CharPredicate::Range(0xFF10, 0xFF19))
        .union(CharPredicate::Range(0xFF21, 0xFF26))
        .union(CharPredicate::Range(0xFF41, 0xFF46))
}

fn blank() -> CharPredicate {
    cat(bit(Gc::SpaceSeparator)).union(CharPredicate::Single(0x09))
}

fn graph() -> CharPredicate {
    cat(SEPARATOR | bit(Gc::Control) | bit(Gc::Surrogate) | bit(Gc::Unassigned)).negate()
}

fn print() -> CharPredicate {
    graph()
        .union(blank())
        .and(cat(bit(Gc::Control)).negate())
}

fn cased() -> CharPredicate {
    table(&LOWERCASE)
        .union(table(&UPPERCASE))
        .union(cat(bit(Gc::TitlecaseLetter)))
}

fn iso_control() -> CharPredicate {
    CharPredicate::Range(0x00, 0x1F).union(CharPredicate::Range(0x7F, 0x9F))
}

fn identifier_ignorable() -> CharPredicate {
    CharPredicate::Range(0x00, 0x08)
        .union(CharPredicate::Range(0x0E, 0x1B))
        .union(CharPredicate::Range(0x7F, 0x9F))
        .union(cat(bit(Gc::Format)))
}

fn java_whitespace() -> CharPredicate {
    let no_break = CharPredicate::Single(0xA0)
        .union(CharPredicate::Single(0x2007))
        .union(CharPredicate::Single(0x202F));
    cat(SEPARATOR)
        .and(no_break.negate())
        .union(CharPredicate::Range(0x09, 0x0D))
        .union(CharPredicate::Range(0x1C, 0x1F))
}

// ===== Name lookups =====

/// Binary Unicode properties, matched case-insensitively (`\p{IsAlphabetic}`).
pub(crate) fn for_unicode_property(name: &str, case_insensitive: bool) -> Option<CharPredicate> {
    let name = name.to_ascii_uppercase();
    if case_insensitive && matches!(name.as_str(), "LOWERCASE" | "UPPERCASE" | "TITLECASE") {
        return Some(cased());
    }
    let p = match name.as_str() {
        "ALPHABETIC" => alphabetic(),
        "ASSIGNED" => cat(bit(Gc::Unassigned)).negate(),
        "CONTROL" => cat(bit(Gc::Control)),
        "HEXDIGIT" | "HEX_DIGIT" => hex_digit(),
        "IDEOGRAPHIC" => table(&IDEOGRAPHIC),
        "JOINCONTROL" | "JOIN_CONTROL" => join_control(),
        "LETTER" => letter(),
        "LOWERCASE" => table(&LOWERCASE),
        "NONCHARACTERCODEPOINT" | "NONCHARACTER_CODE_POINT" => CharPredicate::Noncharacter,
        "TITLECASE" => cat(bit(Gc::TitlecaseLetter)),
        "PUNCTUATION" => cat(PUNCTUATION),
        "UPPERCASE" => table(&UPPERCASE),
        "WHITESPACE" | "WHITE_SPACE" => white_space(),
        "WORD" => word(),
        "ALNUM" => alphabetic().union(digit()),
        "BLANK" => blank(),
        "GRAPH" => graph(),
        "PRINT" => print(),
        "DIGIT" => digit(),
        "EMOJI" => CharPredicate::Ranges(ucd_ranges("Emoji")?),
        "EMOJI_PRESENTATION" => CharPredicate::Ranges(ucd_ranges("Emoji_Presentation")?),
        "EMOJI_MODIFIER" => CharPredicate::Ranges(ucd_ranges("Emoji_Modifier")?),
        "EMOJI_MODIFIER_BASE" => CharPredicate::Ranges(ucd_ranges("Emoji_Modifier_Base")?),
        "EMOJI_COMPONENT" => CharPredicate::Ranges(ucd_ranges("Emoji_Component")?),
        "EXTENDED_PICTOGRAPHIC" => CharPredicate::Ranges(ucd_ranges("Extended_Pictographic")?),
        _ => return None,
    };
    Some(p)
}

/// POSIX names under UNICODE_CHARACTER_CLASS (`\p{Alpha}` means Alphabetic).
pub(crate) fn for_posix_name(name: &str, case_insensitive: bool) -> Option<CharPredicate> {
    let name = name.to_ascii_uppercase();
    if case_insensitive && matches!(name.as_str(), "LOWER" | "UPPER") {
        return Some(cased());
    }
    let p = match name.as_str() {
        "ALPHA" => alphabetic(),
        "LOWER" => table(&LOWERCASE),
        "UPPER" => table(&UPPERCASE),
        "SPACE" => white_space(),
        "PUNCT" => cat(PUNCTUATION),
        "XDIGIT" => hex_digit(),
        "ALNUM" => alphabetic().union(digit()),
        "CNTRL" => cat(bit(Gc::Control)),
        "DIGIT" => digit(),
        "BLANK" => blank(),
        "GRAPH" => graph(),
        "PRINT" => print(),
        _ => return None,
    };
    Some(p)
}

/// General categories, ASCII POSIX classes and `java*` names. Case-sensitive.
pub(crate) fn for_property(name: &str, case_insensitive: bool) -> Option<CharPredicate> {
    if case_insensitive {
        match name {
            "Lu" | "Ll" | "Lt" => return Some(cat(CASED_LETTER)),
            "Lower" | "Upper" => return Some(CharPredicate::Ctype(ascii::ALPHA)),
            "javaLowerCase" | "javaUpperCase" | "javaTitleCase" => return Some(cased()),
            _ => {}
        }
    }
    if let Some(gc) = general_category(name) {
        return Some(gc);
    }
    let p = match name {
        "L1" => CharPredicate::Range(0x00, 0xFF),
        "all" => CharPredicate::All,
        "ASCII" => CharPredicate::Range(0x00, 0x7F),
        // POSIX, ASCII only
        "Alnum" => CharPredicate::Ctype(ascii::ALNUM),
        "Alpha" => CharPredicate::Ctype(ascii::ALPHA),
        "Blank" => CharPredicate::Ctype(ascii::BLANK),
        "Cntrl" => CharPredicate::Ctype(ascii::CNTRL),
        "Digit" => CharPredicate::Range('0' as u32, '9' as u32),
        "Graph" => CharPredicate::Ctype(ascii::GRAPH),
        "Lower" => CharPredicate::Range('a' as u32, 'z' as u32),
        "Print" => CharPredicate::Range(0x20, 0x7E),
        "Punct" => CharPredicate::Ctype(ascii::PUNCT),
        "Space" => CharPredicate::Ctype(ascii::SPACE),
        "Upper" => CharPredicate::Range('A' as u32, 'Z' as u32),
        "XDigit" => CharPredicate::Ctype(ascii::XDIGIT),
        // classic character predicates
        "javaLowerCase" => table(&LOWERCASE),
        "javaUpperCase" => table(&UPPERCASE),
        "javaAlphabetic" => alphabetic(),
        "javaIdeographic" => table(&IDEOGRAPHIC),
        "javaTitleCase" => cat(bit(Gc::TitlecaseLetter)),
        "javaDigit" => digit(),
        "javaDefined" => cat(bit(Gc::Unassigned)).negate(),
        "javaLetter" => letter(),
        "javaLetterOrDigit" => letter_or_digit(),
        "javaJavaIdentifierStart" => cat(LETTER
            | bit(Gc::LetterNumber)
            | bit(Gc::CurrencySymbol)
            | bit(Gc::ConnectorPunctuation)),
        "javaJavaIdentifierPart" => cat(LETTER
            | bit(Gc::DecimalNumber)
            | bit(Gc::LetterNumber)
            | bit(Gc::CurrencySymbol)
            | bit(Gc::ConnectorPunctuation)
            | bit(Gc::NonspacingMark)
            | bit(Gc::SpacingMark))
        .union(identifier_ignorable()),
        "javaUnicodeIdentifierStart" => table(&ID_START),
        "javaUnicodeIdentifierPart" => table(&ID_CONTINUE).union(identifier_ignorable()),
        "javaIdentifierIgnorable" => identifier_ignorable(),
        "javaSpaceChar" => cat(SEPARATOR),
        "javaWhitespace" => java_whitespace(),
        "javaISOControl" => iso_control(),
        "javaMirrored" => table(&BIDI_MIRRORED),
        _ => return None,
    };
    Some(p)
}

fn general_category(name: &str) -> Option<CharPredicate> {
    let mask = match name {
        "Cn" => bit(Gc::Unassigned),
        "Lu" => bit(Gc::UppercaseLetter),
        "Ll" => bit(Gc::LowercaseLetter),
        "Lt" => bit(Gc::TitlecaseLetter),
        "Lm" => bit(Gc::ModifierLetter),
        "Lo" => bit(Gc::OtherLetter),
        "Mn" => bit(Gc::NonspacingMark),
        "Me" => bit(Gc::EnclosingMark),
        "Mc" => bit(Gc::SpacingMark),
        "Nd" => bit(Gc::DecimalNumber),
        "Nl" => bit(Gc::LetterNumber),
        "No" => bit(Gc::OtherNumber),
        "Zs" => bit(Gc::SpaceSeparator),
        "Zl" => bit(Gc::LineSeparator),
        "Zp" => bit(Gc::ParagraphSeparator),
        "Cc" => bit(Gc::Control),
        "Cf" => bit(Gc::Format),
        "Co" => bit(Gc::PrivateUse),
        "Cs" => bit(Gc::Surrogate),
        "Pd" => bit(Gc::DashPunctuation),
        "Ps" => bit(Gc::OpenPunctuation),
        "Pe" => bit(Gc::ClosePunctuation),
        "Pc" => bit(Gc::ConnectorPunctuation),
        "Po" => bit(Gc::OtherPunctuation),
        "Sm" => bit(Gc::MathSymbol),
        "Sc" => bit(Gc::CurrencySymbol),
        "Sk" => bit(Gc::ModifierSymbol),
        "So" => bit(Gc::OtherSymbol),
        "Pi" => bit(Gc::InitialPunctuation),
        "Pf" => bit(Gc::FinalPunctuation),
        "L" => LETTER,
        "M" => MARK,
        "N" => NUMBER,
        "Z" => SEPARATOR,
        "C" => OTHER,
        "P" => PUNCTUATION,
        "S" => SYMBOL,
        "LC" => CASED_LETTER,
        "LD" => LETTER | bit(Gc::DecimalNumber),
        _ => return None,
    };
    Some(cat(mask))
}

/// Unicode script by full name or four-letter alias, case-insensitively.
pub(crate) fn for_script(name: &str) -> Option<CharPredicate> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ' ' | '-'));
    if !valid {
        return None;
    }
    ucd_ranges(&format!("sc={name}")).map(CharPredicate::Ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_properties() {
        let alpha = for_unicode_property("alphabetic", false).unwrap();
        assert!(alpha.is('ж' as u32));
        assert!(!alpha.is('1' as u32));
        let ws = for_unicode_property("WHITE_SPACE", false).unwrap();
        assert!(ws.is(0x85));
        assert!(ws.is(0x2003));
        assert!(for_unicode_property("Bogus", false).is_none());
    }

    #[test]
    fn test_posix_names_are_ascii_by_default() {
        let alpha = for_property("Alpha", false).unwrap();
        assert!(alpha.is('x' as u32));
        assert!(!alpha.is('é' as u32));
        let alpha = for_posix_name("Alpha", false).unwrap();
        assert!(alpha.is('é' as u32));
    }

    #[test]
    fn test_case_insensitive_case_properties() {
        let lu = for_property("Lu", true).unwrap();
        assert!(lu.is('a' as u32));
        let lu = for_property("Lu", false).unwrap();
        assert!(!lu.is('a' as u32));
    }

    #[test]
    fn test_scripts() {
        let greek = for_script("Greek").unwrap();
        assert!(greek.is('λ' as u32));
        assert!(!greek.is('a' as u32));
        let latin = for_script("latn").unwrap();
        assert!(latin.is('a' as u32));
        assert!(for_script("Klingon").is_none());
        assert!(for_script("Greek}|x").is_none());
    }
}
