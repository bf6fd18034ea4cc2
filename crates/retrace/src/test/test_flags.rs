// Tests for compile flags and inline modifiers

use crate::*;

fn is_match(pattern: &str, flags: Flags, input: &str) -> bool {
    compile_with(pattern, flags).unwrap().is_match(input)
}

fn count(pattern: &str, flags: Flags, input: &str) -> usize {
    let p = compile_with(pattern, flags).unwrap();
    p.matcher(input).results().count()
}

// ============ Case folding ============

#[test]
fn test_ascii_case_insensitive() {
    assert!(is_match("abc", Flags::CASE_INSENSITIVE, "ABC"));
    assert!(is_match("[a-c]+", Flags::CASE_INSENSITIVE, "CAB"));
    assert!(!is_match("abc", Flags::empty(), "ABC"));
    // without UNICODE_CASE only ASCII letters fold
    assert!(!is_match("é", Flags::CASE_INSENSITIVE, "É"));
    assert!(!is_match("éa", Flags::CASE_INSENSITIVE, "ÉA"));
}

#[test]
fn test_unicode_case_insensitive() {
    let f = Flags::CASE_INSENSITIVE | Flags::UNICODE_CASE;
    assert!(is_match("é", f, "É"));
    assert!(is_match("straße", f, "STRAßE"));
    assert!(is_match("σ", f, "Σ"));
    assert!(is_match("σ", f, "ς"));
    assert!(is_match("[α-ω]+", f, "ΑΒΓ"));
}

#[test]
fn test_inline_case_modifiers() {
    assert!(is_match("(?i)abc", Flags::empty(), "AbC"));
    assert!(is_match("a(?i:b)c", Flags::empty(), "aBc"));
    assert!(!is_match("a(?i:b)c", Flags::empty(), "aBC"));
    assert!(is_match("a(?-i)b", Flags::CASE_INSENSITIVE, "Ab"));
    assert!(!is_match("a(?-i)b", Flags::CASE_INSENSITIVE, "AB"));
    assert!(is_match("(?iu)é", Flags::empty(), "É"));
}

#[test]
fn test_inline_flags_are_scoped_to_group() {
    assert!(is_match("(?:(?i)a)a", Flags::empty(), "Aa"));
    assert!(!is_match("(?:(?i)a)a", Flags::empty(), "AA"));
}

// ============ Line handling ============

#[test]
fn test_multiline_anchors() {
    assert_eq!(count(r"^\w+$", Flags::MULTILINE, "one\ntwo\r\nthree"), 3);
    assert_eq!(count(r"^\w+$", Flags::empty(), "one\ntwo"), 0);
    assert_eq!(count(r"(?m)^\w", Flags::empty(), "a\nb\u{2028}c"), 3);
}

#[test]
fn test_caret_not_between_cr_and_lf() {
    assert_eq!(count("(?m)^", Flags::empty(), "a\r\nb"), 2);
}

#[test]
fn test_dotall() {
    assert!(!is_match("a.b", Flags::empty(), "a\nb"));
    assert!(is_match("a.b", Flags::DOTALL, "a\nb"));
    assert!(is_match("(?s)a.b", Flags::empty(), "a\nb"));
    assert!(!is_match("a.b", Flags::empty(), "a\u{85}b"));
}

#[test]
fn test_unix_lines() {
    assert!(!is_match("a.b", Flags::empty(), "a\rb"));
    assert!(is_match("a.b", Flags::UNIX_LINES, "a\rb"));
    assert!(is_match("(?d)a.b", Flags::empty(), "a\rb"));
    assert!(!is_match("a.b", Flags::UNIX_LINES, "a\nb"));

    let p = compile_with("a$", Flags::UNIX_LINES).unwrap();
    assert!(!p.matcher("a\r\n").find());
    assert!(p.matcher("a\n").find());
}

// ============ Pattern interpretation ============

#[test]
fn test_literal_flag() {
    assert!(is_match("a.b", Flags::LITERAL, "a.b"));
    assert!(!is_match("a.b", Flags::LITERAL, "axb"));
    assert!(is_match("(x)", Flags::LITERAL, "(x)"));
    assert!(is_match("a.b", Flags::LITERAL | Flags::CASE_INSENSITIVE, "A.B"));
    assert_eq!(compile_with("(x)", Flags::LITERAL).unwrap().group_count(), 0);
}

#[test]
fn test_comments_flag() {
    assert!(is_match("(?x) a b # comment\n c", Flags::empty(), "abc"));
    assert!(is_match("a\\ b", Flags::COMMENTS, "a b"));
}

#[test]
fn test_unicode_character_class() {
    assert!(!is_match(r"\w+", Flags::empty(), "héllo"));
    assert!(is_match(r"\w+", Flags::UNICODE_CHARACTER_CLASS, "héllo"));
    assert!(is_match(r"(?U)\w+", Flags::empty(), "héllo"));
    assert!(!is_match(r"\d", Flags::empty(), "٣"));
    assert!(is_match(r"\d", Flags::UNICODE_CHARACTER_CLASS, "٣"));
    assert!(is_match(r"\s", Flags::UNICODE_CHARACTER_CLASS, "\u{2003}"));
    assert!(!is_match(r"\s", Flags::empty(), "\u{2003}"));
}

#[test]
fn test_flags_are_normalized() {
    let p = compile_with("a", Flags::UNICODE_CHARACTER_CLASS).unwrap();
    assert!(p.flags().contains(Flags::UNICODE_CASE));
    let p = compile_with("a", Flags::MULTILINE | Flags::DOTALL).unwrap();
    assert_eq!(p.flags(), Flags::MULTILINE | Flags::DOTALL);
    // inline modifiers do not change the construction flags
    assert_eq!(compile("(?i)a").unwrap().flags(), Flags::empty());
}
