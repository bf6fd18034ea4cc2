// Tests for character classes and Unicode properties

use crate::*;

fn is_match(pattern: &str, input: &str) -> bool {
    compile(pattern).unwrap().is_match(input)
}

// ============ Bracket classes ============

#[test]
fn test_class_ranges_and_negation() {
    assert!(is_match("[a-z0-9_]+", "abc_123"));
    assert!(!is_match("[a-z]", "A"));
    assert!(is_match("[^a-z]", "A"));
    assert!(!is_match("[^a-z]", "q"));
    assert!(is_match("[^a]", "\n"));
}

#[test]
fn test_class_union_and_intersection() {
    assert!(is_match("[[a-c][x-z]]+", "abxz"));
    assert!(!is_match("[[a-c][x-z]]", "m"));
    assert!(is_match("[a-z&&[^aeiou]]+", "bcd"));
    assert!(!is_match("[a-z&&[^aeiou]]+", "abc"));
    assert!(is_match("[a-z&&def]+", "fed"));
    assert!(!is_match("[a-z&&def]", "a"));
}

#[test]
fn test_predefined_classes() {
    assert!(is_match(r"\d\D\s\S\w\W", "1a b_!"));
    assert!(is_match(r"[\d\s]+", "1 2\t3"));
    assert!(!is_match(r"[^\d]", "5"));
    assert!(is_match(r"\H\V", "ab"));
}

#[test]
fn test_class_with_escapes() {
    assert!(is_match(r"[\x41-\x43]+", "ABC"));
    assert!(is_match(r"[à-å]", "ä"));
    assert!(is_match(r"[\]\[]+", "]["));
    assert!(is_match(r"[\Q-]\E]+", "-]"));
}

#[test]
fn test_supplementary_code_points() {
    assert!(is_match(r"[\x{1F600}-\x{1F64F}]", "\u{1F601}"));
    assert!(is_match("[^a]", "\u{1F601}"));
    assert!(is_match(r"\x{1F600}+", "\u{1F600}\u{1F600}"));
}

// ============ Properties ============

#[test]
fn test_general_categories() {
    assert!(is_match(r"\p{L}+", "héllo"));
    assert!(is_match(r"\pL", "ж"));
    assert!(is_match(r"\p{Lu}", "A"));
    assert!(!is_match(r"\p{Lu}", "a"));
    assert!(is_match(r"\P{L}", "1"));
    assert!(is_match(r"\p{IsL}", "a"));
    assert!(is_match(r"\p{gc=Nd}", "7"));
    assert!(is_match(r"\p{Sc}", "€"));
}

#[test]
fn test_scripts_and_blocks() {
    assert!(is_match(r"\p{IsGreek}+", "αβγ"));
    assert!(!is_match(r"\p{IsGreek}", "a"));
    assert!(is_match(r"\p{sc=Latin}", "a"));
    assert!(is_match(r"\p{InBasicLatin}+", "abc"));
    assert!(!is_match(r"\p{InBasicLatin}", "é"));
    assert!(is_match(r"\p{InCyrillic}", "ж"));
    assert!(is_match(r"\p{block=Cyrillic}", "ж"));
}

#[test]
fn test_binary_properties() {
    assert!(is_match(r"\p{IsAlphabetic}+", "aé"));
    assert!(is_match(r"\p{IsWhite_Space}", "\u{3000}"));
    assert!(is_match(r"\p{IsUppercase}", "Ä"));
}

#[test]
fn test_posix_classes() {
    assert!(is_match(r"\p{Alpha}+", "abc"));
    assert!(!is_match(r"\p{Alpha}", "é"));
    assert!(is_match(r"\p{Punct}+", "!?."));
    assert!(is_match(r"\p{XDigit}+", "0fA9"));
    assert!(is_match(r"\p{Lower}\p{Upper}", "aB"));
    assert!(is_match(r"\p{ASCII}", "~"));
    // Unicode character class flag widens POSIX names
    assert!(compile_with(r"\p{Alpha}", Flags::UNICODE_CHARACTER_CLASS).unwrap().is_match("é"));
}

#[test]
fn test_java_character_properties() {
    assert!(is_match(r"\p{javaLowerCase}+", "abé"));
    assert!(is_match(r"\p{javaUpperCase}", "É"));
    assert!(is_match(r"\p{javaDigit}", "٣"));
    assert!(is_match(r"\p{javaJavaIdentifierStart}\p{javaJavaIdentifierPart}*", "_x1"));
}

#[test]
fn test_properties_in_classes() {
    assert!(is_match(r"[\p{L}&&[^a]]+", "bcé"));
    assert!(!is_match(r"[\p{L}&&[^a]]", "a"));
    assert!(is_match(r"[^\p{L}]", "1"));
    assert!(is_match(r"[\P{L}x]+", "1x2"));
}

#[test]
fn test_case_insensitive_properties() {
    let p = compile_with(r"\p{Lu}", Flags::CASE_INSENSITIVE).unwrap();
    assert!(p.is_match("a"));
    let p = compile_with(r"\p{Lower}", Flags::CASE_INSENSITIVE).unwrap();
    assert!(p.is_match("A"));
}
