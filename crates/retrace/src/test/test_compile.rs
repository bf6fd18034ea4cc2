// Tests for pattern compilation and syntax errors

use crate::*;

fn err(pattern: &str) -> SyntaxError {
    compile(pattern).unwrap_err()
}

// ============ Error reporting ============

#[test]
fn test_unclosed_group() {
    let e = err("(abc");
    assert_eq!(e.description(), "Unclosed group");
    assert_eq!(e.index(), Some(4));
    assert_eq!(e.pattern(), "(abc");
}

#[test]
fn test_dangling_meta_character() {
    let e = err("*a");
    assert_eq!(e.description(), "Dangling meta character '*'");
    assert_eq!(e.index(), Some(0));
    assert_eq!(e.to_string(), "Dangling meta character '*' near index 0\n*a\n^");

    assert_eq!(err("a|+").description(), "Dangling meta character '+'");
}

#[test]
fn test_unmatched_close_paren() {
    let e = err("a)");
    assert_eq!(e.description(), "Unmatched closing ')'");
    assert_eq!(e.index(), Some(0));
}

#[test]
fn test_repetition_errors() {
    assert_eq!(err("a{").description(), "Illegal repetition");
    assert_eq!(err("{x}").description(), "Illegal repetition");
    assert_eq!(err("a{,3}").description(), "Illegal repetition");
    assert_eq!(err("a{2").description(), "Unclosed counted closure");
    assert_eq!(err("a{1,-1}").description(), "Unclosed counted closure");
    assert_eq!(err("a{2, }").description(), "Unclosed counted closure");
    assert_eq!(err("a{2,x}").description(), "Unclosed counted closure");
    assert_eq!(err("a{3,2}").description(), "Illegal repetition range");
    assert_eq!(err("a{99999999999}").description(), "Illegal repetition range");
}

#[test]
fn test_group_errors() {
    assert_eq!(err("(?<1a>x)").description(), "capturing group name does not start with a Latin letter");
    assert_eq!(err("(?<ab").description(), "named capturing group is missing trailing '>'");
    assert_eq!(
        err("(?<n>a)(?<n>b)").description(),
        "Named capturing group <n> is already defined"
    );
    assert_eq!(err("(?q)").description(), "Unknown inline modifier");
    assert_eq!(err("(?$x)").description(), "Unknown group type");
    assert_eq!(
        err("(?<=a+)b").description(),
        "Look-behind group does not have an obvious maximum length"
    );
}

#[test]
fn test_error_offsets_count_code_points() {
    // 'é' is two bytes but one position
    let e = err("é(");
    assert_eq!(e.index(), Some(2));
}

// ============ Accepted syntax ============

#[test]
fn test_literal_braces_and_brackets() {
    assert!(matches("a}", "a}").unwrap());
    assert!(matches("]", "]").unwrap());
    assert!(matches("a\\{2}", "a{2}").unwrap());
}

#[test]
fn test_quoting() {
    assert!(matches("\\Q.*\\E", ".*").unwrap());
    assert!(!matches("\\Q.*\\E", "ab").unwrap());
    // unterminated quote runs to the end
    assert!(matches("a\\Q+?", "a+?").unwrap());
}

#[test]
fn test_escapes() {
    assert!(matches("\\t\\n", "\t\n").unwrap());
    assert!(matches("\\x41\\x{1F600}", "A\u{1F600}").unwrap());
    assert!(matches("\\u00e9", "é").unwrap());
    assert!(matches("\\0101", "A").unwrap());
    assert!(matches("\\cA", "\u{1}").unwrap());
    assert!(matches("\\e\\a\\f", "\u{1B}\u{7}\u{C}").unwrap());
}

#[test]
fn test_vertical_whitespace_escape() {
    // as a range endpoint \v is U+000B; elsewhere it is the \v class
    let range = compile("[\\v-\\r]").unwrap();
    assert!(range.is_match("\u{B}"));
    assert!(range.is_match("\r"));
    assert!(!range.is_match("\u{85}"));

    let class = compile("\\v").unwrap();
    assert!(class.is_match("\u{85}"));
    assert!(class.is_match("\u{2028}"));
    assert!(!class.is_match("v"));
    assert!(compile("[\\v]").unwrap().is_match("\u{2029}"));
}

#[test]
fn test_horizontal_whitespace_and_linebreak() {
    let h = compile("\\h+").unwrap();
    assert!(h.is_match(" \t\u{A0}"));
    assert!(!h.is_match("\n"));

    let r = compile("a\\Rb").unwrap();
    assert!(r.is_match("a\r\nb"));
    assert!(r.is_match("a\nb"));
    assert!(r.is_match("a\u{2028}b"));
    assert!(!r.is_match("a\n\nb"));
}

#[test]
fn test_comments_mode_syntax() {
    let p = compile_with("a b  # trailing comment\n c", Flags::COMMENTS).unwrap();
    assert!(p.is_match("abc"));
    let p = compile_with("[a b]+", Flags::COMMENTS).unwrap();
    assert!(p.is_match("abba"));
    assert!(!p.is_match("a b"));
}

#[test]
fn test_compile_is_repeatable() {
    let a = compile("(x|y)+z").unwrap();
    let b = compile("(x|y)+z").unwrap();
    for input in ["xyz", "z", "xyzz", "yyyyz"] {
        assert_eq!(a.is_match(input), b.is_match(input), "{input}");
    }
}
