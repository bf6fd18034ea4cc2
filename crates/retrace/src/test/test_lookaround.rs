// Tests for lookahead and lookbehind

use crate::*;

fn find(pattern: &str, input: &str) -> Option<String> {
    let p = compile(pattern).unwrap();
    let mut m = p.matcher(input);
    m.find().then(|| m.group().unwrap().to_string())
}

#[test]
fn test_positive_lookahead() {
    assert_eq!(find("foo(?=bar)", "foobar").as_deref(), Some("foo"));
    assert_eq!(find("foo(?=bar)", "foobaz"), None);
}

#[test]
fn test_negative_lookahead() {
    assert_eq!(find("foo(?!bar)", "foobaz").as_deref(), Some("foo"));
    assert_eq!(find("foo(?!bar)", "foobar"), None);
    assert_eq!(find(r"\b(?!un)\w+", "undo redo").as_deref(), Some("redo"));
}

#[test]
fn test_positive_lookbehind() {
    assert_eq!(find(r"(?<=\$)\d+", "cost $42").as_deref(), Some("42"));
    assert_eq!(find("(?<=ab|c)d", "abd").as_deref(), Some("d"));
    assert_eq!(find("(?<=ab|c)d", "cd").as_deref(), Some("d"));
    assert_eq!(find("(?<=ab|c)d", "bd"), None);
    assert_eq!(find("(?<=a{1,3})b", "aab").as_deref(), Some("b"));
}

#[test]
fn test_negative_lookbehind() {
    assert_eq!(find(r"(?<!\$)\b\d+", "$5 and 7").as_deref(), Some("7"));
    assert_eq!(find("(?<!a)b", "ab"), None);
    assert_eq!(find("(?<!a)b", "b").as_deref(), Some("b"));
}

#[test]
fn test_lookaround_does_not_consume() {
    let p = compile(r"(?=(\d+))\w+").unwrap();
    let mut m = p.matcher("123abc");
    assert!(m.find());
    assert_eq!(m.group().unwrap(), "123abc");
    assert_eq!(m.group_of(1).unwrap(), Some("123"));
}

#[test]
fn test_password_style_lookaheads() {
    let p = compile(r"(?=.*\d)(?=.*[a-z]).{6,}").unwrap();
    assert!(p.is_match("abc123"));
    assert!(!p.is_match("abcdef"));
    assert!(!p.is_match("a1"));
}

// ============ Bounds ============

#[test]
fn test_lookahead_and_region_bounds() {
    let p = compile("foo(?=bar)").unwrap();
    let mut m = p.matcher("foobar");
    m.region(0, 3).unwrap();
    assert!(!m.find());
    assert!(m.hit_end());

    m.use_transparent_bounds(true);
    m.region(0, 3).unwrap();
    assert!(m.has_transparent_bounds());
    assert!(m.find());
    assert_eq!(m.group().unwrap(), "foo");
}

#[test]
fn test_lookbehind_and_region_bounds() {
    let p = compile("(?<=b)c").unwrap();
    let mut m = p.matcher("abcd");
    m.region(2, 4).unwrap();
    assert!(!m.find());

    m.use_transparent_bounds(true);
    m.region(2, 4).unwrap();
    assert!(m.find());
    assert_eq!(m.start().unwrap(), 2);
}

#[test]
fn test_negative_lookahead_at_end_requires_end() {
    let p = compile("a(?!b)").unwrap();
    let mut m = p.matcher("a");
    assert!(m.find());
    assert!(m.require_end());
}
