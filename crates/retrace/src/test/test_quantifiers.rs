// Tests for greedy, lazy and possessive repetition

use crate::*;

fn first(pattern: &str, input: &str) -> Option<String> {
    let p = compile(pattern).unwrap();
    let mut m = p.matcher(input);
    m.find().then(|| m.group().unwrap().to_string())
}

#[test]
fn test_counted_repetition() {
    assert_eq!(first("a{2,3}", "aaaa").as_deref(), Some("aaa"));
    assert!(compile("a{2}").unwrap().is_match("aa"));
    assert!(!compile("a{2}").unwrap().is_match("a"));
    assert!(compile("a{2,}").unwrap().is_match("aaaaa"));
    assert!(compile("a{0}b").unwrap().is_match("b"));
    assert_eq!(first("a{2,3}?", "aaaa").as_deref(), Some("aa"));
}

#[test]
fn test_optional() {
    assert!(compile("colou?r").unwrap().is_match("color"));
    assert!(compile("colou?r").unwrap().is_match("colour"));
    assert_eq!(first("ab??", "ab").as_deref(), Some("a"));
    assert_eq!(first("ab?+b", "ab"), None);
}

#[test]
fn test_lazy_group_split() {
    let p = compile("(a+?)(a*)").unwrap();
    let mut m = p.matcher("aaa");
    assert!(m.matches());
    assert_eq!(m.group_of(1).unwrap(), Some("a"));
    assert_eq!(m.group_of(2).unwrap(), Some("aa"));
}

#[test]
fn test_variable_length_group_counts() {
    let p = compile("(?:a|bc){2,3}d").unwrap();
    assert!(p.is_match("abcad"));
    assert!(p.is_match("bcad"));
    assert!(!p.is_match("ad"));
    assert!(!p.is_match("abcabcad"));
}

#[test]
fn test_lazy_loop() {
    assert_eq!(first("(?:a|bc)+?", "abc").as_deref(), Some("a"));
    assert_eq!(first("(?:a|bc)+?c", "abcc").as_deref(), Some("abcc"));
    assert_eq!(first("(?:a|bc)+?c", "aacc").as_deref(), Some("aac"));
}

#[test]
fn test_possessive_group() {
    assert!(!compile("(?:ab)*+ab").unwrap().is_match("abab"));
    assert!(compile("(?:ab)*ab").unwrap().is_match("abab"));
    assert!(compile("(ab)++c").unwrap().is_match("ababc"));
}

#[test]
fn test_fixed_length_group_repetition() {
    let p = compile("(ab){2}").unwrap();
    let mut m = p.matcher("ababab");
    assert!(m.looking_at());
    assert_eq!(m.group().unwrap(), "abab");
    assert_eq!(m.group_of(1).unwrap(), Some("ab"));

    let p = compile("(ab)*?c").unwrap();
    let mut m = p.matcher("ababc");
    assert!(m.matches());
    assert_eq!(m.group_of(1).unwrap(), Some("ab"));
}

#[test]
fn test_empty_iterations_terminate() {
    // the body can match empty; the loop must not spin
    assert!(compile("(a*)*b").unwrap().is_match("aab"));
    assert!(compile("(a?)+b").unwrap().is_match("b"));
    assert!(compile("(?:a|)*b").unwrap().is_match("aab"));
    assert!(!compile("(a*)*b").unwrap().is_match("aac"));
}

#[test]
fn test_greedy_backtracks_into_variable_atom() {
    assert!(compile("(?:ab|a)*b").unwrap().is_match("abab"));
    assert_eq!(first("[a-c]+c", "abcabc").as_deref(), Some("abcabc"));
}

// ============ Long inputs ============

#[test]
fn test_long_variable_length_loop() {
    let p = compile("(a|b)*").unwrap();
    let text = "ab".repeat(2_500);
    let mut m = p.matcher(&text);
    assert!(m.matches());
    assert!(!m.budget_exhausted());
    assert_eq!(m.group_of(1).unwrap(), Some("b"));

    let text = format!("{}c", "a".repeat(5_000));
    let mut m = p.matcher(&text);
    assert!(m.looking_at());
    assert_eq!(m.end().unwrap(), 5_000);
    assert!(!m.matches());
    assert!(!m.budget_exhausted());
}

#[test]
fn test_long_string_literal() {
    let p = compile(r#""(?:\\.|[^"\\])*""#).unwrap();
    let body = "ab\\\"c ".repeat(400);
    let text = format!("x = \"{body}\";");
    let mut m = p.matcher(&text);
    assert!(m.find());
    assert_eq!(m.start().unwrap(), 4);
    assert_eq!(m.end().unwrap(), text.len() - 1);
}

#[test]
fn test_step_budget() {
    let p = compile("(a+)+b").unwrap();
    let mut m = p.matcher("aaaaaaaaaaaaaaaaaaaac");
    m.set_step_budget(Some(10_000));
    assert!(!m.find());
    assert!(m.budget_exhausted());
    assert!(m.group().is_err());

    m.reset_input("aaab");
    assert!(m.find());
    assert!(!m.budget_exhausted());

    m.set_step_budget(None);
    m.reset_input("ab");
    assert!(m.find());
    assert_eq!(m.group().unwrap(), "ab");
}
