// Tests for Program::split

use crate::*;

fn split<'t>(pattern: &str, input: &'t str, limit: isize) -> Vec<&'t str> {
    compile(pattern).unwrap().split(input, limit)
}

#[test]
fn test_split_keeps_inner_empty_pieces() {
    assert_eq!(split(",", "a,,b", -1), ["a", "", "b"]);
    assert_eq!(split(",", "a,,b", 0), ["a", "", "b"]);
}

#[test]
fn test_split_trailing_empty_pieces() {
    assert_eq!(split(",", "a,b,,", 0), ["a", "b"]);
    assert_eq!(split(",", "a,b,,", -1), ["a", "b", "", ""]);
}

#[test]
fn test_split_limit() {
    assert_eq!(split(",", "a,b,,", 2), ["a", "b,,"]);
    assert_eq!(split(",", "a,b,c", 1), ["a,b,c"]);
    assert_eq!(split(",", "a,b", 5), ["a", "b"]);
}

#[test]
fn test_split_without_match() {
    assert_eq!(split(",", "abc", 0), ["abc"]);
    assert_eq!(split(",", "", 0), [""]);
}

#[test]
fn test_split_leading_separator() {
    assert_eq!(split(",", ",a", 0), ["", "a"]);
}

#[test]
fn test_split_zero_width() {
    assert_eq!(split("", "abc", 0), ["a", "b", "c"]);
    assert_eq!(
        split("(?=[A-Z])", "helloWorldFoo", 0),
        ["hello", "World", "Foo"]
    );
}

#[test]
fn test_split_non_ascii() {
    assert_eq!(split("·", "α·β·γ", 0), ["α", "β", "γ"]);
}
