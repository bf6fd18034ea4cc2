// Tests for regions, bound modes, hitEnd/requireEnd and matcher reuse

use crate::*;

#[test]
fn test_find_within_region() {
    let p = compile(r"\d+").unwrap();
    let mut m = p.matcher("12ab34");
    m.region(2, 6).unwrap();
    assert_eq!(m.region_start(), 2);
    assert_eq!(m.region_end(), 6);
    assert!(m.find());
    assert_eq!(m.group().unwrap(), "34");
    assert_eq!(m.start().unwrap(), 4);

    m.region(0, 1).unwrap();
    assert!(m.find());
    assert_eq!(m.group().unwrap(), "1");
}

#[test]
fn test_matches_respects_region() {
    let p = compile("ab").unwrap();
    let mut m = p.matcher("xaby");
    m.region(1, 3).unwrap();
    assert!(m.matches());
    assert!(m.looking_at());
    m.region(1, 4).unwrap();
    assert!(!m.matches());
    assert!(m.looking_at());
}

#[test]
fn test_region_errors() {
    let p = compile("a").unwrap();
    let mut m = p.matcher("abc");
    let e = m.region(3, 2).unwrap_err();
    assert_eq!(e, MatchError::RegionOutOfBounds { start: 3, end: 2, len: 3 });
    assert_eq!(e.kind(), ErrorKind::IndexOutOfRange);
    assert!(m.region(0, 10).is_err());
    assert!(m.region(3, 3).is_ok());
    assert!(!m.find());
}

#[test]
fn test_anchoring_bounds() {
    let p = compile(r"^\d+$").unwrap();
    let mut m = p.matcher("ab12");
    m.region(2, 4).unwrap();
    assert!(m.has_anchoring_bounds());
    assert!(m.find());

    m.use_anchoring_bounds(false);
    m.region(2, 4).unwrap();
    assert!(!m.has_anchoring_bounds());
    assert!(!m.find());

    let p = compile(r"\d+$").unwrap();
    let mut m = p.matcher("12ab");
    m.region(0, 2).unwrap();
    assert!(m.find());
    m.use_anchoring_bounds(false);
    m.region(0, 2).unwrap();
    assert!(!m.find());
}

#[test]
fn test_word_boundary_with_transparent_bounds() {
    let p = compile(r"\bb").unwrap();
    let mut m = p.matcher("ab");
    m.region(1, 2).unwrap();
    assert!(m.find());

    m.use_transparent_bounds(true);
    m.region(1, 2).unwrap();
    assert!(!m.find());
}

#[test]
fn test_reset_clears_region_but_keeps_bound_modes() {
    let p = compile("a").unwrap();
    let mut m = p.matcher("aaa");
    m.use_transparent_bounds(true).use_anchoring_bounds(false);
    m.region(1, 2).unwrap();
    m.reset();
    assert_eq!(m.region_start(), 0);
    assert_eq!(m.region_end(), 3);
    assert!(m.has_transparent_bounds());
    assert!(!m.has_anchoring_bounds());
}

// ============ hitEnd / requireEnd ============

#[test]
fn test_hit_end() {
    let p = compile(r"\d+").unwrap();
    let mut m = p.matcher("12");
    assert!(m.find());
    assert!(m.hit_end());
    assert!(!m.require_end());

    let mut m = p.matcher("1a");
    assert!(m.find());
    assert!(!m.hit_end());
}

#[test]
fn test_require_end() {
    let p = compile(r"\d+$").unwrap();
    let mut m = p.matcher("12");
    assert!(m.find());
    assert!(m.hit_end());
    assert!(m.require_end());

    let p = compile(r"\d\b").unwrap();
    let mut m = p.matcher("1");
    assert!(m.find());
    assert!(m.require_end());

    let p = compile(r"\d\b").unwrap();
    let mut m = p.matcher("1 ");
    assert!(m.find());
    assert!(!m.require_end());
}

// ============ Reuse ============

#[test]
fn test_reset_input() {
    let p = compile(r"\d").unwrap();
    let mut m = p.matcher("abc");
    assert!(!m.find());
    m.reset_input("x9");
    assert_eq!(m.text(), "x9");
    assert!(m.find());
    assert_eq!(m.group().unwrap(), "9");
}

#[test]
fn test_use_program_keeps_position() {
    let digits = compile(r"\d").unwrap();
    let letters = compile("(?<l>[a-z])").unwrap();
    let mut m = digits.matcher("a1b2");
    assert!(m.find());
    assert_eq!(m.group().unwrap(), "1");

    m.use_program(letters);
    assert_eq!(m.program().as_str(), "(?<l>[a-z])");
    assert_eq!(m.group_of(0).unwrap(), None);
    assert_eq!(m.group(), Err(MatchError::NoMatchAvailable));
    assert_eq!(m.group_count(), 1);
    assert!(m.find());
    assert_eq!(m.group().unwrap(), "b");
    assert_eq!(m.group_of("l").unwrap(), Some("b"));
}

#[test]
fn test_matcher_debug() {
    let p = compile("a").unwrap();
    let m = p.matcher("abc");
    let s = format!("{m:?}");
    assert!(s.contains("Matcher"));
    assert!(s.contains("\"a\""));
}
