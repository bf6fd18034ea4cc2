// Tests for programs: quoting, display, persistence and sharing

use std::thread;

use crate::*;

// ============ Quoting ============

#[test]
fn test_quote_round_trip() {
    for s in ["1+1=2", "a.b*c", "(x)", "[", "\\E", "a\\Eb\\Q", "", "é?"] {
        let p = compile(&quote(s)).unwrap();
        assert!(p.matcher(s).matches(), "{s:?}");
        let other = format!("{s}x");
        assert!(!p.is_match(&other), "{s:?}");
    }
}

#[test]
fn test_quote_shape() {
    assert_eq!(quote("a.b"), "\\Qa.b\\E");
    assert_eq!(quote("a\\Eb"), "\\Qa\\E\\\\E\\Qb\\E");
}

// ============ Program surface ============

#[test]
fn test_display_and_from_str() {
    let p: Program = r"\d+".parse().unwrap();
    assert_eq!(p.to_string(), r"\d+");
    assert_eq!(p.as_str(), r"\d+");
    assert!("(".parse::<Program>().is_err());
    let dbg = format!("{p:?}");
    assert!(dbg.contains("Program"));
}

#[test]
fn test_group_count_excludes_whole_match() {
    assert_eq!(compile("abc").unwrap().group_count(), 0);
    assert_eq!(compile("(a)(b(c))").unwrap().group_count(), 3);
}

#[test]
fn test_program_shared_between_threads() {
    let p = compile(r"(\w+)@(\w+)").unwrap();
    let inputs = ["a@b", "cc@dd", "nope", "x@y z@w"];
    let counts: Vec<usize> = thread::scope(|s| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| {
                let p = &p;
                s.spawn(move || p.matcher(input).results().count())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(counts, [1, 1, 0, 2]);
}

// ============ Persisted form ============

#[test]
fn test_pattern_source_compiles_once() {
    let src = PatternSource::new(r"\d+", Flags::MULTILINE);
    let addrs: Vec<usize> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| src.program().unwrap() as *const Program as usize))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    assert!(std::ptr::eq(src.program().unwrap(), src.program().unwrap()));
    assert_eq!(src.program().unwrap().flags(), Flags::MULTILINE);
}

#[test]
fn test_pattern_source_reports_syntax_errors() {
    let src = PatternSource::new("a{2", Flags::empty());
    let e = src.program().unwrap_err();
    assert_eq!(e.description(), "Unclosed counted closure");
}

#[test]
fn test_pattern_source_from_program() {
    let p = compile_with("a+", Flags::CASE_INSENSITIVE).unwrap();
    let src = PatternSource::from(&p);
    assert_eq!(src.source(), "a+");
    assert_eq!(src.flags(), Flags::CASE_INSENSITIVE);
    assert_eq!(src, PatternSource::new("a+", Flags::CASE_INSENSITIVE));
    assert!(src.program().unwrap().is_match("AA"));
}

#[cfg(feature = "serde")]
#[test]
fn test_pattern_source_json_round_trip() {
    let src = PatternSource::new(r"(?<w>\w+)$", Flags::MULTILINE | Flags::CASE_INSENSITIVE);
    let json = serde_json::to_string(&src).unwrap();
    let back: PatternSource = serde_json::from_str(&json).unwrap();
    assert_eq!(back, src);

    let original = src.program().unwrap();
    let rebuilt = back.program().unwrap();
    let text = "one\nTWO";
    let a: Vec<_> = original.matcher(text).results().map(|r| r.range()).collect();
    let b: Vec<_> = rebuilt.matcher(text).results().map(|r| r.range()).collect();
    assert_eq!(a, b);
    assert_eq!(rebuilt.group_index("w"), Some(1));
}
