// Canonical equivalence
//
// Under CANON_EQ the pattern is decomposed (NFD) and every base character
// followed by non-spacing marks is replaced by a non-capturing alternation
// of each mark order allowed by the marks' combining classes, plus every
// form reached by composing one step at a time. Input text is matched as
// it is, so precomposed and decomposed spellings both find an alternative.
//
// Inside a class the sequences are lifted out: `[xé]` becomes
// `(?:[x]|e\u{301}|é)`. Negated classes are left alone.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::{canonical_combining_class, compose};

use crate::chars::props;

pub(super) fn normalize(pattern: &str) -> String {
    let chars: Vec<char> = pattern.nfd().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut prev: Option<char> = None;
    // byte offset in `out` of a base character that marks may attach to
    let mut base_start: Option<usize> = None;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if is_mark(c) {
            if let (Some(start), Some(base)) = (base_start, prev) {
                let seq = take_marks(&chars, &mut i, base);
                out.truncate(start);
                out.push_str("(?:");
                out.push_str(&equivalent_alternation(&seq));
                out.push(')');
                prev = seq.last().copied();
                base_start = None;
                continue;
            }
        }
        if c == '[' && prev != Some('\\') {
            i = normalize_class(&chars, i, &mut out);
            prev = Some(']');
            base_start = None;
            continue;
        }
        base_start = if is_base(c) && prev != Some('\\') {
            Some(out.len())
        } else {
            None
        };
        out.push(c);
        prev = Some(c);
        i += 1;
    }
    log::trace!("canonical equivalence rewrote {pattern:?} as {out:?}");
    out
}

/// Copy one bracketed class starting at `chars[start] == '['`. Returns the
/// index after the closing bracket.
fn normalize_class(chars: &[char], start: usize, out: &mut String) -> usize {
    let negated = chars.get(start + 1) == Some(&'^');
    let first_member = start + 1 + negated as usize;
    let mut class = String::from("[");
    let mut lifted = String::new();
    let mut prev: Option<char> = None;
    let mut base_start: Option<usize> = None;
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        if c == ']' && prev != Some('\\') && i > first_member {
            if lifted.is_empty() {
                out.push_str(&class);
                out.push(']');
            } else {
                out.push_str("(?:");
                if class.len() > 1 {
                    out.push_str(&class);
                    out.push(']');
                    out.push_str(&lifted);
                } else {
                    // every member was lifted
                    out.push_str(&lifted[1..]);
                }
                out.push(')');
            }
            return i + 1;
        }
        if is_mark(c) && !negated {
            if let (Some(at), Some(base)) = (base_start, prev) {
                let seq = take_marks(chars, &mut i, base);
                class.truncate(at);
                lifted.push('|');
                lifted.push_str(&equivalent_alternation(&seq));
                prev = seq.last().copied();
                base_start = None;
                continue;
            }
        }
        base_start = if is_base(c) && prev != Some('\\') {
            Some(class.len())
        } else {
            None
        };
        class.push(c);
        prev = Some(c);
        i += 1;
    }
    // unclosed: copy through and let the parser report it
    out.extend(&chars[start..]);
    chars.len()
}

/// `base` followed by the run of marks starting at `chars[*i]`.
fn take_marks(chars: &[char], i: &mut usize, base: char) -> Vec<char> {
    let mut seq = vec![base];
    while *i < chars.len() && is_mark(chars[*i]) {
        seq.push(chars[*i]);
        *i += 1;
    }
    seq
}

fn is_mark(c: char) -> bool {
    props::is_nonspacing_mark(c as u32)
}

fn is_base(c: char) -> bool {
    (!c.is_ascii() || c.is_ascii_alphanumeric()) && !is_mark(c)
}

/// Alternation of all canonically equivalent spellings of `source`
/// (a base character followed by marks), without the enclosing group.
fn equivalent_alternation(source: &[char]) -> String {
    if source.len() < 2 {
        return source.iter().collect();
    }
    let base = source[0];
    let mut result: String = source.iter().collect();
    for (x, perm) in permutations(&source[1..]).into_iter().enumerate() {
        let mut spelling = Vec::with_capacity(perm.len() + 1);
        spelling.push(base);
        spelling.extend(perm);
        if x > 0 {
            result.push('|');
            result.extend(&spelling);
        }
        if let Some(composed) = compose_one_step(&spelling) {
            result.push('|');
            result.push_str(&equivalent_alternation(&composed));
        }
    }
    result
}

/// Orders of `marks` that are canonically equivalent: marks of the same
/// combining class never swap.
fn permutations(marks: &[char]) -> Vec<Vec<char>> {
    if marks.len() == 1 {
        return vec![marks.to_vec()];
    }
    if marks.len() == 2 {
        if ccc(marks[0]) == ccc(marks[1]) {
            return vec![marks.to_vec()];
        }
        return vec![marks.to_vec(), vec![marks[1], marks[0]]];
    }
    let mut result = Vec::new();
    'outer: for x in 0..marks.len() {
        for y in 0..x {
            if ccc(marks[y]) == ccc(marks[x]) {
                continue 'outer;
            }
        }
        let mut rest = marks.to_vec();
        rest.remove(x);
        for sub in permutations(&rest) {
            let mut p = Vec::with_capacity(marks.len());
            p.push(marks[x]);
            p.extend(sub);
            result.push(p);
        }
    }
    result
}

fn ccc(c: char) -> u8 {
    canonical_combining_class(c)
}

/// Compose the base with the first mark, if Unicode defines a primary
/// composite for the pair.
fn compose_one_step(spelling: &[char]) -> Option<Vec<char>> {
    let composed = compose(spelling[0], spelling[1])?;
    let mut out = Vec::with_capacity(spelling.len() - 1);
    out.push(composed);
    out.extend_from_slice(&spelling[2..]);
    Some(out)
}
