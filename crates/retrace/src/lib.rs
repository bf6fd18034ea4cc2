// retrace
// A backtracking regular expression engine with capture groups, lookaround,
// regions, streaming replacement and canonical equivalence

#[cfg(test)]
mod test;

mod chars;
mod compiler;
mod error;
mod flags;
mod limits;
mod matcher;
mod node;
mod program;

pub use error::{ErrorKind, MatchError, ReResult, SyntaxError};
pub use flags::Flags;
pub use matcher::{GroupRef, MatchResult, Matcher, Results};
pub use program::{PatternSource, Program};

/// Compile `pattern` with no flags.
pub fn compile(pattern: &str) -> Result<Program, SyntaxError> {
    Program::new(pattern, Flags::empty())
}

pub fn compile_with(pattern: &str, flags: Flags) -> Result<Program, SyntaxError> {
    Program::new(pattern, flags)
}

/// Compile `pattern` and test whether it matches all of `input`.
pub fn matches(pattern: &str, input: &str) -> Result<bool, SyntaxError> {
    Ok(compile(pattern)?.is_match(input))
}

/// A pattern that matches `s` literally.
///
/// ```
/// let p = retrace::compile(&retrace::quote("1+1=2")).unwrap();
/// assert!(p.is_match("1+1=2"));
/// ```
pub fn quote(s: &str) -> String {
    if !s.contains("\\E") {
        return format!("\\Q{s}\\E");
    }
    let mut out = String::with_capacity(s.len() * 2);
    out.push_str("\\Q");
    let mut rest = s;
    while let Some(at) = rest.find("\\E") {
        out.push_str(&rest[..at]);
        out.push_str("\\E\\\\E\\Q");
        rest = &rest[at + 2..];
    }
    out.push_str(rest);
    out.push_str("\\E");
    out
}

/// A replacement template that inserts `s` literally.
pub fn quote_replacement(s: &str) -> String {
    if !s.contains(['\\', '$']) {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c == '\\' || c == '$' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
