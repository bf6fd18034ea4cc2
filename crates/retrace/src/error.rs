// Error types for compilation and matching

use smol_str::SmolStr;
use thiserror::Error;

/// Result of a matcher query or replacement.
pub type ReResult<T> = Result<T, MatchError>;

/// A pattern failed to compile.
///
/// Carries the description, the full pattern text and the code-point offset
/// of the failure. The `Display` form points at the offset with a caret:
///
/// ```text
/// Unclosed group near index 4
/// (abc
///     ^
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description}{}", caret_suffix(.pattern, .index))]
pub struct SyntaxError {
    description: String,
    pattern: String,
    index: Option<usize>,
}

impl SyntaxError {
    pub(crate) fn new(description: impl Into<String>, pattern: &str, index: Option<usize>) -> Self {
        SyntaxError {
            description: description.into(),
            pattern: pattern.to_string(),
            index,
        }
    }

    /// Message without the position and pattern lines.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The pattern that failed to compile.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Code-point offset of the failure, when known.
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

fn caret_suffix(pattern: &str, index: &Option<usize>) -> String {
    let index = *index;
    let mut out = String::new();
    if let Some(index) = index {
        out.push_str(" near index ");
        out.push_str(&index.to_string());
    }
    out.push('\n');
    out.push_str(pattern);
    if let Some(index) = index {
        if index < pattern.chars().count() {
            out.push('\n');
            out.extend(std::iter::repeat_n(' ', index));
            out.push('^');
        }
    }
    out
}

/// Coarse classification of a [`MatchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Result queried while no successful match is available.
    IllegalState,
    /// Group index, region bound or start offset outside its range.
    IndexOutOfRange,
    /// Unknown group name or malformed replacement template.
    Argument,
}

/// Misuse of a [`Matcher`](crate::Matcher) or [`MatchResult`](crate::MatchResult).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("No match available")]
    NoMatchAvailable,
    #[error("No group {0}")]
    NoSuchGroup(usize),
    #[error("No group with name <{0}>")]
    NoSuchGroupName(SmolStr),
    #[error("Illegal start index {index} for input of length {len}")]
    StartOutOfBounds { index: usize, len: usize },
    #[error("Illegal region [{start}, {end}) for input of length {len}")]
    RegionOutOfBounds { start: usize, end: usize, len: usize },
    #[error("{0}")]
    InvalidReplacement(String),
}

impl MatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatchError::NoMatchAvailable => ErrorKind::IllegalState,
            MatchError::NoSuchGroup(_)
            | MatchError::StartOutOfBounds { .. }
            | MatchError::RegionOutOfBounds { .. } => ErrorKind::IndexOutOfRange,
            MatchError::NoSuchGroupName(_) | MatchError::InvalidReplacement(_) => {
                ErrorKind::Argument
            }
        }
    }
}
