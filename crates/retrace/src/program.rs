// Compiled programs
//
// A `Program` is immutable once built and cheap to clone; any number of
// matchers on any number of threads may share it. `PatternSource` is the
// persisted form: only the source text and flags are stored, and the
// program is rebuilt on first use.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ahash::AHashMap;
use once_cell::sync::OnceCell;
use smol_str::SmolStr;

use crate::compiler;
use crate::error::SyntaxError;
use crate::flags::Flags;
use crate::matcher::Matcher;
use crate::node::{Node, NodeId};

/// A compiled regular expression.
///
/// ```
/// let p = retrace::compile(r"(\w+)@(\w+)\.com").unwrap();
/// let mut m = p.matcher("mail bob@example.com now");
/// assert!(m.find());
/// assert_eq!(m.group_of(2).unwrap(), Some("example"));
/// ```
#[derive(Clone)]
pub struct Program(Arc<ProgramInner>);

struct ProgramInner {
    source: String,
    flags: Flags,
    nodes: Vec<Node>,
    root: NodeId,
    match_root: NodeId,
    /// Capturing groups including group 0.
    group_count: usize,
    named_groups: AHashMap<SmolStr, usize>,
    local_count: usize,
}

impl Program {
    /// Compile `source` under `flags`.
    pub fn new(source: &str, flags: Flags) -> Result<Program, SyntaxError> {
        let compiled = compiler::compile(source, flags)?;
        Ok(Program(Arc::new(ProgramInner {
            source: source.to_string(),
            flags: flags.normalized(),
            nodes: compiled.nodes,
            root: compiled.root,
            match_root: compiled.match_root,
            group_count: compiled.group_count,
            named_groups: compiled.named_groups,
            local_count: compiled.local_count,
        })))
    }

    /// The pattern text as given.
    pub fn as_str(&self) -> &str {
        &self.0.source
    }

    /// Construction flags, with implied flags added.
    pub fn flags(&self) -> Flags {
        self.0.flags
    }

    /// Number of capturing groups, not counting group 0.
    pub fn group_count(&self) -> usize {
        self.0.group_count - 1
    }

    /// Index of the named group `name`.
    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.0.named_groups.get(name).copied()
    }

    /// Named groups ordered by index.
    pub fn named_groups(&self) -> Vec<(&str, usize)> {
        let mut v: Vec<(&str, usize)> =
            self.0.named_groups.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        v.sort_by_key(|&(_, i)| i);
        v
    }

    /// A matcher over `text`.
    pub fn matcher<'t>(&self, text: &'t str) -> Matcher<'t> {
        Matcher::new(self.clone(), text)
    }

    /// Whether the whole of `text` matches.
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher(text).matches()
    }

    /// Split `input` around matches.
    ///
    /// A zero-width match at the very beginning never yields a leading empty
    /// piece. With `limit > 0` at most `limit` pieces are returned, the last
    /// holding the unsplit rest; with `limit == 0` trailing empty pieces are
    /// dropped; with `limit < 0` everything is kept. Input without any match
    /// comes back whole.
    pub fn split<'t>(&self, input: &'t str, limit: isize) -> Vec<&'t str> {
        let limited = limit > 0;
        let mut index = 0;
        let mut list: Vec<&'t str> = Vec::new();
        let mut m = self.matcher(input);
        while m.find() {
            let Some((start, end)) = m.match_span() else {
                break;
            };
            if !limited || (list.len() as isize) < limit - 1 {
                if index == 0 && start == 0 && start == end {
                    continue;
                }
                list.push(&input[index..start]);
                index = end;
            } else if list.len() as isize == limit - 1 {
                list.push(&input[index..]);
                index = end;
            }
        }

        if index == 0 {
            return vec![input];
        }
        if !limited || (list.len() as isize) < limit {
            list.push(&input[index..]);
        }
        if limit == 0 {
            while list.last().is_some_and(|s| s.is_empty()) {
                list.pop();
            }
        }
        list
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.0.nodes
    }

    pub(crate) fn root(&self) -> NodeId {
        self.0.root
    }

    pub(crate) fn match_root(&self) -> NodeId {
        self.0.match_root
    }

    /// Slots needed including group 0.
    pub(crate) fn capture_count(&self) -> usize {
        self.0.group_count
    }

    pub(crate) fn local_count(&self) -> usize {
        self.0.local_count
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.source)
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("source", &self.0.source)
            .field("flags", &self.0.flags)
            .finish()
    }
}

impl FromStr for Program {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Program, SyntaxError> {
        Program::new(s, Flags::empty())
    }
}

/// Persistable description of a program: source text and flags.
///
/// The compiled program is built lazily, at most once, even when several
/// threads ask for it at the same time.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternSource {
    source: String,
    flags: Flags,
    #[cfg_attr(feature = "serde", serde(skip))]
    program: OnceCell<Program>,
}

impl PatternSource {
    pub fn new(source: impl Into<String>, flags: Flags) -> PatternSource {
        PatternSource {
            source: source.into(),
            flags,
            program: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// The compiled program, compiling it on first call.
    pub fn program(&self) -> Result<&Program, SyntaxError> {
        self.program
            .get_or_try_init(|| Program::new(&self.source, self.flags))
    }
}

impl PartialEq for PatternSource {
    fn eq(&self, other: &PatternSource) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl Eq for PatternSource {}

impl From<&Program> for PatternSource {
    fn from(program: &Program) -> PatternSource {
        PatternSource {
            source: program.as_str().to_string(),
            flags: program.flags(),
            program: OnceCell::with_value(program.clone()),
        }
    }
}
