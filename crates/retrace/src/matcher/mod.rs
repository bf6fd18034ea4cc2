// Matcher: one program applied to one input
//
// All offsets in the public API are byte offsets into the input. The
// interpreter works on code point indices; `ByteOffsets` converts between
// the two and is the identity for ASCII input.

mod exec;
mod replace;
mod result;

pub use result::{MatchResult, Results};

use smol_str::SmolStr;

use crate::error::{MatchError, ReResult};
use crate::limits::{MIN_GROUP_SLOTS, UNSET};
use crate::program::Program;
use exec::{AcceptMode, Exec, State};

/// A group named by index or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRef<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for GroupRef<'_> {
    fn from(index: usize) -> Self {
        GroupRef::Index(index)
    }
}

impl<'a> From<&'a str> for GroupRef<'a> {
    fn from(name: &'a str) -> Self {
        GroupRef::Name(name)
    }
}

enum ByteOffsets {
    Ascii,
    /// Byte offset of every code point, plus the input length.
    Map(Vec<usize>),
}

impl ByteOffsets {
    fn new(text: &str) -> ByteOffsets {
        if text.is_ascii() {
            ByteOffsets::Ascii
        } else {
            let mut map: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
            map.push(text.len());
            ByteOffsets::Map(map)
        }
    }

    #[inline]
    fn byte(&self, index: usize) -> usize {
        match self {
            ByteOffsets::Ascii => index,
            ByteOffsets::Map(map) => map[index],
        }
    }

    /// Code point index of a byte offset on a character boundary.
    fn index(&self, byte: usize, len: usize) -> Option<usize> {
        if byte > len {
            return None;
        }
        match self {
            ByteOffsets::Ascii => Some(byte),
            ByteOffsets::Map(map) => map.binary_search(&byte).ok(),
        }
    }
}

/// Search state for one program over one input.
///
/// ```
/// let p = retrace::compile(r"\d+").unwrap();
/// let mut m = p.matcher("a1b22c333");
/// let mut found = Vec::new();
/// while m.find() {
///     found.push(m.group().unwrap());
/// }
/// assert_eq!(found, ["1", "22", "333"]);
/// ```
pub struct Matcher<'t> {
    program: Program,
    text: &'t str,
    chars: Vec<char>,
    offsets: ByteOffsets,
    st: State,
    /// Code point index up to which `append_replacement` has copied input.
    append_pos: usize,
}

fn group_slots(program: &Program) -> usize {
    program.capture_count().max(MIN_GROUP_SLOTS)
}

impl<'t> Matcher<'t> {
    pub(crate) fn new(program: Program, text: &'t str) -> Matcher<'t> {
        let chars: Vec<char> = text.chars().collect();
        let st = State::new(group_slots(&program), program.local_count(), chars.len());
        Matcher {
            offsets: ByteOffsets::new(text),
            program,
            text,
            chars,
            st,
            append_pos: 0,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn text(&self) -> &'t str {
        self.text
    }

    // ===== Searching =====

    /// Whether the whole region matches.
    pub fn matches(&mut self) -> bool {
        self.match_at(self.st.from, AcceptMode::EndAnchor)
    }

    /// Whether a prefix of the region matches.
    pub fn looking_at(&mut self) -> bool {
        self.match_at(self.st.from, AcceptMode::NoAnchor)
    }

    /// Find the next match in the region. Starts after the previous match;
    /// after an empty match, one character further.
    pub fn find(&mut self) -> bool {
        let mut next = self.st.last;
        if next == self.st.first {
            next += 1;
        }
        if next < self.st.from {
            next = self.st.from;
        }
        if next > self.st.to {
            self.st.groups.fill(UNSET);
            self.st.first = UNSET;
            return false;
        }
        self.search(next)
    }

    /// Reset, then find the first match at or after byte offset `start`.
    pub fn find_from(&mut self, start: usize) -> ReResult<bool> {
        let len = self.text.len();
        let Some(index) = self.offsets.index(start, len) else {
            return Err(MatchError::StartOutOfBounds { index: start, len });
        };
        self.reset();
        Ok(self.search(index))
    }

    /// Iterate over the remaining matches.
    pub fn results(&mut self) -> Results<'_, 't> {
        Results::new(self)
    }

    fn search(&mut self, from: usize) -> bool {
        self.st.begin(from, AcceptMode::NoAnchor);
        let root = self.program.root();
        let matched = Exec::new(self.program.nodes(), &self.chars, &mut self.st).match_node(root, from);
        self.st.finish(matched)
    }

    fn match_at(&mut self, from: usize, mode: AcceptMode) -> bool {
        self.st.begin(from, mode);
        let root = self.program.match_root();
        let matched = Exec::new(self.program.nodes(), &self.chars, &mut self.st).match_node(root, from);
        self.st.finish(matched)
    }

    // ===== Results =====

    fn check_match(&self) -> ReResult<()> {
        if self.st.first == UNSET {
            return Err(MatchError::NoMatchAvailable);
        }
        Ok(())
    }

    fn resolve(&self, group: GroupRef<'_>) -> ReResult<usize> {
        match group {
            GroupRef::Index(n) if n <= self.program.group_count() => Ok(n),
            GroupRef::Index(n) => Err(MatchError::NoSuchGroup(n)),
            GroupRef::Name(name) => self
                .program
                .group_index(name)
                .ok_or_else(|| MatchError::NoSuchGroupName(SmolStr::new(name))),
        }
    }

    /// Byte span of a group, `None` when it did not participate.
    fn span(&self, group: usize) -> Option<(usize, usize)> {
        let s = self.st.groups[group * 2];
        let e = self.st.groups[group * 2 + 1];
        if s == UNSET || e == UNSET {
            None
        } else {
            Some((self.offsets.byte(s), self.offsets.byte(e)))
        }
    }

    /// Byte span of the current match.
    pub(crate) fn match_span(&self) -> Option<(usize, usize)> {
        if self.st.first == UNSET {
            return None;
        }
        Some((self.offsets.byte(self.st.first), self.offsets.byte(self.st.last)))
    }

    pub fn start(&self) -> ReResult<usize> {
        self.check_match()?;
        Ok(self.offsets.byte(self.st.first))
    }

    pub fn end(&self) -> ReResult<usize> {
        self.check_match()?;
        Ok(self.offsets.byte(self.st.last))
    }

    /// The matched text. Group 0 is cleared by `use_program`, after which
    /// there is no text to report until the next search.
    pub fn group(&self) -> ReResult<&'t str> {
        self.check_match()?;
        let (s, e) = self.span(0).ok_or(MatchError::NoMatchAvailable)?;
        Ok(&self.text[s..e])
    }

    pub fn start_of<'g>(&self, group: impl Into<GroupRef<'g>>) -> ReResult<Option<usize>> {
        self.check_match()?;
        let g = self.resolve(group.into())?;
        Ok(self.span(g).map(|(s, _)| s))
    }

    pub fn end_of<'g>(&self, group: impl Into<GroupRef<'g>>) -> ReResult<Option<usize>> {
        self.check_match()?;
        let g = self.resolve(group.into())?;
        Ok(self.span(g).map(|(_, e)| e))
    }

    /// Text captured by a group, `None` when it did not participate.
    pub fn group_of<'g>(&self, group: impl Into<GroupRef<'g>>) -> ReResult<Option<&'t str>> {
        self.check_match()?;
        let g = self.resolve(group.into())?;
        Ok(self.span(g).map(|(s, e)| &self.text[s..e]))
    }

    /// Number of capturing groups in the program, not counting group 0.
    pub fn group_count(&self) -> usize {
        self.program.group_count()
    }

    /// Snapshot of the current match that outlives further searching.
    pub fn to_match_result(&self) -> ReResult<MatchResult<'t>> {
        let (s, e) = self.match_span().ok_or(MatchError::NoMatchAvailable)?;
        let mut spans = Vec::with_capacity(self.group_count() + 1);
        spans.push(Some((s, e)));
        spans.extend((1..=self.group_count()).map(|g| self.span(g)));
        Ok(MatchResult::new(self.program.clone(), self.text, spans))
    }

    /// Whether the last search ran into the end of the input; more input
    /// could have changed the result.
    pub fn hit_end(&self) -> bool {
        self.st.hit_end
    }

    /// Whether more input could turn the last match into a non-match.
    pub fn require_end(&self) -> bool {
        self.st.require_end
    }

    // ===== Configuration =====

    /// Restrict searching to the byte range `start..end`. Resets the matcher.
    pub fn region(&mut self, start: usize, end: usize) -> ReResult<&mut Self> {
        let len = self.text.len();
        let bounds = if start <= end {
            self.offsets.index(start, len).zip(self.offsets.index(end, len))
        } else {
            None
        };
        let Some((from, to)) = bounds else {
            return Err(MatchError::RegionOutOfBounds { start, end, len });
        };
        self.reset();
        self.st.from = from;
        self.st.to = to;
        Ok(self)
    }

    pub fn region_start(&self) -> usize {
        self.offsets.byte(self.st.from)
    }

    pub fn region_end(&self) -> usize {
        self.offsets.byte(self.st.to)
    }

    /// With transparent bounds, lookaround and `\b` see past the region.
    pub fn use_transparent_bounds(&mut self, on: bool) -> &mut Self {
        self.st.transparent_bounds = on;
        self
    }

    pub fn has_transparent_bounds(&self) -> bool {
        self.st.transparent_bounds
    }

    /// With anchoring bounds (the default), `^` and `$` match at the
    /// region edges.
    pub fn use_anchoring_bounds(&mut self, on: bool) -> &mut Self {
        self.st.anchoring_bounds = on;
        self
    }

    pub fn has_anchoring_bounds(&self) -> bool {
        self.st.anchoring_bounds
    }

    /// Forget the current match and region. Bound settings are kept.
    pub fn reset(&mut self) -> &mut Self {
        self.st.first = UNSET;
        self.st.last = 0;
        self.st.old_last = UNSET;
        self.st.clear_slots();
        self.st.from = 0;
        self.st.to = self.chars.len();
        self.append_pos = 0;
        self
    }

    /// Reset and search `text` from now on.
    pub fn reset_input(&mut self, text: &'t str) -> &mut Self {
        self.text = text;
        self.chars = text.chars().collect();
        self.offsets = ByteOffsets::new(text);
        self.st.text_len = self.chars.len();
        self.reset()
    }

    /// Switch to another program. Position and region are kept; group
    /// information is lost.
    pub fn use_program(&mut self, program: Program) -> &mut Self {
        self.st.groups = vec![UNSET; group_slots(&program) * 2];
        self.st.locals = vec![UNSET; program.local_count()];
        self.program = program;
        self
    }

    /// Cap the node evaluations of each search. A search that runs out
    /// reports no match and sets `budget_exhausted`.
    pub fn set_step_budget(&mut self, budget: Option<u64>) -> &mut Self {
        self.st.budget = budget;
        self
    }

    /// Whether the last search was abandoned because the step budget ran out.
    pub fn budget_exhausted(&self) -> bool {
        self.st.exhausted
    }
}

impl std::fmt::Debug for Matcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("pattern", &self.program.as_str())
            .field("region", &(self.region_start()..self.region_end()))
            .field("last_match", &self.match_span())
            .finish()
    }
}
