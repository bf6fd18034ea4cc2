use std::ops::Range;

use smol_str::SmolStr;

use super::{GroupRef, Matcher};
use crate::error::{MatchError, ReResult};
use crate::program::Program;

/// Immutable snapshot of one match. Spans are byte offsets.
#[derive(Debug, Clone)]
pub struct MatchResult<'t> {
    program: Program,
    text: &'t str,
    /// Index 0 is the whole match.
    spans: Vec<Option<(usize, usize)>>,
}

impl<'t> MatchResult<'t> {
    pub(crate) fn new(
        program: Program,
        text: &'t str,
        spans: Vec<Option<(usize, usize)>>,
    ) -> MatchResult<'t> {
        MatchResult {
            program,
            text,
            spans,
        }
    }

    fn resolve(&self, group: GroupRef<'_>) -> ReResult<usize> {
        match group {
            GroupRef::Index(n) if n < self.spans.len() => Ok(n),
            GroupRef::Index(n) => Err(MatchError::NoSuchGroup(n)),
            GroupRef::Name(name) => self
                .program
                .group_index(name)
                .ok_or_else(|| MatchError::NoSuchGroupName(SmolStr::new(name))),
        }
    }

    fn whole(&self) -> (usize, usize) {
        self.spans.first().copied().flatten().unwrap_or((0, 0))
    }

    pub fn start(&self) -> usize {
        self.whole().0
    }

    pub fn end(&self) -> usize {
        self.whole().1
    }

    pub fn range(&self) -> Range<usize> {
        let (s, e) = self.whole();
        s..e
    }

    /// The matched text.
    pub fn as_str(&self) -> &'t str {
        let (s, e) = self.whole();
        &self.text[s..e]
    }

    pub fn start_of<'g>(&self, group: impl Into<GroupRef<'g>>) -> ReResult<Option<usize>> {
        let g = self.resolve(group.into())?;
        Ok(self.spans[g].map(|(s, _)| s))
    }

    pub fn end_of<'g>(&self, group: impl Into<GroupRef<'g>>) -> ReResult<Option<usize>> {
        let g = self.resolve(group.into())?;
        Ok(self.spans[g].map(|(_, e)| e))
    }

    pub fn group_of<'g>(&self, group: impl Into<GroupRef<'g>>) -> ReResult<Option<&'t str>> {
        let g = self.resolve(group.into())?;
        Ok(self.spans[g].map(|(s, e)| &self.text[s..e]))
    }

    /// Number of capturing groups, not counting group 0.
    pub fn group_count(&self) -> usize {
        self.spans.len() - 1
    }
}

/// Iterator over successive matches, see [`Matcher::results`].
pub struct Results<'m, 't> {
    matcher: &'m mut Matcher<'t>,
}

impl<'m, 't> Results<'m, 't> {
    pub(super) fn new(matcher: &'m mut Matcher<'t>) -> Results<'m, 't> {
        Results { matcher }
    }
}

impl<'t> Iterator for Results<'_, 't> {
    type Item = MatchResult<'t>;

    fn next(&mut self) -> Option<MatchResult<'t>> {
        if self.matcher.find() {
            self.matcher.to_match_result().ok()
        } else {
            None
        }
    }
}
