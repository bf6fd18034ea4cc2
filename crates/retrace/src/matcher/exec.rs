// Backtracking interpreter
//
// `match_node` walks a chain of nodes starting at one position. Nodes that
// only test and move on are handled in the loop; nodes that must undo state
// on failure, or try more than one continuation, recurse. Capture and local
// slots double as the undo log: a node that writes a slot restores it
// before reporting failure.

use crate::chars::{ascii, case, props};
use crate::limits::{STACK_RED_ZONE, STACK_SEGMENT_SIZE, UNSET};
use crate::node::{BnmTables, BoundKind, Fold, LoopShape, Node, NodeId, NodeKind, Qtype, Repeat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AcceptMode {
    /// The match may end anywhere.
    NoAnchor,
    /// The match must end at the region end.
    EndAnchor,
}

/// Per-matcher search state.
#[derive(Debug, Clone)]
pub(crate) struct State {
    /// Two slots per group: start, end. `UNSET` when not captured.
    pub groups: Vec<usize>,
    /// Group start markers and loop counters.
    pub locals: Vec<usize>,
    pub from: usize,
    pub to: usize,
    pub text_len: usize,
    /// Start of the last match, `UNSET` when there is none.
    pub first: usize,
    /// End of the last match attempt.
    pub last: usize,
    /// End of the previous match, for `\G`.
    pub old_last: usize,
    pub lookbehind_to: usize,
    pub hit_end: bool,
    pub require_end: bool,
    pub transparent_bounds: bool,
    pub anchoring_bounds: bool,
    pub accept_mode: AcceptMode,
    /// Node evaluations allowed per search; `None` is unlimited.
    pub budget: Option<u64>,
    steps_left: u64,
    pub exhausted: bool,
}

impl State {
    pub(crate) fn new(group_slots: usize, local_count: usize, text_len: usize) -> State {
        State {
            groups: vec![UNSET; group_slots * 2],
            locals: vec![UNSET; local_count],
            from: 0,
            to: text_len,
            text_len,
            first: UNSET,
            last: 0,
            old_last: UNSET,
            lookbehind_to: 0,
            hit_end: false,
            require_end: false,
            transparent_bounds: false,
            anchoring_bounds: true,
            accept_mode: AcceptMode::NoAnchor,
            budget: None,
            steps_left: 0,
            exhausted: false,
        }
    }

    pub(crate) fn clear_slots(&mut self) {
        self.groups.fill(UNSET);
        self.locals.fill(UNSET);
    }

    pub(crate) fn begin(&mut self, from: usize, mode: AcceptMode) {
        self.hit_end = false;
        self.require_end = false;
        self.first = from;
        if self.old_last == UNSET {
            self.old_last = from;
        }
        self.clear_slots();
        self.accept_mode = mode;
        self.steps_left = self.budget.unwrap_or(0);
        self.exhausted = false;
    }

    pub(crate) fn finish(&mut self, matched: bool) -> bool {
        if matched {
            self.groups[0] = self.first;
            self.groups[1] = self.last;
        } else {
            self.first = UNSET;
        }
        self.old_last = self.last;
        matched
    }
}

pub(crate) struct Exec<'a> {
    nodes: &'a [Node],
    text: &'a [char],
    st: &'a mut State,
}

impl<'a> Exec<'a> {
    pub(crate) fn new(nodes: &'a [Node], text: &'a [char], st: &'a mut State) -> Exec<'a> {
        Exec { nodes, text, st }
    }

    #[inline(always)]
    fn at(&self, i: usize) -> u32 {
        self.text[i] as u32
    }

    fn exhaust(&mut self, reason: &str) {
        if !self.st.exhausted {
            self.st.exhausted = true;
            log::warn!("search abandoned: {reason}");
        }
    }

    #[inline]
    fn tick(&mut self) -> bool {
        if self.st.exhausted {
            return false;
        }
        if self.st.budget.is_some() {
            if self.st.steps_left == 0 {
                self.exhaust("step budget spent");
                return false;
            }
            self.st.steps_left -= 1;
        }
        true
    }

    /// Every recursive step of the interpreter passes through here, so this
    /// is where the native stack is extended when it runs low.
    pub(crate) fn match_node(&mut self, id: NodeId, i: usize) -> bool {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || self.match_chain(id, i))
    }

    fn match_chain(&mut self, mut id: NodeId, mut i: usize) -> bool {
        let nodes = self.nodes;
        loop {
            if !self.tick() {
                return false;
            }
            let node = &nodes[id.index()];
            match &node.kind {
                NodeKind::Accept => {
                    self.st.last = i;
                    return true;
                }
                NodeKind::LastAccept => {
                    if self.st.accept_mode == AcceptMode::EndAnchor && i != self.st.to {
                        return false;
                    }
                    self.st.last = i;
                    return true;
                }
                NodeKind::LookBehindEnd => return i == self.st.lookbehind_to,
                NodeKind::Start { min_length } => {
                    return self.match_start(*min_length, node.next, i);
                }
                NodeKind::Bnm(tables) => return self.match_bnm(tables, node.next, i),
                NodeKind::Begin => {
                    let from = if self.st.anchoring_bounds { self.st.from } else { 0 };
                    if i == from && self.match_node(node.next, i) {
                        self.st.first = i;
                        return true;
                    }
                    return false;
                }
                NodeKind::End => {
                    let end = if self.st.anchoring_bounds { self.st.to } else { self.st.text_len };
                    if i != end {
                        return false;
                    }
                    self.st.hit_end = true;
                }
                NodeKind::Caret { unix } => {
                    if !self.caret(*unix, i) {
                        return false;
                    }
                }
                NodeKind::Dollar { multiline, unix } => {
                    if !self.dollar(*multiline, *unix, i) {
                        return false;
                    }
                }
                NodeKind::LastMatch => {
                    if i != self.st.old_last {
                        return false;
                    }
                }
                NodeKind::Bound { kind, unicode } => {
                    if !self.bound(*kind, *unicode, i) {
                        return false;
                    }
                }
                NodeKind::LineEnding => return self.line_ending(node.next, i),
                NodeKind::CharProperty(p) => {
                    if i >= self.st.to {
                        self.st.hit_end = true;
                        return false;
                    }
                    if !p.is(self.at(i)) {
                        return false;
                    }
                    i += 1;
                }
                NodeKind::Slice { buf, fold } => {
                    if !self.slice(buf, *fold, i) {
                        return false;
                    }
                    i += buf.len();
                }
                NodeKind::Ques { atom, kind } => return self.ques(*atom, *kind, node.next, i),
                NodeKind::Curly(rep) => return self.curly(*rep, node.next, i),
                NodeKind::GroupCurly { rep, local, group } => {
                    return self.group_curly(*rep, *local, *group, node.next, i);
                }
                NodeKind::GroupHead { local } => {
                    let save = self.st.locals[*local];
                    self.st.locals[*local] = i;
                    let matched = self.match_node(node.next, i);
                    self.st.locals[*local] = save;
                    return matched;
                }
                NodeKind::GroupTail { local, group } => {
                    return self.group_tail(*local, *group, node.next, i);
                }
                NodeKind::Prolog { lp } => return self.loop_init(*lp, i),
                NodeKind::Loop(shape) => return self.repeat_loop(*shape, node.next, i),
                NodeKind::Branch { alts, conn } => {
                    let after = nodes[conn.index()].next;
                    for alt in alts {
                        if self.match_node(alt.unwrap_or(after), i) {
                            return true;
                        }
                    }
                    return false;
                }
                NodeKind::BranchConn => {}
                NodeKind::BackRef { group, fold } => match self.back_ref(*group, *fold, i) {
                    Some(end) => i = end,
                    None => return false,
                },
                NodeKind::Pos { cond } => {
                    if !self.lookahead(*cond, i, false) {
                        return false;
                    }
                }
                NodeKind::Neg { cond } => {
                    if !self.lookahead(*cond, i, true) {
                        return false;
                    }
                }
                NodeKind::Behind {
                    cond,
                    rmin,
                    rmax,
                    negate,
                } => {
                    if !self.lookbehind(*cond, *rmin, *rmax, *negate, i) {
                        return false;
                    }
                }
            }
            id = node.next;
        }
    }

    // ===== Search roots =====

    fn match_start(&mut self, min_length: usize, next: NodeId, mut i: usize) -> bool {
        let to = self.st.to;
        if to < min_length || i > to - min_length {
            self.st.hit_end = true;
            return false;
        }
        let guard = to - min_length;
        while i <= guard {
            if self.match_node(next, i) {
                self.st.first = i;
                return true;
            }
            if self.st.exhausted {
                return false;
            }
            i += 1;
        }
        self.st.hit_end = true;
        false
    }

    fn match_bnm(&mut self, t: &BnmTables, next: NodeId, mut i: usize) -> bool {
        let len = t.pattern.len();
        let to = self.st.to;
        if to >= len {
            let last = to - len;
            'scan: while i <= last {
                for j in (0..len).rev() {
                    let ch = self.at(i + j);
                    if ch != t.pattern[j] {
                        let bad = (j + 1) as isize - t.last_occ[(ch & 0x7F) as usize] as isize;
                        i += bad.max(t.good_suffix[j] as isize) as usize;
                        continue 'scan;
                    }
                }
                self.st.first = i;
                if self.match_node(next, i + len) {
                    self.st.first = i;
                    return true;
                }
                if self.st.exhausted {
                    return false;
                }
                i += 1;
            }
        }
        self.st.hit_end = true;
        false
    }

    // ===== Anchors =====

    fn caret(&mut self, unix: bool, i: usize) -> bool {
        let (start, end) = if self.st.anchoring_bounds {
            (self.st.from, self.st.to)
        } else {
            (0, self.st.text_len)
        };
        if i == end {
            self.st.hit_end = true;
            return false;
        }
        if i > start {
            let ch = self.at(i - 1);
            if unix {
                return ch == '\n' as u32;
            }
            if !is_line_terminator(ch) {
                return false;
            }
            // no match between \r and \n
            if ch == '\r' as u32 && self.text.get(i) == Some(&'\n') {
                return false;
            }
        }
        true
    }

    fn dollar(&mut self, multiline: bool, unix: bool, i: usize) -> bool {
        let end = if self.st.anchoring_bounds { self.st.to } else { self.st.text_len };
        if unix {
            if i < end {
                if self.at(i) != '\n' as u32 {
                    return false;
                }
                if multiline {
                    return true;
                }
                if i + 1 != end {
                    return false;
                }
            }
        } else {
            if !multiline {
                if i + 2 < end {
                    return false;
                }
                if i + 2 == end && (self.at(i) != '\r' as u32 || self.at(i + 1) != '\n' as u32) {
                    return false;
                }
            }
            if i < end {
                let ch = self.at(i);
                if ch == '\n' as u32 {
                    if i > 0 && self.at(i - 1) == '\r' as u32 {
                        return false;
                    }
                    if multiline {
                        return true;
                    }
                } else if ch == '\r' as u32 || ch == 0x85 || (ch | 1) == 0x2029 {
                    if multiline {
                        return true;
                    }
                } else {
                    return false;
                }
            }
        }
        // at or one terminator before the end: more input could change that
        self.st.hit_end = true;
        self.st.require_end = true;
        true
    }

    fn bound(&mut self, kind: BoundKind, unicode: bool, i: usize) -> bool {
        let (start, end) = if self.st.transparent_bounds {
            (0, self.st.text_len)
        } else {
            (self.st.from, self.st.to)
        };
        let mut left = false;
        if i > start {
            let ch = self.at(i - 1);
            left = is_word(ch, unicode)
                || (props::is_nonspacing_mark(ch) && self.has_base_character(i - 1));
        }
        let mut right = false;
        if i < end {
            let ch = self.at(i);
            right = is_word(ch, unicode)
                || (props::is_nonspacing_mark(ch) && self.has_base_character(i));
        } else {
            self.st.hit_end = true;
            self.st.require_end = true;
        }
        match kind {
            BoundKind::Both => left != right,
            BoundKind::None => left == right,
        }
    }

    /// Whether the marks ending at `i` sit on a letter or digit.
    fn has_base_character(&self, i: usize) -> bool {
        let start = if self.st.transparent_bounds { 0 } else { self.st.from };
        for x in (start..=i).rev() {
            let ch = self.at(x);
            if props::is_letter_or_digit(ch) {
                return true;
            }
            if !props::is_nonspacing_mark(ch) {
                return false;
            }
        }
        false
    }

    fn line_ending(&mut self, next: NodeId, i: usize) -> bool {
        if i >= self.st.to {
            self.st.hit_end = true;
            return false;
        }
        let ch = self.at(i);
        if matches!(ch, 0x0A | 0x0B | 0x0C | 0x85 | 0x2028 | 0x2029) {
            return self.match_node(next, i + 1);
        }
        if ch != 0x0D {
            return false;
        }
        let i = i + 1;
        if i < self.st.to {
            if self.at(i) == 0x0A && self.match_node(next, i + 1) {
                return true;
            }
        } else {
            self.st.hit_end = true;
        }
        self.match_node(next, i)
    }

    // ===== Literals =====

    fn slice(&mut self, buf: &[u32], fold: Fold, i: usize) -> bool {
        for (j, &want) in buf.iter().enumerate() {
            if i + j >= self.st.to {
                self.st.hit_end = true;
                return false;
            }
            let c = self.at(i + j);
            let same = match fold {
                Fold::None => want == c,
                Fold::Ascii => want == c || want == ascii::to_lower(c),
                Fold::Unicode => want == c || want == case::fold(c),
            };
            if !same {
                return false;
            }
        }
        true
    }

    fn back_ref(&mut self, group: usize, fold: Fold, i: usize) -> Option<usize> {
        let j = self.st.groups[group * 2];
        let k = self.st.groups[group * 2 + 1];
        if j == UNSET || k == UNSET {
            return None;
        }
        let size = k - j;
        if i + size > self.st.to {
            self.st.hit_end = true;
            return None;
        }
        for x in 0..size {
            let a = self.at(i + x);
            let b = self.at(j + x);
            let same = match fold {
                Fold::None => a == b,
                Fold::Ascii => case::eq_ignore_case(a, b, false),
                Fold::Unicode => case::eq_ignore_case(a, b, true),
            };
            if !same {
                return None;
            }
        }
        Some(i + size)
    }

    // ===== Quantifiers =====

    fn ques(&mut self, atom: NodeId, kind: Qtype, next: NodeId, i: usize) -> bool {
        match kind {
            Qtype::Greedy => {
                if self.match_node(atom, i) {
                    let last = self.st.last;
                    if self.match_node(next, last) {
                        return true;
                    }
                }
                self.match_node(next, i)
            }
            Qtype::Lazy => {
                if self.match_node(next, i) {
                    return true;
                }
                if self.match_node(atom, i) {
                    let last = self.st.last;
                    return self.match_node(next, last);
                }
                false
            }
            Qtype::Possessive => {
                let j = if self.match_node(atom, i) { self.st.last } else { i };
                self.match_node(next, j)
            }
            Qtype::Independent => {
                if self.match_node(atom, i) {
                    let last = self.st.last;
                    return self.match_node(next, last);
                }
                false
            }
        }
    }

    fn curly(&mut self, rep: Repeat, next: NodeId, mut i: usize) -> bool {
        let mut j = 0;
        while j < rep.cmin {
            if !self.match_node(rep.atom, i) {
                return false;
            }
            i = self.st.last;
            j += 1;
        }
        match rep.kind {
            Qtype::Greedy => self.curly_greedy(rep, next, i, j),
            Qtype::Lazy => self.curly_lazy(rep, next, i, j),
            _ => self.curly_possessive(rep, next, i, j),
        }
    }

    /// Greedy repetition. While the atom keeps matching the same length,
    /// positions are recomputed on backoff instead of recursing.
    fn curly_greedy(&mut self, rep: Repeat, next: NodeId, mut i: usize, mut j: usize) -> bool {
        if j >= rep.cmax {
            return self.match_node(next, i);
        }
        let back_limit = j;
        if self.match_node(rep.atom, i) {
            let k = self.st.last - i;
            if k != 0 {
                i = self.st.last;
                j += 1;
                while j < rep.cmax {
                    if !self.match_node(rep.atom, i) {
                        break;
                    }
                    if i + k != self.st.last {
                        let last = self.st.last;
                        if self.curly_greedy(rep, next, last, j + 1) {
                            return true;
                        }
                        break;
                    }
                    i += k;
                    j += 1;
                }
                loop {
                    if self.match_node(next, i) {
                        return true;
                    }
                    if j == back_limit || self.st.exhausted {
                        return false;
                    }
                    i -= k;
                    j -= 1;
                }
            }
        }
        self.match_node(next, i)
    }

    fn curly_lazy(&mut self, rep: Repeat, next: NodeId, mut i: usize, mut j: usize) -> bool {
        loop {
            if self.match_node(next, i) {
                return true;
            }
            if j >= rep.cmax || !self.match_node(rep.atom, i) || i == self.st.last {
                return false;
            }
            i = self.st.last;
            j += 1;
        }
    }

    fn curly_possessive(&mut self, rep: Repeat, next: NodeId, mut i: usize, mut j: usize) -> bool {
        while j < rep.cmax {
            if !self.match_node(rep.atom, i) || i == self.st.last {
                break;
            }
            i = self.st.last;
            j += 1;
        }
        self.match_node(next, i)
    }

    // ===== Groups =====

    fn span(&self, group: Option<usize>) -> (usize, usize) {
        match group {
            Some(g) => (self.st.groups[g * 2], self.st.groups[g * 2 + 1]),
            None => (UNSET, UNSET),
        }
    }

    fn set_span(&mut self, group: Option<usize>, start: usize, end: usize) {
        if let Some(g) = group {
            self.st.groups[g * 2] = start;
            self.st.groups[g * 2 + 1] = end;
        }
    }

    fn group_tail(&mut self, local: usize, group: Option<usize>, next: NodeId, i: usize) -> bool {
        let begin = self.st.locals[local];
        if begin == UNSET {
            // body of a GroupCurly: report the end like Accept
            self.st.last = i;
            return true;
        }
        if group.is_none() {
            return self.match_node(next, i);
        }
        let (s, e) = self.span(group);
        self.set_span(group, begin, i);
        if self.match_node(next, i) {
            return true;
        }
        self.set_span(group, s, e);
        false
    }

    fn group_curly(
        &mut self,
        rep: Repeat,
        local: usize,
        group: Option<usize>,
        next: NodeId,
        mut i: usize,
    ) -> bool {
        let save_local = self.st.locals[local];
        let (s, e) = self.span(group);
        self.st.locals[local] = UNSET;

        let mut matched = true;
        for _ in 0..rep.cmin {
            if !self.match_node(rep.atom, i) {
                matched = false;
                break;
            }
            let last = self.st.last;
            self.set_span(group, i, last);
            i = last;
        }
        if matched {
            matched = match rep.kind {
                Qtype::Greedy => self.group_curly_greedy(rep, group, next, i, rep.cmin),
                Qtype::Lazy => self.group_curly_lazy(rep, group, next, i, rep.cmin),
                _ => self.group_curly_possessive(rep, group, next, i, rep.cmin),
            };
        }
        if !matched {
            self.st.locals[local] = save_local;
            self.set_span(group, s, e);
        }
        matched
    }

    fn group_curly_greedy(
        &mut self,
        rep: Repeat,
        group: Option<usize>,
        next: NodeId,
        mut i: usize,
        mut j: usize,
    ) -> bool {
        let min = j;
        let (s, e) = self.span(group);
        if j < rep.cmax && self.match_node(rep.atom, i) {
            let k = self.st.last - i;
            if k != 0 {
                loop {
                    self.set_span(group, i, i + k);
                    i += k;
                    j += 1;
                    if j >= rep.cmax || !self.match_node(rep.atom, i) {
                        break;
                    }
                    if i + k != self.st.last {
                        if self.group_curly_greedy(rep, group, next, i, j) {
                            return true;
                        }
                        break;
                    }
                }
                while j > min {
                    if self.match_node(next, i) {
                        self.set_span(group, i - k, i);
                        return true;
                    }
                    if self.st.exhausted {
                        return false;
                    }
                    i -= k;
                    j -= 1;
                    if j > min {
                        self.set_span(group, i - k, i);
                    }
                }
            }
        }
        self.set_span(group, s, e);
        self.match_node(next, i)
    }

    fn group_curly_lazy(
        &mut self,
        rep: Repeat,
        group: Option<usize>,
        next: NodeId,
        mut i: usize,
        mut j: usize,
    ) -> bool {
        loop {
            if self.match_node(next, i) {
                return true;
            }
            if j >= rep.cmax || !self.match_node(rep.atom, i) || i == self.st.last {
                return false;
            }
            let last = self.st.last;
            self.set_span(group, i, last);
            i = last;
            j += 1;
        }
    }

    fn group_curly_possessive(
        &mut self,
        rep: Repeat,
        group: Option<usize>,
        next: NodeId,
        mut i: usize,
        mut j: usize,
    ) -> bool {
        while j < rep.cmax {
            if !self.match_node(rep.atom, i) {
                break;
            }
            let last = self.st.last;
            self.set_span(group, i, last);
            if i == last {
                break;
            }
            i = last;
            j += 1;
        }
        self.match_node(next, i)
    }

    fn loop_init(&mut self, lp: NodeId, i: usize) -> bool {
        let nodes = self.nodes;
        let node = &nodes[lp.index()];
        let NodeKind::Loop(shape) = node.kind else {
            return false;
        };
        let next = node.next;
        let save = self.st.locals[shape.count_local];
        let matched = if shape.lazy {
            if 0 < shape.cmin {
                self.st.locals[shape.count_local] = 1;
                self.match_node(shape.body, i)
            } else if self.match_node(next, i) {
                true
            } else if 0 < shape.cmax {
                self.st.locals[shape.count_local] = 1;
                self.match_node(shape.body, i)
            } else {
                false
            }
        } else if 0 < shape.cmin {
            self.st.locals[shape.count_local] = 1;
            self.match_node(shape.body, i)
        } else if 0 < shape.cmax {
            self.st.locals[shape.count_local] = 1;
            self.match_node(shape.body, i) || self.match_node(next, i)
        } else {
            self.match_node(next, i)
        };
        self.st.locals[shape.count_local] = save;
        matched
    }

    fn repeat_loop(&mut self, shape: LoopShape, next: NodeId, i: usize) -> bool {
        let begin = self.st.locals[shape.begin_local];
        // an iteration that consumed nothing must not repeat
        if begin == UNSET || i > begin {
            let count = self.st.locals[shape.count_local];
            if count < shape.cmin {
                self.st.locals[shape.count_local] = count + 1;
                if self.match_node(shape.body, i) {
                    return true;
                }
                self.st.locals[shape.count_local] = count;
                return false;
            }
            if shape.lazy {
                if self.match_node(next, i) {
                    return true;
                }
                if count < shape.cmax {
                    self.st.locals[shape.count_local] = count + 1;
                    if self.match_node(shape.body, i) {
                        return true;
                    }
                    self.st.locals[shape.count_local] = count;
                }
                return false;
            }
            if count < shape.cmax {
                self.st.locals[shape.count_local] = count + 1;
                if self.match_node(shape.body, i) {
                    return true;
                }
                self.st.locals[shape.count_local] = count;
            }
        }
        self.match_node(next, i)
    }

    // ===== Lookaround =====

    fn lookahead(&mut self, cond: NodeId, i: usize, negate: bool) -> bool {
        let saved_to = self.st.to;
        if self.st.transparent_bounds {
            self.st.to = self.st.text_len;
        }
        if negate && i >= self.st.to {
            self.st.require_end = true;
        }
        let matched = self.match_node(cond, i);
        self.st.to = saved_to;
        matched != negate
    }

    fn lookbehind(&mut self, cond: NodeId, rmin: usize, rmax: usize, negate: bool, i: usize) -> bool {
        let saved_from = self.st.from;
        let saved_lookbehind_to = self.st.lookbehind_to;
        let start = if self.st.transparent_bounds { 0 } else { self.st.from };
        let lower = i.saturating_sub(rmax).max(start);
        self.st.lookbehind_to = i;
        if self.st.transparent_bounds {
            self.st.from = 0;
        }
        let mut matched = false;
        if i >= rmin {
            let mut j = i - rmin;
            while j >= lower {
                if self.match_node(cond, j) {
                    matched = true;
                    break;
                }
                if j == 0 {
                    break;
                }
                j -= 1;
            }
        }
        self.st.from = saved_from;
        self.st.lookbehind_to = saved_lookbehind_to;
        matched != negate
    }
}

fn is_line_terminator(ch: u32) -> bool {
    ch == '\n' as u32 || ch == '\r' as u32 || (ch | 1) == 0x2029 || ch == 0x85
}

fn is_word(ch: u32, unicode: bool) -> bool {
    if unicode {
        props::is_word(ch)
    } else {
        ch == '_' as u32 || props::is_letter_or_digit(ch)
    }
}
