// Node graph of a compiled program
//
// Nodes live in one flat arena owned by the program and refer to each other
// by `NodeId`. Loops are plain back references into the arena, so the graph
// can be cyclic while staying immutable and shareable. All per-search state
// (captures, loop counters, group start markers) lives in the matcher's slot
// arrays, indexed by numbers assigned at compile time.

use crate::chars::CharPredicate;
use crate::limits::MAX_REPS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    /// Terminates sub-graphs (quantified atoms, group bodies, lookaround
    /// conditions) and reports the end position through `last`.
    pub const ACCEPT: NodeId = NodeId(0);
    /// Terminates the main graph; enforces the end anchor for `matches()`.
    pub const LAST_ACCEPT: NodeId = NodeId(1);
    /// Terminates a lookbehind body; succeeds only at the lookbehind anchor.
    pub const LOOKBEHIND_END: NodeId = NodeId(2);

    pub(crate) fn new(index: usize) -> NodeId {
        NodeId(index as u32)
    }

    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Quantifier strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Qtype {
    Greedy,
    Lazy,
    Possessive,
    /// Atomic group `(?>X)`: match once, never backtrack into it.
    Independent,
}

/// Case folding applied by literal and back reference comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fold {
    None,
    Ascii,
    Unicode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BoundKind {
    /// `\b`
    Both,
    /// `\B`
    None,
}

/// Repetition bounds shared by `Curly` and `GroupCurly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Repeat {
    pub atom: NodeId,
    pub kind: Qtype,
    pub cmin: usize,
    pub cmax: usize,
}

/// Back edge of a repeated group whose body length varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LoopShape {
    /// First node of the body (its `GroupHead`).
    pub body: NodeId,
    /// Local slot holding the iteration count.
    pub count_local: usize,
    /// Local slot the body's `GroupHead` writes its start position to.
    pub begin_local: usize,
    pub cmin: usize,
    pub cmax: usize,
    pub lazy: bool,
}

/// Precomputed Boyer-Moore tables for a leading literal.
#[derive(Debug, Clone)]
pub(crate) struct BnmTables {
    pub pattern: Vec<u32>,
    pub last_occ: Vec<usize>,
    pub good_suffix: Vec<usize>,
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Accept,
    LastAccept,
    LookBehindEnd,
    /// Unanchored search: try every start position that leaves room for
    /// `min_length` characters.
    Start { min_length: usize },
    /// Unanchored search skipping ahead with Boyer-Moore.
    Bnm(Box<BnmTables>),
    /// `\A` and non-multiline `^`.
    Begin,
    /// `\z`
    End,
    /// Multiline `^`.
    Caret { unix: bool },
    /// `$` and `\Z`.
    Dollar { multiline: bool, unix: bool },
    /// `\G`
    LastMatch,
    /// `\b` and `\B`.
    Bound { kind: BoundKind, unicode: bool },
    /// `\R`
    LineEnding,
    CharProperty(CharPredicate),
    /// Literal run, stored folded when `fold` is not `None`.
    Slice { buf: Vec<u32>, fold: Fold },
    /// `X?` and atomic groups.
    Ques { atom: NodeId, kind: Qtype },
    /// Repetition of a non-group atom, or of a group under a possessive
    /// quantifier.
    Curly(Repeat),
    /// Repetition of a group whose body has a fixed length; captures are
    /// updated in place. `atom` is the node after the group's head.
    GroupCurly {
        rep: Repeat,
        local: usize,
        group: Option<usize>,
    },
    GroupHead { local: usize },
    GroupTail { local: usize, group: Option<usize> },
    /// Entry of a repeated variable-length group.
    Prolog { lp: NodeId },
    /// Back edge of a repeated variable-length group.
    Loop(LoopShape),
    /// Ordered alternation; `None` means "continue after the join".
    Branch { alts: Vec<Option<NodeId>>, conn: NodeId },
    /// Join point of a `Branch`.
    BranchConn,
    BackRef { group: usize, fold: Fold },
    /// `(?=X)`
    Pos { cond: NodeId },
    /// `(?!X)`
    Neg { cond: NodeId },
    /// `(?<=X)` and `(?<!X)`.
    Behind {
        cond: NodeId,
        rmin: usize,
        rmax: usize,
        negate: bool,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub kind: NodeKind,
    pub next: NodeId,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Node {
        Node {
            kind,
            next: NodeId::ACCEPT,
        }
    }
}

/// Static facts about a sub-graph gathered by `study`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TreeInfo {
    pub min_length: usize,
    pub max_length: usize,
    pub max_valid: bool,
    /// Every path consumes the same number of characters.
    pub deterministic: bool,
}

impl TreeInfo {
    pub(crate) fn new() -> TreeInfo {
        TreeInfo {
            min_length: 0,
            max_length: 0,
            max_valid: true,
            deterministic: true,
        }
    }

    fn reset(&mut self) {
        *self = TreeInfo::new();
    }

    fn add_fixed(&mut self, n: usize) {
        self.min_length = self.min_length.saturating_add(n);
        self.max_length = self.max_length.saturating_add(n);
    }
}

/// Accumulate length information for the chain starting at `id`. Returns
/// whether the chain is deterministic.
pub(crate) fn study(nodes: &[Node], mut id: NodeId, info: &mut TreeInfo) -> bool {
    loop {
        let node = &nodes[id.index()];
        match &node.kind {
            NodeKind::Accept
            | NodeKind::LastAccept
            | NodeKind::LookBehindEnd
            | NodeKind::BranchConn => return info.deterministic,
            NodeKind::CharProperty(_) => info.add_fixed(1),
            NodeKind::Slice { buf, .. } => info.add_fixed(buf.len()),
            NodeKind::Bnm(tables) => {
                info.min_length = info.min_length.saturating_add(tables.pattern.len());
                info.max_valid = false;
            }
            NodeKind::LineEnding => {
                info.min_length = info.min_length.saturating_add(1);
                info.max_length = info.max_length.saturating_add(2);
            }
            NodeKind::BackRef { .. } => info.max_valid = false,
            NodeKind::Ques { atom, kind } => {
                if *kind == Qtype::Independent {
                    study(nodes, *atom, info);
                } else {
                    let min = info.min_length;
                    study(nodes, *atom, info);
                    info.min_length = min;
                    info.deterministic = false;
                }
            }
            NodeKind::Curly(rep) | NodeKind::GroupCurly { rep, .. } => {
                study_repeat(nodes, rep, info)
            }
            NodeKind::Prolog { .. } | NodeKind::Loop(_) => {
                info.max_valid = false;
                info.deterministic = false;
                return false;
            }
            NodeKind::Branch { alts, conn } => {
                let mut min = info.min_length;
                let mut max = info.max_length;
                let mut max_valid = info.max_valid;
                let mut alt_min = usize::MAX;
                let mut alt_max = 0;
                for alt in alts {
                    info.reset();
                    if let Some(alt) = alt {
                        study(nodes, *alt, info);
                    }
                    alt_min = alt_min.min(info.min_length);
                    alt_max = alt_max.max(info.max_length);
                    max_valid &= info.max_valid;
                }
                min = min.saturating_add(alt_min);
                max = max.saturating_add(alt_max);
                info.reset();
                study(nodes, nodes[conn.index()].next, info);
                info.min_length = info.min_length.saturating_add(min);
                info.max_length = info.max_length.saturating_add(max);
                info.max_valid &= max_valid;
                info.deterministic = false;
                return false;
            }
            // zero-width nodes
            NodeKind::Start { .. }
            | NodeKind::Begin
            | NodeKind::End
            | NodeKind::Caret { .. }
            | NodeKind::Dollar { .. }
            | NodeKind::LastMatch
            | NodeKind::Bound { .. }
            | NodeKind::GroupHead { .. }
            | NodeKind::GroupTail { .. }
            | NodeKind::Pos { .. }
            | NodeKind::Neg { .. }
            | NodeKind::Behind { .. } => {}
        }
        id = node.next;
    }
}

fn study_repeat(nodes: &[Node], rep: &Repeat, info: &mut TreeInfo) {
    let Repeat {
        atom, cmin, cmax, ..
    } = *rep;
    let min = info.min_length;
    let max = info.max_length;
    let max_valid = info.max_valid;
    let deterministic = info.deterministic;
    info.reset();
    study(nodes, atom, info);

    info.min_length = info.min_length.saturating_mul(cmin).saturating_add(min);

    if max_valid && info.max_valid {
        let repeated = if cmax == MAX_REPS {
            if info.max_length == 0 { Some(0) } else { None }
        } else {
            info.max_length.checked_mul(cmax)
        };
        match repeated.and_then(|r| r.checked_add(max)) {
            Some(total) => info.max_length = total,
            None => {
                info.max_length = usize::MAX;
                info.max_valid = false;
            }
        }
    } else {
        info.max_valid = false;
    }

    info.deterministic = info.deterministic && cmin == cmax && deterministic;
}
