// Search root selection
//
// Unanchored searches enter through a `Start` node that tries each start
// position in turn. A pattern that begins with a case-sensitive literal of
// at least `BNM_MIN_LENGTH` characters gets a Boyer-Moore scanner instead,
// and a pattern anchored with `\A` (or non-multiline `^`) needs no scan.

use super::Compiler;
use crate::limits::{BNM_MIN_LENGTH, BNM_TABLE_SIZE};
use crate::node::{BnmTables, Fold, NodeId, NodeKind, TreeInfo, study};

impl Compiler {
    pub(super) fn optimize(&mut self, match_root: NodeId) -> NodeId {
        let node = &self.nodes[match_root.index()];
        match &node.kind {
            NodeKind::Slice {
                buf,
                fold: Fold::None,
            } if buf.len() >= BNM_MIN_LENGTH => {
                let tables = bnm_tables(buf.clone());
                let next = node.next;
                log::trace!("boyer-moore root for a {}-character literal", tables.pattern.len());
                self.push_linked(NodeKind::Bnm(Box::new(tables)), next)
            }
            NodeKind::Begin => match_root,
            _ => {
                let mut info = TreeInfo::new();
                study(&self.nodes, match_root, &mut info);
                self.push_linked(
                    NodeKind::Start {
                        min_length: info.min_length,
                    },
                    match_root,
                )
            }
        }
    }
}

/// Bad-character and good-suffix shift tables for `pattern`.
pub(crate) fn bnm_tables(pattern: Vec<u32>) -> BnmTables {
    let len = pattern.len();
    let mut last_occ = vec![0usize; BNM_TABLE_SIZE];
    for (i, &c) in pattern.iter().enumerate() {
        last_occ[(c & 0x7F) as usize] = i + 1;
    }

    let mut good_suffix = vec![0usize; len];
    'shift: for i in (1..=len).rev() {
        // does pattern[i..] match a prefix?
        let mut j = len - 1;
        while j >= i {
            if pattern[j] == pattern[j - i] {
                good_suffix[j - 1] = i;
            } else {
                continue 'shift;
            }
            j -= 1;
        }
        while j > 0 {
            j -= 1;
            good_suffix[j] = i;
        }
    }
    good_suffix[len - 1] = 1;

    BnmTables {
        pattern,
        last_occ,
        good_suffix,
    }
}
