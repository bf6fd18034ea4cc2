// Pattern compiler
//
// Recursive descent over the pattern's code points that builds the node
// arena directly. By precedence:
//
//   expr     := sequence ('|' sequence)*
//   sequence := (group | class | anchor | atom closure?)*
//   closure  := ('?' | '*' | '+' | '{n}' | '{n,}' | '{n,m}') ('?' | '+')?
//
// The parse buffer ends with two NUL sentinels so one character of
// lookahead never runs off the end; a NUL before `pattern_length` is a
// literal.

mod canon;
mod class;
mod escape;
mod optimize;

use ahash::AHashMap;
use smol_str::SmolStr;

use crate::chars::{CharPredicate, ascii, case};
use crate::error::SyntaxError;
use crate::flags::Flags;
use crate::limits::MAX_REPS;
use crate::node::{Fold, LoopShape, Node, NodeId, NodeKind, Qtype, Repeat, TreeInfo, study};

use escape::Escape;

pub(crate) type CompileResult<T> = Result<T, SyntaxError>;

/// Output of a successful compilation.
#[derive(Debug)]
pub(crate) struct Compiled {
    pub nodes: Vec<Node>,
    /// Entry for unanchored searches.
    pub root: NodeId,
    /// Entry for anchored matches (`matches`, `looking_at`).
    pub match_root: NodeId,
    /// Capturing groups including group 0.
    pub group_count: usize,
    pub named_groups: AHashMap<SmolStr, usize>,
    pub local_count: usize,
}

/// Compile `source` under `flags` (already normalized by the caller or not,
/// both work).
pub(crate) fn compile(source: &str, flags: Flags) -> CompileResult<Compiled> {
    let flags = flags.normalized();
    let pattern = if flags.contains(Flags::CANON_EQ) && !flags.contains(Flags::LITERAL) {
        canon::normalize(source)
    } else {
        source.to_string()
    };
    let compiled = Compiler::new(pattern, flags).run()?;
    let search = match compiled.nodes[compiled.root.index()].kind {
        NodeKind::Bnm(_) => "boyer-moore",
        NodeKind::Start { .. } => "scan",
        _ => "anchored",
    };
    log::debug!(
        "compiled {:?} with {:?}: {} nodes, {} groups, {} locals, {} search",
        source,
        flags,
        compiled.nodes.len(),
        compiled.group_count - 1,
        compiled.local_count,
        search
    );
    Ok(compiled)
}

pub(crate) struct Compiler {
    /// Pattern text quoted in errors (the rewritten text under CANON_EQ).
    pattern: String,
    /// Flags in effect at the current parse position.
    flags: Flags,
    temp: Vec<char>,
    cursor: usize,
    pattern_length: usize,
    nodes: Vec<Node>,
    group_count: usize,
    local_count: usize,
    named_groups: AHashMap<SmolStr, usize>,
}

impl Compiler {
    fn new(pattern: String, flags: Flags) -> Compiler {
        let mut temp: Vec<char> = pattern.chars().collect();
        let pattern_length = temp.len();
        temp.extend(['\0', '\0']);
        Compiler {
            pattern,
            flags,
            temp,
            cursor: 0,
            pattern_length,
            nodes: vec![
                Node::new(NodeKind::Accept),
                Node::new(NodeKind::LastAccept),
                Node::new(NodeKind::LookBehindEnd),
            ],
            group_count: 1,
            local_count: 0,
            named_groups: AHashMap::new(),
        }
    }

    fn run(mut self) -> CompileResult<Compiled> {
        let match_root = if self.has(Flags::LITERAL) {
            let buf = self.temp[..self.pattern_length].iter().map(|&c| c as u32).collect();
            let slice = self.new_slice(buf);
            self.set_next(slice, NodeId::LAST_ACCEPT);
            slice
        } else {
            self.remove_qe_quoting();
            let root = self.expr(NodeId::LAST_ACCEPT)?;
            if self.cursor != self.pattern_length {
                return Err(if self.peek() == ')' {
                    self.error("Unmatched closing ')'")
                } else {
                    self.error("Unexpected internal error")
                });
            }
            root
        };
        let root = self.optimize(match_root);
        Ok(Compiled {
            nodes: self.nodes,
            root,
            match_root,
            group_count: self.group_count,
            named_groups: self.named_groups,
            local_count: self.local_count,
        })
    }

    // ===== Arena =====

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    fn push_linked(&mut self, kind: NodeKind, next: NodeId) -> NodeId {
        let id = self.push(kind);
        self.set_next(id, next);
        id
    }

    fn set_next(&mut self, id: NodeId, next: NodeId) {
        self.nodes[id.index()].next = next;
    }

    fn next_of(&self, id: NodeId) -> NodeId {
        self.nodes[id.index()].next
    }

    /// Drop a node that was just pushed and turned out to be unneeded.
    fn discard(&mut self, id: NodeId) {
        if id.index() + 1 == self.nodes.len() {
            self.nodes.pop();
        }
    }

    // ===== Cursor =====

    #[inline]
    fn has(&self, f: Flags) -> bool {
        self.flags.contains(f)
    }

    #[inline]
    fn at(&self, i: usize) -> char {
        self.temp.get(i).copied().unwrap_or('\0')
    }

    fn peek(&mut self) -> char {
        let ch = self.at(self.cursor);
        if self.has(Flags::COMMENTS) {
            self.peek_past_whitespace(ch)
        } else {
            ch
        }
    }

    fn read(&mut self) -> char {
        let ch = self.at(self.cursor);
        self.cursor += 1;
        if self.has(Flags::COMMENTS) {
            self.parse_past_whitespace(ch)
        } else {
            ch
        }
    }

    /// Advance and peek.
    fn next(&mut self) -> char {
        self.cursor += 1;
        let ch = self.at(self.cursor);
        if self.has(Flags::COMMENTS) {
            self.peek_past_whitespace(ch)
        } else {
            ch
        }
    }

    /// Advance and peek, ignoring COMMENTS.
    fn next_escaped(&mut self) -> char {
        self.cursor += 1;
        self.at(self.cursor)
    }

    /// Return the character after the current one and move past both.
    fn skip(&mut self) -> char {
        let ch = self.at(self.cursor + 1);
        self.cursor += 2;
        ch
    }

    fn unread(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn accept(&mut self, expected: char, msg: &str) -> CompileResult<()> {
        if self.read() != expected {
            return Err(self.error(msg));
        }
        Ok(())
    }

    fn peek_past_whitespace(&mut self, mut ch: char) -> char {
        while ascii::is_space(ch as u32) || ch == '#' {
            while ascii::is_space(ch as u32) {
                self.cursor += 1;
                ch = self.at(self.cursor);
            }
            if ch == '#' {
                ch = self.peek_past_line();
            }
        }
        ch
    }

    fn parse_past_whitespace(&mut self, mut ch: char) -> char {
        while ascii::is_space(ch as u32) || ch == '#' {
            while ascii::is_space(ch as u32) {
                ch = self.at(self.cursor);
                self.cursor += 1;
            }
            if ch == '#' {
                ch = self.parse_past_line();
            }
        }
        ch
    }

    fn peek_past_line(&mut self) -> char {
        self.cursor += 1;
        let mut ch = self.at(self.cursor);
        while ch != '\0' && !self.is_line_separator(ch) {
            self.cursor += 1;
            ch = self.at(self.cursor);
        }
        if ch == '\0' && self.cursor > self.pattern_length {
            self.cursor = self.pattern_length;
            ch = self.at(self.cursor);
        }
        ch
    }

    fn parse_past_line(&mut self) -> char {
        let mut ch = self.at(self.cursor);
        self.cursor += 1;
        while ch != '\0' && !self.is_line_separator(ch) {
            ch = self.at(self.cursor);
            self.cursor += 1;
        }
        if ch == '\0' && self.cursor > self.pattern_length {
            self.cursor = self.pattern_length;
            ch = self.at(self.cursor);
            self.cursor += 1;
        }
        ch
    }

    fn is_line_separator(&self, ch: char) -> bool {
        if self.has(Flags::UNIX_LINES) {
            ch == '\n'
        } else {
            matches!(ch, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
        }
    }

    /// Error positioned at the last character read.
    fn error(&self, msg: impl Into<String>) -> SyntaxError {
        SyntaxError::new(msg, &self.pattern, self.cursor.checked_sub(1))
    }

    // ===== Preprocessing =====

    /// Rewrite `\Q...\E` spans into individually escaped characters so the
    /// parser never sees quoting.
    fn remove_qe_quoting(&mut self) {
        let len = self.pattern_length;
        let t = &self.temp;
        let mut i = 0;
        while i + 1 < len {
            if t[i] != '\\' {
                i += 1;
            } else if t[i + 1] != 'Q' {
                i += 2;
            } else {
                break;
            }
        }
        if i + 1 >= len {
            return;
        }

        let mut out: Vec<char> = Vec::with_capacity(len * 2 + 2);
        out.extend_from_slice(&t[..i]);
        i += 2;
        let mut in_quote = true;
        let mut begin_quote = true;
        while i < len {
            let c = t[i];
            i += 1;
            if in_quote {
                if c == '\\' && t[i] == 'E' {
                    i += 1;
                    in_quote = false;
                    begin_quote = false;
                    continue;
                }
                if !c.is_ascii() || c.is_ascii_alphabetic() {
                    out.push(c);
                } else if c.is_ascii_digit() {
                    // keep a preceding octal or back reference escape intact
                    if begin_quote {
                        out.extend(['\\', 'x', '3']);
                    }
                    out.push(c);
                } else {
                    out.push('\\');
                    out.push(c);
                }
            } else if c == '\\' {
                if t[i] == 'Q' {
                    i += 1;
                    in_quote = true;
                    begin_quote = true;
                    continue;
                }
                out.push(c);
                if i < len {
                    out.push(t[i]);
                    i += 1;
                }
            } else {
                out.push(c);
            }
            begin_quote = false;
        }

        self.pattern_length = out.len();
        out.extend(['\0', '\0']);
        self.temp = out;
    }

    // ===== Grammar =====

    /// Alternation. Every alternative continues at `end`.
    fn expr(&mut self, end: NodeId) -> CompileResult<NodeId> {
        let (mut prev, first_tail) = self.sequence(end)?;
        let mut branch: Option<NodeId> = None;
        let mut conn: Option<NodeId> = None;

        while self.peek() == '|' {
            self.next();
            let (node, node_tail) = self.sequence(end)?;
            let conn_id = match conn {
                Some(c) => c,
                None => {
                    let c = self.push_linked(NodeKind::BranchConn, end);
                    conn = Some(c);
                    c
                }
            };
            let alt = if node == end {
                None
            } else {
                self.set_next(node_tail, conn_id);
                Some(node)
            };
            match branch {
                Some(b) if b == prev => {
                    if let NodeKind::Branch { alts, .. } = &mut self.nodes[b.index()].kind {
                        alts.push(alt);
                    }
                }
                _ => {
                    let first = if prev == end {
                        None
                    } else {
                        self.set_next(first_tail, conn_id);
                        Some(prev)
                    };
                    let b = self.push(NodeKind::Branch {
                        alts: vec![first, alt],
                        conn: conn_id,
                    });
                    branch = Some(b);
                    prev = b;
                }
            }
        }
        Ok(prev)
    }

    /// Concatenation up to `|`, `)` or the end. Returns head and tail; an
    /// empty sequence is `(end, end)`.
    fn sequence(&mut self, end: NodeId) -> CompileResult<(NodeId, NodeId)> {
        let mut head: Option<NodeId> = None;
        let mut tail = end;
        loop {
            let ch = self.peek();
            let node = match ch {
                '(' => {
                    if let Some((h, t)) = self.group0()? {
                        match head {
                            None => head = Some(h),
                            Some(_) => self.set_next(tail, h),
                        }
                        tail = t;
                    }
                    continue;
                }
                '[' => {
                    let p = self.clazz(true)?;
                    self.push(NodeKind::CharProperty(p))
                }
                '\\' => {
                    let c = self.next_escaped();
                    if c == 'p' || c == 'P' {
                        let one_letter = self.family_open();
                        let p = self.family(one_letter, c == 'P')?;
                        self.push(NodeKind::CharProperty(p))
                    } else {
                        self.unread();
                        self.atom()?
                    }
                }
                '^' => {
                    self.next();
                    if self.has(Flags::MULTILINE) {
                        let unix = self.has(Flags::UNIX_LINES);
                        self.push(NodeKind::Caret { unix })
                    } else {
                        self.push(NodeKind::Begin)
                    }
                }
                '$' => {
                    self.next();
                    let multiline = self.has(Flags::MULTILINE);
                    let unix = self.has(Flags::UNIX_LINES);
                    self.push(NodeKind::Dollar { multiline, unix })
                }
                '.' => {
                    self.next();
                    let p = if self.has(Flags::DOTALL) {
                        CharPredicate::All
                    } else if self.has(Flags::UNIX_LINES) {
                        CharPredicate::UnixDot
                    } else {
                        CharPredicate::Dot
                    };
                    self.push(NodeKind::CharProperty(p))
                }
                '|' | ')' => break,
                ']' | '}' => self.atom()?,
                '?' | '*' | '+' => {
                    self.next();
                    return Err(self.error(format!("Dangling meta character '{ch}'")));
                }
                '\0' if self.cursor >= self.pattern_length => break,
                _ => self.atom()?,
            };

            let node = self.closure(node)?;
            match head {
                None => head = Some(node),
                Some(_) => self.set_next(tail, node),
            }
            tail = node;
        }
        match head {
            None => Ok((end, end)),
            Some(h) => {
                self.set_next(tail, end);
                Ok((h, tail))
            }
        }
    }

    /// A run of literal characters, or a single escape that stands for a
    /// node or class.
    fn atom(&mut self) -> CompileResult<NodeId> {
        let mut buf: Vec<u32> = Vec::new();
        let mut prev = 0;
        let mut ch = self.peek();
        loop {
            match ch {
                '*' | '+' | '?' | '{' => {
                    // the quantifier binds to the last character only
                    if buf.len() > 1 {
                        self.cursor = prev;
                        buf.pop();
                    }
                    break;
                }
                '$' | '.' | '^' | '(' | '[' | '|' | ')' => break,
                '\\' => {
                    let c = self.next_escaped();
                    if c == 'p' || c == 'P' {
                        if !buf.is_empty() {
                            self.unread();
                            break;
                        }
                        let one_letter = self.family_open();
                        let p = self.family(one_letter, c == 'P')?;
                        return Ok(self.push(NodeKind::CharProperty(p)));
                    }
                    self.unread();
                    prev = self.cursor;
                    match self.escape(false, buf.is_empty(), false)? {
                        Escape::Char(c) => {
                            buf.push(c);
                            ch = self.peek();
                        }
                        Escape::Node(id) => return Ok(id),
                        Escape::Class(p) => return Ok(self.push(NodeKind::CharProperty(p))),
                        Escape::Skipped => {
                            self.cursor = prev;
                            break;
                        }
                    }
                }
                '\0' if self.cursor >= self.pattern_length => break,
                _ => {
                    prev = self.cursor;
                    buf.push(ch as u32);
                    ch = self.next();
                }
            }
        }
        if buf.len() == 1 {
            let p = self.single(buf[0]);
            Ok(self.push(NodeKind::CharProperty(p)))
        } else {
            Ok(self.new_slice(buf))
        }
    }

    fn new_slice(&mut self, mut buf: Vec<u32>) -> NodeId {
        let fold = if self.has(Flags::CASE_INSENSITIVE) {
            if self.has(Flags::UNICODE_CASE) {
                buf.iter_mut().for_each(|c| *c = case::fold(*c));
                Fold::Unicode
            } else {
                buf.iter_mut().for_each(|c| *c = ascii::to_lower(*c));
                Fold::Ascii
            }
        } else {
            Fold::None
        };
        self.push(NodeKind::Slice { buf, fold })
    }

    /// Wrap `prev` in the quantifier that follows it, if any.
    fn closure(&mut self, prev: NodeId) -> CompileResult<NodeId> {
        match self.peek() {
            '?' => {
                let kind = self.quantifier_kind();
                Ok(self.push(NodeKind::Ques { atom: prev, kind }))
            }
            '*' => {
                let kind = self.quantifier_kind();
                Ok(self.curly(prev, kind, 0, MAX_REPS))
            }
            '+' => {
                let kind = self.quantifier_kind();
                Ok(self.curly(prev, kind, 1, MAX_REPS))
            }
            '{' => {
                let ch = self.at(self.cursor + 1);
                if !ch.is_ascii_digit() {
                    return Err(self.error("Illegal repetition"));
                }
                self.skip();
                let mut overflow = false;
                let (cmin, mut ch) = self.count(ch, &mut overflow);
                let mut cmax = cmin;
                if ch == ',' {
                    ch = self.read();
                    cmax = MAX_REPS;
                    if ch.is_ascii_digit() {
                        let (n, c) = self.count(ch, &mut overflow);
                        cmax = n;
                        ch = c;
                    }
                }
                if ch != '}' {
                    return Err(self.error("Unclosed counted closure"));
                }
                if overflow || cmax < cmin {
                    return Err(self.error("Illegal repetition range"));
                }
                let kind = match self.peek() {
                    '?' => {
                        self.next();
                        Qtype::Lazy
                    }
                    '+' => {
                        self.next();
                        Qtype::Possessive
                    }
                    _ => Qtype::Greedy,
                };
                Ok(self.curly(prev, kind, cmin, cmax))
            }
            _ => Ok(prev),
        }
    }

    /// Consume a quantifier character and its `?`/`+` suffix.
    fn quantifier_kind(&mut self) -> Qtype {
        match self.next() {
            '?' => {
                self.next();
                Qtype::Lazy
            }
            '+' => {
                self.next();
                Qtype::Possessive
            }
            _ => Qtype::Greedy,
        }
    }

    /// Decimal count starting at `first` (already consumed). Returns the
    /// value and the first non-digit read. Counts above `i32::MAX` set
    /// `overflow`.
    fn count(&mut self, first: char, overflow: &mut bool) -> (usize, char) {
        let mut n: usize = 0;
        let mut ch = first;
        loop {
            n = n.saturating_mul(10).saturating_add(ch as usize - '0' as usize);
            if n > i32::MAX as usize {
                *overflow = true;
                n = i32::MAX as usize;
            }
            ch = self.read();
            if !ch.is_ascii_digit() {
                return (n, ch);
            }
        }
    }

    fn curly(&mut self, atom: NodeId, kind: Qtype, cmin: usize, cmax: usize) -> NodeId {
        self.push(NodeKind::Curly(Repeat {
            atom,
            kind,
            cmin,
            cmax,
        }))
    }

    /// Parse a parenthesized construct. Returns `None` for a pure inline
    /// flag group such as `(?i)`.
    fn group0(&mut self) -> CompileResult<Option<(NodeId, NodeId)>> {
        let save = self.flags;
        let head: NodeId;
        let tail: NodeId;

        let mut ch = self.next();
        if ch == '?' {
            ch = self.skip();
            match ch {
                ':' => (head, tail) = self.group_body(true)?,
                '=' | '!' => {
                    let (cond, _) = self.group_body(true)?;
                    head = if ch == '=' {
                        self.push(NodeKind::Pos { cond })
                    } else {
                        self.push(NodeKind::Neg { cond })
                    };
                    tail = head;
                }
                '>' => {
                    let (atom, _) = self.group_body(true)?;
                    head = self.push(NodeKind::Ques {
                        atom,
                        kind: Qtype::Independent,
                    });
                    tail = head;
                }
                '<' => {
                    ch = self.read();
                    if ch != '=' && ch != '!' {
                        let name = self.groupname(ch)?;
                        if self.named_groups.contains_key(&name) {
                            return Err(self.error(format!(
                                "Named capturing group <{name}> is already defined"
                            )));
                        }
                        let (h, t) = self.create_group(false);
                        self.named_groups.insert(name, self.group_count - 1);
                        let body = self.expr(t)?;
                        self.set_next(h, body);
                        (head, tail) = (h, t);
                    } else {
                        let (h, t) = self.group_body(true)?;
                        self.set_next(t, NodeId::LOOKBEHIND_END);
                        let mut info = TreeInfo::new();
                        study(&self.nodes, h, &mut info);
                        if !info.max_valid {
                            return Err(self.error(
                                "Look-behind group does not have an obvious maximum length",
                            ));
                        }
                        head = self.push(NodeKind::Behind {
                            cond: h,
                            rmin: info.min_length,
                            rmax: info.max_length,
                            negate: ch == '!',
                        });
                        tail = head;
                    }
                }
                '$' | '@' => return Err(self.error("Unknown group type")),
                _ => {
                    self.unread();
                    self.add_flag();
                    ch = self.read();
                    if ch == ')' {
                        return Ok(None);
                    }
                    if ch != ':' {
                        return Err(self.error("Unknown inline modifier"));
                    }
                    (head, tail) = self.group_body(true)?;
                }
            }
        } else {
            (head, tail) = self.group_body(false)?;
        }

        self.accept(')', "Unclosed group")?;
        self.flags = save;

        let node = self.closure(head)?;
        if node == head {
            return Ok(Some((head, tail)));
        }
        if head == tail {
            // zero-width constructs carry their own quantifier node
            return Ok(Some((node, node)));
        }

        match self.nodes[node.index()].kind {
            NodeKind::Ques { kind, .. } => {
                if kind == Qtype::Possessive {
                    return Ok(Some((node, node)));
                }
                self.discard(node);
                let conn = self.push(NodeKind::BranchConn);
                self.set_next(tail, conn);
                let alts = if kind == Qtype::Greedy {
                    vec![Some(head), None]
                } else {
                    vec![None, Some(head)]
                };
                let branch = self.push(NodeKind::Branch { alts, conn });
                Ok(Some((branch, conn)))
            }
            NodeKind::Curly(rep) => {
                if rep.kind == Qtype::Possessive {
                    return Ok(Some((node, node)));
                }
                self.discard(node);
                let mut info = TreeInfo::new();
                if study(&self.nodes, head, &mut info) {
                    let NodeKind::GroupTail { local, group } = self.nodes[tail.index()].kind else {
                        return Err(self.error("Internal logic error"));
                    };
                    let rep = Repeat {
                        atom: self.next_of(head),
                        ..rep
                    };
                    let gc = self.push(NodeKind::GroupCurly { rep, local, group });
                    Ok(Some((gc, gc)))
                } else {
                    let NodeKind::GroupHead { local } = self.nodes[head.index()].kind else {
                        return Err(self.error("Internal logic error"));
                    };
                    let lp = self.push(NodeKind::Loop(LoopShape {
                        body: head,
                        count_local: self.local_count,
                        begin_local: local,
                        cmin: rep.cmin,
                        cmax: rep.cmax,
                        lazy: rep.kind == Qtype::Lazy,
                    }));
                    self.local_count += 1;
                    let prolog = self.push(NodeKind::Prolog { lp });
                    self.set_next(tail, lp);
                    Ok(Some((prolog, lp)))
                }
            }
            _ => Err(self.error("Internal logic error")),
        }
    }

    /// Create a group and parse its body. Returns the group's head and tail.
    fn group_body(&mut self, anonymous: bool) -> CompileResult<(NodeId, NodeId)> {
        let (head, tail) = self.create_group(anonymous);
        let body = self.expr(tail)?;
        self.set_next(head, body);
        Ok((head, tail))
    }

    fn create_group(&mut self, anonymous: bool) -> (NodeId, NodeId) {
        let local = self.local_count;
        self.local_count += 1;
        let group = if anonymous {
            None
        } else {
            let g = self.group_count;
            self.group_count += 1;
            Some(g)
        };
        let head = self.push(NodeKind::GroupHead { local });
        let tail = self.push(NodeKind::GroupTail { local, group });
        (head, tail)
    }

    fn add_flag(&mut self) {
        let mut ch = self.peek();
        loop {
            if ch == '-' {
                self.next();
                self.sub_flag();
                return;
            }
            match Flags::from_inline(ch) {
                Some(f) => self.flags |= f,
                None => return,
            }
            ch = self.next();
        }
    }

    fn sub_flag(&mut self) {
        let mut ch = self.peek();
        loop {
            match Flags::from_inline(ch) {
                Some(f) => self.flags.remove(f),
                None => return,
            }
            ch = self.next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(c: &Compiled) -> Vec<String> {
        c.nodes.iter().map(|n| format!("{:?}", n.kind)).collect()
    }

    #[test]
    fn test_literal_run_becomes_slice() {
        let c = compile("abc", Flags::empty()).unwrap();
        assert!(matches!(
            &c.nodes[c.match_root.index()].kind,
            NodeKind::Slice { buf, fold: Fold::None } if buf.len() == 3
        ));
        assert!(matches!(c.nodes[c.root.index()].kind, NodeKind::Start { min_length: 3 }));
    }

    #[test]
    fn test_long_literal_uses_boyer_moore() {
        let c = compile("needle", Flags::empty()).unwrap();
        assert!(matches!(c.nodes[c.root.index()].kind, NodeKind::Bnm(_)));
        let c = compile("needle", Flags::CASE_INSENSITIVE).unwrap();
        assert!(matches!(c.nodes[c.root.index()].kind, NodeKind::Start { .. }));
    }

    #[test]
    fn test_anchored_root_is_begin() {
        let c = compile("^ab", Flags::empty()).unwrap();
        assert_eq!(c.root, c.match_root);
        assert!(matches!(c.nodes[c.root.index()].kind, NodeKind::Begin));
    }

    #[test]
    fn test_quantifier_binds_last_char() {
        let c = compile("abc+", Flags::empty()).unwrap();
        let k = kinds(&c);
        assert!(k.iter().any(|s| s.starts_with("Slice") && s.contains("[97, 98]")));
        assert!(k.iter().any(|s| s.starts_with("Curly")));
    }

    #[test]
    fn test_group_repetition_shapes() {
        // fixed-length body: GroupCurly
        let c = compile("(ab)*", Flags::empty()).unwrap();
        assert!(kinds(&c).iter().any(|s| s.starts_with("GroupCurly")));
        // variable-length body: Prolog + Loop
        let c = compile("(a|bc)+", Flags::empty()).unwrap();
        let k = kinds(&c);
        assert!(k.iter().any(|s| s.starts_with("Prolog")));
        assert!(k.iter().any(|s| s.starts_with("Loop")));
        assert_eq!(c.local_count, 2);
    }

    #[test]
    fn test_group_counting() {
        let c = compile("(a)(?:b)(?<n>c)(?=d)", Flags::empty()).unwrap();
        assert_eq!(c.group_count, 3);
        assert_eq!(c.named_groups.get("n"), Some(&2));
    }

    #[test]
    fn test_quote_rewrite() {
        let mut c = Compiler::new("a\\Q.*\\E+".to_string(), Flags::empty());
        c.remove_qe_quoting();
        let s: String = c.temp[..c.pattern_length].iter().collect();
        assert_eq!(s, "a\\.\\*+");

        let mut c = Compiler::new("\\1\\Q2".to_string(), Flags::empty());
        c.remove_qe_quoting();
        let s: String = c.temp[..c.pattern_length].iter().collect();
        assert_eq!(s, "\\1\\x32");
    }
}
