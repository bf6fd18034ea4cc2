// Backslash escapes
//
// One table serves three contexts: a free-standing escape (`create`), an
// escape inside a class (`inclass`) and the upper bound of a class range
// (`isrange`, where `\v` is the vertical tab rather than a class).

use smol_str::SmolStr;

use super::{CompileResult, Compiler};
use crate::chars::{CharPredicate, ascii, props};
use crate::flags::Flags;
use crate::limits::MAX_CODE_POINT;
use crate::node::{BoundKind, Fold, NodeId, NodeKind};

pub(super) enum Escape {
    /// A code point, possibly a lone surrogate from `\uD800`.
    Char(u32),
    /// A predefined class such as `\d` or `\h`.
    Class(CharPredicate),
    /// An anchor or back reference.
    Node(NodeId),
    /// A class or node escape parsed while `create` was off.
    Skipped,
}

impl Compiler {
    /// Parse the escape at the cursor (which points at the backslash).
    pub(super) fn escape(
        &mut self,
        inclass: bool,
        create: bool,
        isrange: bool,
    ) -> CompileResult<Escape> {
        let ch = self.skip();
        let unicode_classes = self.has(Flags::UNICODE_CHARACTER_CLASS);
        let unix = self.has(Flags::UNIX_LINES);

        let class = |p: CharPredicate| if create { Escape::Class(p) } else { Escape::Skipped };

        let esc = match ch {
            '0' => Escape::Char(self.octal()?),
            '1'..='9' if !inclass => {
                if create {
                    Escape::Node(self.back_ref(ch as usize - '0' as usize))
                } else {
                    Escape::Skipped
                }
            }
            'A' if !inclass => self.anchor(create, NodeKind::Begin),
            'B' if !inclass => self.anchor(
                create,
                NodeKind::Bound {
                    kind: BoundKind::None,
                    unicode: unicode_classes,
                },
            ),
            'G' if !inclass => self.anchor(create, NodeKind::LastMatch),
            'R' if !inclass => self.anchor(create, NodeKind::LineEnding),
            'Z' if !inclass => self.anchor(
                create,
                NodeKind::Dollar {
                    multiline: false,
                    unix,
                },
            ),
            'z' if !inclass => self.anchor(create, NodeKind::End),
            'b' if !inclass => {
                if self.peek() == '{' && self.at(self.cursor + 1) == 'g' {
                    return Err(self.error("Illegal/unsupported escape sequence"));
                }
                self.anchor(
                    create,
                    NodeKind::Bound {
                        kind: BoundKind::Both,
                        unicode: unicode_classes,
                    },
                )
            }
            'k' if !inclass => {
                if self.read() != '<' {
                    return Err(
                        self.error("\\k is not followed by '<' for named capturing group")
                    );
                }
                let first = self.read();
                let name = self.groupname(first)?;
                let Some(&group) = self.named_groups.get(&name) else {
                    return Err(
                        self.error(format!("named capturing group <{name}> does not exist"))
                    );
                };
                if create {
                    Escape::Node(self.back_ref_node(group))
                } else {
                    Escape::Skipped
                }
            }
            'd' | 'D' => {
                let p = if unicode_classes {
                    props::digit()
                } else {
                    CharPredicate::Ctype(ascii::DIGIT)
                };
                class(if ch == 'D' { p.negate() } else { p })
            }
            's' | 'S' => {
                let p = if unicode_classes {
                    props::white_space()
                } else {
                    CharPredicate::Ctype(ascii::SPACE)
                };
                class(if ch == 'S' { p.negate() } else { p })
            }
            'w' | 'W' => {
                let p = if unicode_classes {
                    props::word()
                } else {
                    CharPredicate::Ctype(ascii::WORD)
                };
                class(if ch == 'W' { p.negate() } else { p })
            }
            'h' => class(CharPredicate::HorizWs),
            'H' => class(CharPredicate::HorizWs.negate()),
            'v' if isrange => Escape::Char(0x0B),
            'v' => class(CharPredicate::VertWs),
            'V' => class(CharPredicate::VertWs.negate()),
            'a' => Escape::Char(0x07),
            'e' => Escape::Char(0x1B),
            'f' => Escape::Char(0x0C),
            'n' => Escape::Char(0x0A),
            'r' => Escape::Char(0x0D),
            't' => Escape::Char(0x09),
            'c' => Escape::Char(self.control()?),
            'u' => Escape::Char(self.unicode_escape()?),
            'x' => Escape::Char(self.hex_escape()?),
            c if c.is_ascii_alphanumeric() => {
                return Err(self.error("Illegal/unsupported escape sequence"));
            }
            c => Escape::Char(c as u32),
        };
        Ok(esc)
    }

    fn anchor(&mut self, create: bool, kind: NodeKind) -> Escape {
        if create {
            Escape::Node(self.push(kind))
        } else {
            Escape::Skipped
        }
    }

    /// Back reference `\n`; further digits are taken while they name an
    /// existing group.
    fn back_ref(&mut self, mut group: usize) -> NodeId {
        loop {
            let Some(d) = self.peek().to_digit(10) else {
                break;
            };
            let candidate = group * 10 + d as usize;
            if self.group_count - 1 < candidate {
                break;
            }
            group = candidate;
            self.read();
        }
        self.back_ref_node(group)
    }

    fn back_ref_node(&mut self, group: usize) -> NodeId {
        let fold = if !self.has(Flags::CASE_INSENSITIVE) {
            Fold::None
        } else if self.has(Flags::UNICODE_CASE) {
            Fold::Unicode
        } else {
            Fold::Ascii
        };
        self.push(NodeKind::BackRef { group, fold })
    }

    /// Group name after `(?<` or `\k<`, up to and including the closing `>`.
    pub(super) fn groupname(&mut self, first: char) -> CompileResult<SmolStr> {
        if !first.is_ascii_alphabetic() {
            return Err(self.error("capturing group name does not start with a Latin letter"));
        }
        let mut name = String::new();
        let mut ch = first;
        loop {
            name.push(ch);
            ch = self.read();
            if !ch.is_ascii_alphanumeric() {
                break;
            }
        }
        if ch != '>' {
            return Err(self.error("named capturing group is missing trailing '>'"));
        }
        Ok(SmolStr::new(name))
    }

    /// `\0n`, `\0nn` or `\0mnn` with `m` at most 3.
    fn octal(&mut self) -> CompileResult<u32> {
        let n = self.read();
        if is_octal(n) {
            let m = self.read();
            if is_octal(m) {
                let o = self.read();
                if is_octal(o) && n <= '3' {
                    return Ok(octal_value(n) * 64 + octal_value(m) * 8 + octal_value(o));
                }
                self.unread();
                return Ok(octal_value(n) * 8 + octal_value(m));
            }
            self.unread();
            return Ok(octal_value(n));
        }
        Err(self.error("Illegal octal escape sequence"))
    }

    /// `\xhh` or `\x{h...h}`.
    fn hex_escape(&mut self) -> CompileResult<u32> {
        let n = self.read();
        if n.is_ascii_hexdigit() {
            let m = self.read();
            if m.is_ascii_hexdigit() {
                return Ok(ascii::hex_value(n as u32) * 16 + ascii::hex_value(m as u32));
            }
        } else if n == '{' && self.peek().is_ascii_hexdigit() {
            let mut value: u32 = 0;
            let mut ch = self.read();
            while ch.is_ascii_hexdigit() {
                value = (value << 4) + ascii::hex_value(ch as u32);
                if value > MAX_CODE_POINT {
                    return Err(self.error("Hexadecimal codepoint is too big"));
                }
                ch = self.read();
            }
            if ch != '}' {
                return Err(self.error("Unclosed hexadecimal escape sequence"));
            }
            return Ok(value);
        }
        Err(self.error("Illegal hexadecimal escape sequence"))
    }

    fn uxxxx(&mut self) -> CompileResult<u32> {
        let mut n = 0;
        for _ in 0..4 {
            let ch = self.read();
            if !ch.is_ascii_hexdigit() {
                return Err(self.error("Illegal Unicode escape sequence"));
            }
            n = n * 16 + ascii::hex_value(ch as u32);
        }
        Ok(n)
    }

    /// `\uxxxx`; a high surrogate followed by `\uxxxx` low surrogate
    /// combines into one supplementary code point.
    fn unicode_escape(&mut self) -> CompileResult<u32> {
        let n = self.uxxxx()?;
        if (0xD800..=0xDBFF).contains(&n) {
            let cur = self.cursor;
            if self.read() == '\\' && self.read() == 'u' {
                let n2 = self.uxxxx()?;
                if (0xDC00..=0xDFFF).contains(&n2) {
                    return Ok(0x10000 + ((n - 0xD800) << 10) + (n2 - 0xDC00));
                }
            }
            self.cursor = cur;
        }
        Ok(n)
    }

    /// `\cX`: the control character `X ^ 64`.
    fn control(&mut self) -> CompileResult<u32> {
        if self.cursor < self.pattern_length {
            return Ok(self.read() as u32 ^ 64);
        }
        Err(self.error("Illegal control escape sequence"))
    }
}

fn is_octal(c: char) -> bool {
    ('0'..='7').contains(&c)
}

fn octal_value(c: char) -> u32 {
    c as u32 - '0' as u32
}
