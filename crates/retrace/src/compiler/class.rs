// Character classes and property names
//
// Latin-1 members of a class accumulate in a 256-bit set; everything else
// becomes a predicate tree joined with union. `&&` intersects the left-hand
// side with everything up to the next `&&` or the closing bracket.

use super::escape::Escape;
use super::{CompileResult, Compiler};
use crate::chars::predicate::set_bit;
use crate::chars::{CharPredicate, ascii, blocks, case, props};
use crate::flags::Flags;

fn union_opt(prev: Option<CharPredicate>, p: CharPredicate) -> CharPredicate {
    match prev {
        None => p,
        Some(prev) => prev.union(p),
    }
}

impl Compiler {
    /// Parse a bracketed class. The cursor points at `[` (or, with
    /// `consume` off, just before the first member of an intersection
    /// operand).
    pub(super) fn clazz(&mut self, consume: bool) -> CompileResult<CharPredicate> {
        let mut prev: Option<CharPredicate> = None;
        let mut curr: Option<CharPredicate> = None;
        let mut bits = [0u64; 4];
        let mut has_bits = false;
        let mut negated = false;

        let mut ch = self.next();
        if ch == '^' && self.at(self.cursor - 1) == '[' {
            ch = self.next();
            negated = true;
        }
        loop {
            match ch {
                '[' => {
                    let c = self.clazz(true)?;
                    prev = Some(union_opt(prev, c.clone()));
                    curr = Some(c);
                    ch = self.peek();
                    continue;
                }
                '&' => {
                    ch = self.next();
                    if ch == '&' {
                        ch = self.next();
                        let mut right: Option<CharPredicate> = None;
                        while ch != ']' && ch != '&' {
                            if ch == '[' {
                                let c = self.clazz(true)?;
                                right = Some(union_opt(right, c));
                            } else {
                                self.unread();
                                right = Some(self.clazz(false)?);
                            }
                            ch = self.peek();
                        }
                        if has_bits {
                            let b = CharPredicate::Bits(Box::new(bits));
                            prev = Some(match prev {
                                None => {
                                    curr = Some(b.clone());
                                    b
                                }
                                Some(p) => p.union(b),
                            });
                            bits = [0; 4];
                            has_bits = false;
                        }
                        if right.is_some() {
                            curr = right.clone();
                        }
                        prev = Some(match (prev, right) {
                            (None, None) => return Err(self.error("Bad class syntax")),
                            (None, Some(r)) => r,
                            (Some(p), _) => match curr.clone() {
                                Some(c) => p.and(c),
                                None => return Err(self.error("Bad class syntax")),
                            },
                        });
                        continue;
                    }
                    // a lone '&' is a literal
                    self.unread();
                }
                '\0' if self.cursor >= self.pattern_length => {
                    return Err(self.error("Unclosed character class"));
                }
                ']' if prev.is_some() || has_bits => {
                    if consume {
                        self.next();
                    }
                    let bits = CharPredicate::Bits(Box::new(bits));
                    let p = match prev {
                        None => bits,
                        Some(p) if has_bits => p.union(bits),
                        Some(p) => p,
                    };
                    return Ok(if negated { p.negate() } else { p });
                }
                _ => {}
            }

            match self.range(&mut bits)? {
                None => has_bits = true,
                Some(c) => {
                    prev = Some(union_opt(prev, c.clone()));
                    curr = Some(c);
                }
            }
            ch = self.peek();
        }
    }

    /// One class member: a character, a range or a nested escape class.
    /// Returns `None` when the member went into `bits`.
    fn range(&mut self, bits: &mut [u64; 4]) -> CompileResult<Option<CharPredicate>> {
        let mut ch = self.peek();
        let c = if ch == '\\' {
            ch = self.next_escaped();
            if ch == 'p' || ch == 'P' {
                let one_letter = self.family_open();
                return Ok(Some(self.family(one_letter, ch == 'P')?));
            }
            let isrange = self.at(self.cursor + 1) == '-';
            self.unread();
            match self.escape(true, true, isrange)? {
                Escape::Char(c) => c,
                Escape::Class(p) => return Ok(Some(p)),
                Escape::Node(_) | Escape::Skipped => {
                    return Err(self.error("Illegal/unsupported escape sequence"));
                }
            }
        } else {
            self.next();
            ch as u32
        };

        if self.peek() == '-' {
            let end_range = self.at(self.cursor + 1);
            if end_range == '[' {
                return Ok(self.bits_or_single(bits, c));
            }
            if end_range != ']' {
                self.next();
                let m = if self.peek() == '\\' {
                    match self.escape(true, false, true)? {
                        Escape::Char(m) => Some(m),
                        _ => None,
                    }
                } else {
                    let m = self.peek();
                    self.next();
                    Some(m as u32)
                };
                let m = match m {
                    Some(m) if m >= c => m,
                    _ => return Err(self.error("Illegal character range")),
                };
                let p = if !self.has(Flags::CASE_INSENSITIVE) {
                    CharPredicate::Range(c, m)
                } else if self.has(Flags::UNICODE_CASE) {
                    CharPredicate::RangeU(c, m)
                } else {
                    CharPredicate::RangeI(c, m)
                };
                return Ok(Some(p));
            }
        }
        Ok(self.bits_or_single(bits, c))
    }

    fn bits_or_single(&self, bits: &mut [u64; 4], c: u32) -> Option<CharPredicate> {
        let ci = self.has(Flags::CASE_INSENSITIVE);
        let uc = self.has(Flags::UNICODE_CASE);
        // Latin-1 characters whose case partners live outside Latin-1
        let escapes_latin1 =
            ci && uc && matches!(c, 0xFF | 0xB5 | 0x49 | 0x69 | 0x53 | 0x73 | 0x4B | 0x6B | 0xC5 | 0xE5);
        if c < 256 && !escapes_latin1 {
            if ci {
                if ascii::is_ascii(c) {
                    set_bit(bits, ascii::to_upper(c));
                    set_bit(bits, ascii::to_lower(c));
                } else if uc {
                    set_bit(bits, case::to_lower(c));
                    set_bit(bits, case::to_upper(c));
                }
            }
            set_bit(bits, c);
            return None;
        }
        Some(self.single(c))
    }

    /// Predicate for one literal code point under the current case flags.
    pub(super) fn single(&self, c: u32) -> CharPredicate {
        if self.has(Flags::CASE_INSENSITIVE) {
            if self.has(Flags::UNICODE_CASE) {
                let upper = case::to_upper(c);
                let lower = case::to_lower(upper);
                if upper != lower {
                    return CharPredicate::SingleU(lower);
                }
            } else if ascii::is_ascii(c) && ascii::is_alpha(c) {
                return CharPredicate::SingleI {
                    lower: ascii::to_lower(c),
                    upper: ascii::to_upper(c),
                };
            }
        }
        CharPredicate::Single(c)
    }

    /// After `\p` or `\P`: consume `{` if present. Returns whether the
    /// property name is a single letter.
    pub(super) fn family_open(&mut self) -> bool {
        if self.next() != '{' {
            self.unread();
            true
        } else {
            false
        }
    }

    /// Resolve a property name (`\pL`, `\p{IsGreek}`, `\p{sc=Latin}`, ...).
    pub(super) fn family(
        &mut self,
        single_letter: bool,
        complement: bool,
    ) -> CompileResult<CharPredicate> {
        self.next();
        let name: String = if single_letter {
            let c = self.at(self.cursor);
            self.read();
            c.to_string()
        } else {
            let start = self.cursor;
            let mut j = start;
            while j < self.pattern_length && self.temp[j] != '}' {
                j += 1;
            }
            if j >= self.pattern_length {
                self.cursor = self.pattern_length + 1;
                return Err(self.error("Unclosed character family"));
            }
            self.cursor = j + 1;
            if start == j {
                return Err(self.error("Empty character family"));
            }
            self.temp[start..j].iter().collect()
        };

        let ci = self.has(Flags::CASE_INSENSITIVE);
        let p = if let Some((key, value)) = name.split_once('=') {
            let key = key.to_ascii_lowercase();
            let p = match key.as_str() {
                "sc" | "script" => props::for_script(value),
                "blk" | "block" => blocks::for_block(value),
                "gc" | "general_category" => props::for_property(value, ci),
                _ => None,
            };
            match p {
                Some(p) => p,
                None => {
                    return Err(self.error(format!(
                        "Unknown Unicode property {{name=<{key}>, value=<{value}>}}"
                    )));
                }
            }
        } else {
            let p = if let Some(block) = name.strip_prefix("In") {
                blocks::for_block(block)
            } else if let Some(short) = name.strip_prefix("Is") {
                props::for_unicode_property(short, ci)
                    .or_else(|| props::for_property(short, ci))
                    .or_else(|| props::for_script(short))
            } else if self.has(Flags::UNICODE_CHARACTER_CLASS) {
                props::for_posix_name(&name, ci).or_else(|| props::for_property(&name, ci))
            } else {
                props::for_property(&name, ci)
            };
            match p {
                Some(p) => p,
                None => {
                    return Err(self.error(format!("Unknown character property name {{{name}}}")));
                }
            }
        };
        Ok(if complement { p.negate() } else { p })
    }
}
