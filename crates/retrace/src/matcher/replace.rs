// Replacement templates
//
// In a template `$n` and `${name}` insert a group and `\x` inserts `x`
// literally. `$n` takes further digits only while the number still names
// an existing group, so with two groups `$12` is group 1 then `2`.

use super::{Matcher, MatchResult};
use crate::error::{MatchError, ReResult};

fn invalid(msg: impl Into<String>) -> MatchError {
    MatchError::InvalidReplacement(msg.into())
}

impl<'t> Matcher<'t> {
    /// Append the input between the previous append position and the
    /// current match, then the expanded `template`.
    pub fn append_replacement(&mut self, out: &mut String, template: &str) -> ReResult<&mut Self> {
        let (first, last) = self.match_span().ok_or(MatchError::NoMatchAvailable)?;
        let mut expanded = String::with_capacity(template.len());
        self.expand(template, &mut expanded)?;
        let from = self.offsets.byte(self.append_pos);
        if from <= first {
            out.push_str(&self.text[from..first]);
        }
        out.push_str(&expanded);
        self.append_pos = self.st.last;
        log::trace!("replaced {first}..{last} with {} bytes", expanded.len());
        Ok(self)
    }

    /// Append the input after the last appended match.
    pub fn append_tail(&self, out: &mut String) {
        out.push_str(&self.text[self.offsets.byte(self.append_pos)..]);
    }

    /// Replace every match with the expanded `template`.
    pub fn replace_all(&mut self, template: &str) -> ReResult<String> {
        self.replace(template, true)
    }

    /// Replace the first match with the expanded `template`.
    pub fn replace_first(&mut self, template: &str) -> ReResult<String> {
        self.replace(template, false)
    }

    /// Replace every match with a template computed from it.
    pub fn replace_all_with<F>(&mut self, f: F) -> ReResult<String>
    where
        F: FnMut(&MatchResult<'t>) -> String,
    {
        self.replace_with(f, true)
    }

    pub fn replace_first_with<F>(&mut self, f: F) -> ReResult<String>
    where
        F: FnMut(&MatchResult<'t>) -> String,
    {
        self.replace_with(f, false)
    }

    fn replace(&mut self, template: &str, all: bool) -> ReResult<String> {
        self.replace_with(|_| template.to_string(), all)
    }

    fn replace_with<F>(&mut self, mut f: F, all: bool) -> ReResult<String>
    where
        F: FnMut(&MatchResult<'t>) -> String,
    {
        self.reset();
        if !self.find() {
            return Ok(self.text.to_string());
        }
        let mut out = String::with_capacity(self.text.len());
        loop {
            let template = f(&self.to_match_result()?);
            self.append_replacement(&mut out, &template)?;
            if !all || !self.find() {
                break;
            }
        }
        self.append_tail(&mut out);
        Ok(out)
    }

    fn expand(&self, template: &str, out: &mut String) -> ReResult<()> {
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => out.push(escaped),
                    None => return Err(invalid("character to be escaped is missing")),
                },
                '$' => {
                    let group = match chars.next() {
                        None => {
                            return Err(invalid("Illegal group reference: group index is missing"));
                        }
                        Some('{') => {
                            let mut name = String::new();
                            while let Some(&n) = chars.peek() {
                                if !n.is_ascii_alphanumeric() {
                                    break;
                                }
                                name.push(n);
                                chars.next();
                            }
                            if name.is_empty() {
                                return Err(invalid("named capturing group has 0 length name"));
                            }
                            if chars.next() != Some('}') {
                                return Err(invalid("named capturing group is missing trailing '}'"));
                            }
                            if name.starts_with(|c: char| c.is_ascii_digit()) {
                                return Err(invalid(format!(
                                    "capturing group name {{{name}}} starts with digit character"
                                )));
                            }
                            self.program
                                .group_index(&name)
                                .ok_or_else(|| invalid(format!("No group with name {{{name}}}")))?
                        }
                        Some(d) => {
                            let Some(first) = d.to_digit(10) else {
                                return Err(invalid("Illegal group reference"));
                            };
                            let mut num = first as usize;
                            while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                                let candidate = num * 10 + digit as usize;
                                if self.group_count() < candidate {
                                    break;
                                }
                                num = candidate;
                                chars.next();
                            }
                            num
                        }
                    };
                    if group > self.group_count() {
                        return Err(MatchError::NoSuchGroup(group));
                    }
                    if let Some((s, e)) = self.span(group) {
                        out.push_str(&self.text[s..e]);
                    }
                }
                _ => out.push(c),
            }
        }
        Ok(())
    }
}
