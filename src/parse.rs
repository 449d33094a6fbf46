// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The pattern parser.
//!
//! Recursive descent over the pattern's code points with the usual
//! precedence: alternation, then concatenation, then repetition, then
//! atoms. Flags are threaded as parser state so `(?i)` applies to the
//! remainder of its enclosing group. All errors carry the byte offset of
//! the offending position in the pattern.

use crate::arena::Arena;
use crate::ast::{Ast, AstId, LookKind};
use crate::charclass::CharClass;
use crate::error::Error;
use crate::flags::Flags;
use crate::unicode;

/// The largest count allowed in `{n,m}`. Bounds the counted-repeat
/// expansion before the program size cap even comes into play.
const MAX_REPEAT: u32 = 1000;

/// The result of parsing a pattern.
#[derive(Clone, Debug)]
pub struct Parsed {
    /// Arena holding every AST node.
    pub ast: Arena<Ast>,
    /// The root node.
    pub root: AstId,
    /// One entry per capture group, index 0 included; `Some` for named
    /// groups.
    pub cap_names: Vec<Option<String>>,
}

/// Parse a pattern into its syntax tree.
pub fn parse(pattern: &str, flags: Flags) -> Result<Parsed, Error> {
    let mut chars = Vec::with_capacity(pattern.len());
    let mut offsets = Vec::with_capacity(pattern.len() + 1);
    for (i, c) in pattern.char_indices() {
        offsets.push(i);
        chars.push(c);
    }
    offsets.push(pattern.len());
    let mut p = Parser {
        chars,
        offsets,
        chari: 0,
        flags,
        arena: Arena::new(),
        names: vec![None],
    };
    let root = p.alternate()?;
    if p.cur().is_some() {
        return Err(p.err("unmatched closing parenthesis"));
    }
    Ok(Parsed { ast: p.arena, root, cap_names: p.names })
}

struct Parser {
    chars: Vec<char>,
    offsets: Vec<usize>,
    chari: usize,
    flags: Flags,
    arena: Arena<Ast>,
    names: Vec<Option<String>>,
}

/// One element of a character class body.
enum ClassItem {
    Char(char),
    Set(CharClass),
}

impl Parser {
    fn cur(&self) -> Option<char> {
        self.chars.get(self.chari).copied()
    }

    fn peek(&self, n: usize) -> Option<char> {
        self.chars.get(self.chari + n).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.cur();
        if c.is_some() {
            self.chari += 1;
        }
        c
    }

    fn eat(&mut self, c: char) -> bool {
        if self.cur() == Some(c) {
            self.chari += 1;
            true
        } else {
            false
        }
    }

    fn offset(&self) -> usize {
        self.offsets[self.chari]
    }

    fn err(&self, message: &str) -> Error {
        self.err_at(self.offset(), message)
    }

    fn err_at(&self, offset: usize, message: &str) -> Error {
        Error::Parse { offset, message: message.to_owned() }
    }

    fn casei(&self) -> bool {
        self.flags.contains(Flags::CASE_INSENSITIVE)
    }

    // alternate ::= concat ('|' concat)*
    fn alternate(&mut self) -> Result<AstId, Error> {
        let mut branches = vec![self.concat()?];
        while self.eat('|') {
            branches.push(self.concat()?);
        }
        Ok(if branches.len() == 1 {
            branches[0]
        } else {
            self.arena.alloc(Ast::Alternate(branches))
        })
    }

    // concat ::= (atom postfix?)*
    fn concat(&mut self) -> Result<AstId, Error> {
        let mut items: Vec<AstId> = Vec::new();
        loop {
            match self.cur() {
                None | Some('|') | Some(')') => break,
                Some('*') | Some('+') | Some('?') => {
                    return Err(self.err("nothing to repeat"));
                }
                Some('{') if self.counted_repeat_ahead() => {
                    return Err(self.err("nothing to repeat"));
                }
                Some(_) => {}
            }
            let atom = self.atom()?;
            let atom = self.postfix(atom)?;
            self.push_item(&mut items, atom);
        }
        Ok(match items.len() {
            0 => self.arena.alloc(Ast::Empty),
            1 => items[0],
            _ => self.arena.alloc(Ast::Concat(items)),
        })
    }

    /// Push a concat item, merging adjacent literals with the same case
    /// sensitivity into one multi-character literal.
    fn push_item(&mut self, items: &mut Vec<AstId>, id: AstId) {
        if matches!(self.arena[id], Ast::Empty) {
            return;
        }
        if let Some(&last) = items.last() {
            let mergeable = matches!(
                (&self.arena[last], &self.arena[id]),
                (Ast::Literal { casei: a, .. }, Ast::Literal { casei: b, .. }) if a == b
            );
            if mergeable {
                if let Ast::Literal { chars, .. } = self.arena[id].clone() {
                    if let Ast::Literal { chars: last_chars, .. } = &mut self.arena[last] {
                        last_chars.extend(chars);
                    }
                }
                return;
            }
        }
        items.push(id);
    }

    fn atom(&mut self) -> Result<AstId, Error> {
        let c = match self.cur() {
            Some(c) => c,
            None => return Err(self.err("expected an expression")),
        };
        match c {
            '(' => {
                self.bump();
                self.group()
            }
            '[' => {
                self.bump();
                self.class()
            }
            '.' => {
                self.bump();
                Ok(if self.flags.contains(Flags::DOT_ALL) {
                    self.arena.alloc(Ast::AnyChar)
                } else {
                    self.arena.alloc(Ast::AnyCharNoNL)
                })
            }
            '^' => {
                self.bump();
                Ok(if self.flags.contains(Flags::MULTI_LINE) {
                    self.arena.alloc(Ast::StartLine)
                } else {
                    self.arena.alloc(Ast::StartText)
                })
            }
            '$' => {
                self.bump();
                Ok(if self.flags.contains(Flags::MULTI_LINE) {
                    self.arena.alloc(Ast::EndLine)
                } else {
                    self.arena.alloc(Ast::EndText)
                })
            }
            '\\' => {
                self.bump();
                self.escape()
            }
            c => {
                self.bump();
                Ok(self.literal(c))
            }
        }
    }

    fn literal(&mut self, c: char) -> AstId {
        let casei = self.casei();
        let c = if casei { unicode::simple_fold(c) } else { c };
        self.arena.alloc(Ast::Literal { chars: vec![c], casei })
    }

    // postfix ::= '*' '?'? | '+' '?'? | '?' '?'? | counted '?'?
    fn postfix(&mut self, atom: AstId) -> Result<AstId, Error> {
        let default_greedy = !self.flags.contains(Flags::UNGREEDY);
        match self.cur() {
            Some('*') => {
                self.bump();
                let greedy = self.quant_greedy(default_greedy);
                Ok(self.arena.alloc(Ast::Star { child: atom, greedy }))
            }
            Some('+') => {
                self.bump();
                let greedy = self.quant_greedy(default_greedy);
                Ok(self.arena.alloc(Ast::Plus { child: atom, greedy }))
            }
            Some('?') => {
                self.bump();
                let greedy = self.quant_greedy(default_greedy);
                Ok(self.arena.alloc(Ast::Quest { child: atom, greedy }))
            }
            Some('{') if self.counted_repeat_ahead() => {
                let off = self.offset();
                self.bump();
                let min = self.decimal()?;
                let max = if self.eat(',') {
                    if self.cur() == Some('}') { None } else { Some(self.decimal()?) }
                } else {
                    Some(min)
                };
                if !self.eat('}') {
                    return Err(self.err_at(off, "unterminated repetition"));
                }
                if min > MAX_REPEAT || max.map_or(false, |m| m > MAX_REPEAT) {
                    return Err(self.err_at(off, "repetition count too large"));
                }
                if let Some(max) = max {
                    if min > max {
                        return Err(self.err_at(off, "invalid repetition: min exceeds max"));
                    }
                }
                let greedy = self.quant_greedy(default_greedy);
                Ok(self.arena.alloc(Ast::Repeat { child: atom, min, max, greedy }))
            }
            _ => Ok(atom),
        }
    }

    fn quant_greedy(&mut self, default: bool) -> bool {
        if self.eat('?') {
            !default
        } else {
            default
        }
    }

    /// True when the characters at the cursor form a counted repetition
    /// like `{2}`, `{2,}` or `{2,5}`. Anything else (e.g. `{`, `{a}`,
    /// `{,3}`) is an ordinary literal brace.
    fn counted_repeat_ahead(&self) -> bool {
        debug_assert_eq!(self.cur(), Some('{'));
        let mut i = 1;
        let mut digits = 0;
        while let Some(c) = self.peek(i) {
            if c.is_ascii_digit() {
                digits += 1;
                i += 1;
            } else {
                break;
            }
        }
        if digits == 0 {
            return false;
        }
        if self.peek(i) == Some(',') {
            i += 1;
            while let Some(c) = self.peek(i) {
                if c.is_ascii_digit() {
                    i += 1;
                } else {
                    break;
                }
            }
        }
        self.peek(i) == Some('}')
    }

    fn decimal(&mut self) -> Result<u32, Error> {
        let mut n: u32 = 0;
        let mut any = false;
        while let Some(c) = self.cur() {
            let Some(d) = c.to_digit(10) else { break };
            self.bump();
            any = true;
            n = n
                .checked_mul(10)
                .and_then(|n| n.checked_add(d))
                .ok_or_else(|| self.err("repetition count too large"))?;
        }
        if !any {
            return Err(self.err("expected a decimal number"));
        }
        Ok(n)
    }

    // group ::= '(' body ')', with the '(' already consumed.
    fn group(&mut self) -> Result<AstId, Error> {
        let open = self.offset().saturating_sub(1);
        let saved = self.flags;
        if !self.eat('?') {
            let index = self.names.len() as u32;
            self.names.push(None);
            let child = self.alternate()?;
            self.expect_close(open)?;
            self.flags = saved;
            return Ok(self.arena.alloc(Ast::Group { child, index, name: None }));
        }
        match self.cur() {
            None => Err(self.err_at(open, "unterminated group")),
            Some(':') => {
                self.bump();
                let inner = self.alternate()?;
                self.expect_close(open)?;
                self.flags = saved;
                Ok(inner)
            }
            Some('=') => {
                self.bump();
                self.look(open, saved, LookKind::Ahead)
            }
            Some('!') => {
                self.bump();
                self.look(open, saved, LookKind::AheadNegate)
            }
            Some('<') => match self.peek(1) {
                Some('=') => {
                    self.bump();
                    self.bump();
                    self.look(open, saved, LookKind::Behind)
                }
                Some('!') => {
                    self.bump();
                    self.bump();
                    self.look(open, saved, LookKind::BehindNegate)
                }
                _ => {
                    self.bump();
                    self.named_group(open, saved)
                }
            },
            Some('P') => match self.peek(1) {
                Some('<') => {
                    self.bump();
                    self.bump();
                    self.named_group(open, saved)
                }
                Some('=') => Err(Error::Unsupported {
                    offset: open,
                    feature: "named backreference".to_owned(),
                }),
                _ => Err(self.err("invalid group syntax")),
            },
            Some(_) => self.flag_group(open, saved),
        }
    }

    fn look(&mut self, open: usize, saved: Flags, kind: LookKind) -> Result<AstId, Error> {
        let child = self.alternate()?;
        self.expect_close(open)?;
        self.flags = saved;
        Ok(self.arena.alloc(Ast::Look { child, kind }))
    }

    // The name delimiter `<` (or `P<`) has been consumed.
    fn named_group(&mut self, open: usize, saved: Flags) -> Result<AstId, Error> {
        let name_off = self.offset();
        let mut name = String::new();
        while let Some(c) = self.cur() {
            if c.is_ascii_alphanumeric() || c == '_' {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if name.is_empty() || !self.eat('>') {
            return Err(self.err_at(name_off, "invalid capture group name"));
        }
        if self.names.iter().any(|n| n.as_deref() == Some(name.as_str())) {
            return Err(self.err_at(name_off, "duplicate capture group name"));
        }
        let index = self.names.len() as u32;
        self.names.push(Some(name.clone()));
        let child = self.alternate()?;
        self.expect_close(open)?;
        self.flags = saved;
        Ok(self.arena.alloc(Ast::Group { child, index, name: Some(name) }))
    }

    // flag_group ::= '(?' letters ('-' letters)? (')' | ':' body ')')
    fn flag_group(&mut self, open: usize, saved: Flags) -> Result<AstId, Error> {
        let mut add = true;
        let mut flags = self.flags;
        loop {
            let off = self.offset();
            match self.bump() {
                None => return Err(self.err_at(open, "unterminated group")),
                Some(')') => {
                    // `(?i)`: applies to the remainder of the enclosing
                    // group; the caller's frame restores on close.
                    self.flags = flags;
                    return Ok(self.arena.alloc(Ast::Empty));
                }
                Some(':') => {
                    self.flags = flags;
                    let inner = self.alternate()?;
                    self.expect_close(open)?;
                    self.flags = saved;
                    return Ok(inner);
                }
                Some('-') => {
                    if !add {
                        return Err(self.err_at(off, "invalid flag group"));
                    }
                    add = false;
                }
                Some(c) => match Flags::from_letter(c) {
                    Some(f) => {
                        if add {
                            flags.insert(f);
                        } else {
                            flags.remove(f);
                        }
                    }
                    None => {
                        return Err(self.err_at(off, "unrecognized flag"));
                    }
                },
            }
        }
    }

    fn expect_close(&mut self, open: usize) -> Result<(), Error> {
        if self.eat(')') {
            Ok(())
        } else {
            Err(self.err_at(open, "unterminated group"))
        }
    }

    // Escapes outside character classes; the backslash is consumed.
    fn escape(&mut self) -> Result<AstId, Error> {
        let off = self.offset().saturating_sub(1);
        let c = match self.bump() {
            Some(c) => c,
            None => return Err(self.err_at(off, "trailing backslash")),
        };
        match c {
            'd' | 'D' | 's' | 'S' | 'w' | 'W' => {
                let cls = self.perl_class(c);
                Ok(self.arena.alloc(Ast::Class(cls)))
            }
            'p' | 'P' => {
                let cls = self.unicode_class(c == 'P')?;
                Ok(self.arena.alloc(Ast::Class(cls)))
            }
            'b' => Ok(self.arena.alloc(Ast::WordBoundary)),
            'B' => Ok(self.arena.alloc(Ast::NotWordBoundary)),
            'A' => Ok(self.arena.alloc(Ast::StartText)),
            'z' => Ok(self.arena.alloc(Ast::EndText)),
            '1'..='9' => Err(Error::Unsupported {
                offset: off,
                feature: "backreference".to_owned(),
            }),
            c => {
                let lit = self.escape_char(off, c)?;
                Ok(self.literal(lit))
            }
        }
    }

    /// Single-character escapes shared between the top level and class
    /// bodies: control escapes, `\xNN`, `\x{...}`, `\uNNNN` and escaped
    /// punctuation.
    fn escape_char(&mut self, off: usize, c: char) -> Result<char, Error> {
        match c {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            'f' => Ok('\x0C'),
            'v' => Ok('\x0B'),
            'a' => Ok('\x07'),
            '0' => Ok('\0'),
            'x' => {
                if self.eat('{') {
                    self.braced_hex(off)
                } else {
                    self.fixed_hex(off, 2)
                }
            }
            'u' => self.fixed_hex(off, 4),
            c if !c.is_alphanumeric() => Ok(c),
            _ => Err(self.err_at(off, "invalid escape sequence")),
        }
    }

    fn braced_hex(&mut self, off: usize) -> Result<char, Error> {
        let mut value: u32 = 0;
        let mut any = false;
        loop {
            match self.bump() {
                None => return Err(self.err_at(off, "unterminated hex escape")),
                Some('}') => break,
                Some(c) => {
                    let d = c
                        .to_digit(16)
                        .ok_or_else(|| self.err_at(off, "invalid hex escape"))?;
                    any = true;
                    value = value
                        .checked_mul(16)
                        .and_then(|v| v.checked_add(d))
                        .filter(|&v| v <= 0x10FFFF)
                        .ok_or_else(|| self.err_at(off, "invalid character code"))?;
                }
            }
        }
        if !any {
            return Err(self.err_at(off, "invalid hex escape"));
        }
        char::from_u32(value).ok_or_else(|| self.err_at(off, "invalid character code"))
    }

    fn fixed_hex(&mut self, off: usize, digits: u32) -> Result<char, Error> {
        let mut value: u32 = 0;
        for _ in 0..digits {
            let d = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.err_at(off, "invalid hex escape"))?;
            value = value * 16 + d;
        }
        char::from_u32(value).ok_or_else(|| self.err_at(off, "invalid character code"))
    }

    fn perl_class(&self, letter: char) -> CharClass {
        let (table, negate) = match letter {
            'd' => (unicode::PERL_DIGIT, false),
            'D' => (unicode::PERL_DIGIT, true),
            's' => (unicode::PERL_SPACE, false),
            'S' => (unicode::PERL_SPACE, true),
            'w' => (unicode::PERL_WORD, false),
            _ => (unicode::PERL_WORD, true),
        };
        let mut cls = CharClass::from_ranges(table);
        if negate {
            cls.negate();
        }
        cls
    }

    // `\p` / `\P` has been consumed; parses `L` or `{Name}`.
    fn unicode_class(&mut self, negate: bool) -> Result<CharClass, Error> {
        let off = self.offset();
        let name = if self.eat('{') {
            let mut name = String::new();
            loop {
                match self.bump() {
                    None => return Err(self.err_at(off, "unterminated Unicode property")),
                    Some('}') => break,
                    Some(c) => name.push(c),
                }
            }
            name
        } else {
            match self.bump() {
                Some(c) => c.to_string(),
                None => return Err(self.err_at(off, "unterminated Unicode property")),
            }
        };
        let ranges = unicode::property_ranges(&name)
            .ok_or_else(|| self.err_at(off, "unknown Unicode property name"))?;
        let mut cls = CharClass::from_ranges(ranges);
        // Folding applies to the property itself, before any negation.
        if self.casei() {
            cls.case_fold();
        }
        if negate {
            cls.negate();
        }
        Ok(cls)
    }

    // class ::= '[' '^'? item+ ']', with the '[' already consumed.
    fn class(&mut self) -> Result<AstId, Error> {
        let open = self.offset().saturating_sub(1);
        let negate = self.eat('^');
        let mut cls = CharClass::new();
        let mut first = true;
        loop {
            let c = match self.cur() {
                Some(c) => c,
                None => return Err(self.err_at(open, "unterminated character class")),
            };
            match c {
                ']' if !first => {
                    self.bump();
                    break;
                }
                '[' if self.peek(1) == Some(':') => {
                    self.posix_class_into(&mut cls)?;
                }
                '\\' => {
                    self.bump();
                    match self.class_item()? {
                        ClassItem::Set(set) => cls.union(&set),
                        ClassItem::Char(lo) => self.range_into(&mut cls, lo)?,
                    }
                }
                c => {
                    self.bump();
                    self.range_into(&mut cls, c)?;
                }
            }
            first = false;
        }
        if self.casei() {
            cls.case_fold();
        }
        if negate {
            cls.negate();
        }
        Ok(self.arena.alloc(Ast::Class(cls)))
    }

    /// Add `lo` or, if a `-` follows with a range end, the range
    /// `lo-hi`, to the class under construction.
    fn range_into(&mut self, cls: &mut CharClass, lo: char) -> Result<(), Error> {
        let range_ahead = self.cur() == Some('-')
            && self.peek(1).is_some()
            && self.peek(1) != Some(']');
        if !range_ahead {
            return cls.push(lo, lo);
        }
        self.bump();
        let off = self.offset();
        let hi = match self.bump() {
            None => return Err(self.err_at(off, "unterminated character class")),
            Some('\\') => match self.class_item()? {
                ClassItem::Char(c) => c,
                ClassItem::Set(_) => {
                    return Err(self.err_at(off, "invalid range end"));
                }
            },
            Some(c) => c,
        };
        cls.push(lo, hi)
    }

    // One `\`-escaped element of a class body.
    fn class_item(&mut self) -> Result<ClassItem, Error> {
        let off = self.offset().saturating_sub(1);
        let c = match self.bump() {
            Some(c) => c,
            None => return Err(self.err_at(off, "trailing backslash")),
        };
        match c {
            'd' | 'D' | 's' | 'S' | 'w' | 'W' => Ok(ClassItem::Set(self.perl_class(c))),
            'p' | 'P' => Ok(ClassItem::Set(self.unicode_class(c == 'P')?)),
            c => Ok(ClassItem::Char(self.escape_char(off, c)?)),
        }
    }

    // `[:name:]` or `[:^name:]` inside a class body.
    fn posix_class_into(&mut self, cls: &mut CharClass) -> Result<(), Error> {
        let off = self.offset();
        self.bump(); // '['
        self.bump(); // ':'
        let negate = self.eat('^');
        let mut name = String::new();
        while let Some(c) = self.cur() {
            if c.is_ascii_alphabetic() {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if !(self.eat(':') && self.eat(']')) {
            return Err(self.err_at(off, "invalid POSIX character class"));
        }
        let ranges = unicode::posix_class(&name)
            .ok_or_else(|| self.err_at(off, "unknown POSIX character class"))?;
        let mut set = CharClass::from_ranges(ranges);
        if negate {
            set.negate();
        }
        cls.union(&set);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{parse, Parsed};
    use crate::ast::{Ast, LookKind};
    use crate::error::Error;
    use crate::flags::Flags;

    fn p(pattern: &str) -> Parsed {
        parse(pattern, Flags::empty()).unwrap()
    }

    fn perr(pattern: &str) -> Error {
        parse(pattern, Flags::empty()).unwrap_err()
    }

    #[test]
    fn literals_merge() {
        let parsed = p("abc");
        match &parsed.ast[parsed.root] {
            Ast::Literal { chars, casei } => {
                assert_eq!(chars, &['a', 'b', 'c']);
                assert!(!casei);
            }
            node => panic!("expected merged literal, got {:?}", node),
        }
    }

    #[test]
    fn quantifier_binds_last_char() {
        let parsed = p("ab*");
        let Ast::Concat(items) = &parsed.ast[parsed.root] else {
            panic!("expected concat")
        };
        assert_eq!(items.len(), 2);
        assert!(matches!(parsed.ast[items[0]], Ast::Literal { .. }));
        assert!(matches!(parsed.ast[items[1]], Ast::Star { greedy: true, .. }));
    }

    #[test]
    fn lazy_and_ungreedy() {
        let parsed = p("a+?");
        assert!(matches!(parsed.ast[parsed.root], Ast::Plus { greedy: false, .. }));
        let parsed = parse("a+", Flags::UNGREEDY).unwrap();
        assert!(matches!(parsed.ast[parsed.root], Ast::Plus { greedy: false, .. }));
        let parsed = parse("a+?", Flags::UNGREEDY).unwrap();
        assert!(matches!(parsed.ast[parsed.root], Ast::Plus { greedy: true, .. }));
    }

    #[test]
    fn counted_repeats() {
        let parsed = p("a{2,5}");
        assert!(matches!(
            parsed.ast[parsed.root],
            Ast::Repeat { min: 2, max: Some(5), greedy: true, .. }
        ));
        let parsed = p("a{3,}");
        assert!(matches!(parsed.ast[parsed.root], Ast::Repeat { min: 3, max: None, .. }));
        // `{` that is not a quantifier is a literal.
        let parsed = p("a{b");
        assert!(matches!(parsed.ast[parsed.root], Ast::Literal { .. }));
    }

    #[test]
    fn bad_repeats() {
        assert!(matches!(perr("a{3,2}"), Error::Parse { .. }));
        assert!(matches!(perr("*a"), Error::Parse { .. }));
        assert!(matches!(perr("a{1001}"), Error::Parse { .. }));
        assert!(matches!(perr("(|*)"), Error::Parse { .. }));
    }

    #[test]
    fn groups_number_in_open_order() {
        let parsed = p("(a(b))(c)");
        assert_eq!(parsed.cap_names.len(), 4);
        let Ast::Concat(items) = &parsed.ast[parsed.root] else {
            panic!("expected concat")
        };
        assert!(matches!(parsed.ast[items[0]], Ast::Group { index: 1, .. }));
        assert!(matches!(parsed.ast[items[1]], Ast::Group { index: 3, .. }));
    }

    #[test]
    fn named_groups() {
        let parsed = p("(?P<year>x)(?<rest>y)");
        assert_eq!(parsed.cap_names[1].as_deref(), Some("year"));
        assert_eq!(parsed.cap_names[2].as_deref(), Some("rest"));
        assert!(matches!(perr("(?P<dup>a)(?P<dup>b)"), Error::Parse { .. }));
        assert!(matches!(perr("(?P<>a)"), Error::Parse { .. }));
    }

    #[test]
    fn non_capturing_dissolves() {
        let parsed = p("(?:ab)");
        assert!(matches!(parsed.ast[parsed.root], Ast::Literal { .. }));
        assert_eq!(parsed.cap_names.len(), 1);
    }

    #[test]
    fn inline_flags_scope() {
        // The `i` applies to the rest of the group only.
        let parsed = p("a(?:(?i)b)c");
        let Ast::Concat(items) = &parsed.ast[parsed.root] else {
            panic!("expected concat")
        };
        assert_eq!(items.len(), 3);
        assert!(matches!(parsed.ast[items[0]], Ast::Literal { casei: false, .. }));
        assert!(matches!(parsed.ast[items[1]], Ast::Literal { casei: true, .. }));
        assert!(matches!(parsed.ast[items[2]], Ast::Literal { casei: false, .. }));
    }

    #[test]
    fn flag_clearing() {
        let parsed = parse("(?-i)a", Flags::CASE_INSENSITIVE).unwrap();
        assert!(matches!(parsed.ast[parsed.root], Ast::Literal { casei: false, .. }));
    }

    #[test]
    fn anchors_respect_multiline() {
        let parsed = p("^a$");
        let Ast::Concat(items) = &parsed.ast[parsed.root] else {
            panic!("expected concat")
        };
        assert!(matches!(parsed.ast[items[0]], Ast::StartText));
        assert!(matches!(parsed.ast[items[2]], Ast::EndText));
        let parsed = parse("^a$", Flags::MULTI_LINE).unwrap();
        let Ast::Concat(items) = &parsed.ast[parsed.root] else {
            panic!("expected concat")
        };
        assert!(matches!(parsed.ast[items[0]], Ast::StartLine));
        assert!(matches!(parsed.ast[items[2]], Ast::EndLine));
    }

    #[test]
    fn classes() {
        let parsed = p("[a-fk]");
        let Ast::Class(cls) = &parsed.ast[parsed.root] else {
            panic!("expected class")
        };
        assert!(cls.contains('c') && cls.contains('k') && !cls.contains('j'));

        let parsed = p("[^a-z]");
        let Ast::Class(cls) = &parsed.ast[parsed.root] else {
            panic!("expected class")
        };
        assert!(!cls.contains('m') && cls.contains('A'));

        // Leading `]` is a literal; `-` at the edges is a literal.
        let parsed = p("[]a-]");
        let Ast::Class(cls) = &parsed.ast[parsed.root] else {
            panic!("expected class")
        };
        assert!(cls.contains(']') && cls.contains('a') && cls.contains('-'));
    }

    #[test]
    fn class_nested_sets() {
        let parsed = p(r"[\d\s]");
        let Ast::Class(cls) = &parsed.ast[parsed.root] else {
            panic!("expected class")
        };
        assert!(cls.contains('7') && cls.contains(' ') && !cls.contains('x'));

        let parsed = p("[[:alpha:]0]");
        let Ast::Class(cls) = &parsed.ast[parsed.root] else {
            panic!("expected class")
        };
        assert!(cls.contains('q') && cls.contains('0') && !cls.contains('1'));
    }

    #[test]
    fn class_errors() {
        assert!(matches!(perr("[a"), Error::Parse { .. }));
        assert!(matches!(perr("[z-a]"), Error::Class { .. }));
        assert!(matches!(perr(r"[a-\d]"), Error::Parse { .. }));
        assert!(matches!(perr("[[:nope:]]"), Error::Parse { .. }));
    }

    #[test]
    fn escapes() {
        let parsed = p(r"\x41\x{1F600}b\.");
        match &parsed.ast[parsed.root] {
            Ast::Literal { chars, .. } => {
                assert_eq!(chars, &['A', '\u{1F600}', 'b', '.']);
            }
            node => panic!("expected literal, got {:?}", node),
        }
        assert!(matches!(perr(r"\x{110000}"), Error::Parse { .. }));
        assert!(matches!(perr(r"\x{D800}"), Error::Parse { .. }));
        assert!(matches!(perr(r"\q"), Error::Parse { .. }));
        assert!(matches!(perr("\\"), Error::Parse { .. }));
    }

    #[test]
    fn unicode_properties() {
        let parsed = p(r"\p{Greek}");
        let Ast::Class(cls) = &parsed.ast[parsed.root] else {
            panic!("expected class")
        };
        assert!(cls.contains('\u{3B1}') && !cls.contains('a'));

        let parsed = p(r"\pL");
        let Ast::Class(cls) = &parsed.ast[parsed.root] else {
            panic!("expected class")
        };
        assert!(cls.contains('z') && cls.contains('\u{4E2D}'));

        assert!(matches!(perr(r"\p{Klingon}"), Error::Parse { .. }));
    }

    #[test]
    fn backreferences_are_unsupported() {
        assert!(matches!(perr(r"(a)\1"), Error::Unsupported { .. }));
        assert!(matches!(perr(r"(?P<x>a)(?P=x)"), Error::Unsupported { .. }));
    }

    #[test]
    fn lookaround_nodes() {
        let parsed = p("(?=a)(?!b)(?<=c)(?<!d)");
        let Ast::Concat(items) = &parsed.ast[parsed.root] else {
            panic!("expected concat")
        };
        let kinds: Vec<LookKind> = items
            .iter()
            .map(|&id| match parsed.ast[id] {
                Ast::Look { kind, .. } => kind,
                ref node => panic!("expected look, got {:?}", node),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                LookKind::Ahead,
                LookKind::AheadNegate,
                LookKind::Behind,
                LookKind::BehindNegate
            ]
        );
    }

    #[test]
    fn unbalanced_parens() {
        assert!(matches!(perr("(a"), Error::Parse { .. }));
        assert!(matches!(perr("a)"), Error::Parse { .. }));
    }

    #[test]
    fn case_insensitive_literals_prefold() {
        let parsed = parse("K\u{212A}", Flags::CASE_INSENSITIVE).unwrap();
        match &parsed.ast[parsed.root] {
            Ast::Literal { chars, casei } => {
                assert!(*casei);
                assert_eq!(chars, &['k', 'k']);
            }
            node => panic!("expected literal, got {:?}", node),
        }
    }
}
